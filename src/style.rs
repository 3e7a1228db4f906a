/*
 * Implements the visual style system. A `Style` is a cheaply cloneable shared
 * handle to one bundle of presentation values; controls hold one per role and
 * point `current` at whichever matches their interaction state. The
 * `DefaultStyles` registry owns the per-role fallback palettes and, when a
 * palette is rewritten, pushes the new values to every plain-constructed
 * style still tracking it.
 */

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::batch::{FontHandle, TextureHandle};
use crate::color::Color;
use crate::error::{Error, Result};

/// Interaction role a style answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    /// Resting appearance.
    Default,
    /// Pointer is over the control.
    Active,
    /// A button is held down on the control.
    Action,
}

/// The plain presentation values a style carries.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleValues {
    pub back_color: Color,
    pub border_color: Color,
    pub border_thickness: i32,
    pub fore_color: Color,
    pub font: FontHandle,
    pub text_scale: f32,
    pub texture: TextureHandle,
}

#[derive(Debug)]
struct StyleData {
    values: StyleValues,
    role: StyleRole,
    tracks_defaults: bool,
}

#[derive(Debug, Clone)]
pub struct Style {
    data: Rc<RefCell<StyleData>>,
}

impl Style {
    /// Creates a style that mirrors the registry's palette for `role` and
    /// keeps following it when the defaults change.
    pub fn new(defaults: &mut DefaultStyles, role: StyleRole) -> Style {
        let data = Rc::new(RefCell::new(StyleData {
            values: defaults.values(role).clone(),
            role,
            tracks_defaults: true,
        }));
        defaults.subscribe(Rc::downgrade(&data));
        Style { data }
    }

    /// Starts a builder for a detached style. Fields left unset are filled
    /// from the registry's current palette at build time, but the built style
    /// does not follow later default changes.
    pub fn builder(role: StyleRole) -> StyleBuilder {
        StyleBuilder {
            role,
            back_color: None,
            border_color: None,
            border_thickness: None,
            fore_color: None,
            font: None,
            text_scale: None,
            texture: None,
        }
    }

    pub fn role(&self) -> StyleRole {
        self.data.borrow().role
    }

    pub fn back_color(&self) -> Color {
        self.data.borrow().values.back_color
    }

    pub fn set_back_color(&self, color: Color) {
        self.data.borrow_mut().values.back_color = color;
    }

    pub fn border_color(&self) -> Color {
        self.data.borrow().values.border_color
    }

    pub fn set_border_color(&self, color: Color) {
        self.data.borrow_mut().values.border_color = color;
    }

    pub fn border_thickness(&self) -> i32 {
        self.data.borrow().values.border_thickness
    }

    pub fn set_border_thickness(&self, thickness: i32) -> Result<()> {
        if thickness < 0 {
            return Err(Error::InvalidArgument(format!(
                "border thickness must be non-negative, got {thickness}"
            )));
        }
        self.data.borrow_mut().values.border_thickness = thickness;
        Ok(())
    }

    pub fn fore_color(&self) -> Color {
        self.data.borrow().values.fore_color
    }

    pub fn set_fore_color(&self, color: Color) {
        self.data.borrow_mut().values.fore_color = color;
    }

    pub fn font(&self) -> FontHandle {
        self.data.borrow().values.font
    }

    pub fn set_font(&self, font: FontHandle) {
        self.data.borrow_mut().values.font = font;
    }

    pub fn text_scale(&self) -> f32 {
        self.data.borrow().values.text_scale
    }

    pub fn texture(&self) -> TextureHandle {
        self.data.borrow().values.texture
    }

    pub fn set_texture(&self, texture: TextureHandle) {
        self.data.borrow_mut().values.texture = texture;
    }

    /// Whether both handles refer to the same underlying style.
    pub fn same_as(&self, other: &Style) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Style) -> bool {
        self.same_as(other)
    }
}

pub struct StyleBuilder {
    role: StyleRole,
    back_color: Option<Color>,
    border_color: Option<Color>,
    border_thickness: Option<i32>,
    fore_color: Option<Color>,
    font: Option<FontHandle>,
    text_scale: Option<f32>,
    texture: Option<TextureHandle>,
}

impl StyleBuilder {
    pub fn back_color(mut self, color: Color) -> StyleBuilder {
        self.back_color = Some(color);
        self
    }

    pub fn border_color(mut self, color: Color) -> StyleBuilder {
        self.border_color = Some(color);
        self
    }

    pub fn border_thickness(mut self, thickness: i32) -> StyleBuilder {
        self.border_thickness = Some(thickness);
        self
    }

    pub fn fore_color(mut self, color: Color) -> StyleBuilder {
        self.fore_color = Some(color);
        self
    }

    pub fn font(mut self, font: FontHandle) -> StyleBuilder {
        self.font = Some(font);
        self
    }

    pub fn text_scale(mut self, scale: f32) -> StyleBuilder {
        self.text_scale = Some(scale);
        self
    }

    pub fn texture(mut self, texture: TextureHandle) -> StyleBuilder {
        self.texture = Some(texture);
        self
    }

    pub fn build(self, defaults: &DefaultStyles) -> Result<Style> {
        if let Some(thickness) = self.border_thickness
            && thickness < 0
        {
            return Err(Error::InvalidArgument(format!(
                "border thickness must be non-negative, got {thickness}"
            )));
        }
        let fallback = defaults.values(self.role);
        let values = StyleValues {
            back_color: self.back_color.unwrap_or(fallback.back_color),
            border_color: self.border_color.unwrap_or(fallback.border_color),
            border_thickness: self.border_thickness.unwrap_or(fallback.border_thickness),
            fore_color: self.fore_color.unwrap_or(fallback.fore_color),
            font: self.font.unwrap_or(fallback.font),
            text_scale: self.text_scale.unwrap_or(fallback.text_scale),
            texture: self.texture.unwrap_or(fallback.texture),
        };
        Ok(Style {
            data: Rc::new(RefCell::new(StyleData {
                values,
                role: self.role,
                tracks_defaults: false,
            })),
        })
    }
}

/// Registry of the fallback palette for each style role, plus the observer
/// list of styles still tracking it.
pub struct DefaultStyles {
    default: StyleValues,
    active: StyleValues,
    action: StyleValues,
    subscribers: Vec<Weak<RefCell<StyleData>>>,
}

impl DefaultStyles {
    pub(crate) fn new() -> DefaultStyles {
        // Placeholder palette; `reset` installs the real one once host
        // resources are known.
        let placeholder = StyleValues {
            back_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            border_thickness: 0,
            fore_color: Color::BLACK,
            font: FontHandle::new(0),
            text_scale: 1.0,
            texture: TextureHandle::new(0),
        };
        DefaultStyles {
            default: placeholder.clone(),
            active: placeholder.clone(),
            action: placeholder,
            subscribers: Vec::new(),
        }
    }

    pub fn values(&self, role: StyleRole) -> &StyleValues {
        match role {
            StyleRole::Default => &self.default,
            StyleRole::Active => &self.active,
            StyleRole::Action => &self.action,
        }
    }

    /// Replaces the palette for `role` and pushes it to every subscribed
    /// style of that role.
    pub fn set(&mut self, role: StyleRole, values: StyleValues) {
        debug!("DefaultStyles: Palette for {role:?} replaced");
        match role {
            StyleRole::Default => self.default = values,
            StyleRole::Active => self.active = values,
            StyleRole::Action => self.action = values,
        }
        self.broadcast();
    }

    /// Installs the stock palettes over the host's font and blank texture.
    pub fn reset(&mut self, font: FontHandle, text_scale: f32, texture: TextureHandle) {
        let palette = |back_color, border_color| StyleValues {
            back_color,
            border_color,
            border_thickness: 2,
            fore_color: Color::BLACK,
            font,
            text_scale,
            texture,
        };
        self.set(StyleRole::Default, palette(Color::BUTTON_FACE, Color::BLACK));
        self.set(StyleRole::Active, palette(Color::LIGHT_BLUE, Color::DARK_BLUE));
        self.set(StyleRole::Action, palette(Color::BLUE, Color::DARK_BLUE));
    }

    fn subscribe(&mut self, style: Weak<RefCell<StyleData>>) {
        self.subscribers.push(style);
    }

    fn broadcast(&mut self) {
        self.subscribers.retain(|weak| weak.upgrade().is_some());
        for style in self.subscribers.iter().filter_map(Weak::upgrade) {
            let mut data = style.borrow_mut();
            if data.tracks_defaults {
                let role = data.role;
                data.values = self.values(role).clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DefaultStyles {
        let mut defaults = DefaultStyles::new();
        defaults.reset(FontHandle::new(1), 1.0, TextureHandle::new(1));
        defaults
    }

    #[test]
    fn plain_style_follows_default_changes_for_its_role() {
        let mut defaults = registry();
        let active = Style::new(&mut defaults, StyleRole::Active);
        let default = Style::new(&mut defaults, StyleRole::Default);

        let mut values = defaults.values(StyleRole::Active).clone();
        values.back_color = Color::GREEN;
        defaults.set(StyleRole::Active, values);

        assert_eq!(active.back_color(), Color::GREEN);
        assert_eq!(default.back_color(), Color::BUTTON_FACE);
    }

    #[test]
    fn built_style_fills_gaps_but_stays_detached() {
        let mut defaults = registry();
        let style = Style::builder(StyleRole::Default)
            .back_color(Color::WHITE)
            .build(&defaults)
            .unwrap();
        assert_eq!(style.back_color(), Color::WHITE);
        assert_eq!(style.border_thickness(), 2);

        let mut values = defaults.values(StyleRole::Default).clone();
        values.back_color = Color::GREEN;
        defaults.set(StyleRole::Default, values);
        assert_eq!(style.back_color(), Color::WHITE, "detached style must not re-pull");
    }

    #[test]
    fn builder_rejects_negative_border_thickness() {
        let defaults = registry();
        let result = Style::builder(StyleRole::Default)
            .border_thickness(-1)
            .build(&defaults);
        assert!(result.is_err());
    }

    #[test]
    fn dropped_styles_fall_off_the_observer_list() {
        let mut defaults = registry();
        {
            let _style = Style::new(&mut defaults, StyleRole::Default);
            assert_eq!(defaults.subscribers.len(), 1);
        }
        let values = defaults.values(StyleRole::Default).clone();
        defaults.set(StyleRole::Default, values);
        assert!(defaults.subscribers.is_empty());
    }

    #[test]
    fn clones_share_the_same_values() {
        let mut defaults = registry();
        let style = Style::new(&mut defaults, StyleRole::Default);
        let alias = style.clone();
        alias.set_back_color(Color::GREEN);
        assert_eq!(style.back_color(), Color::GREEN);
        assert!(style.same_as(&alias));
    }
}
