/*
 * A push button. Content is a closed union: a centered text caption, a
 * texture stretched over the face, or a caller-supplied shape list layered
 * over the background. Release of the default click button raises
 * `UiEvent::ButtonClicked` and latches a flag composite controls poll with
 * `take_click`.
 */

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, ControlEvent, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::shapes::{RectangleShape, Shape, TextShape};
use crate::batch::TextureHandle;
use crate::style::{Style, StyleRole};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;

/// What a button shows on its face.
#[derive(Debug, Clone)]
pub enum ButtonContent {
    Text(String),
    Texture(TextureHandle),
    Shapes(Vec<Shape>),
}

pub struct Button {
    base: ControlBase,
    visual: Visual,
    content: ButtonContent,
    /// Resting style installed at initialization instead of the registry
    /// default. Containers use this to restyle embedded buttons.
    resting_style: Option<Style>,
    clicked: bool,
}

impl Button {
    pub fn new(ctx: &mut UiContext) -> Button {
        Button {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            content: ButtonContent::Text("Button".into()),
            resting_style: None,
            clicked: false,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    pub fn content(&self) -> &ButtonContent {
        &self.content
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ButtonContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = ButtonContent::Text(text.into());
        self.visual.refresh();
    }

    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.content = ButtonContent::Texture(texture);
        self.visual.refresh();
    }

    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.content = ButtonContent::Shapes(shapes);
        self.visual.refresh();
    }

    /// Overrides the resting (default-role) style. Applied immediately when
    /// the button is already live, or at initialization otherwise.
    pub fn set_resting_style(&mut self, style: Style) {
        if let Some(slots) = self.visual.styles_mut() {
            slots.default = style.clone();
            slots.current = style.clone();
            self.visual.refresh();
        }
        self.resting_style = Some(style);
    }

    /// True once per click of the default button; polling resets the flag.
    pub fn take_click(&mut self) -> bool {
        std::mem::replace(&mut self.clicked, false)
    }

    fn initialize(&mut self, ctx: &mut UiContext) {
        self.visual.ensure_styles(&mut ctx.styles);
        let resting = match self.resting_style.clone() {
            Some(style) => Some(style),
            None => Style::builder(StyleRole::Default)
                .back_color(Color::LIGHT_GRAY)
                .build(&ctx.styles)
                .ok(),
        };
        if let (Some(style), Some(slots)) = (resting, self.visual.styles_mut()) {
            slots.default = style.clone();
            slots.current = style;
        }
        self.visual.refresh();
        self.base.mark_initialized();
    }

    fn rebuild(&mut self, ctx: &mut UiContext) {
        let Some(style) = self.visual.current_style() else {
            return;
        };
        let bounds = self.visual.screen_rectangle();
        self.visual.shapes_mut().clear();
        if bounds.is_empty() {
            return;
        }
        if let Ok(face) = RectangleShape::styled(bounds, style.clone()) {
            self.visual.shapes_mut().push(Shape::Rectangle(face));
        }
        match &self.content {
            ButtonContent::Text(text) => {
                let Some(measurer) = ctx.measurer() else {
                    return;
                };
                if let Ok(caption) = TextShape::fitted(
                    text.clone(),
                    style.font(),
                    style.fore_color(),
                    bounds,
                    style.text_scale(),
                    measurer,
                ) {
                    self.visual.shapes_mut().push(Shape::Text(caption));
                }
            }
            ButtonContent::Texture(_) => {}
            ButtonContent::Shapes(shapes) => {
                self.visual.shapes_mut().extend(shapes.iter().cloned());
            }
        }
    }

    fn handle_events(&mut self, ctx: &mut UiContext, events: &[ControlEvent]) {
        for event in events {
            if *event == ControlEvent::Click {
                self.clicked = true;
                ctx.push_event(UiEvent::ButtonClicked {
                    control: self.base.id(),
                });
            }
        }
    }
}

impl Control for Button {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn visual(&self) -> Option<&Visual> {
        Some(&self.visual)
    }

    fn visual_mut(&mut self) -> Option<&mut Visual> {
        Some(&mut self.visual)
    }

    fn update(&mut self, ctx: &mut UiContext, _tick: Tick) {
        if !ctx.is_ready() {
            return;
        }
        if !self.base.is_initialized() {
            self.initialize(ctx);
        }
        if self.visual.needs_rebuild() {
            self.rebuild(ctx);
            self.visual.finish_rebuild();
        }
        let events = drive_pointer(&self.base, &mut self.visual, ctx);
        self.handle_events(ctx, &events);
    }

    fn draw(&mut self, ctx: &mut UiContext) {
        self.visual.draw(ctx);
        if !self.visual.visible() {
            return;
        }
        if let ButtonContent::Texture(texture) = self.content {
            let bounds = self.visual.screen_rectangle();
            if let Some(batch) = ctx.batch_mut() {
                batch.begin(true);
                batch.draw_quad(texture, bounds, Color::WHITE);
                batch.end(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ready_context, tick};
    use crate::geometry::{Point, Rectangle};
    use crate::input::{MouseButton, PointerSnapshot};

    #[test]
    fn first_update_builds_face_and_caption() {
        let mut ctx = ready_context();
        let mut button = Button::new(&mut ctx);
        button.update(&mut ctx, tick(0));
        assert_eq!(button.visual().shapes().len(), 2);
        assert_eq!(
            button.visual().screen_rectangle(),
            Rectangle::new(0, 0, 120.0, 30.0).unwrap()
        );
    }

    #[test]
    fn resting_style_defaults_to_light_gray() {
        let mut ctx = ready_context();
        let mut button = Button::new(&mut ctx);
        button.update(&mut ctx, tick(0));
        let slots = button.visual().styles().unwrap();
        assert_eq!(slots.current.back_color(), Color::LIGHT_GRAY);
    }

    #[test]
    fn click_latches_until_polled_and_reaches_the_queue() {
        let mut ctx = ready_context();
        let mut button = Button::new(&mut ctx);
        button.update(&mut ctx, tick(0));

        ctx.begin_tick(PointerSnapshot::at(10, 10));
        button.update(&mut ctx, tick(16));
        ctx.begin_tick(PointerSnapshot::at(10, 10).with_pressed(MouseButton::Left));
        button.update(&mut ctx, tick(32));
        ctx.begin_tick(PointerSnapshot::at(10, 10));
        button.update(&mut ctx, tick(48));

        assert!(button.take_click());
        assert!(!button.take_click(), "take_click resets the latch");
        let id = button.base().id();
        assert!(
            ctx.take_events()
                .iter()
                .any(|e| *e == UiEvent::ButtonClicked { control: id })
        );
    }

    #[test]
    fn text_change_defers_rebuild_to_the_next_tick() {
        let mut ctx = ready_context();
        let mut button = Button::new(&mut ctx);
        button.update(&mut ctx, tick(0));
        button.set_text("Go");
        assert!(button.visual().needs_rebuild());
        button.update(&mut ctx, tick(16));
        assert!(!button.visual().needs_rebuild());
        let caption = button.visual().shapes().iter().find_map(|s| match s {
            Shape::Text(text) => Some(text.text().to_string()),
            _ => None,
        });
        assert_eq!(caption.as_deref(), Some("Go"));
    }

    #[test]
    fn shape_content_joins_the_hit_surface() {
        let mut ctx = ready_context();
        let mut button = Button::new(&mut ctx);
        button.update(&mut ctx, tick(0));
        let extra = Rectangle::new(200, 0, 10.0, 10.0).unwrap();
        let shape = crate::shapes::RectangleShape::filled(extra, Color::GREEN, &ctx.styles)
            .map(Shape::Rectangle)
            .unwrap();
        button.set_shapes(vec![shape]);
        button.update(&mut ctx, tick(16));
        assert!(button.visual().hit_test(Point::new(205, 5)));
    }
}
