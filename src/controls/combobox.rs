/*
 * A drop-down selector built from buttons: a private selector button showing
 * the current choice, plus one generated item button per entry stacked
 * beneath it. The item list is diffed once per tick; any change tears the
 * item buttons down and regenerates them.
 */

use log::debug;

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, Visual};
use crate::controls::button::Button;
use crate::controls::layout_rect;
use crate::geometry::Point;
use crate::style::{Style, StyleRole};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;

pub struct ComboBox {
    base: ControlBase,
    visual: Visual,
    selector: Button,
    items: Vec<String>,
    shown_items: Vec<String>,
    item_buttons: Vec<Button>,
    expanded: bool,
    selected: Option<usize>,
}

impl ComboBox {
    pub fn new(ctx: &mut UiContext) -> ComboBox {
        let mut selector = Button::new(ctx);
        selector.set_text("ComboBox");
        ComboBox {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            selector,
            items: Vec::new(),
            shown_items: Vec::new(),
            item_buttons: Vec::new(),
            expanded: false,
            selected: None,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replaces the item list. The item buttons follow on the next update.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    pub fn item_buttons(&self) -> &[Button] {
        &self.item_buttons
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, ctx: &mut UiContext, expanded: bool) {
        if self.expanded == expanded {
            return;
        }
        self.expanded = expanded;
        for button in &mut self.item_buttons {
            button.visual_mut().set_visible(expanded);
        }
        ctx.push_event(UiEvent::ExpandedChanged {
            control: self.base.id(),
            expanded,
        });
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    fn select(&mut self, ctx: &mut UiContext, index: usize) {
        let Some(value) = self.items.get(index).cloned() else {
            return;
        };
        self.selected = Some(index);
        self.selector.set_text(value.clone());
        self.set_expanded(ctx, false);
        ctx.push_event(UiEvent::SelectionChanged {
            control: self.base.id(),
            index,
            value,
        });
    }

    fn item_style(ctx: &UiContext) -> Option<Style> {
        Style::builder(StyleRole::Default)
            .back_color(Color::WHITE)
            .border_thickness(1)
            .build(&ctx.styles)
            .ok()
    }

    fn regenerate_items(&mut self, ctx: &mut UiContext) {
        debug!(
            "ComboBox: Control {} regenerating {} item buttons",
            self.base.id().raw(),
            self.items.len()
        );
        self.item_buttons.clear();
        for text in &self.items {
            let mut button = Button::new(ctx);
            button.base_mut().set_parent(ctx, Some(self.base.id()));
            button.set_text(text.clone());
            if let Some(style) = Self::item_style(ctx) {
                button.set_resting_style(style);
            }
            button.visual_mut().set_visible(self.expanded);
            self.item_buttons.push(button);
        }
        self.shown_items = self.items.clone();
        if let Some(selected) = self.selected
            && selected >= self.items.len()
        {
            self.selected = None;
        }
        self.layout_items();
    }

    /// Keeps the selector on the combo rectangle and the items stacked below
    /// it, one selector height apiece.
    fn layout_items(&mut self) {
        let bounds = self.visual.screen_rectangle();
        self.selector.visual_mut().set_screen_rectangle(bounds);
        let step = bounds.height() as i32;
        for (index, button) in self.item_buttons.iter_mut().enumerate() {
            let slot = layout_rect(
                bounds.x,
                bounds.y + step * (index as i32 + 1),
                bounds.width(),
                bounds.height(),
            );
            button.visual_mut().set_screen_rectangle(slot);
        }
    }
}

impl Control for ComboBox {
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

    fn update(&mut self, ctx: &mut UiContext, tick: Tick) {
        if !ctx.is_ready() {
            return;
        }
        if !self.base.is_initialized() {
            self.visual.ensure_styles(&mut ctx.styles);
            self.base.mark_initialized();
        }
        if self.items != self.shown_items {
            self.regenerate_items(ctx);
        }
        if self.visual.needs_rebuild() {
            self.layout_items();
            self.visual.finish_rebuild();
        }
        self.selector.update(ctx, tick);
        if self.selector.take_click() {
            let toggled = !self.expanded;
            self.set_expanded(ctx, toggled);
        }
        let mut chosen = None;
        for (index, button) in self.item_buttons.iter_mut().enumerate() {
            button.update(ctx, tick);
            if button.take_click() {
                chosen = Some(index);
            }
        }
        if let Some(index) = chosen {
            self.select(ctx, index);
        }
    }

    fn draw(&mut self, ctx: &mut UiContext) {
        if !self.visual.visible() {
            return;
        }
        self.selector.draw(ctx);
        for button in &mut self.item_buttons {
            button.draw(ctx);
        }
    }

    fn translate_by(&mut self, delta: Point) {
        let target = self.visual.screen_rectangle().translated(delta);
        self.visual.set_screen_rectangle(target);
        self.layout_items();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, PointerSnapshot};
    use crate::test_support::{ready_context, tick};

    fn items() -> Vec<String> {
        vec!["red".into(), "green".into(), "blue".into()]
    }

    fn click_at(ctx: &mut UiContext, combo: &mut ComboBox, x: i32, y: i32, at: u64) {
        ctx.begin_tick(PointerSnapshot::at(x, y));
        combo.update(ctx, tick(at));
        ctx.begin_tick(PointerSnapshot::at(x, y).with_pressed(MouseButton::Left));
        combo.update(ctx, tick(at + 16));
        ctx.begin_tick(PointerSnapshot::at(x, y));
        combo.update(ctx, tick(at + 32));
    }

    #[test]
    fn item_buttons_follow_the_item_list() {
        let mut ctx = ready_context();
        let mut combo = ComboBox::new(&mut ctx);
        combo.set_items(items());
        combo.update(&mut ctx, tick(0));
        assert_eq!(combo.item_buttons().len(), 3);
        assert_eq!(combo.item_buttons()[1].text(), Some("green"));
        // Stacked one selector height apart, hidden while collapsed.
        assert_eq!(
            combo.item_buttons()[2].visual().screen_location(),
            Point::new(0, 90)
        );
        assert!(!combo.item_buttons()[0].visual().visible());

        combo.set_items(vec!["only".into()]);
        combo.update(&mut ctx, tick(16));
        assert_eq!(combo.item_buttons().len(), 1);
    }

    #[test]
    fn selector_click_expands_and_item_click_selects() {
        let mut ctx = ready_context();
        let mut combo = ComboBox::new(&mut ctx);
        combo.set_items(items());
        combo.update(&mut ctx, tick(0));

        click_at(&mut ctx, &mut combo, 10, 10, 16);
        assert!(combo.is_expanded());
        assert!(combo.item_buttons()[0].visual().visible());

        // Second row below the selector is "green".
        click_at(&mut ctx, &mut combo, 10, 75, 100);
        assert!(!combo.is_expanded());
        assert_eq!(combo.selected_index(), Some(1));
        assert_eq!(combo.selected_value(), Some("green"));
        assert_eq!(combo.selector.text(), Some("green"));
        let id = combo.base().id();
        assert!(ctx.take_events().iter().any(|e| {
            *e == UiEvent::SelectionChanged {
                control: id,
                index: 1,
                value: "green".into(),
            }
        }));
    }

    #[test]
    fn collapsed_items_ignore_the_pointer() {
        let mut ctx = ready_context();
        let mut combo = ComboBox::new(&mut ctx);
        combo.set_items(items());
        combo.update(&mut ctx, tick(0));

        click_at(&mut ctx, &mut combo, 10, 45, 16);
        assert_eq!(combo.selected_index(), None);
    }

    #[test]
    fn item_buttons_are_parented_to_the_combo() {
        let mut ctx = ready_context();
        let mut combo = ComboBox::new(&mut ctx);
        combo.set_items(items());
        combo.update(&mut ctx, tick(0));
        let owner = combo.base().id();
        assert!(combo
            .item_buttons()
            .iter()
            .all(|b| b.base().parent() == Some(owner)));
    }
}
