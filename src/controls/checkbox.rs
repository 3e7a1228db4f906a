/*
 * A toggle with a square mark box on the left and a caption to its right.
 * While a button is held over the control the box previews the would-be mark
 * at half intensity; release of the default button commits the toggle.
 */

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, ControlEvent, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::geometry::Point;
use crate::shapes::{RectangleShape, Shape, TextShape};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;
const BOX_EDGE: f32 = 30.0;
const TEXT_GAP: i32 = 6;

pub struct CheckBox {
    base: ControlBase,
    visual: Visual,
    text: String,
    checked: bool,
    /// Preview fill while a press is in flight.
    fill: bool,
}

impl CheckBox {
    pub fn new(ctx: &mut UiContext) -> CheckBox {
        CheckBox {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            text: "CheckBox".into(),
            checked: false,
            fill: false,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visual.refresh();
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, ctx: &mut UiContext, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        self.fill = checked;
        self.visual.refresh();
        ctx.push_event(UiEvent::CheckedChanged {
            control: self.base.id(),
            checked,
        });
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
        let edge = BOX_EDGE.min(bounds.height());
        let mark_box = layout_rect(bounds.x, bounds.y, edge, edge);
        if let Ok(frame) = RectangleShape::bordered(
            mark_box,
            style.border_thickness(),
            style.border_color(),
            Color::TRANSPARENT,
            &ctx.styles,
        ) {
            self.visual.shapes_mut().push(Shape::Rectangle(frame));
        }
        if self.checked || self.fill {
            let intensity = if self.checked { 1.0 } else { 0.5 };
            let inset = style.border_thickness() + 2;
            let mark = layout_rect(
                mark_box.x + inset,
                mark_box.y + inset,
                mark_box.width() - 2.0 * inset as f32,
                mark_box.height() - 2.0 * inset as f32,
            );
            if let Ok(mark) =
                RectangleShape::filled(mark, style.back_color().scaled(intensity), &ctx.styles)
            {
                self.visual.shapes_mut().push(Shape::Rectangle(mark));
            }
        }
        let Some(measurer) = ctx.measurer() else {
            return;
        };
        let text_size = ctx.measure(style.font(), &self.text, style.text_scale());
        let text_origin = Point::new(
            mark_box.right() + TEXT_GAP,
            bounds.y + ((bounds.height() - text_size.height()) / 2.0) as i32,
        );
        if let Ok(caption) = TextShape::positioned(
            self.text.clone(),
            style.font(),
            style.fore_color(),
            text_origin,
            style.text_scale(),
            measurer,
        ) {
            self.visual.shapes_mut().push(Shape::Text(caption));
        }
    }

    fn handle_events(&mut self, ctx: &mut UiContext, events: &[ControlEvent]) {
        for event in events {
            match event {
                ControlEvent::MouseClick(_) => {
                    self.fill = true;
                    self.visual.refresh();
                }
                ControlEvent::Click => {
                    let next = !self.checked;
                    self.set_checked(ctx, next);
                }
                ControlEvent::MouseLeave => {
                    if self.fill != self.checked {
                        self.fill = self.checked;
                        self.visual.refresh();
                    }
                }
                _ => {}
            }
        }
    }
}

impl Control for CheckBox {
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
            self.visual.ensure_styles(&mut ctx.styles);
            self.base.mark_initialized();
        }
        if self.visual.needs_rebuild() {
            self.rebuild(ctx);
            self.visual.finish_rebuild();
        }
        let events = drive_pointer(&self.base, &mut self.visual, ctx);
        self.handle_events(ctx, &events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, PointerSnapshot};
    use crate::test_support::{ready_context, tick};

    fn click_through(ctx: &mut UiContext, checkbox: &mut CheckBox, x: i32, y: i32) {
        ctx.begin_tick(PointerSnapshot::at(x, y));
        checkbox.update(ctx, tick(0));
        ctx.begin_tick(PointerSnapshot::at(x, y).with_pressed(MouseButton::Left));
        checkbox.update(ctx, tick(16));
        ctx.begin_tick(PointerSnapshot::at(x, y));
        checkbox.update(ctx, tick(32));
    }

    #[test]
    fn click_toggles_and_notifies() {
        let mut ctx = ready_context();
        let mut checkbox = CheckBox::new(&mut ctx);
        checkbox.update(&mut ctx, tick(0));
        ctx.take_events();

        click_through(&mut ctx, &mut checkbox, 10, 10);
        assert!(checkbox.checked());
        let id = checkbox.base().id();
        assert!(ctx.take_events().iter().any(|e| {
            *e == UiEvent::CheckedChanged {
                control: id,
                checked: true,
            }
        }));

        click_through(&mut ctx, &mut checkbox, 10, 10);
        assert!(!checkbox.checked());
    }

    #[test]
    fn checked_box_carries_a_mark_shape() {
        let mut ctx = ready_context();
        let mut checkbox = CheckBox::new(&mut ctx);
        checkbox.update(&mut ctx, tick(0));
        let unchecked = checkbox.visual().shapes().len();

        checkbox.set_checked(&mut ctx, true);
        checkbox.update(&mut ctx, tick(16));
        assert_eq!(checkbox.visual().shapes().len(), unchecked + 1);
    }

    #[test]
    fn abandoned_press_clears_the_preview_fill() {
        let mut ctx = ready_context();
        let mut checkbox = CheckBox::new(&mut ctx);
        checkbox.update(&mut ctx, tick(0));

        ctx.begin_tick(PointerSnapshot::at(10, 10));
        checkbox.update(&mut ctx, tick(16));
        ctx.begin_tick(PointerSnapshot::at(10, 10).with_pressed(MouseButton::Left));
        checkbox.update(&mut ctx, tick(32));
        assert!(checkbox.fill);

        // Wander away with nothing pressed: the leave clears the preview.
        ctx.begin_tick(PointerSnapshot::at(500, 500));
        checkbox.update(&mut ctx, tick(48));
        assert!(!checkbox.fill);
        assert!(!checkbox.checked());
    }
}
