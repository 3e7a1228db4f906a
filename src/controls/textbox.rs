/*
 * A single-line text input. A click takes keyboard focus; releasing the
 * default button outside the control gives it up. Text that outgrows the box
 * is cropped from the left so the caret end stays visible, and the drawn text
 * is scissor-clipped to the control rectangle.
 */

use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, ControlEvent, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::input::{KeyInput, MouseButton, SpecialKey};
use crate::shapes::{RectangleShape, Shape, TextShape};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;
const TEXT_INSET: i32 = 4;

pub struct TextBox {
    base: ControlBase,
    visual: Visual,
    text: String,
    focused: bool,
}

impl TextBox {
    pub fn new(ctx: &mut UiContext) -> TextBox {
        TextBox {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            text: String::new(),
            focused: false,
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

    pub fn set_text(&mut self, ctx: &mut UiContext, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.visual.refresh();
        ctx.push_event(UiEvent::TextChanged {
            control: self.base.id(),
            text: self.text.clone(),
        });
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self, ctx: &mut UiContext) {
        self.focused = true;
        ctx.keyboard.set_receiver(Some(self.base.id()));
    }

    pub fn unfocus(&mut self, ctx: &mut UiContext) {
        self.focused = false;
        if ctx.keyboard.receiver() == Some(self.base.id()) {
            ctx.keyboard.set_receiver(None);
        }
    }

    fn consume_keys(&mut self, ctx: &mut UiContext) {
        let keys = ctx.keyboard.drain_for(self.base.id());
        if keys.is_empty() {
            return;
        }
        let mut edited = false;
        for key in keys {
            match key {
                KeyInput::Character(c) if !c.is_control() => {
                    self.text.push(c);
                    edited = true;
                }
                KeyInput::Character(_) => {}
                KeyInput::Special(SpecialKey::Backspace) => {
                    edited |= self.text.pop().is_some();
                }
                KeyInput::Special(_) => {}
                KeyInput::Paste => {
                    if let Some(pasted) = ctx.clipboard_text() {
                        self.text.push_str(&pasted);
                        edited = true;
                    }
                }
            }
        }
        if edited {
            self.visual.refresh();
            ctx.push_event(UiEvent::TextChanged {
                control: self.base.id(),
                text: self.text.clone(),
            });
        }
    }

    /// Drops leading characters until the remainder fits the inner width.
    fn visible_text(&self, ctx: &UiContext, font: crate::batch::FontHandle, scale: f32) -> String {
        let limit = self.visual.screen_rectangle().width() - 2.0 * TEXT_INSET as f32;
        let mut visible = self.text.as_str();
        while !visible.is_empty() && ctx.measure(font, visible, scale).width() > limit {
            let mut chars = visible.chars();
            chars.next();
            visible = chars.as_str();
        }
        visible.to_string()
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
        let visible = self.visible_text(ctx, style.font(), style.text_scale());
        if visible.is_empty() {
            return;
        }
        let text_size = ctx.measure(style.font(), &visible, style.text_scale());
        let origin = crate::geometry::Point::new(
            bounds.x + TEXT_INSET,
            bounds.y + ((bounds.height() - text_size.height()) / 2.0) as i32,
        );
        let clip = layout_rect(
            bounds.x + TEXT_INSET,
            bounds.y,
            bounds.width() - 2.0 * TEXT_INSET as f32,
            bounds.height(),
        );
        let Some(measurer) = ctx.measurer() else {
            return;
        };
        if let Ok(text) = TextShape::clipped(
            visible,
            style.font(),
            style.fore_color(),
            origin,
            style.text_scale(),
            clip,
            measurer,
        ) {
            self.visual.shapes_mut().push(Shape::Text(text));
        }
    }

    fn handle_events(&mut self, ctx: &mut UiContext, events: &[ControlEvent]) {
        for event in events {
            if *event == ControlEvent::Click {
                self.focus(ctx);
            }
        }
    }
}

impl Control for TextBox {
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
        let before = self.visual.previous_pointer();
        let events = drive_pointer(&self.base, &mut self.visual, ctx);
        self.handle_events(ctx, &events);

        // Release focus when the default button comes up off the control.
        let now = ctx.pointer.snapshot();
        let default_button = ctx.pointer.default_click_button();
        if self.focused
            && before.is_pressed(default_button)
            && !now.is_pressed(default_button)
            && !self.visual.hit_test(now.position())
        {
            self.unfocus(ctx);
        }
        if self.focused && ctx.keyboard.receiver() != Some(self.base.id()) {
            ctx.keyboard.set_receiver(Some(self.base.id()));
        }
        self.consume_keys(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSnapshot;
    use crate::test_support::{ready_context, ready_context_with_clipboard, tick};

    fn click(ctx: &mut UiContext, textbox: &mut TextBox, x: i32, y: i32, at: u64) {
        ctx.begin_tick(PointerSnapshot::at(x, y));
        textbox.update(ctx, tick(at));
        ctx.begin_tick(PointerSnapshot::at(x, y).with_pressed(MouseButton::Left));
        textbox.update(ctx, tick(at + 16));
        ctx.begin_tick(PointerSnapshot::at(x, y));
        textbox.update(ctx, tick(at + 32));
    }

    #[test]
    fn click_focuses_and_keys_edit_the_text() {
        let mut ctx = ready_context();
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));

        click(&mut ctx, &mut textbox, 10, 10, 16);
        assert!(textbox.is_focused());
        assert_eq!(ctx.keyboard.receiver(), Some(textbox.base().id()));

        ctx.keyboard.push(KeyInput::Character('h'));
        ctx.keyboard.push(KeyInput::Character('i'));
        ctx.begin_tick(PointerSnapshot::at(10, 10));
        textbox.update(&mut ctx, tick(100));
        assert_eq!(textbox.text(), "hi");

        ctx.keyboard.push(KeyInput::Special(SpecialKey::Backspace));
        ctx.begin_tick(PointerSnapshot::at(10, 10));
        textbox.update(&mut ctx, tick(116));
        assert_eq!(textbox.text(), "h");
    }

    #[test]
    fn unfocused_textbox_ignores_key_events() {
        let mut ctx = ready_context();
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));
        ctx.keyboard.push(KeyInput::Character('x'));
        textbox.update(&mut ctx, tick(16));
        assert_eq!(textbox.text(), "");
    }

    #[test]
    fn release_outside_drops_focus() {
        let mut ctx = ready_context();
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));
        click(&mut ctx, &mut textbox, 10, 10, 16);
        assert!(textbox.is_focused());

        ctx.begin_tick(PointerSnapshot::at(400, 400).with_pressed(MouseButton::Left));
        textbox.update(&mut ctx, tick(100));
        ctx.begin_tick(PointerSnapshot::at(400, 400));
        textbox.update(&mut ctx, tick(116));
        assert!(!textbox.is_focused());
        assert_eq!(ctx.keyboard.receiver(), None);
    }

    #[test]
    fn paste_appends_the_clipboard_text() {
        let mut ctx = ready_context_with_clipboard(Some("paste".into()));
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));
        click(&mut ctx, &mut textbox, 10, 10, 16);

        ctx.keyboard.push(KeyInput::Paste);
        ctx.begin_tick(PointerSnapshot::at(10, 10));
        textbox.update(&mut ctx, tick(100));
        assert_eq!(textbox.text(), "paste");
        let id = textbox.base().id();
        assert!(ctx.take_events().iter().any(|e| {
            *e == UiEvent::TextChanged {
                control: id,
                text: "paste".into(),
            }
        }));
    }

    #[test]
    fn overflowing_text_is_cropped_from_the_left() {
        let mut ctx = ready_context();
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));
        // 20 characters at 10px each against a 112px inner width.
        textbox.set_text(&mut ctx, "abcdefghijklmnopqrst");
        textbox.update(&mut ctx, tick(16));
        let shown = textbox.visual().shapes().iter().find_map(|s| match s {
            Shape::Text(text) => Some(text.text().to_string()),
            _ => None,
        });
        assert_eq!(shown.as_deref(), Some("jklmnopqrst"));
    }

    #[test]
    fn drawn_text_is_clipped_to_the_control() {
        let mut ctx = ready_context();
        let mut textbox = TextBox::new(&mut ctx);
        textbox.update(&mut ctx, tick(0));
        textbox.set_text(&mut ctx, "abc");
        textbox.update(&mut ctx, tick(16));
        let clip = textbox.visual().shapes().iter().find_map(|s| match s {
            Shape::Text(text) => text.clip(),
            _ => None,
        });
        assert_eq!(clip, Some(layout_rect(4, 0, 112.0, 30.0)));
    }
}
