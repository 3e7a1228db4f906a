/*
 * Provides the public entry point for the spriteforms crate, a retained-mode
 * widget toolkit (forms, buttons, sliders, text boxes) that renders through a
 * host game engine's sprite batch. The host supplies pointer snapshots, key
 * events and the drawing/measuring backends; the toolkit owns widget state,
 * layout, styling and event derivation.
 *
 * All shared services live on an explicit `UiContext` rather than globals, so
 * several independent UIs can coexist in one process. Controls may be
 * constructed before host resources exist; they stay inert until
 * `UiContext::initialize` opens the gate.
 */
pub mod batch;
pub mod color;
pub mod context;
pub mod control;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod style;

pub use batch::{BatchParams, BatchState, DrawBatch, FontHandle, MeasureText, SpriteBatch, TextureHandle};
pub use color::Color;
pub use context::{ControlId, Resources, Tick, UiContext, UiEvent};
pub use control::{BoundsDelta, Children, Control, ControlBase, ControlEvent, Visual};
pub use controls::{
    Button, ButtonContent, CancelToken, CheckBox, ComboBox, Form, Label, PictureBox, ProgressBar,
    RangeChange, RangeState, Slider, TextBox,
};
pub use error::{Error, Result};
pub use geometry::{Point, Rectangle, Size};
pub use input::{Clipboard, KeyInput, KeyboardDispatcher, MouseButton, PointerSnapshot, SpecialKey};
pub use shapes::{RectangleShape, Shape, TextShape};
pub use style::{DefaultStyles, Style, StyleBuilder, StyleRole, StyleValues};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::batch::{BatchParams, DrawBatch, FontHandle, MeasureText, TextureHandle};
    use crate::color::Color;
    use crate::context::{Resources, Tick, UiContext};
    use crate::geometry::{Point, Rectangle, Size};
    use crate::input::Clipboard;

    pub(crate) struct StubBatch;

    impl DrawBatch for StubBatch {
        fn begin(&mut self, _: &BatchParams) {}
        fn end(&mut self) {}
        fn draw_quad(&mut self, _: TextureHandle, _: Rectangle, _: Color) {}
        fn draw_text(
            &mut self,
            _: FontHandle,
            _: &str,
            _: Point,
            _: Color,
            _: f32,
            _: (f32, f32),
            _: f32,
        ) {
        }
        fn scissor_rectangle(&self) -> Rectangle {
            Rectangle::EMPTY
        }
        fn set_scissor_rectangle(&mut self, _: Rectangle) {}
    }

    /// 10px per character, 25px tall, so the stock text scale comes out 1.0.
    pub(crate) struct FixedAdvance;

    impl MeasureText for FixedAdvance {
        fn measure(&self, _: FontHandle, text: &str) -> Size {
            Size::new(text.chars().count() as f32 * 10.0, 25.0).unwrap_or(Size::ZERO)
        }
    }

    pub(crate) struct StubClipboard(pub Option<String>);

    impl Clipboard for StubClipboard {
        fn text(&mut self) -> Option<String> {
            self.0.clone()
        }
    }

    pub(crate) fn ready_context() -> UiContext {
        ready_context_with_clipboard(None)
    }

    pub(crate) fn ready_context_with_clipboard(text: Option<String>) -> UiContext {
        let mut ctx = UiContext::new();
        let resources = Resources {
            font: FontHandle::new(1),
            blank_texture: TextureHandle::new(1),
            viewport: Rectangle::new(0, 0, 800.0, 600.0).unwrap(),
            measurer: Box::new(FixedAdvance),
            clipboard: Box::new(StubClipboard(text)),
        };
        ctx.initialize(resources, Box::new(StubBatch));
        ctx
    }

    pub(crate) fn tick(millis: u64) -> Tick {
        Tick::from_millis(millis)
    }
}
