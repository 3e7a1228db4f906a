/*
 * Defines the rendering seam between the toolkit and its host engine. The
 * host implements `DrawBatch` over its own sprite-batch facility; the crate
 * wraps it in `SpriteBatch`, a guard that tracks begin/end pairing so every
 * control can bracket its own draw without double-starting the underlying
 * batch. Resource handles are opaque tokens minted by the host.
 */

use log::warn;

use crate::color::Color;
use crate::geometry::{Point, Rectangle};

/// Opaque host font handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(u32);

impl FontHandle {
    pub const fn new(raw: u32) -> FontHandle {
        FontHandle(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque host texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub const fn new(raw: u32) -> TextureHandle {
        TextureHandle(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Deferred,
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    AlphaBlend,
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerMode {
    #[default]
    CullCounterClockwise,
    ScissorTest,
}

/// Parameters handed to the host when a batch run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchParams {
    pub sort_mode: SortMode,
    pub blend: BlendMode,
    pub rasterizer: RasterizerMode,
}

impl BatchParams {
    /// Immediate-mode scissor-test parameters used for clipped text runs.
    pub fn clipping() -> BatchParams {
        BatchParams {
            sort_mode: SortMode::Immediate,
            blend: BlendMode::AlphaBlend,
            rasterizer: RasterizerMode::ScissorTest,
        }
    }
}

/// Host-side sprite batch surface. One call to `begin` must precede any draw
/// calls, and `end` flushes the run.
pub trait DrawBatch {
    fn begin(&mut self, params: &BatchParams);
    fn end(&mut self);
    fn draw_quad(&mut self, texture: TextureHandle, destination: Rectangle, tint: Color);
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        position: Point,
        tint: Color,
        rotation: f32,
        origin: (f32, f32),
        scale: f32,
    );
    fn scissor_rectangle(&self) -> Rectangle;
    fn set_scissor_rectangle(&mut self, rectangle: Rectangle);
}

/// Host-side text measurement at scale 1.0. Shapes multiply the result by
/// their own text scale.
pub trait MeasureText {
    fn measure(&self, font: FontHandle, text: &str) -> crate::geometry::Size;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Initialized,
    Started,
    Ended,
}

/*
 * Pairing guard over the host batch. Controls call `begin(true)` / `end(true)`
 * around their own shape runs; the force flag restarts or flushes a run that
 * another participant left open, so draw order stays deterministic without a
 * central coordinator.
 */
pub struct SpriteBatch {
    inner: Box<dyn DrawBatch>,
    state: BatchState,
}

impl SpriteBatch {
    pub fn new(inner: Box<dyn DrawBatch>) -> SpriteBatch {
        SpriteBatch {
            inner,
            state: BatchState::Initialized,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Starts a run with default parameters. Returns whether a run actually
    /// started. With `force` set, an already-started run is ended and
    /// restarted; without it the call is a no-op on a started batch.
    pub fn begin(&mut self, force: bool) -> bool {
        self.begin_with(&BatchParams::default(), force)
    }

    pub fn begin_with(&mut self, params: &BatchParams, force: bool) -> bool {
        match self.state {
            BatchState::Initialized | BatchState::Ended => {
                self.inner.begin(params);
                self.state = BatchState::Started;
                true
            }
            BatchState::Started if force => {
                self.inner.end();
                self.inner.begin(params);
                true
            }
            BatchState::Started => false,
        }
    }

    /// Ends the current run. Returns whether a run was flushed. With `force`
    /// set on a batch that is not started, an empty run is opened and closed
    /// so the host still sees a flush.
    pub fn end(&mut self, force: bool) -> bool {
        match self.state {
            BatchState::Started => {
                self.inner.end();
                self.state = BatchState::Ended;
                true
            }
            BatchState::Initialized | BatchState::Ended if force => {
                self.inner.begin(&BatchParams::default());
                self.inner.end();
                true
            }
            _ => {
                warn!("SpriteBatch: End called while no batch run is active");
                false
            }
        }
    }

    pub fn draw_quad(&mut self, texture: TextureHandle, destination: Rectangle, tint: Color) {
        self.inner.draw_quad(texture, destination, tint);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        position: Point,
        tint: Color,
        rotation: f32,
        origin: (f32, f32),
        scale: f32,
    ) {
        self.inner
            .draw_text(font, text, position, tint, rotation, origin, scale);
    }

    /// Direct access to the host batch for participants that need to swap
    /// batch parameters mid-run, such as scissor-clipped text.
    pub fn raw(&mut self) -> &mut dyn DrawBatch {
        self.inner.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CallLog {
        calls: Rc<RefCell<Vec<String>>>,
        scissor: Rectangle,
    }

    impl DrawBatch for CallLog {
        fn begin(&mut self, params: &BatchParams) {
            self.calls.borrow_mut().push(format!("begin:{:?}", params.sort_mode));
        }
        fn end(&mut self) {
            self.calls.borrow_mut().push("end".into());
        }
        fn draw_quad(&mut self, _: TextureHandle, _: Rectangle, _: Color) {
            self.calls.borrow_mut().push("quad".into());
        }
        fn draw_text(
            &mut self,
            _: FontHandle,
            text: &str,
            _: Point,
            _: Color,
            _: f32,
            _: (f32, f32),
            _: f32,
        ) {
            self.calls.borrow_mut().push(format!("text:{text}"));
        }
        fn scissor_rectangle(&self) -> Rectangle {
            self.scissor
        }
        fn set_scissor_rectangle(&mut self, rectangle: Rectangle) {
            self.scissor = rectangle;
        }
    }

    fn logged_batch() -> (SpriteBatch, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = CallLog {
            calls: Rc::clone(&calls),
            scissor: Rectangle::EMPTY,
        };
        (SpriteBatch::new(Box::new(log)), calls)
    }

    #[test]
    fn begin_is_single_entry_without_force() {
        let (mut batch, calls) = logged_batch();
        assert!(batch.begin(false));
        assert!(!batch.begin(false));
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(batch.state(), BatchState::Started);
    }

    #[test]
    fn forced_begin_restarts_an_open_run() {
        let (mut batch, calls) = logged_batch();
        assert!(batch.begin(false));
        assert!(batch.begin(true));
        assert_eq!(
            calls.borrow().as_slice(),
            ["begin:Deferred", "end", "begin:Deferred"]
        );
        assert_eq!(batch.state(), BatchState::Started);
    }

    #[test]
    fn forced_begin_uses_requested_parameters() {
        let (mut batch, calls) = logged_batch();
        batch.begin(false);
        batch.begin_with(&BatchParams::clipping(), true);
        assert_eq!(calls.borrow().last().map(String::as_str), Some("begin:Immediate"));
    }

    #[test]
    fn end_without_run_is_refused_unless_forced() {
        let (mut batch, calls) = logged_batch();
        assert!(!batch.end(false));
        assert!(calls.borrow().is_empty());
        assert!(batch.end(true));
        assert_eq!(calls.borrow().as_slice(), ["begin:Deferred", "end"]);
        assert_eq!(batch.state(), BatchState::Initialized);
    }

    #[test]
    fn end_closes_an_open_run_exactly_once() {
        let (mut batch, _) = logged_batch();
        batch.begin(false);
        assert!(batch.end(false));
        assert_eq!(batch.state(), BatchState::Ended);
        assert!(!batch.end(false));
        assert!(batch.begin(false), "a new run may start after an ended one");
    }
}
