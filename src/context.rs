/*
 * Provides `UiContext`, the explicit service hub every control call threads
 * through. It owns what the toolkit used to have no home for: the default
 * style registry, pointer and keyboard state, the batch guard, the outbound
 * event queue, and the control id allocator.
 *
 * A context starts gated: controls can be constructed against it but stay
 * inert (no styles, no shapes, no dispatch) until `initialize` hands over the
 * host resources. Calls made before that point are silent no-ops, not errors.
 */

use std::time::Duration;

use log::info;

use crate::batch::{DrawBatch, FontHandle, MeasureText, SpriteBatch, TextureHandle};
use crate::control::ControlEvent;
use crate::geometry::{Rectangle, Size};
use crate::input::{Clipboard, KeyboardDispatcher, PointerSnapshot, PointerState};
use crate::style::DefaultStyles;

/// Target pixel height for text rendered at the default style scale.
const DEFAULT_FONT_HEIGHT: f32 = 25.0;

/// Unique identity of a control within one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> ControlId {
        ControlId(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Elapsed-time stamp for one update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub total: Duration,
}

impl Tick {
    pub const fn from_millis(millis: u64) -> Tick {
        Tick {
            total: Duration::from_millis(millis),
        }
    }

    pub fn millis(&self) -> u64 {
        self.total.as_millis() as u64
    }
}

/// Host resources the toolkit renders with.
pub struct Resources {
    pub font: FontHandle,
    pub blank_texture: TextureHandle,
    pub viewport: Rectangle,
    pub measurer: Box<dyn MeasureText>,
    pub clipboard: Box<dyn Clipboard>,
}

/// Outbound notification raised by a control during an update tick. The
/// embedding application drains these once per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Low-level pointer transition on a control.
    Pointer {
        control: ControlId,
        event: ControlEvent,
    },
    ButtonClicked {
        control: ControlId,
    },
    CheckedChanged {
        control: ControlId,
        checked: bool,
    },
    ValueChanged {
        control: ControlId,
        previous: f64,
        current: f64,
    },
    SelectionChanged {
        control: ControlId,
        index: usize,
        value: String,
    },
    ExpandedChanged {
        control: ControlId,
        expanded: bool,
    },
    TextChanged {
        control: ControlId,
        text: String,
    },
    EnabledChanged {
        control: ControlId,
        enabled: bool,
    },
    ParentChanged {
        control: ControlId,
        parent: Option<ControlId>,
    },
    UpdateOrderChanged {
        control: ControlId,
        order: i32,
    },
    FormClosed {
        control: ControlId,
    },
    FormMinimized {
        control: ControlId,
    },
    FormMaximized {
        control: ControlId,
        maximized: bool,
    },
}

pub struct UiContext {
    pub styles: DefaultStyles,
    pub pointer: PointerState,
    pub keyboard: KeyboardDispatcher,
    resources: Option<Resources>,
    batch: Option<SpriteBatch>,
    events: Vec<UiEvent>,
    next_id: u32,
}

impl UiContext {
    pub fn new() -> UiContext {
        UiContext {
            styles: DefaultStyles::new(),
            pointer: PointerState::new(),
            keyboard: KeyboardDispatcher::new(),
            resources: None,
            batch: None,
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Opens the gate: installs host resources, the stock style palettes and
    /// the batch guard. Controls constructed earlier finish their own setup
    /// on their next update.
    pub fn initialize(&mut self, resources: Resources, batch: Box<dyn DrawBatch>) {
        let sample = resources.measurer.measure(resources.font, "Ay");
        let text_scale = if sample.height() > 0.0 {
            DEFAULT_FONT_HEIGHT / sample.height()
        } else {
            1.0
        };
        self.styles
            .reset(resources.font, text_scale, resources.blank_texture);
        info!(
            "UiContext: Initialized with viewport {} and text scale {text_scale:.3}",
            resources.viewport
        );
        self.resources = Some(resources);
        self.batch = Some(SpriteBatch::new(batch));
    }

    pub fn is_ready(&self) -> bool {
        self.resources.is_some()
    }

    pub fn alloc_id(&mut self) -> ControlId {
        let id = ControlId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Installs the pointer snapshot for the coming tick and drops key events
    /// nobody is focused to receive. Capture is left alone here; the control
    /// that took it releases it when it sees the button come up.
    pub fn begin_tick(&mut self, snapshot: PointerSnapshot) {
        self.pointer.set_snapshot(snapshot);
        self.keyboard.discard_unclaimed();
    }

    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn viewport(&self) -> Rectangle {
        self.resources
            .as_ref()
            .map_or(Rectangle::EMPTY, |r| r.viewport)
    }

    pub fn default_font(&self) -> Option<FontHandle> {
        self.resources.as_ref().map(|r| r.font)
    }

    pub fn blank_texture(&self) -> Option<TextureHandle> {
        self.resources.as_ref().map(|r| r.blank_texture)
    }

    pub fn measurer(&self) -> Option<&dyn MeasureText> {
        self.resources.as_ref().map(|r| r.measurer.as_ref())
    }

    /// Measures `text` with `font` at the given style scale. Zero before the
    /// gate opens.
    pub fn measure(&self, font: FontHandle, text: &str, scale: f32) -> Size {
        match self.measurer() {
            Some(measurer) => measurer
                .measure(font, text)
                .scaled(scale.max(0.0))
                .unwrap_or(Size::ZERO),
            None => Size::ZERO,
        }
    }

    pub fn clipboard_text(&mut self) -> Option<String> {
        self.resources
            .as_mut()
            .and_then(|r| r.clipboard.text())
    }

    pub fn batch_mut(&mut self) -> Option<&mut SpriteBatch> {
        self.batch.as_mut()
    }
}

impl Default for UiContext {
    fn default() -> UiContext {
        UiContext::new()
    }
}
