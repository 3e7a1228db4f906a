/*
 * Input-side host seam: per-tick pointer snapshots, the pointer capture slot,
 * and the keyboard dispatcher that routes discrete key events to the single
 * focused receiver. The host samples its own input devices and hands the
 * toolkit plain values; nothing here talks to hardware.
 */

use log::debug;

use crate::context::ControlId;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl MouseButton {
    /// Declaration order doubles as the tie-break priority when several
    /// buttons are down in the same tick.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::X1,
        MouseButton::X2,
    ];

    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::X1 => 3,
            MouseButton::X2 => 4,
        }
    }
}

/// One sampled pointer state. The host supplies one per tick; controls keep
/// the previous tick's snapshot to derive transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerSnapshot {
    pub x: i32,
    pub y: i32,
    buttons: [bool; 5],
    scroll: i32,
}

impl PointerSnapshot {
    pub fn at(x: i32, y: i32) -> PointerSnapshot {
        PointerSnapshot {
            x,
            y,
            buttons: [false; 5],
            scroll: 0,
        }
    }

    pub fn with_pressed(mut self, button: MouseButton) -> PointerSnapshot {
        self.buttons[button.index()] = true;
        self
    }

    /// Accumulated wheel value; controls compare against the previous tick's
    /// snapshot to recover the per-tick delta.
    pub fn with_scroll(mut self, scroll: i32) -> PointerSnapshot {
        self.scroll = scroll;
        self
    }

    pub fn scroll(&self) -> i32 {
        self.scroll
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn is_any_pressed(&self) -> bool {
        self.buttons.iter().any(|pressed| *pressed)
    }

    /// Highest-priority pressed button, if any.
    pub fn pressed_button(&self) -> Option<MouseButton> {
        MouseButton::ALL.into_iter().find(|b| self.is_pressed(*b))
    }
}

/// Shared pointer state: the current snapshot plus the single-owner capture
/// slot that routes drags to the control that claimed them.
pub struct PointerState {
    snapshot: PointerSnapshot,
    captured: Option<ControlId>,
    default_click_button: MouseButton,
}

impl PointerState {
    pub(crate) fn new() -> PointerState {
        PointerState {
            snapshot: PointerSnapshot::default(),
            captured: None,
            default_click_button: MouseButton::Left,
        }
    }

    pub fn snapshot(&self) -> PointerSnapshot {
        self.snapshot
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: PointerSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn captured(&self) -> Option<ControlId> {
        self.captured
    }

    pub fn capture(&mut self, control: ControlId) {
        if self.captured != Some(control) {
            debug!("Pointer: Capture taken by control {}", control.raw());
        }
        self.captured = Some(control);
    }

    pub fn release_capture(&mut self) {
        if let Some(control) = self.captured.take() {
            debug!("Pointer: Capture released by control {}", control.raw());
        }
    }

    /// Button whose release raises the high-level click.
    pub fn default_click_button(&self) -> MouseButton {
        self.default_click_button
    }

    pub fn set_default_click_button(&mut self, button: MouseButton) {
        self.default_click_button = button;
    }
}

/// A discrete keyboard event delivered by the host between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Character(char),
    Special(SpecialKey),
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Home,
    End,
}

/// Host clipboard access, queried synchronously when a paste arrives.
pub trait Clipboard {
    fn text(&mut self) -> Option<String>;
}

/// Routes queued key events to the one control holding keyboard focus.
/// Events queued while no receiver is set are discarded at the next tick.
pub struct KeyboardDispatcher {
    receiver: Option<ControlId>,
    pending: Vec<KeyInput>,
}

impl KeyboardDispatcher {
    pub(crate) fn new() -> KeyboardDispatcher {
        KeyboardDispatcher {
            receiver: None,
            pending: Vec::new(),
        }
    }

    pub fn receiver(&self) -> Option<ControlId> {
        self.receiver
    }

    pub fn set_receiver(&mut self, receiver: Option<ControlId>) {
        if self.receiver != receiver {
            match receiver {
                Some(control) => {
                    debug!("Keyboard: Focus moved to control {}", control.raw())
                }
                None => debug!("Keyboard: Focus cleared"),
            }
        }
        self.receiver = receiver;
    }

    pub fn push(&mut self, input: KeyInput) {
        self.pending.push(input);
    }

    /// Hands the queued events to `control` if it is the focused receiver.
    pub fn drain_for(&mut self, control: ControlId) -> Vec<KeyInput> {
        if self.receiver == Some(control) {
            std::mem::take(&mut self.pending)
        } else {
            Vec::new()
        }
    }

    pub(crate) fn discard_unclaimed(&mut self) {
        if self.receiver.is_none() {
            self.pending.clear();
        }
    }
}
