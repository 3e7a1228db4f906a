/*
 * A horizontal slider. A press on the track seeks toward the pointer in
 * large-change multiples; a captured drag scrubs the thumb in small or large
 * steps depending on how far the pointer moved since the last applied step.
 * Scrub stepping is throttled to an interval so a fast pointer does not race
 * the value across the range in one tick.
 */

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, ControlEvent, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::controls::range::RangeState;
use crate::error::Result;
use crate::geometry::Point;
use crate::shapes::{RectangleShape, Shape};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;
const THUMB_WIDTH: f32 = 10.0;
const TRACK_HEIGHT: f32 = 4.0;
const DEFAULT_INTERVAL_MS: u64 = 33;

pub struct Slider {
    base: ControlBase,
    visual: Visual,
    range: RangeState,
    interval_ms: u64,
    last_step_ms: u64,
    drag_anchor: Option<Point>,
}

impl Slider {
    pub fn new(ctx: &mut UiContext) -> Slider {
        Slider {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            range: RangeState::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            last_step_ms: 0,
            drag_anchor: None,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    pub fn range(&self) -> &RangeState {
        &self.range
    }

    pub fn value(&self) -> f64 {
        self.range.value()
    }

    pub fn set_value(&mut self, ctx: &mut UiContext, value: f64) {
        if let Some(change) = self.range.set_value(value) {
            self.notify(ctx, change.previous, change.current);
        }
    }

    pub fn set_maximum(&mut self, ctx: &mut UiContext, maximum: f64) -> Result<()> {
        if let Some(change) = self.range.set_maximum(maximum)? {
            self.notify(ctx, change.previous, change.current);
        }
        self.visual.refresh();
        Ok(())
    }

    pub fn set_minimum(&mut self, ctx: &mut UiContext, minimum: f64) -> Result<()> {
        if let Some(change) = self.range.set_minimum(minimum)? {
            self.notify(ctx, change.previous, change.current);
        }
        self.visual.refresh();
        Ok(())
    }

    pub fn set_small_change(&mut self, step: f64) -> Result<()> {
        self.range.set_small_change(step)
    }

    pub fn set_large_change(&mut self, step: f64) -> Result<()> {
        self.range.set_large_change(step)
    }

    /// Minimum milliseconds between applied scrub steps.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval: u64) {
        self.interval_ms = interval;
    }

    fn notify(&mut self, ctx: &mut UiContext, previous: f64, current: f64) {
        ctx.push_event(UiEvent::ValueChanged {
            control: self.base.id(),
            previous,
            current,
        });
        self.visual.refresh();
    }

    /// Pixels of track travel per value unit.
    fn unit(&self) -> f64 {
        let span = self.range.maximum() - self.range.minimum();
        let travel = (self.visual.screen_rectangle().width() - THUMB_WIDTH) as f64;
        if span <= 0.0 || travel <= 0.0 {
            0.0
        } else {
            travel / span
        }
    }

    /// Steps toward the pressed position by whole large-change multiples.
    fn seek(&mut self, ctx: &mut UiContext, pressed: Point) {
        let unit = self.unit();
        if unit <= 0.0 {
            return;
        }
        let bounds = self.visual.screen_rectangle();
        let offset = f64::from(pressed.x - bounds.x) - f64::from(THUMB_WIDTH) / 2.0;
        let target = self.range.minimum() + offset / unit;
        // The pixel-to-value division lands just shy of whole multiples;
        // snap before truncating so those count as full steps.
        let ratio = (target - self.range.value()) / self.range.large_change();
        let steps = if (ratio - ratio.round()).abs() < 1e-6 {
            ratio.round()
        } else {
            ratio.trunc()
        };
        if steps != 0.0 {
            let next = self.range.value() + steps * self.range.large_change();
            self.set_value(ctx, next);
        }
        self.drag_anchor = Some(pressed);
    }

    /// Applies one throttled scrub step while this slider holds the capture.
    fn scrub(&mut self, ctx: &mut UiContext, tick: Tick) {
        let snapshot = ctx.pointer.snapshot();
        if ctx.pointer.captured() != Some(self.base.id()) || !snapshot.is_any_pressed() {
            self.drag_anchor = None;
            return;
        }
        let position = snapshot.position();
        let Some(anchor) = self.drag_anchor else {
            self.drag_anchor = Some(position);
            return;
        };
        if tick.millis().saturating_sub(self.last_step_ms) < self.interval_ms {
            return;
        }
        let unit = self.unit();
        if unit <= 0.0 {
            return;
        }
        let travelled = f64::from(position.x - anchor.x);
        let step = if travelled.abs() >= self.range.large_change() * unit {
            self.range.large_change()
        } else if travelled.abs() >= self.range.small_change() * unit {
            self.range.small_change()
        } else {
            return;
        };
        let next = self.range.value() + step.copysign(travelled);
        self.set_value(ctx, next);
        self.drag_anchor = Some(position);
        self.last_step_ms = tick.millis();
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
        // Transparent surface so the whole control accepts the pointer.
        if let Ok(surface) = RectangleShape::filled(bounds, Color::TRANSPARENT, &ctx.styles) {
            self.visual.shapes_mut().push(Shape::Rectangle(surface));
        }
        let track = layout_rect(
            bounds.x,
            bounds.y + ((bounds.height() - TRACK_HEIGHT) / 2.0) as i32,
            bounds.width(),
            TRACK_HEIGHT,
        );
        if let Ok(track) = RectangleShape::filled(track, style.border_color(), &ctx.styles) {
            self.visual.shapes_mut().push(Shape::Rectangle(track));
        }
        let travel = bounds.width() - THUMB_WIDTH;
        let thumb_x = bounds.x + (travel * self.range.fraction() as f32) as i32;
        let thumb = layout_rect(thumb_x, bounds.y, THUMB_WIDTH, bounds.height());
        if let Ok(thumb) = RectangleShape::styled(thumb, style) {
            self.visual.shapes_mut().push(Shape::Rectangle(thumb));
        }
    }

    fn handle_events(&mut self, ctx: &mut UiContext, events: &[ControlEvent]) {
        for event in events {
            if let ControlEvent::MouseClick(_) = event {
                let pressed = ctx.pointer.snapshot().position();
                self.seek(ctx, pressed);
            }
        }
    }
}

impl Control for Slider {
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
        if self.visual.needs_rebuild() {
            self.rebuild(ctx);
            self.visual.finish_rebuild();
        }
        let events = drive_pointer(&self.base, &mut self.visual, ctx);
        self.handle_events(ctx, &events);
        self.scrub(ctx, tick);
    }
}
