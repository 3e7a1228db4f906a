/*
 * A horizontal progress bar: a bordered trough with a fill bar proportional
 * to the range fraction. Indeterminate display is declared but not built; the
 * accessors keep honest about it.
 */

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Control, ControlBase, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::controls::range::RangeState;
use crate::error::{Error, Result};
use crate::shapes::{RectangleShape, Shape};
use crate::style::{Style, StyleRole};

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 30.0;

pub struct ProgressBar {
    base: ControlBase,
    visual: Visual,
    range: RangeState,
    fill_color: Color,
}

impl ProgressBar {
    pub fn new(ctx: &mut UiContext) -> ProgressBar {
        ProgressBar {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_WIDTH, DEFAULT_HEIGHT)),
            range: RangeState::default(),
            fill_color: Color::GREEN,
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
            ctx.push_event(UiEvent::ValueChanged {
                control: self.base.id(),
                previous: change.previous,
                current: change.current,
            });
            self.visual.refresh();
        }
    }

    pub fn set_maximum(&mut self, ctx: &mut UiContext, maximum: f64) -> Result<()> {
        if let Some(change) = self.range.set_maximum(maximum)? {
            ctx.push_event(UiEvent::ValueChanged {
                control: self.base.id(),
                previous: change.previous,
                current: change.current,
            });
        }
        self.visual.refresh();
        Ok(())
    }

    pub fn set_minimum(&mut self, ctx: &mut UiContext, minimum: f64) -> Result<()> {
        if let Some(change) = self.range.set_minimum(minimum)? {
            ctx.push_event(UiEvent::ValueChanged {
                control: self.base.id(),
                previous: change.previous,
                current: change.current,
            });
        }
        self.visual.refresh();
        Ok(())
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
        self.visual.refresh();
    }

    /// Always false; the indeterminate display does not exist yet.
    pub fn is_indeterminate(&self) -> bool {
        false
    }

    /// TODO: build the marquee-style indeterminate fill animation.
    pub fn set_indeterminate(&mut self, _indeterminate: bool) -> Result<()> {
        Err(Error::Unimplemented("indeterminate progress display"))
    }

    fn initialize(&mut self, ctx: &mut UiContext) {
        self.visual.ensure_styles(&mut ctx.styles);
        let trough = Style::builder(StyleRole::Default)
            .back_color(Color::LIGHT_GRAY)
            .border_color(Color::GRAY)
            .build(&ctx.styles);
        if let (Ok(style), Some(slots)) = (trough, self.visual.styles_mut()) {
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
        if let Ok(trough) = RectangleShape::styled(bounds, style.clone()) {
            self.visual.shapes_mut().push(Shape::Rectangle(trough));
        }
        let inset = style.border_thickness();
        let inner_width = bounds.width() - 2.0 * inset as f32;
        let fill_width = inner_width * self.range.fraction() as f32;
        if fill_width > 0.0 {
            let fill = layout_rect(
                bounds.x + inset,
                bounds.y + inset,
                fill_width,
                bounds.height() - 2.0 * inset as f32,
            );
            if let Ok(fill) = RectangleShape::filled(fill, self.fill_color, &ctx.styles) {
                self.visual.shapes_mut().push(Shape::Rectangle(fill));
            }
        }
    }
}

impl Control for ProgressBar {
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
        drive_pointer(&self.base, &mut self.visual, ctx);
    }
}
