/*
 * A static text control. With auto-resize on (the default) the label's
 * bounds follow the measured text; turned off, the text draws from the
 * top-left of whatever bounds the caller assigned.
 */

use crate::context::{Tick, UiContext};
use crate::control::{Control, ControlBase, drive_pointer, Visual};
use crate::geometry::Rectangle;
use crate::shapes::{Shape, TextShape};

pub struct Label {
    base: ControlBase,
    visual: Visual,
    text: String,
    auto_resize: bool,
}

impl Label {
    pub fn new(ctx: &mut UiContext) -> Label {
        Label {
            base: ControlBase::new(ctx),
            visual: Visual::new(Rectangle::EMPTY),
            text: "Label".into(),
            auto_resize: true,
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

    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    pub fn set_auto_resize(&mut self, auto_resize: bool) {
        self.auto_resize = auto_resize;
        self.visual.refresh();
    }

    fn rebuild(&mut self, ctx: &mut UiContext) {
        let Some(style) = self.visual.current_style() else {
            return;
        };
        if self.auto_resize {
            let measured = ctx.measure(style.font(), &self.text, style.text_scale());
            let target = self.visual.screen_rectangle().with_size(measured);
            self.visual.set_screen_rectangle(target);
        }
        let bounds = self.visual.screen_rectangle();
        self.visual.shapes_mut().clear();
        let Some(measurer) = ctx.measurer() else {
            return;
        };
        if let Ok(text) = TextShape::positioned(
            self.text.clone(),
            style.font(),
            style.fore_color(),
            bounds.location(),
            style.text_scale(),
            measurer,
        ) {
            self.visual.shapes_mut().push(Shape::Text(text));
        }
    }
}

impl Control for Label {
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
        drive_pointer(&self.base, &mut self.visual, ctx);
    }
}
