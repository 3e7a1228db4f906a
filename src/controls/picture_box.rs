/*
 * A control that stretches a host texture over its bounds. Without a texture
 * it draws nothing but still occupies its rectangle.
 */

use crate::batch::TextureHandle;
use crate::color::Color;
use crate::context::{Tick, UiContext};
use crate::control::{Control, ControlBase, drive_pointer, Visual};
use crate::controls::layout_rect;
use crate::shapes::{RectangleShape, Shape};
use crate::style::{Style, StyleRole};

const DEFAULT_EDGE: f32 = 100.0;

pub struct PictureBox {
    base: ControlBase,
    visual: Visual,
    texture: Option<TextureHandle>,
}

impl PictureBox {
    pub fn new(ctx: &mut UiContext) -> PictureBox {
        PictureBox {
            base: ControlBase::new(ctx),
            visual: Visual::new(layout_rect(0, 0, DEFAULT_EDGE, DEFAULT_EDGE)),
            texture: None,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut Visual {
        &mut self.visual
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        self.texture = texture;
        self.visual.refresh();
    }

    fn rebuild(&mut self, ctx: &mut UiContext) {
        let bounds = self.visual.screen_rectangle();
        self.visual.shapes_mut().clear();
        let Some(texture) = self.texture else {
            return;
        };
        let style = Style::builder(StyleRole::Default)
            .back_color(Color::WHITE)
            .border_thickness(0)
            .texture(texture)
            .build(&ctx.styles);
        if let Ok(style) = style
            && let Ok(image) = RectangleShape::styled(bounds, style)
        {
            self.visual.shapes_mut().push(Shape::Rectangle(image));
        }
    }
}

impl Control for PictureBox {
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
