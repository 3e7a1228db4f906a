/*
 * A top-level window: caption bar with title and minimize/maximize/close
 * buttons, a bordered content area, and a public child collection. A held
 * press drags the whole form while the form owns the capture or the pointer
 * sits in the caption; children follow every move by the location delta,
 * never by resizes. Bounds assignments are deferred and applied at the top
 * of the next update so mid-tick geometry stays stable.
 */

use log::debug;

use crate::color::Color;
use crate::context::{Tick, UiContext, UiEvent};
use crate::control::{Children, Control, ControlBase, drive_pointer, Visual};
use crate::controls::button::Button;
use crate::controls::layout_rect;
use crate::geometry::{Point, Rectangle};
use crate::input::PointerSnapshot;
use crate::shapes::{RectangleShape, Shape, TextShape};
use crate::style::{Style, StyleRole};

const DEFAULT_EDGE: f32 = 300.0;
const CAPTION_HEIGHT: f32 = 30.0;
const CAPTION_BUTTON_WIDTH: f32 = 30.0;
const TITLE_INSET: i32 = 8;

/// Veto handle passed to the closing/minimizing/maximizing hooks.
pub struct CancelToken {
    cancelled: bool,
}

impl CancelToken {
    fn new() -> CancelToken {
        CancelToken { cancelled: false }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

type Hook = Box<dyn FnMut(&mut CancelToken)>;

pub struct Form {
    base: ControlBase,
    visual: Visual,
    children: Children,
    title: String,
    minimize_button: Button,
    maximize_button: Button,
    close_button: Button,
    moveable: bool,
    hide_chrome: bool,
    maximized: bool,
    restore_bounds: Option<Rectangle>,
    next_rectangle: Option<Rectangle>,
    drag_anchor: PointerSnapshot,
    chrome_styled: bool,
    on_closing: Option<Hook>,
    on_minimizing: Option<Hook>,
    on_maximizing: Option<Hook>,
}

impl Form {
    pub fn new(ctx: &mut UiContext) -> Form {
        let base = ControlBase::new(ctx);
        let children = Children::new(base.id());
        let mut visual = Visual::new(layout_rect(0, 0, DEFAULT_EDGE, DEFAULT_EDGE));
        visual.set_visible(false);
        let mut button = |caption: &str| {
            let mut b = Button::new(ctx);
            b.set_text(caption);
            b.visual_mut().set_visible(false);
            b
        };
        let mut close_button = button("X");
        let minimize_button = button("");
        let maximize_button = button("");
        if let Ok(white) = Style::builder(StyleRole::Default)
            .back_color(Color::WHITE)
            .build(&ctx.styles)
        {
            close_button.set_resting_style(white);
        }
        Form {
            minimize_button,
            maximize_button,
            close_button,
            base,
            visual,
            children,
            title: "Form".into(),
            moveable: true,
            hide_chrome: false,
            maximized: false,
            restore_bounds: None,
            next_rectangle: None,
            drag_anchor: PointerSnapshot::default(),
            chrome_styled: false,
            on_closing: None,
            on_minimizing: None,
            on_maximizing: None,
        }
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.visual.refresh();
    }

    pub fn is_moveable(&self) -> bool {
        self.moveable
    }

    pub fn set_moveable(&mut self, moveable: bool) {
        self.moveable = moveable;
    }

    pub fn hides_chrome(&self) -> bool {
        self.hide_chrome
    }

    /// Suppresses the form's own caption and frame shapes. The caption
    /// buttons and the children still draw.
    pub fn set_hide_chrome(&mut self, hide: bool) {
        self.hide_chrome = hide;
        self.visual.refresh();
    }

    pub fn is_visible(&self) -> bool {
        self.visual.visible()
    }

    /// Shows or hides the form and everything in it.
    pub fn set_visible(&mut self, visible: bool) {
        self.visual.set_visible(visible);
        self.minimize_button.visual_mut().set_visible(visible);
        self.maximize_button.visual_mut().set_visible(visible);
        self.close_button.visual_mut().set_visible(visible);
        self.children.set_visible_all(visible);
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn screen_rectangle(&self) -> Rectangle {
        self.visual.screen_rectangle()
    }

    /// Requests new bounds. Applied at the top of the next update; children
    /// then follow the location delta.
    pub fn set_screen_rectangle(&mut self, rectangle: Rectangle) {
        self.next_rectangle = Some(rectangle);
    }

    pub fn on_closing(&mut self, hook: impl FnMut(&mut CancelToken) + 'static) {
        self.on_closing = Some(Box::new(hook));
    }

    pub fn on_minimizing(&mut self, hook: impl FnMut(&mut CancelToken) + 'static) {
        self.on_minimizing = Some(Box::new(hook));
    }

    pub fn on_maximizing(&mut self, hook: impl FnMut(&mut CancelToken) + 'static) {
        self.on_maximizing = Some(Box::new(hook));
    }

    /// Closes the form unless the closing hook cancels.
    pub fn close(&mut self, ctx: &mut UiContext) {
        if Self::vetoed(&mut self.on_closing) {
            debug!("Form: Control {} close cancelled", self.base.id().raw());
            return;
        }
        self.set_visible(false);
        ctx.push_event(UiEvent::FormClosed {
            control: self.base.id(),
        });
    }

    pub fn minimize(&mut self, ctx: &mut UiContext) {
        if Self::vetoed(&mut self.on_minimizing) {
            return;
        }
        self.set_visible(false);
        ctx.push_event(UiEvent::FormMinimized {
            control: self.base.id(),
        });
    }

    /// Toggles between the host viewport and the remembered normal bounds.
    pub fn toggle_maximize(&mut self, ctx: &mut UiContext) {
        if Self::vetoed(&mut self.on_maximizing) {
            return;
        }
        if self.maximized {
            self.next_rectangle = self.restore_bounds.take();
            self.maximized = false;
        } else {
            self.restore_bounds = Some(self.visual.screen_rectangle());
            self.next_rectangle = Some(ctx.viewport());
            self.maximized = true;
        }
        ctx.push_event(UiEvent::FormMaximized {
            control: self.base.id(),
            maximized: self.maximized,
        });
    }

    fn vetoed(hook: &mut Option<Hook>) -> bool {
        let Some(hook) = hook.as_mut() else {
            return false;
        };
        let mut token = CancelToken::new();
        hook(&mut token);
        token.is_cancelled()
    }

    pub fn caption_rectangle(&self) -> Rectangle {
        let bounds = self.visual.screen_rectangle();
        layout_rect(
            bounds.x,
            bounds.y,
            bounds.width(),
            CAPTION_HEIGHT.min(bounds.height()),
        )
    }

    /// Caption area that starts a drag: everything left of the button strip.
    fn drag_rectangle(&self) -> Rectangle {
        let caption = self.caption_rectangle();
        layout_rect(
            caption.x,
            caption.y,
            caption.width() - 3.0 * CAPTION_BUTTON_WIDTH,
            caption.height(),
        )
    }

    fn apply_bounds(&mut self, target: Rectangle) {
        if let Some(delta) = self.visual.set_screen_rectangle(target) {
            let shift = delta.location_delta();
            if shift != Point::ZERO {
                self.children.translate_all(shift);
            }
        }
    }

    fn shift(&mut self, delta: Point) {
        let target = self.visual.screen_rectangle().translated(delta);
        if self.visual.set_screen_rectangle(target).is_some() {
            self.children.translate_all(delta);
        }
    }

    /*
     * Caption drag. The form follows the pointer delta on any tick the press
     * is down both now and last tick, provided the form holds the capture or
     * the pointer sits in the caption clear of the button strip. The form's
     * own dispatch captures on a press over its shapes, so a held press on
     * the body drags too; a press that lands on a caption button or a child
     * leaves that control holding the capture instead and never drags.
     */
    fn check_drag(&mut self, ctx: &mut UiContext) {
        let now = ctx.pointer.snapshot();
        let prev = std::mem::replace(&mut self.drag_anchor, now);
        if !self.moveable || !self.visual.visible() {
            return;
        }
        let button = ctx.pointer.default_click_button();
        if now.is_pressed(button) && prev.is_pressed(button) {
            let dragging = ctx.pointer.captured() == Some(self.base.id())
                || self.drag_rectangle().contains(now.position());
            if dragging {
                let delta = now.position() - prev.position();
                if delta != Point::ZERO {
                    self.shift(delta);
                }
                ctx.pointer.capture(self.base.id());
            }
        } else if !now.is_pressed(button)
            && ctx.pointer.captured() == Some(self.base.id())
        {
            ctx.pointer.release_capture();
        }
    }

    /// Installs the close button's hover/press palette (red, then dark red)
    /// once its style slots exist.
    fn style_caption_buttons(&mut self, ctx: &UiContext) {
        let active = Style::builder(StyleRole::Active)
            .back_color(Color::RED)
            .build(&ctx.styles);
        let action = Style::builder(StyleRole::Action)
            .back_color(Color::DARK_RED)
            .build(&ctx.styles);
        let Some(slots) = self.close_button.visual_mut().styles_mut() else {
            return;
        };
        if let (Ok(active), Ok(action)) = (active, action) {
            slots.active = active;
            slots.action = action;
            self.chrome_styled = true;
        }
    }

    /// Minimize bar and maximize outline, in absolute coordinates inside the
    /// given caption slot.
    fn glyph_shapes(&self, slot: Rectangle, outline: bool, ctx: &UiContext) -> Vec<Shape> {
        let center = slot.center();
        let shape = if outline {
            RectangleShape::bordered(
                layout_rect(center.x - 6, center.y - 6, 12.0, 12.0),
                1,
                Color::BLACK,
                Color::TRANSPARENT,
                &ctx.styles,
            )
        } else {
            RectangleShape::filled(
                layout_rect(center.x - 6, slot.bottom() - 9, 12.0, 3.0),
                Color::BLACK,
                &ctx.styles,
            )
        };
        shape.map(Shape::Rectangle).into_iter().collect()
    }

    fn rebuild(&mut self, ctx: &mut UiContext) {
        self.visual.shapes_mut().clear();
        let bounds = self.visual.screen_rectangle();
        let visible = self.visual.visible();
        self.minimize_button.visual_mut().set_visible(visible);
        self.maximize_button.visual_mut().set_visible(visible);
        self.close_button.visual_mut().set_visible(visible);
        if bounds.is_empty() {
            return;
        }
        let Some(style) = self.visual.current_style() else {
            return;
        };
        let caption = self.caption_rectangle();
        // Hidden chrome skips only the form's own shapes; the caption
        // buttons keep their slots.
        if !self.hide_chrome {
            if let Ok(bar) = RectangleShape::filled(caption, style.border_color(), &ctx.styles) {
                self.visual.shapes_mut().push(Shape::Rectangle(bar));
            }
            let body = layout_rect(
                bounds.x,
                caption.bottom(),
                bounds.width(),
                bounds.height() - caption.height(),
            );
            if let Ok(frame) = RectangleShape::styled(body, style.clone()) {
                self.visual.shapes_mut().push(Shape::Rectangle(frame));
            }
            if let Some(measurer) = ctx.measurer() {
                let title_size = ctx.measure(style.font(), &self.title, style.text_scale());
                let origin = Point::new(
                    caption.x + TITLE_INSET,
                    caption.y + ((caption.height() - title_size.height()) / 2.0) as i32,
                );
                if let Ok(title) = TextShape::positioned(
                    self.title.clone(),
                    style.font(),
                    style.back_color(),
                    origin,
                    style.text_scale(),
                    measurer,
                ) {
                    self.visual.shapes_mut().push(Shape::Text(title));
                }
            }
        }
        let slot = |index: i32| {
            layout_rect(
                bounds.right() - (index + 1) * CAPTION_BUTTON_WIDTH as i32,
                bounds.y,
                CAPTION_BUTTON_WIDTH,
                caption.height(),
            )
        };
        self.close_button.visual_mut().set_screen_rectangle(slot(0));
        self.maximize_button.visual_mut().set_screen_rectangle(slot(1));
        self.minimize_button.visual_mut().set_screen_rectangle(slot(2));
        let outline = self.glyph_shapes(slot(1), true, ctx);
        self.maximize_button.set_shapes(outline);
        let bar = self.glyph_shapes(slot(2), false, ctx);
        self.minimize_button.set_shapes(bar);
    }
}

impl Control for Form {
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
        if let Some(target) = self.next_rectangle.take() {
            self.apply_bounds(target);
        }
        if self.visual.needs_rebuild() {
            self.rebuild(ctx);
            self.visual.finish_rebuild();
        }
        self.check_drag(ctx);

        // The form's own dispatch runs before the caption buttons, so a
        // press landing on a button leaves the button, not the form, holding
        // the capture.
        drive_pointer(&self.base, &mut self.visual, ctx);
        self.minimize_button.update(ctx, tick);
        self.maximize_button.update(ctx, tick);
        self.close_button.update(ctx, tick);
        if !self.chrome_styled {
            self.style_caption_buttons(ctx);
        }

        if self.close_button.take_click() {
            self.close(ctx);
        }
        if self.minimize_button.take_click() {
            self.minimize(ctx);
        }
        if self.maximize_button.take_click() {
            self.toggle_maximize(ctx);
        }
        self.children.update_all(ctx, tick);
    }

    fn draw(&mut self, ctx: &mut UiContext) {
        if !self.visual.visible() {
            return;
        }
        self.visual.draw(ctx);
        self.minimize_button.draw(ctx);
        self.maximize_button.draw(ctx);
        self.close_button.draw(ctx);
        self.children.draw_all(ctx);
    }

    fn translate_by(&mut self, delta: Point) {
        self.shift(delta);
    }
}
