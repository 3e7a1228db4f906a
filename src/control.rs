/*
 * Core control machinery shared by every widget: the identity/bookkeeping
 * base, the `Visual` capability (shape list, screen rectangle, style slots,
 * dirty-flag refresh protocol and pointer event derivation), the `Children`
 * collection containers fan out to, and the object-safe `Control` trait that
 * ties them together.
 *
 * Pointer events are not delivered by the host; they are derived here, per
 * control, by comparing the current pointer snapshot against the one this
 * control saw last tick. Hover is re-derived from the current shape list on
 * both sides of the comparison, so transitions come only from pointer
 * movement; a shape sliding under a stationary pointer reads as hovered on
 * both ticks and raises nothing.
 */

use log::debug;

use crate::context::{ControlId, Tick, UiContext, UiEvent};
use crate::geometry::{Point, Rectangle, Size};
use crate::input::{MouseButton, PointerSnapshot, PointerState};
use crate::shapes::Shape;
use crate::style::{DefaultStyles, Style, StyleRole};

/// Pointer transition derived for one control during one tick, in the order
/// dispatch emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    MouseEnter,
    MouseLeave,
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    MouseClick(MouseButton),
    /// Wheel delta accumulated since the previous tick.
    MouseScroll(i32),
    /// High-level click: the default click button was released over the
    /// control.
    Click,
}

/// Identity and bookkeeping every control carries.
pub struct ControlBase {
    id: ControlId,
    enabled: bool,
    update_order: i32,
    parent: Option<ControlId>,
    initialized: bool,
}

impl ControlBase {
    pub fn new(ctx: &mut UiContext) -> ControlBase {
        ControlBase {
            id: ctx.alloc_id(),
            enabled: true,
            update_order: 0,
            parent: None,
            initialized: false,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, ctx: &mut UiContext, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        ctx.push_event(UiEvent::EnabledChanged {
            control: self.id,
            enabled,
        });
    }

    pub fn update_order(&self) -> i32 {
        self.update_order
    }

    pub fn set_update_order(&mut self, ctx: &mut UiContext, order: i32) {
        if self.update_order == order {
            return;
        }
        self.update_order = order;
        ctx.push_event(UiEvent::UpdateOrderChanged {
            control: self.id,
            order,
        });
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, ctx: &mut UiContext, parent: Option<ControlId>) {
        if self.parent == parent {
            return;
        }
        self.parent = parent;
        ctx.push_event(UiEvent::ParentChanged {
            control: self.id,
            parent,
        });
    }

    /// Whether post-gate setup (styles, first shapes) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

/// Bounds change produced by moving or resizing a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsDelta {
    pub previous: Rectangle,
    pub current: Rectangle,
}

impl BoundsDelta {
    /// Translation component of the change. Pure resizes yield zero; children
    /// follow only this component.
    pub fn location_delta(&self) -> Point {
        self.current.location() - self.previous.location()
    }
}

/// Style slots of a visual control. `current` aliases whichever of the three
/// role styles matches the interaction state, or a caller-provided override.
pub struct StyleSlots {
    pub default: Style,
    pub active: Style,
    pub action: Style,
    pub current: Style,
}

/// The drawable capability: a shape list in screen coordinates, visibility,
/// style slots and the deferred-rebuild flag.
pub struct Visual {
    shapes: Vec<Shape>,
    screen_rectangle: Rectangle,
    visible: bool,
    draw_order: i32,
    styles: Option<StyleSlots>,
    needs_rebuild: bool,
    previous_pointer: PointerSnapshot,
}

impl Visual {
    pub fn new(screen_rectangle: Rectangle) -> Visual {
        Visual {
            shapes: Vec::new(),
            screen_rectangle,
            visible: true,
            draw_order: 0,
            styles: None,
            needs_rebuild: true,
            previous_pointer: PointerSnapshot::default(),
        }
    }

    /// Creates the three role styles from the defaults registry, once. Until
    /// this runs the control is inert.
    pub fn ensure_styles(&mut self, defaults: &mut DefaultStyles) {
        if self.styles.is_some() {
            return;
        }
        let default = Style::new(defaults, StyleRole::Default);
        let active = Style::new(defaults, StyleRole::Active);
        let action = Style::new(defaults, StyleRole::Action);
        let current = default.clone();
        self.styles = Some(StyleSlots {
            default,
            active,
            action,
            current,
        });
    }

    pub fn styles(&self) -> Option<&StyleSlots> {
        self.styles.as_ref()
    }

    pub fn styles_mut(&mut self) -> Option<&mut StyleSlots> {
        self.styles.as_mut()
    }

    pub fn current_style(&self) -> Option<Style> {
        self.styles.as_ref().map(|slots| slots.current.clone())
    }

    /// Swaps the current style and schedules a rebuild.
    pub fn set_current_style(&mut self, style: Style) {
        if let Some(slots) = self.styles.as_mut() {
            slots.current = style;
        }
        self.needs_rebuild = true;
    }

    fn apply_role(&mut self, role: StyleRole) {
        let Some(slots) = self.styles.as_mut() else {
            return;
        };
        slots.current = match role {
            StyleRole::Default => slots.default.clone(),
            StyleRole::Active => slots.active.clone(),
            StyleRole::Action => slots.action.clone(),
        };
        self.needs_rebuild = true;
    }

    /// Requests a shape rebuild on the next update tick. Idempotent; any
    /// number of requests collapse into one rebuild.
    pub fn refresh(&mut self) {
        self.needs_rebuild = true;
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub(crate) fn finish_rebuild(&mut self) {
        self.needs_rebuild = false;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.shapes
    }

    pub fn screen_rectangle(&self) -> Rectangle {
        self.screen_rectangle
    }

    /// Moves or resizes the control. Returns the bounds change, if any, so a
    /// container can forward the translation component to its children.
    pub fn set_screen_rectangle(&mut self, rectangle: Rectangle) -> Option<BoundsDelta> {
        if rectangle == self.screen_rectangle {
            return None;
        }
        let delta = BoundsDelta {
            previous: self.screen_rectangle,
            current: rectangle,
        };
        self.screen_rectangle = rectangle;
        self.needs_rebuild = true;
        Some(delta)
    }

    pub fn screen_location(&self) -> Point {
        self.screen_rectangle.location()
    }

    pub fn set_screen_location(&mut self, location: Point) -> Option<BoundsDelta> {
        self.set_screen_rectangle(self.screen_rectangle.with_location(location))
    }

    pub fn size(&self) -> Size {
        self.screen_rectangle.size()
    }

    pub fn set_size(&mut self, size: Size) -> Option<BoundsDelta> {
        self.set_screen_rectangle(self.screen_rectangle.with_size(size))
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_rebuild = true;
        }
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn set_draw_order(&mut self, order: i32) {
        self.draw_order = order;
    }

    pub fn previous_pointer(&self) -> PointerSnapshot {
        self.previous_pointer
    }

    /// Whether any shape contains the point. Shape list order is the implicit
    /// z-order; the first hit wins.
    pub fn hit_test(&self, point: Point) -> bool {
        self.shapes.iter().any(|shape| shape.bounds().contains(point))
    }

    /*
     * Derives this tick's pointer transitions. Hover on the previous tick is
     * recomputed against the CURRENT shape list rather than remembered, so
     * shape movement under a stationary pointer is indistinguishable from
     * pointer movement over stationary shapes.
     *
     * Emission order: enter, per-button up (with the high-level click), then
     * down or button-click, then any wheel delta, then leave. A button-click
     * takes the capture slot; any button-up releases it.
     */
    pub fn dispatch_pointer(
        &mut self,
        owner: ControlId,
        pointer: &mut PointerState,
    ) -> Vec<ControlEvent> {
        let current = pointer.snapshot();
        let previous = self.previous_pointer;
        self.previous_pointer = current;
        if !self.visible {
            return Vec::new();
        }

        let over = self.hit_test(current.position());
        let was_over = self.hit_test(previous.position());
        let mut events = Vec::new();

        if over && !was_over {
            events.push(ControlEvent::MouseEnter);
            self.apply_role(StyleRole::Active);
        }
        if over {
            for button in MouseButton::ALL {
                if previous.is_pressed(button) && !current.is_pressed(button) {
                    events.push(ControlEvent::MouseUp(button));
                    pointer.release_capture();
                    self.apply_role(StyleRole::Active);
                    if button == pointer.default_click_button() {
                        events.push(ControlEvent::Click);
                    }
                }
            }
            if let Some(button) = current.pressed_button() {
                if previous.is_pressed(button) {
                    events.push(ControlEvent::MouseDown(button));
                } else {
                    events.push(ControlEvent::MouseClick(button));
                    pointer.capture(owner);
                }
                self.apply_role(StyleRole::Action);
            }
            let scrolled = current.scroll() - previous.scroll();
            if scrolled != 0 {
                events.push(ControlEvent::MouseScroll(scrolled));
            }
        } else if was_over {
            events.push(ControlEvent::MouseLeave);
            self.apply_role(StyleRole::Default);
        }
        events
    }

    /// Draws the shape list inside this control's own batch run.
    pub fn draw(&self, ctx: &mut UiContext) {
        if !self.visible {
            return;
        }
        let Some(batch) = ctx.batch_mut() else {
            return;
        };
        batch.begin(true);
        for shape in &self.shapes {
            shape.draw(batch);
        }
        batch.end(true);
    }
}

/// A widget in the control tree.
pub trait Control {
    fn base(&self) -> &ControlBase;
    fn base_mut(&mut self) -> &mut ControlBase;

    fn visual(&self) -> Option<&Visual> {
        None
    }

    fn visual_mut(&mut self) -> Option<&mut Visual> {
        None
    }

    fn update(&mut self, ctx: &mut UiContext, tick: Tick);

    fn draw(&mut self, ctx: &mut UiContext) {
        if let Some(visual) = self.visual() {
            visual.draw(ctx);
        }
    }

    /// Moves the control by `delta`, containers included.
    fn translate_by(&mut self, delta: Point) {
        if let Some(visual) = self.visual_mut() {
            let target = visual.screen_rectangle().translated(delta);
            visual.set_screen_rectangle(target);
        }
    }
}

/// Runs pointer dispatch for a visual control and mirrors the derived events
/// onto the context's outbound queue.
pub(crate) fn drive_pointer(
    base: &ControlBase,
    visual: &mut Visual,
    ctx: &mut UiContext,
) -> Vec<ControlEvent> {
    let events = visual.dispatch_pointer(base.id(), &mut ctx.pointer);
    for event in &events {
        ctx.push_event(UiEvent::Pointer {
            control: base.id(),
            event: *event,
        });
    }
    events
}

/// Owned child controls of a container. Insertion order is both the update
/// fan-out order and the implicit z-order within the container.
pub struct Children {
    owner: ControlId,
    items: Vec<Box<dyn Control>>,
}

impl Children {
    pub(crate) fn new(owner: ControlId) -> Children {
        Children {
            owner,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, ctx: &mut UiContext, mut control: Box<dyn Control>) {
        control.base_mut().set_parent(ctx, Some(self.owner));
        debug!(
            "Children: Control {} added to container {}",
            control.base().id().raw(),
            self.owner.raw()
        );
        self.items.push(control);
    }

    pub fn remove(&mut self, ctx: &mut UiContext, id: ControlId) -> Option<Box<dyn Control>> {
        let index = self.items.iter().position(|c| c.base().id() == id)?;
        let mut control = self.items.remove(index);
        control.base_mut().set_parent(ctx, None);
        Some(control)
    }

    pub fn clear(&mut self, ctx: &mut UiContext) {
        for control in &mut self.items {
            control.base_mut().set_parent(ctx, None);
        }
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Box<dyn Control>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Control>> {
        self.items.iter_mut()
    }

    pub fn update_all(&mut self, ctx: &mut UiContext, tick: Tick) {
        for control in &mut self.items {
            control.update(ctx, tick);
        }
    }

    pub fn draw_all(&mut self, ctx: &mut UiContext) {
        for control in &mut self.items {
            control.draw(ctx);
        }
    }

    pub fn translate_all(&mut self, delta: Point) {
        for control in &mut self.items {
            control.translate_by(delta);
        }
    }

    pub fn set_visible_all(&mut self, visible: bool) {
        for control in &mut self.items {
            if let Some(visual) = control.visual_mut() {
                visual.set_visible(visible);
            }
        }
    }
}
