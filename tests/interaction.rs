/*
 * End-to-end scenarios driven through the public API only: a recording batch
 * and a fixed-advance measurer stand in for the host engine, and every
 * interaction goes through `UiContext::begin_tick` plus `Control::update`
 * exactly as an embedding game loop would.
 */

use std::cell::RefCell;
use std::rc::Rc;

use spriteforms::{
    BatchParams, Button, Clipboard, Color, ComboBox, Control, ControlEvent, DrawBatch, FontHandle,
    Form, KeyInput, Label, MeasureText, MouseButton, Point, PointerSnapshot, Rectangle, Resources,
    Size, TextBox, TextureHandle, Tick, UiContext, UiEvent,
};

#[derive(Default)]
struct BatchLog {
    begins: usize,
    ends: usize,
    quads: Vec<(TextureHandle, Rectangle, Color)>,
    texts: Vec<String>,
}

struct RecordingBatch {
    log: Rc<RefCell<BatchLog>>,
    scissor: Rectangle,
}

impl DrawBatch for RecordingBatch {
    fn begin(&mut self, _: &BatchParams) {
        self.log.borrow_mut().begins += 1;
    }

    fn end(&mut self) {
        self.log.borrow_mut().ends += 1;
    }

    fn draw_quad(&mut self, texture: TextureHandle, destination: Rectangle, tint: Color) {
        self.log.borrow_mut().quads.push((texture, destination, tint));
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
        self.log.borrow_mut().texts.push(text.to_string());
    }

    fn scissor_rectangle(&self) -> Rectangle {
        self.scissor
    }

    fn set_scissor_rectangle(&mut self, rectangle: Rectangle) {
        self.scissor = rectangle;
    }
}

/// 10px per character and 25px tall, matching the stock style scale of 1.0.
struct FixedMeasurer;

impl MeasureText for FixedMeasurer {
    fn measure(&self, _: FontHandle, text: &str) -> Size {
        Size::new(text.chars().count() as f32 * 10.0, 25.0).unwrap_or(Size::ZERO)
    }
}

struct NoClipboard;

impl Clipboard for NoClipboard {
    fn text(&mut self) -> Option<String> {
        None
    }
}

fn host_resources() -> Resources {
    Resources {
        font: FontHandle::new(1),
        blank_texture: TextureHandle::new(1),
        viewport: Rectangle::new(0, 0, 800.0, 600.0).unwrap(),
        measurer: Box::new(FixedMeasurer),
        clipboard: Box::new(NoClipboard),
    }
}

fn harness() -> (UiContext, Rc<RefCell<BatchLog>>) {
    let log = Rc::new(RefCell::new(BatchLog::default()));
    let mut ctx = UiContext::new();
    ctx.initialize(
        host_resources(),
        Box::new(RecordingBatch {
            log: Rc::clone(&log),
            scissor: Rectangle::EMPTY,
        }),
    );
    (ctx, log)
}

fn hover(ctx: &mut UiContext, control: &mut dyn Control, x: i32, y: i32, at: u64) {
    ctx.begin_tick(PointerSnapshot::at(x, y));
    control.update(ctx, Tick::from_millis(at));
}

fn press(ctx: &mut UiContext, control: &mut dyn Control, x: i32, y: i32, at: u64) {
    ctx.begin_tick(PointerSnapshot::at(x, y).with_pressed(MouseButton::Left));
    control.update(ctx, Tick::from_millis(at));
}

fn release(ctx: &mut UiContext, control: &mut dyn Control, x: i32, y: i32, at: u64) {
    ctx.begin_tick(PointerSnapshot::at(x, y));
    control.update(ctx, Tick::from_millis(at));
}

#[test]
fn controls_wait_for_host_resources() {
    let mut ctx = UiContext::new();
    let mut button = Button::new(&mut ctx);
    button.update(&mut ctx, Tick::from_millis(0));
    assert!(button.visual().shapes().is_empty(), "inert before the gate");

    let log = Rc::new(RefCell::new(BatchLog::default()));
    ctx.initialize(
        host_resources(),
        Box::new(RecordingBatch {
            log,
            scissor: Rectangle::EMPTY,
        }),
    );
    button.update(&mut ctx, Tick::from_millis(16));
    assert!(!button.visual().shapes().is_empty(), "live after it");
}

#[test]
fn button_inside_a_form_raises_clicked() {
    let (mut ctx, _) = harness();
    let mut form = Form::new(&mut ctx);
    form.set_screen_rectangle(Rectangle::new(100, 100, 300.0, 300.0).unwrap());
    form.show();
    // Bounds apply at the top of the next update; place the child after so
    // it is not shifted along with the move.
    form.update(&mut ctx, Tick::from_millis(0));

    let mut button = Button::new(&mut ctx);
    let button_id = button.base().id();
    button.visual_mut().set_screen_location(Point::new(150, 200));
    form.children_mut().add(&mut ctx, Box::new(button));
    form.update(&mut ctx, Tick::from_millis(16));

    hover(&mut ctx, &mut form, 160, 210, 32);
    press(&mut ctx, &mut form, 160, 210, 48);
    release(&mut ctx, &mut form, 160, 210, 64);

    assert!(
        ctx.take_events()
            .iter()
            .any(|e| *e == UiEvent::ButtonClicked { control: button_id }),
        "the child button's click must reach the queue"
    );
    assert_eq!(
        form.screen_rectangle().location(),
        Point::new(100, 100),
        "a motionless click on a child leaves the form in place"
    );
}

#[test]
fn combobox_expands_and_selects_through_clicks() {
    let (mut ctx, _) = harness();
    let mut combo = ComboBox::new(&mut ctx);
    let combo_id = combo.base().id();
    combo.set_items(vec!["red".into(), "green".into(), "blue".into()]);
    combo.update(&mut ctx, Tick::from_millis(0));

    hover(&mut ctx, &mut combo, 10, 10, 16);
    press(&mut ctx, &mut combo, 10, 10, 32);
    release(&mut ctx, &mut combo, 10, 10, 48);
    assert!(combo.is_expanded());
    assert!(ctx.take_events().iter().any(|e| *e
        == UiEvent::ExpandedChanged {
            control: combo_id,
            expanded: true,
        }));

    // Item rows stack below the selector in 30px steps; y=75 is row 1.
    hover(&mut ctx, &mut combo, 10, 75, 64);
    press(&mut ctx, &mut combo, 10, 75, 80);
    release(&mut ctx, &mut combo, 10, 75, 96);

    assert!(!combo.is_expanded());
    assert_eq!(combo.selected_index(), Some(1));
    assert_eq!(combo.selected_value(), Some("green"));
    assert!(ctx.take_events().iter().any(|e| *e
        == UiEvent::SelectionChanged {
            control: combo_id,
            index: 1,
            value: "green".into(),
        }));
}

#[test]
fn textbox_takes_focus_and_reports_typed_text() {
    let (mut ctx, _) = harness();
    let mut textbox = TextBox::new(&mut ctx);
    let id = textbox.base().id();
    textbox.update(&mut ctx, Tick::from_millis(0));

    hover(&mut ctx, &mut textbox, 10, 10, 16);
    press(&mut ctx, &mut textbox, 10, 10, 32);
    release(&mut ctx, &mut textbox, 10, 10, 48);
    assert!(textbox.is_focused());

    ctx.begin_tick(PointerSnapshot::at(10, 10));
    ctx.keyboard.push(KeyInput::Character('h'));
    ctx.keyboard.push(KeyInput::Character('i'));
    textbox.update(&mut ctx, Tick::from_millis(64));

    assert_eq!(textbox.text(), "hi");
    assert!(ctx.take_events().iter().any(|e| *e
        == UiEvent::TextChanged {
            control: id,
            text: "hi".into(),
        }));
}

#[test]
fn dragging_across_a_neighbour_still_raises_its_events() {
    let (mut ctx, _) = harness();
    let mut left = Button::new(&mut ctx);
    let left_id = left.base().id();
    let mut right = Button::new(&mut ctx);
    let right_id = right.base().id();
    right.visual_mut().set_screen_location(Point::new(200, 0));

    let at = |millis| Tick::from_millis(millis);
    left.update(&mut ctx, at(0));
    right.update(&mut ctx, at(0));

    ctx.begin_tick(PointerSnapshot::at(10, 10));
    left.update(&mut ctx, at(16));
    right.update(&mut ctx, at(16));

    ctx.begin_tick(PointerSnapshot::at(10, 10).with_pressed(MouseButton::Left));
    left.update(&mut ctx, at(32));
    right.update(&mut ctx, at(32));
    assert_eq!(ctx.pointer.captured(), Some(left_id));
    ctx.take_events();

    // Drag the held press across the neighbour: it still sees the enter,
    // and the ongoing press does not move the capture.
    ctx.begin_tick(PointerSnapshot::at(210, 10).with_pressed(MouseButton::Left));
    left.update(&mut ctx, at(48));
    right.update(&mut ctx, at(48));

    assert!(ctx.take_events().iter().any(|e| matches!(
        e,
        UiEvent::Pointer { control, event }
            if *control == right_id && *event == ControlEvent::MouseEnter
    )));
    assert_eq!(ctx.pointer.captured(), Some(left_id));
}

#[test]
fn each_control_draws_in_its_own_batch_run() {
    let (mut ctx, log) = harness();
    let mut button = Button::new(&mut ctx);
    button.update(&mut ctx, Tick::from_millis(0));
    button.draw(&mut ctx);

    let log = log.borrow();
    assert_eq!(log.begins, 1);
    assert_eq!(log.ends, 1);
    // A bordered face is four edge strips plus the interior.
    assert_eq!(log.quads.len(), 5);
    assert_eq!(log.texts, vec!["Button".to_string()]);
}

#[test]
fn labels_size_to_their_text() {
    let (mut ctx, _) = harness();
    let mut label = Label::new(&mut ctx);
    label.set_text("hello world");
    label.update(&mut ctx, Tick::from_millis(0));
    assert_eq!(
        label.visual().size(),
        Size::new(110.0, 25.0).unwrap(),
        "fixed-advance metrics at scale 1.0"
    );
}
