/*
 * Concrete widgets. Each lives in its own file and composes the shared core:
 * a `ControlBase` for identity, a `Visual` for shapes and pointer dispatch,
 * and whatever widget-specific state its behavior needs.
 */

mod button;
mod checkbox;
mod combobox;
mod form;
mod label;
mod picture_box;
mod progress_bar;
mod range;
mod slider;
mod textbox;

pub use button::{Button, ButtonContent};
pub use checkbox::CheckBox;
pub use combobox::ComboBox;
pub use form::{CancelToken, Form};
pub use label::Label;
pub use picture_box::PictureBox;
pub use progress_bar::ProgressBar;
pub use range::{RangeChange, RangeState};
pub use slider::Slider;
pub use textbox::TextBox;

use crate::geometry::{Point, Rectangle, Size};

/// Builds a rectangle from possibly unchecked layout math, clamping negative
/// extents to zero.
pub(crate) fn layout_rect(x: i32, y: i32, width: f32, height: f32) -> Rectangle {
    let size = Size::new(width.max(0.0), height.max(0.0)).unwrap_or(Size::ZERO);
    Rectangle::from_parts(Point::new(x, y), size)
}
