/*
 * Defines the drawable shapes controls assemble during a rebuild. A control's
 * visual state is a flat list of these; the same list doubles as the
 * hit-testing surface, so a shape's bounds are maintained in absolute screen
 * coordinates.
 */

use crate::batch::{BatchParams, FontHandle, MeasureText, SpriteBatch};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rectangle, Size};
use crate::style::{DefaultStyles, Style, StyleRole};

#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(RectangleShape),
    Text(TextShape),
}

impl Shape {
    pub fn bounds(&self) -> Rectangle {
        match self {
            Shape::Rectangle(shape) => shape.bounds(),
            Shape::Text(shape) => shape.bounds(),
        }
    }

    pub fn draw(&self, batch: &mut SpriteBatch) {
        match self {
            Shape::Rectangle(shape) => shape.draw(batch),
            Shape::Text(shape) => shape.draw(batch),
        }
    }

    pub fn translate(&mut self, delta: Point) {
        match self {
            Shape::Rectangle(shape) => shape.bounds = shape.bounds.translated(delta),
            Shape::Text(shape) => {
                shape.bounds = shape.bounds.translated(delta);
                if let Some(clip) = shape.clip.as_mut() {
                    *clip = clip.translated(delta);
                }
            }
        }
    }
}

/// A filled quad, optionally with a border frame. The border is rendered as
/// four edge strips in the style's border color around an inner fill.
#[derive(Debug, Clone)]
pub struct RectangleShape {
    bounds: Rectangle,
    style: Style,
}

impl RectangleShape {
    pub fn styled(bounds: Rectangle, style: Style) -> Result<RectangleShape> {
        if bounds.is_empty() {
            return Err(Error::InvalidArgument(
                "rectangle shape bounds must not be empty".into(),
            ));
        }
        Ok(RectangleShape { bounds, style })
    }

    /// Borderless quad in a single color.
    pub fn filled(
        bounds: Rectangle,
        color: Color,
        defaults: &DefaultStyles,
    ) -> Result<RectangleShape> {
        let style = Style::builder(StyleRole::Default)
            .back_color(color)
            .border_thickness(0)
            .build(defaults)?;
        RectangleShape::styled(bounds, style)
    }

    /// Bordered quad; `fill` of `Color::TRANSPARENT` leaves only the frame
    /// visible.
    pub fn bordered(
        bounds: Rectangle,
        thickness: i32,
        border_color: Color,
        fill: Color,
        defaults: &DefaultStyles,
    ) -> Result<RectangleShape> {
        let style = Style::builder(StyleRole::Default)
            .back_color(fill)
            .border_color(border_color)
            .border_thickness(thickness)
            .build(defaults)?;
        RectangleShape::styled(bounds, style)
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    fn quad(x: i32, y: i32, width: f32, height: f32) -> Rectangle {
        let size = Size::new(width.max(0.0), height.max(0.0)).unwrap_or(Size::ZERO);
        Rectangle::from_parts(Point::new(x, y), size)
    }

    pub fn draw(&self, batch: &mut SpriteBatch) {
        let texture = self.style.texture();
        let thickness = self.style.border_thickness();
        if thickness <= 0 {
            batch.draw_quad(texture, self.bounds, self.style.back_color());
            return;
        }
        let t = thickness as f32;
        let (x, y) = (self.bounds.x, self.bounds.y);
        let (w, h) = (self.bounds.width(), self.bounds.height());
        let border = self.style.border_color();
        batch.draw_quad(texture, Self::quad(x, y, w, t), border);
        batch.draw_quad(texture, Self::quad(x, self.bounds.bottom() - thickness, w, t), border);
        batch.draw_quad(texture, Self::quad(x, y + thickness, t, h - 2.0 * t), border);
        batch.draw_quad(
            texture,
            Self::quad(self.bounds.right() - thickness, y + thickness, t, h - 2.0 * t),
            border,
        );
        batch.draw_quad(
            texture,
            Self::quad(x + thickness, y + thickness, w - 2.0 * t, h - 2.0 * t),
            self.style.back_color(),
        );
    }
}

/// A run of text, optionally scissor-clipped to a rectangle.
#[derive(Debug, Clone)]
pub struct TextShape {
    text: String,
    font: FontHandle,
    color: Color,
    scale: f32,
    rotation: f32,
    origin: (f32, f32),
    bounds: Rectangle,
    clip: Option<Rectangle>,
}

impl TextShape {
    pub fn positioned(
        text: impl Into<String>,
        font: FontHandle,
        color: Color,
        position: Point,
        scale: f32,
        measurer: &dyn MeasureText,
    ) -> Result<TextShape> {
        let text = text.into();
        let size = measurer.measure(font, &text).scaled(scale)?;
        Ok(TextShape {
            text,
            font,
            color,
            scale,
            rotation: 0.0,
            origin: (0.0, 0.0),
            bounds: Rectangle::from_parts(position, size),
            clip: None,
        })
    }

    /// Like `positioned`, but drawn through an immediate scissor-test run so
    /// overflow past `clip` is cut off.
    pub fn clipped(
        text: impl Into<String>,
        font: FontHandle,
        color: Color,
        position: Point,
        scale: f32,
        clip: Rectangle,
        measurer: &dyn MeasureText,
    ) -> Result<TextShape> {
        let mut shape = TextShape::positioned(text, font, color, position, scale, measurer)?;
        shape.clip = Some(clip);
        Ok(shape)
    }

    /// Scales the text down as needed to fit `bounds` and centers it there.
    pub fn fitted(
        text: impl Into<String>,
        font: FontHandle,
        color: Color,
        bounds: Rectangle,
        base_scale: f32,
        measurer: &dyn MeasureText,
    ) -> Result<TextShape> {
        let text = text.into();
        let measured = measurer.measure(font, &text);
        let mut scale = base_scale;
        if measured.width() > 0.0 && measured.height() > 0.0 {
            let fit_x = bounds.width() / measured.width();
            let fit_y = bounds.height() / measured.height();
            scale = scale.min(fit_x).min(fit_y);
        }
        let position = TextShape::center_in(&text, font, scale, bounds, measurer);
        TextShape::positioned(text, font, color, position, scale, measurer)
    }

    /// Top-left position that centers `text` at `scale` inside `bounds`.
    pub fn center_in(
        text: &str,
        font: FontHandle,
        scale: f32,
        bounds: Rectangle,
        measurer: &dyn MeasureText,
    ) -> Point {
        let measured = measurer.measure(font, text);
        let width = measured.width() * scale;
        let height = measured.height() * scale;
        Point::new(
            bounds.x + ((bounds.width() - width) / 2.0) as i32,
            bounds.y + ((bounds.height() - height) / 2.0) as i32,
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn clip(&self) -> Option<Rectangle> {
        self.clip
    }

    pub fn draw(&self, batch: &mut SpriteBatch) {
        match self.clip {
            None => batch.draw_text(
                self.font,
                &self.text,
                self.bounds.location(),
                self.color,
                self.rotation,
                self.origin,
                self.scale,
            ),
            Some(clip) => {
                // Restart the host run in immediate scissor mode so the clip
                // applies to exactly this string.
                let raw = batch.raw();
                raw.end();
                raw.begin(&BatchParams::clipping());
                let previous = raw.scissor_rectangle();
                if previous.is_empty() || previous.contains_rectangle(&clip) {
                    raw.set_scissor_rectangle(clip);
                }
                raw.draw_text(
                    self.font,
                    &self.text,
                    self.bounds.location(),
                    self.color,
                    self.rotation,
                    self.origin,
                    self.scale,
                );
                raw.set_scissor_rectangle(previous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::TextureHandle;

    pub(crate) struct FixedAdvance(pub f32);

    impl MeasureText for FixedAdvance {
        fn measure(&self, _font: FontHandle, text: &str) -> Size {
            Size::new(text.chars().count() as f32 * self.0, self.0)
                .unwrap_or(Size::ZERO)
        }
    }

    fn registry() -> DefaultStyles {
        let mut defaults = DefaultStyles::new();
        defaults.reset(FontHandle::new(1), 1.0, TextureHandle::new(1));
        defaults
    }

    #[test]
    fn rectangle_shape_rejects_empty_bounds() {
        let defaults = registry();
        assert!(RectangleShape::filled(Rectangle::EMPTY, Color::WHITE, &defaults).is_err());
    }

    #[test]
    fn text_bounds_scale_with_the_measured_size() {
        let measurer = FixedAdvance(10.0);
        let shape = TextShape::positioned(
            "abcd",
            FontHandle::new(1),
            Color::BLACK,
            Point::new(5, 5),
            0.5,
            &measurer,
        )
        .unwrap();
        assert_eq!(shape.bounds(), Rectangle::new(5, 5, 20.0, 5.0).unwrap());
    }

    #[test]
    fn fitted_text_shrinks_to_its_box_and_centers() {
        let measurer = FixedAdvance(10.0);
        let bounds = Rectangle::new(0, 0, 20.0, 20.0).unwrap();
        let shape = TextShape::fitted(
            "abcd",
            FontHandle::new(1),
            Color::BLACK,
            bounds,
            1.0,
            &measurer,
        )
        .unwrap();
        // 40x10 measured, limited by width: scale 0.5 -> 20x5, centered.
        assert_eq!(shape.bounds(), Rectangle::new(0, 7, 20.0, 5.0).unwrap());
    }

    #[test]
    fn translate_moves_clip_with_the_text() {
        let measurer = FixedAdvance(10.0);
        let clip = Rectangle::new(0, 0, 10.0, 10.0).unwrap();
        let mut shape = Shape::Text(
            TextShape::clipped(
                "ab",
                FontHandle::new(1),
                Color::BLACK,
                Point::ZERO,
                1.0,
                clip,
                &measurer,
            )
            .unwrap(),
        );
        shape.translate(Point::new(3, 4));
        assert_eq!(shape.bounds().location(), Point::new(3, 4));
        let Shape::Text(text) = &shape else { unreachable!() };
        assert_eq!(text.clip().map(|c| c.location()), Some(Point::new(3, 4)));
    }
}
