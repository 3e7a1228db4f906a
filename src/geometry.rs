/*
 * Provides the geometric primitives used by controls and shapes: integer
 * screen points, floating-point sizes with an explicit "empty" sentinel, and
 * screen-space rectangles. Sizes validate eagerly so a negative dimension can
 * never circulate through layout code.
 */

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A point in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/*
 * A two-dimensional extent. `Size::EMPTY` is a distinguished sentinel meaning
 * "no size assigned yet"; it is distinct from a zero size. Arithmetic treats
 * the sentinel as zero, but scalar division rejects it outright because a
 * scaled "unassigned" size has no meaning.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const EMPTY: Size = Size {
        width: f32::NEG_INFINITY,
        height: f32::NEG_INFINITY,
    };

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Result<Size> {
        if width < 0.0 || height < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "size dimensions must be non-negative, got ({width}, {height})"
            )));
        }
        Ok(Size { width, height })
    }

    pub fn is_empty(&self) -> bool {
        self.width == f32::NEG_INFINITY && self.height == f32::NEG_INFINITY
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_width(&mut self, width: f32) -> Result<()> {
        if width < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "size width must be non-negative, got {width}"
            )));
        }
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: f32) -> Result<()> {
        if height < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "size height must be non-negative, got {height}"
            )));
        }
        self.height = height;
        Ok(())
    }

    /// Multiplies both dimensions by a non-negative factor.
    pub fn scaled(self, factor: f32) -> Result<Size> {
        if self.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot scale the empty size".into(),
            ));
        }
        if factor < 0.0 {
            return Err(Error::InvalidRange(format!(
                "scale factor must be non-negative, got {factor}"
            )));
        }
        Ok(Size {
            width: self.width * factor,
            height: self.height * factor,
        })
    }

    fn or_zero(self) -> Size {
        if self.is_empty() { Size::ZERO } else { self }
    }

    fn magnitude(&self) -> f32 {
        self.or_zero().width + self.or_zero().height
    }
}

impl Add for Size {
    type Output = Result<Size>;

    fn add(self, other: Size) -> Result<Size> {
        let (a, b) = (self.or_zero(), other.or_zero());
        Size::new(a.width + b.width, a.height + b.height)
    }
}

impl Sub for Size {
    type Output = Result<Size>;

    fn sub(self, other: Size) -> Result<Size> {
        let (a, b) = (self.or_zero(), other.or_zero());
        if b.width > a.width || b.height > a.height {
            return Err(Error::InvalidRange(format!(
                "size subtraction {a} - {b} produces a negative dimension"
            )));
        }
        Size::new(a.width - b.width, a.height - b.height)
    }
}

impl Div<f32> for Size {
    type Output = Result<Size>;

    fn div(self, divisor: f32) -> Result<Size> {
        if self.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot divide the empty size".into(),
            ));
        }
        if divisor <= 0.0 {
            return Err(Error::InvalidRange(format!(
                "size divisor must be positive, got {divisor}"
            )));
        }
        Size::new(self.width / divisor, self.height / divisor)
    }
}

/// Coarse comparison by the sum of both dimensions. Two different sizes with
/// equal sums compare as neither less nor greater.
impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Size) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.magnitude().partial_cmp(&other.magnitude()) {
            Some(Ordering::Equal) => None,
            ordering => ordering,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(empty)")
        } else {
            write!(f, "({}, {})", self.width, self.height)
        }
    }
}

impl FromStr for Size {
    type Err = Error;

    /// Parses a "width,height" pair.
    fn from_str(text: &str) -> Result<Size> {
        let mut parts = text.splitn(2, ',');
        let (width, height) = match (parts.next(), parts.next()) {
            (Some(w), Some(h)) => (w.trim(), h.trim()),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "expected \"width,height\", got {text:?}"
                )));
            }
        };
        let width = width
            .parse::<f32>()
            .map_err(|e| Error::InvalidArgument(format!("bad width {width:?}: {e}")))?;
        let height = height
            .parse::<f32>()
            .map_err(|e| Error::InvalidArgument(format!("bad height {height:?}: {e}")))?;
        Size::new(width, height)
    }
}

/// An axis-aligned rectangle in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    size: Size,
}

impl Rectangle {
    pub const EMPTY: Rectangle = Rectangle {
        x: 0,
        y: 0,
        size: Size::EMPTY,
    };

    pub fn new(x: i32, y: i32, width: f32, height: f32) -> Result<Rectangle> {
        Ok(Rectangle {
            x,
            y,
            size: Size::new(width, height)?,
        })
    }

    pub fn from_parts(location: Point, size: Size) -> Rectangle {
        Rectangle {
            x: location.x,
            y: location.y,
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.or_zero().width()
    }

    pub fn height(&self) -> f32 {
        self.size.or_zero().height()
    }

    pub fn right(&self) -> i32 {
        self.x + self.width() as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height() as i32
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + (self.width() / 2.0) as i32,
            self.y + (self.height() / 2.0) as i32,
        )
    }

    /// Half-open containment: the left and top edges are inside, the right and
    /// bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translated(&self, delta: Point) -> Rectangle {
        Rectangle {
            x: self.x + delta.x,
            y: self.y + delta.y,
            size: self.size,
        }
    }

    pub fn with_location(&self, location: Point) -> Rectangle {
        Rectangle {
            x: location.x,
            y: location.y,
            size: self.size,
        }
    }

    pub fn with_size(&self, size: Size) -> Rectangle {
        Rectangle {
            x: self.x,
            y: self.y,
            size,
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.location(), self.size)
    }
}
