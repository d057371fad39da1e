//! Small geometric value types: [`Size`], [`Point`] and [`Point3`].

use crate::dtype::Element;

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

/// A 2-D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// A 3-D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Element> Size<T> {
    /// Creates a size from its width and height.
    #[must_use]
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// `width * height` in `f64`.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.to_f64() * self.height.to_f64()
    }

    /// Converts to another element type, or `None` if a field does not fit.
    ///
    /// ```rust
    /// use voml::Size;
    ///
    /// assert_eq!(Size::new(4u8, 3).cast::<f32>(), Some(Size::new(4.0, 3.0)));
    /// assert_eq!(Size::new(1.5f64, 3.0).cast::<i32>(), None);
    /// ```
    #[must_use]
    pub fn cast<U: Element>(self) -> Option<Size<U>> {
        Some(Size {
            width: cast(self.width)?,
            height: cast(self.height)?,
        })
    }
}

impl<T: Element> Point<T> {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// Converts to another element type, or `None` if a coordinate does not fit.
    #[must_use]
    pub fn cast<U: Element>(self) -> Option<Point<U>> {
        Some(Point {
            x: cast(self.x)?,
            y: cast(self.y)?,
        })
    }
}

impl<T: Element> Point3<T> {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: T, y: T, z: T) -> Self {
        Point3 { x, y, z }
    }

    /// Converts to another element type, or `None` if a coordinate does not fit.
    #[must_use]
    pub fn cast<U: Element>(self) -> Option<Point3<U>> {
        Some(Point3 {
            x: cast(self.x)?,
            y: cast(self.y)?,
            z: cast(self.z)?,
        })
    }
}

// Every element type widens to f64 exactly.
fn cast<T: Element, U: Element>(value: T) -> Option<U> {
    U::from_f64(value.to_f64())
}
