//! # voml
//!
//! Typed TOML encoding for the numeric and geometric values a computer-vision
//! pipeline keeps in its config files: dense matrices, sizes, 2-D and 3-D
//! points.
//!
//! ## Wire Format
//!
//! Every value is a flat table of its fields plus a one-character `dt` tag
//! naming the element type:
//!
//! ```toml
//! [camera_matrix]
//! rows = 2
//! cols = 3
//! dt = "i"
//! data = [1, 2, 3, 4, 5, 6]
//!
//! [image_size]
//! width = 640
//! height = 480
//! dt = "i"
//!
//! [origin]
//! x = 1.5
//! y = -2.0
//! z = 0.0
//! dt = "d"
//! ```
//!
//! | Tag | Element | Tag | Element |
//! |-----|---------|-----|---------|
//! | `u` | `u8`    | `i` | `i32`   |
//! | `c` | `i8`    | `f` | `f32`   |
//! | `w` | `u16`   | `d` | `f64`   |
//! | `s` | `i16`   |     |         |
//!
//! ## Quick Start
//!
//! ```rust
//! use voml::{from_str, to_string, Mat};
//!
//! let mat: Mat = from_str("rows = 2\ncols = 3\ndt = \"i\"\ndata = [1, 2, 3, 4, 5, 6]").unwrap();
//! assert_eq!(mat.row::<i32>(1).unwrap(), Some(vec![4, 5, 6]));
//!
//! let text = to_string(&mat).unwrap();
//! let back: Mat = from_str(&text).unwrap();
//! assert_eq!(mat, back);
//! ```
//!
//! ### Inside Config Structs
//!
//! All four kinds implement `Serialize` and `Deserialize`:
//!
//! ```rust
//! use serde::Deserialize;
//! use voml::{Mat, Point, Size};
//!
//! #[derive(Deserialize)]
//! struct Calibration {
//!     camera: Mat,
//!     image: Size<i32>,
//!     center: Point<f64>,
//! }
//!
//! let calib: Calibration = toml::from_str(r#"
//!     camera = { rows = 1, cols = 2, dt = "d", data = [0.5, 0.25] }
//!     image = { width = 640, height = 480, dt = "i" }
//!     center = { x = 320.0, y = 240.0, dt = "d" }
//! "#).unwrap();
//! assert_eq!(calib.image.width, 640);
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Every decode either returns a fully populated value or an [`Error`]
//! - Unknown tags and unrepresentable element types are errors, never defaults

pub mod buffer;
pub mod codec;
pub mod convert;
pub mod dispatch;
pub mod dtype;
pub mod error;
pub mod geometry;
pub mod macros;
pub mod mat;
pub mod options;

pub use convert::{find, FromToml, IntoToml};
pub use dtype::{tag_for, DType, Depth, Element, UNREPRESENTABLE_TAG};
pub use error::{Error, Result};
pub use geometry::{Point, Point3, Size};
pub use mat::Mat;
pub use options::Options;
pub use toml;

use toml::Value;

/// Parses TOML text into a tree.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not valid TOML.
pub fn parse(s: &str) -> Result<Value> {
    Ok(Value::Table(toml::from_str(s)?))
}

/// Converts any `T: IntoToml` to a tree node.
///
/// # Examples
///
/// ```rust
/// use voml::{to_value, Size};
///
/// let value = to_value(&Size::new(4u8, 4)).unwrap();
/// assert_eq!(value.get("dt").and_then(|v| v.as_str()), Some("u"));
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TOML representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + IntoToml,
{
    value.into_toml()
}

/// Converts a tree node to any `T: FromToml`.
///
/// # Errors
///
/// Returns an error if the node does not describe a `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T: FromToml>(value: &Value) -> Result<T> {
    T::from_toml(value)
}

/// Renders any `T: IntoToml` as a TOML document.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or is not a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + IntoToml,
{
    to_string_with_options(value, Options::default())
}

/// Renders any `T: IntoToml` as a pretty-printed TOML document.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or is not a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + IntoToml,
{
    to_string_with_options(value, Options::pretty())
}

/// Renders any `T: IntoToml` as a TOML document with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or is not a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: Options) -> Result<String>
where
    T: ?Sized + IntoToml,
{
    let tree = value.into_toml()?;
    let text = if options.pretty {
        toml::to_string_pretty(&tree)?
    } else {
        toml::to_string(&tree)?
    };
    Ok(text)
}

/// Parses a whole TOML document as a `T`.
///
/// # Examples
///
/// ```rust
/// use voml::{from_str, Size};
///
/// let size: Size<u8> = from_str("width = 4\nheight = 4\ndt = \"u\"").unwrap();
/// assert_eq!(size, Size::new(4, 4));
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or does not describe a `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: FromToml>(s: &str) -> Result<T> {
    from_value(&parse(s)?)
}
