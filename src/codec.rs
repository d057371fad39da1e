//! Table readers and builders for each kind, at a fixed element type.
//!
//! | Kind     | Fields                       |
//! |----------|------------------------------|
//! | `Mat`    | `rows`, `cols`, `dt`, `data` |
//! | `Size`   | `width`, `height`, `dt`      |
//! | `Point`  | `x`, `y`, `dt`               |
//! | `Point3` | `x`, `y`, `z`, `dt`          |
//!
//! The `*_as` readers trust the caller to have picked `T` from the `dt` field;
//! [`crate::dispatch`] does that. Missing or mistyped fields surface from the
//! tree accessors unchanged.

use crate::buffer::{decode_matrix_values, encode_matrix};
use crate::convert::{find, find_scalar, lookup, IntoToml};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::geometry::{Point, Point3, Size};
use crate::mat::Mat;
use crate::table;
use toml::Value;

/// Name of the tag field shared by every kind.
pub const TAG_FIELD: &str = "dt";

fn tag_value<T: Element>() -> Value {
    Value::String(T::DTYPE.tag().to_string())
}

/// Reads a matrix table whose elements are `T`.
///
/// # Errors
///
/// Returns field errors for `rows`, `cols` or `data`, and the shape errors of
/// [`crate::buffer::decode_matrix`].
pub fn decode_mat_as<T: Element>(value: &Value) -> Result<Mat> {
    let rows: usize = find(value, "rows")?;
    let cols: usize = find(value, "cols")?;
    let data = lookup(value, "data")?;
    let items = data
        .as_array()
        .ok_or_else(|| Error::type_mismatch("array", data.type_str()).in_field("data"))?;
    decode_matrix_values::<T>(&[rows, cols], items).map_err(|e| e.in_field("data"))
}

/// Writes a matrix whose elements are `T` as a table.
///
/// # Errors
///
/// Returns [`Error::DTypeMismatch`] if the matrix does not hold `T`.
pub fn encode_mat_as<T: Element>(mat: &Mat) -> Result<Value> {
    let parts = encode_matrix::<T>(mat)?;
    let data: Vec<Value> = parts.data.into_iter().map(Element::to_scalar).collect();
    Ok(table! {
        "rows" => parts.rows.into_toml()?,
        "cols" => parts.cols.into_toml()?,
        "dt" => tag_value::<T>(),
        "data" => data,
    })
}

pub fn decode_size_as<T: Element>(value: &Value) -> Result<Size<T>> {
    Ok(Size {
        width: find_scalar(value, "width")?,
        height: find_scalar(value, "height")?,
    })
}

pub fn encode_size_as<T: Element>(size: &Size<T>) -> Value {
    table! {
        "width" => size.width.to_scalar(),
        "height" => size.height.to_scalar(),
        "dt" => tag_value::<T>(),
    }
}

pub fn decode_point_as<T: Element>(value: &Value) -> Result<Point<T>> {
    Ok(Point {
        x: find_scalar(value, "x")?,
        y: find_scalar(value, "y")?,
    })
}

pub fn encode_point_as<T: Element>(point: &Point<T>) -> Value {
    table! {
        "x" => point.x.to_scalar(),
        "y" => point.y.to_scalar(),
        "dt" => tag_value::<T>(),
    }
}

pub fn decode_point3_as<T: Element>(value: &Value) -> Result<Point3<T>> {
    Ok(Point3 {
        x: find_scalar(value, "x")?,
        y: find_scalar(value, "y")?,
        z: find_scalar(value, "z")?,
    })
}

pub fn encode_point3_as<T: Element>(point: &Point3<T>) -> Value {
    table! {
        "x" => point.x.to_scalar(),
        "y" => point.y.to_scalar(),
        "z" => point.z.to_scalar(),
        "dt" => tag_value::<T>(),
    }
}
