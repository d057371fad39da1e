//! Runtime tag to compile-time element type.
//!
//! Decoding reads `dt`, resolves it to a [`DType`] and runs the codec
//! instantiated for that element type. Encoding a [`Mat`] resolves its
//! [`Depth`](crate::Depth) the same way; sizes and points already know their
//! element type statically.
//!
//! Every branch goes through `with_element!`, a single exhaustive `match`
//! over [`DType`] with no wildcard arm, so adding an element type forces each
//! call site to handle it.

use crate::codec::{self, TAG_FIELD};
use crate::convert::find;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::geometry::{Point, Point3, Size};
use crate::mat::Mat;
use toml::Value;
use tracing::{debug, trace};

/// Expands `$body` once per element type with `$elem` bound to that type.
macro_rules! with_element {
    ($dtype:expr, $elem:ident => $body:expr) => {
        match $dtype {
            DType::U8 => {
                type $elem = u8;
                $body
            }
            DType::I8 => {
                type $elem = i8;
                $body
            }
            DType::U16 => {
                type $elem = u16;
                $body
            }
            DType::I16 => {
                type $elem = i16;
                $body
            }
            DType::I32 => {
                type $elem = i32;
                $body
            }
            DType::F32 => {
                type $elem = f32;
                $body
            }
            DType::F64 => {
                type $elem = f64;
                $body
            }
        }
    };
}

/// Reads and validates the `dt` field of a table.
///
/// # Errors
///
/// - [`Error::MissingField`] / [`Error::TypeMismatch`] if `dt` is absent or
///   not a string
/// - [`Error::UnknownTypeTag`] if it is not exactly one known character
pub fn read_tag(value: &Value) -> Result<DType> {
    let tag: String = find(value, TAG_FIELD)?;
    DType::from_tag(&tag).map_err(|e| {
        debug!(dt = %tag, "rejecting unknown type tag");
        e
    })
}

/// Decodes a matrix table with the element type named by its `dt` field.
///
/// # Errors
///
/// Tag, field and shape errors; see [`read_tag`] and [`codec::decode_mat_as`].
pub fn decode_mat(value: &Value) -> Result<Mat> {
    let dtype = read_tag(value)?;
    trace!(dt = %dtype, kind = "mat", "decoding");
    with_element!(dtype, E => codec::decode_mat_as::<E>(value))
}

/// Encodes a matrix, tagging it with its element type.
///
/// # Errors
///
/// Returns [`Error::UnrepresentableType`] if the matrix depth has no tag.
pub fn encode_mat(mat: &Mat) -> Result<Value> {
    let dtype = DType::try_from(mat.depth()).map_err(|e| {
        debug!(depth = mat.depth().code(), "rejecting matrix without a tag");
        e
    })?;
    trace!(dt = %dtype, kind = "mat", rows = mat.rows(), cols = mat.cols(), "encoding");
    with_element!(dtype, E => codec::encode_mat_as::<E>(mat))
}

fn convert_field<S: Element, T: Element>(value: S, field: &str) -> Result<T> {
    T::from_f64(value.to_f64()).ok_or_else(|| {
        Error::type_mismatch(
            T::DTYPE.name(),
            format!("{} value that does not fit", S::DTYPE.name()),
        )
        .in_field(field)
    })
}

/// Decodes a size table into `Size<T>`.
///
/// Fields are read as the type named by `dt` and then converted to `T`; the
/// conversion fails rather than truncating.
///
/// # Errors
///
/// Tag and field errors, or [`Error::TypeMismatch`] if a field does not fit `T`.
pub fn decode_size<T: Element>(value: &Value) -> Result<Size<T>> {
    let dtype = read_tag(value)?;
    trace!(dt = %dtype, kind = "size", "decoding");
    with_element!(dtype, E => {
        let size = codec::decode_size_as::<E>(value)?;
        Ok(Size {
            width: convert_field(size.width, "width")?,
            height: convert_field(size.height, "height")?,
        })
    })
}

pub fn encode_size<T: Element>(size: &Size<T>) -> Value {
    let dtype = T::DTYPE;
    trace!(dt = %dtype, kind = "size", "encoding");
    codec::encode_size_as(size)
}

/// Decodes a 2-D point table into `Point<T>`, converting like [`decode_size`].
///
/// # Errors
///
/// Tag and field errors, or [`Error::TypeMismatch`] if a coordinate does not fit `T`.
pub fn decode_point<T: Element>(value: &Value) -> Result<Point<T>> {
    let dtype = read_tag(value)?;
    trace!(dt = %dtype, kind = "point", "decoding");
    with_element!(dtype, E => {
        let point = codec::decode_point_as::<E>(value)?;
        Ok(Point {
            x: convert_field(point.x, "x")?,
            y: convert_field(point.y, "y")?,
        })
    })
}

pub fn encode_point<T: Element>(point: &Point<T>) -> Value {
    let dtype = T::DTYPE;
    trace!(dt = %dtype, kind = "point", "encoding");
    codec::encode_point_as(point)
}

/// Decodes a 3-D point table into `Point3<T>`, converting like [`decode_size`].
///
/// # Errors
///
/// Tag and field errors, or [`Error::TypeMismatch`] if a coordinate does not fit `T`.
pub fn decode_point3<T: Element>(value: &Value) -> Result<Point3<T>> {
    let dtype = read_tag(value)?;
    trace!(dt = %dtype, kind = "point3", "decoding");
    with_element!(dtype, E => {
        let point = codec::decode_point3_as::<E>(value)?;
        Ok(Point3 {
            x: convert_field(point.x, "x")?,
            y: convert_field(point.y, "y")?,
            z: convert_field(point.z, "z")?,
        })
    })
}

pub fn encode_point3<T: Element>(point: &Point3<T>) -> Value {
    let dtype = T::DTYPE;
    trace!(dt = %dtype, kind = "point3", "encoding");
    codec::encode_point3_as(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Depth;
    use crate::table;

    #[test]
    fn test_decode_mat_each_tag() {
        for dtype in DType::ALL {
            let value = table! {
                "rows" => 1,
                "cols" => 2,
                "dt" => dtype.tag().to_string(),
                "data" => vec![1, 2],
            };
            let mat = decode_mat(&value).unwrap();
            assert_eq!(mat.depth(), dtype.depth());
            assert_eq!(mat.as_bytes().len(), 2 * dtype.element_size());
        }
    }

    #[test]
    fn test_decode_unknown_tag_no_value() {
        let value = table! { "rows" => 1, "cols" => 1, "dt" => "z", "data" => vec![1] };
        assert_eq!(
            decode_mat(&value),
            Err(Error::UnknownTypeTag("z".to_string()))
        );
    }

    #[test]
    fn test_decode_multi_char_tag_rejected() {
        let value = table! { "width" => 1, "height" => 1, "dt" => "ii" };
        assert_eq!(
            decode_size::<i32>(&value),
            Err(Error::UnknownTypeTag("ii".to_string()))
        );
    }

    #[test]
    fn test_tag_checked_before_fields() {
        let value = table! { "dt" => "q" };
        assert_eq!(
            decode_point::<f32>(&value),
            Err(Error::UnknownTypeTag("q".to_string()))
        );
    }

    #[test]
    fn test_missing_tag() {
        let value = table! { "x" => 1, "y" => 2 };
        assert_eq!(
            decode_point::<i32>(&value),
            Err(Error::MissingField {
                field: "dt".to_string()
            })
        );
    }

    #[test]
    fn test_encode_f16_unrepresentable() {
        let mat = Mat::zeros(1, 1, Depth::F16).unwrap();
        assert!(matches!(
            encode_mat(&mat),
            Err(Error::UnrepresentableType(_))
        ));
    }

    #[test]
    fn test_decode_size_widens_tag_type() {
        let value = table! { "width" => 4, "height" => 4, "dt" => "u" };
        assert_eq!(decode_size::<i32>(&value).unwrap(), Size::new(4, 4));
        assert_eq!(decode_size::<f64>(&value).unwrap(), Size::new(4.0, 4.0));
    }

    #[test]
    fn test_decode_point_narrowing_fails() {
        let value = table! { "x" => 1.5, "y" => 2.0, "dt" => "d" };
        assert!(matches!(
            decode_point::<i32>(&value),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_conversion_error_names_field() {
        let value = table! { "width" => 4, "height" => -1, "dt" => "i" };
        match decode_size::<u8>(&value) {
            Err(Error::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                assert_eq!(field, "height");
                assert_eq!(expected, "u8");
                assert_eq!(found, "i32 value that does not fit");
            }
            other => panic!("Expected type mismatch, got {other:?}"),
        }

        let value = table! { "x" => 0.0, "y" => 0.0, "z" => 1e300, "dt" => "d" };
        let err = decode_point3::<f32>(&value).unwrap_err();
        assert!(err.to_string().contains("`z`"), "{err}");
    }

    #[test]
    fn test_decode_f32_rejects_overflow() {
        let value = table! { "width" => 1e40, "height" => 1.0, "dt" => "f" };
        match decode_size::<f32>(&value) {
            Err(Error::TypeMismatch { field, .. }) => assert_eq!(field, "width"),
            other => panic!("Expected type mismatch, got {other:?}"),
        }

        let value = table! { "rows" => 1, "cols" => 1, "dt" => "f", "data" => vec![1e40] };
        match decode_mat(&value) {
            Err(Error::TypeMismatch { field, .. }) => assert_eq!(field, "data[0]"),
            other => panic!("Expected type mismatch, got {other:?}"),
        }

        let value = table! { "rows" => 1, "cols" => 1, "dt" => "d", "data" => vec![1e40] };
        assert_eq!(decode_mat(&value).unwrap().to_vec::<f64>().unwrap(), vec![1e40]);
    }

    #[test]
    fn test_decode_point_out_of_tag_range() {
        let value = table! { "x" => 300, "y" => 2, "dt" => "u" };
        match decode_point::<i32>(&value) {
            Err(Error::TypeMismatch { field, .. }) => assert_eq!(field, "x"),
            other => panic!("Expected type mismatch, got {other:?}"),
        }
    }
}
