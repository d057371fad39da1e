//! Conversion between flat element sequences and [`Mat`] buffers.
//!
//! Decoding checks, in order, that the shape is two-dimensional and that
//! `rows * cols` equals the element count. Both checks run before the
//! matrix buffer is allocated; the buffer is then sized once and filled.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::mat::Mat;
use toml::Value;

/// A matrix split into its shape and row-major elements.
#[derive(Debug, Clone, PartialEq)]
pub struct MatParts<T> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<T>,
}

fn check_shape(shape: &[usize], len: usize) -> Result<(usize, usize)> {
    let &[rows, cols] = shape else {
        return Err(Error::InvalidShape { dims: shape.len() });
    };
    match rows.checked_mul(cols) {
        Some(total) if total == len => Ok((rows, cols)),
        _ => Err(Error::ShapeSizeMismatch { rows, cols, len }),
    }
}

/// Builds a matrix from a `[rows, cols]` shape and row-major elements.
///
/// # Errors
///
/// - [`Error::InvalidShape`] if `shape` does not have exactly two entries
/// - [`Error::ShapeSizeMismatch`] if `rows * cols != data.len()`
///
/// # Examples
///
/// ```rust
/// use voml::buffer::decode_matrix;
/// use voml::Error;
///
/// let mat = decode_matrix(&[2, 2], &[1u8, 2, 3, 4]).unwrap();
/// assert_eq!(mat.shape(), (2, 2));
///
/// assert!(matches!(decode_matrix(&[4], &[1u8, 2, 3, 4]), Err(Error::InvalidShape { dims: 1 })));
/// ```
pub fn decode_matrix<T: Element>(shape: &[usize], data: &[T]) -> Result<Mat> {
    let (rows, cols) = check_shape(shape, data.len())?;
    let mut buf = Vec::with_capacity(data.len() * T::DTYPE.element_size());
    for &value in data {
        value.write_ne(&mut buf);
    }
    Ok(Mat::from_raw_parts(rows, cols, T::DTYPE.depth(), buf))
}

/// Same as [`decode_matrix`], converting tree scalars on the fly.
///
/// The element count is checked against the raw array before any element is
/// converted; a bad element reports its index as `[i]`.
pub(crate) fn decode_matrix_values<T: Element>(shape: &[usize], values: &[Value]) -> Result<Mat> {
    let (rows, cols) = check_shape(shape, values.len())?;
    let mut buf = Vec::with_capacity(values.len() * T::DTYPE.element_size());
    for (i, value) in values.iter().enumerate() {
        T::from_scalar(value)
            .map_err(|e| e.in_field(&format!("[{i}]")))?
            .write_ne(&mut buf);
    }
    Ok(Mat::from_raw_parts(rows, cols, T::DTYPE.depth(), buf))
}

/// Copies a matrix out into its shape and row-major elements.
///
/// # Errors
///
/// Returns [`Error::DTypeMismatch`] if `T` is not the matrix element type.
pub fn encode_matrix<T: Element>(mat: &Mat) -> Result<MatParts<T>> {
    Ok(MatParts {
        rows: mat.rows(),
        cols: mat.cols(),
        data: mat.to_vec()?,
    })
}
