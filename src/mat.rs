//! Dense two-dimensional matrix container.
//!
//! A [`Mat`] owns a contiguous, row-major, native-endian byte buffer plus the
//! [`Depth`] code that says how to interpret it. It is built in one step and
//! never mutated afterwards; typed views copy elements out.

use crate::dtype::{DType, Depth, Element};
use crate::error::{Error, Result};
use std::fmt;

/// Owned dense matrix with a runtime element type.
///
/// # Examples
///
/// ```rust
/// use voml::{Depth, Mat};
///
/// let mat = Mat::from_vec(2, 3, vec![1i32, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(mat.shape(), (2, 3));
/// assert_eq!(mat.depth(), Depth::I32);
/// assert_eq!(mat.at::<i32>(1, 2).unwrap(), Some(6));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    depth: Depth,
    data: Vec<u8>,
}

impl Mat {
    /// Builds a matrix from row-major elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeSizeMismatch`] if `rows * cols != data.len()`.
    pub fn from_vec<T: Element>(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        crate::buffer::decode_matrix(&[rows, cols], &data)
    }

    /// Builds a zero-filled matrix of any depth, including depths without a tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeOverflow`] if the buffer size overflows `usize`.
    pub fn zeros(rows: usize, cols: usize, depth: Depth) -> Result<Self> {
        let bytes = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(depth.element_size()))
            .ok_or(Error::ShapeOverflow { rows, cols })?;
        Ok(Mat {
            rows,
            cols,
            depth,
            data: vec![0u8; bytes],
        })
    }

    /// Wraps an already laid-out byte buffer. Callers guarantee the length.
    pub(crate) fn from_raw_parts(rows: usize, cols: usize, depth: Depth, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), rows * cols * depth.element_size());
        Mat {
            rows,
            cols,
            depth,
            data,
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Total number of elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw row-major backing buffer.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DTypeMismatch`] if `T` is not the matrix element type.
    pub fn at<T: Element>(&self, row: usize, col: usize) -> Result<Option<T>> {
        self.check_dtype::<T>()?;
        if row >= self.rows || col >= self.cols {
            return Ok(None);
        }
        let size = T::DTYPE.element_size();
        let offset = (row * self.cols + col) * size;
        Ok(Some(T::read_ne(&self.data[offset..offset + size])))
    }

    /// Copies one row out, or `None` when out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DTypeMismatch`] if `T` is not the matrix element type.
    pub fn row<T: Element>(&self, row: usize) -> Result<Option<Vec<T>>> {
        self.check_dtype::<T>()?;
        if row >= self.rows {
            return Ok(None);
        }
        let stride = self.cols * T::DTYPE.element_size();
        let bytes = &self.data[row * stride..(row + 1) * stride];
        Ok(Some(read_elements(bytes)))
    }

    /// Copies every element out in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DTypeMismatch`] if `T` is not the matrix element type.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.check_dtype::<T>()?;
        Ok(read_elements(&self.data))
    }

    fn check_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE.depth() == self.depth {
            Ok(())
        } else {
            Err(Error::DTypeMismatch {
                expected: T::DTYPE.tag(),
                actual: self.depth.tag(),
            })
        }
    }
}

fn read_elements<T: Element>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::DTYPE.element_size())
        .map(T::read_ne)
        .collect()
}

impl fmt::Debug for Mat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mat")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("depth", &self.depth)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl fmt::Display for Mat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn rows<T: Element>(mat: &Mat, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let values: Vec<T> = read_elements(&mat.data);
            write!(f, "[")?;
            for (r, row) in values.chunks(mat.cols.max(1)).enumerate() {
                if r > 0 {
                    write!(f, ";\n ")?;
                }
                for (c, v) in row.iter().enumerate() {
                    if c > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v:?}")?;
                }
            }
            write!(f, "]")
        }

        match DType::from_depth(self.depth) {
            Some(DType::U8) => rows::<u8>(self, f),
            Some(DType::I8) => rows::<i8>(self, f),
            Some(DType::U16) => rows::<u16>(self, f),
            Some(DType::I16) => rows::<i16>(self, f),
            Some(DType::I32) => rows::<i32>(self, f),
            Some(DType::F32) => rows::<f32>(self, f),
            Some(DType::F64) => rows::<f64>(self, f),
            None => write!(f, "<{}x{} {:?}>", self.rows, self.cols, self.depth),
        }
    }
}
