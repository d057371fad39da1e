//! Element types and their single-character tags.
//!
//! Two closed enumerations live here:
//!
//! - [`DType`]: the seven element types that have a tag in the wire format
//! - [`Depth`]: the element-type code carried by a [`crate::Mat`], which also
//!   knows about half floats; those have no tag and cannot be encoded
//!
//! | Tag | Type  | Depth code |
//! |-----|-------|------------|
//! | `u` | `u8`  | 0          |
//! | `c` | `i8`  | 1          |
//! | `w` | `u16` | 2          |
//! | `s` | `i16` | 3          |
//! | `i` | `i32` | 4          |
//! | `f` | `f32` | 5          |
//! | `d` | `f64` | 6          |
//! | `?` | f16   | 7          |
//!
//! ## Examples
//!
//! ```rust
//! use voml::{DType, Depth};
//!
//! assert_eq!(DType::from_tag("w").unwrap(), DType::U16);
//! assert_eq!(DType::I32.tag(), 'i');
//! assert!(DType::from_tag("z").is_err());
//! assert_eq!(Depth::F16.tag(), '?');
//! ```

use crate::error::{Error, Result};
use std::fmt;
use toml::Value;

/// Tag emitted for a container element type that has no wire representation.
pub const UNREPRESENTABLE_TAG: char = '?';

/// An element type that can be written to and read from the `dt` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    U8,
    I8,
    U16,
    I16,
    I32,
    F32,
    F64,
}

impl DType {
    /// Every taggable element type, in depth-code order.
    pub const ALL: [DType; 7] = [
        DType::U8,
        DType::I8,
        DType::U16,
        DType::I16,
        DType::I32,
        DType::F32,
        DType::F64,
    ];

    /// The single-character tag written to `dt`.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            DType::U8 => 'u',
            DType::I8 => 'c',
            DType::U16 => 'w',
            DType::I16 => 's',
            DType::I32 => 'i',
            DType::F32 => 'f',
            DType::F64 => 'd',
        }
    }

    /// Looks up the element type for a tag character.
    #[must_use]
    pub const fn from_char(tag: char) -> Option<Self> {
        match tag {
            'u' => Some(DType::U8),
            'c' => Some(DType::I8),
            'w' => Some(DType::U16),
            's' => Some(DType::I16),
            'i' => Some(DType::I32),
            'f' => Some(DType::F32),
            'd' => Some(DType::F64),
            _ => None,
        }
    }

    /// Parses the contents of a `dt` field.
    ///
    /// The string must be exactly one known character; `"ii"` or `""` are
    /// rejected rather than truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeTag`] for anything outside the closed set.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let mut chars = tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| Error::UnknownTypeTag(tag.to_string()))
            }
            _ => Err(Error::UnknownTypeTag(tag.to_string())),
        }
    }

    /// The container depth holding elements of this type.
    #[must_use]
    pub const fn depth(self) -> Depth {
        match self {
            DType::U8 => Depth::U8,
            DType::I8 => Depth::I8,
            DType::U16 => Depth::U16,
            DType::I16 => Depth::I16,
            DType::I32 => Depth::I32,
            DType::F32 => Depth::F32,
            DType::F64 => Depth::F64,
        }
    }

    /// Maps a container depth back to its element type, if it has a tag.
    #[must_use]
    pub const fn from_depth(depth: Depth) -> Option<Self> {
        match depth {
            Depth::U8 => Some(DType::U8),
            Depth::I8 => Some(DType::I8),
            Depth::U16 => Some(DType::U16),
            Depth::I16 => Some(DType::I16),
            Depth::I32 => Some(DType::I32),
            Depth::F32 => Some(DType::F32),
            Depth::F64 => Some(DType::F64),
            Depth::F16 => None,
        }
    }

    /// Size in bytes of a single element
    #[must_use]
    pub const fn element_size(self) -> usize {
        self.depth().element_size()
    }

    /// Rust name of the element type, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DType::U8 => "u8",
            DType::I8 => "i8",
            DType::U16 => "u16",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl TryFrom<Depth> for DType {
    type Error = Error;

    fn try_from(depth: Depth) -> Result<Self> {
        DType::from_depth(depth).ok_or_else(|| {
            Error::UnrepresentableType(format!(
                "depth {} ({:?}) has no tag, got '{}'",
                depth.code(),
                depth,
                depth.tag()
            ))
        })
    }
}

/// Element-type code carried by a matrix container.
///
/// Codes match the usual vision-library depth numbering, so a matrix coming
/// from another system can be described without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Depth {
    U8 = 0,
    I8 = 1,
    U16 = 2,
    I16 = 3,
    I32 = 4,
    F32 = 5,
    F64 = 6,
    F16 = 7,
}

impl Depth {
    /// Numeric depth code
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Try to convert from a numeric depth code
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Depth::U8),
            1 => Some(Depth::I8),
            2 => Some(Depth::U16),
            3 => Some(Depth::I16),
            4 => Some(Depth::I32),
            5 => Some(Depth::F32),
            6 => Some(Depth::F64),
            7 => Some(Depth::F16),
            _ => None,
        }
    }

    /// Size in bytes of a single element
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Depth::U8 | Depth::I8 => 1,
            Depth::U16 | Depth::I16 | Depth::F16 => 2,
            Depth::I32 | Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }

    /// Tag for this depth, or [`UNREPRESENTABLE_TAG`] when it has none.
    #[must_use]
    pub const fn tag(self) -> char {
        match DType::from_depth(self) {
            Some(dtype) => dtype.tag(),
            None => UNREPRESENTABLE_TAG,
        }
    }
}

/// Tag for a statically known element type.
#[must_use]
pub const fn tag_for<T: Element>() -> char {
    T::DTYPE.tag()
}

mod sealed {
    pub trait Sealed {}
}

/// Numeric types that can be stored in a matrix, size or point.
///
/// Sealed: implemented for exactly the seven taggable types, so an
/// unsupported element type is a compile error rather than a runtime one.
pub trait Element:
    sealed::Sealed + Copy + PartialEq + PartialOrd + fmt::Debug + Default + Send + Sync + 'static
{
    const DTYPE: DType;

    /// Appends the native-endian bytes of `self` to `out`.
    fn write_ne(self, out: &mut Vec<u8>);

    /// Reads one element from exactly `DTYPE.element_size()` native-endian bytes.
    fn read_ne(bytes: &[u8]) -> Self;

    /// Converts to a tree scalar.
    fn to_scalar(self) -> Value;

    /// Converts from a tree scalar.
    ///
    /// Integer types require an in-range TOML integer. Float types accept
    /// floats and integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] (without a field name) when the value
    /// has the wrong kind or does not fit.
    fn from_scalar(value: &Value) -> Result<Self>;

    /// Lossless widening to `f64`.
    fn to_f64(self) -> f64;

    /// Checked narrowing from `f64`; integers must be whole and in range.
    fn from_f64(value: f64) -> Option<Self>;
}

macro_rules! impl_int_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn write_ne(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            fn read_ne(bytes: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$ty>()];
                arr.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                <$ty>::from_ne_bytes(arr)
            }

            fn to_scalar(self) -> Value {
                Value::Integer(i64::from(self))
            }

            fn from_scalar(value: &Value) -> Result<Self> {
                match value {
                    Value::Integer(i) => <$ty>::try_from(*i).map_err(|_| {
                        Error::type_mismatch(stringify!($ty), format!("{i} (out of range)"))
                    }),
                    other => Err(Error::type_mismatch(stringify!($ty), other.type_str())),
                }
            }

            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn from_f64(value: f64) -> Option<Self> {
                if value.fract() == 0.0
                    && value >= <$ty>::MIN as f64
                    && value <= <$ty>::MAX as f64
                {
                    Some(value as $ty)
                } else {
                    None
                }
            }
        }
    )*};
}

macro_rules! impl_float_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn write_ne(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            fn read_ne(bytes: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$ty>()];
                arr.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                <$ty>::from_ne_bytes(arr)
            }

            fn to_scalar(self) -> Value {
                Value::Float(f64::from(self))
            }

            fn from_scalar(value: &Value) -> Result<Self> {
                match value {
                    Value::Float(f) => <$ty as Element>::from_f64(*f).ok_or_else(|| {
                        Error::type_mismatch(stringify!($ty), format!("{f} (out of range)"))
                    }),
                    Value::Integer(i) => Ok(*i as $ty),
                    other => Err(Error::type_mismatch(stringify!($ty), other.type_str())),
                }
            }

            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            // Non-finite input passes through; finite input must stay finite.
            fn from_f64(value: f64) -> Option<Self> {
                let narrowed = value as $ty;
                (narrowed.is_finite() || !value.is_finite()).then_some(narrowed)
            }
        }
    )*};
}

impl_int_element!(u8 => U8, i8 => I8, u16 => U16, i16 => I16, i32 => I32);
impl_float_element!(f32 => F32, f64 => F64);
