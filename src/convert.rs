//! Typed conversion between Rust values and the TOML tree.
//!
//! [`FromToml`] and [`IntoToml`] are the extension point: anything that
//! implements them can be looked up with [`find`] and written with
//! [`crate::to_value`]. The geometric kinds additionally implement serde's
//! `Serialize`/`Deserialize` through the same path, so they can sit inside
//! any `#[derive]`d config struct.
//!
//! ## Examples
//!
//! ```rust
//! use voml::{find, parse, Mat, Size};
//!
//! let doc = parse(r#"
//!     [camera]
//!     rows = 2
//!     cols = 2
//!     dt = "d"
//!     data = [1.0, 0.0, 0.0, 1.0]
//!
//!     [image]
//!     width = 640
//!     height = 480
//!     dt = "i"
//! "#).unwrap();
//!
//! let camera: Mat = find(&doc, "camera").unwrap();
//! let image: Size<i32> = find(&doc, "image").unwrap();
//! assert_eq!(camera.shape(), (2, 2));
//! assert_eq!(image, Size::new(640, 480));
//! ```

use crate::dispatch;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::geometry::{Point, Point3, Size};
use crate::mat::Mat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use toml::Value;

/// Types that can be read out of a TOML tree node.
pub trait FromToml: Sized {
    /// # Errors
    ///
    /// Returns an error if the node has the wrong shape for `Self`.
    fn from_toml(value: &Value) -> Result<Self>;
}

/// Types that can be written as a TOML tree node.
pub trait IntoToml {
    /// # Errors
    ///
    /// Returns an error if `self` has no TOML representation.
    fn into_toml(&self) -> Result<Value>;
}

/// Borrows a named field of a table node.
pub(crate) fn lookup<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    let table = value
        .as_table()
        .ok_or_else(|| Error::type_mismatch("table", value.type_str()))?;
    table.get(key).ok_or_else(|| Error::missing_field(key))
}

/// Reads a named element field, as used by the size and point codecs.
pub(crate) fn find_scalar<T: Element>(value: &Value, key: &str) -> Result<T> {
    T::from_scalar(lookup(value, key)?).map_err(|e| e.in_field(key))
}

/// Reads a named field of a table node as `T`.
///
/// # Errors
///
/// - [`Error::MissingField`] if the key is absent
/// - [`Error::TypeMismatch`] if `value` is not a table or the field does not
///   convert; the error names the full field path
///
/// # Examples
///
/// ```rust
/// use voml::{find, table, Error};
///
/// let value = table! { "rows" => 3 };
/// assert_eq!(find::<usize>(&value, "rows").unwrap(), 3);
/// assert!(matches!(find::<usize>(&value, "cols"), Err(Error::MissingField { .. })));
/// ```
pub fn find<T: FromToml>(value: &Value, key: &str) -> Result<T> {
    T::from_toml(lookup(value, key)?).map_err(|e| e.in_field(key))
}

macro_rules! impl_element_convert {
    ($($ty:ty),* $(,)?) => {$(
        impl FromToml for $ty {
            fn from_toml(value: &Value) -> Result<Self> {
                <$ty as Element>::from_scalar(value)
            }
        }

        impl IntoToml for $ty {
            fn into_toml(&self) -> Result<Value> {
                Ok(self.to_scalar())
            }
        }
    )*};
}

impl_element_convert!(u8, i8, u16, i16, i32, f32, f64);

impl FromToml for usize {
    fn from_toml(value: &Value) -> Result<Self> {
        match value {
            Value::Integer(i) => usize::try_from(*i).map_err(|_| {
                Error::type_mismatch("non-negative integer", format!("{i}"))
            }),
            other => Err(Error::type_mismatch("non-negative integer", other.type_str())),
        }
    }
}

impl IntoToml for usize {
    fn into_toml(&self) -> Result<Value> {
        i64::try_from(*self)
            .map(Value::Integer)
            .map_err(|_| Error::custom(format!("{self} does not fit in a TOML integer")))
    }
}

impl FromToml for String {
    fn from_toml(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::type_mismatch("string", value.type_str()))
    }
}

impl IntoToml for String {
    fn into_toml(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl<T: FromToml> FromToml for Vec<T> {
    fn from_toml(value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::type_mismatch("array", value.type_str()))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_toml(item).map_err(|e| e.in_field(&format!("[{i}]"))))
            .collect()
    }
}

impl<T: IntoToml> IntoToml for Vec<T> {
    fn into_toml(&self) -> Result<Value> {
        self.iter()
            .map(IntoToml::into_toml)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

impl FromToml for Mat {
    fn from_toml(value: &Value) -> Result<Self> {
        dispatch::decode_mat(value)
    }
}

impl IntoToml for Mat {
    fn into_toml(&self) -> Result<Value> {
        dispatch::encode_mat(self)
    }
}

impl<T: Element> FromToml for Size<T> {
    fn from_toml(value: &Value) -> Result<Self> {
        dispatch::decode_size(value)
    }
}

impl<T: Element> IntoToml for Size<T> {
    fn into_toml(&self) -> Result<Value> {
        Ok(dispatch::encode_size(self))
    }
}

impl<T: Element> FromToml for Point<T> {
    fn from_toml(value: &Value) -> Result<Self> {
        dispatch::decode_point(value)
    }
}

impl<T: Element> IntoToml for Point<T> {
    fn into_toml(&self) -> Result<Value> {
        Ok(dispatch::encode_point(self))
    }
}

impl<T: Element> FromToml for Point3<T> {
    fn from_toml(value: &Value) -> Result<Self> {
        dispatch::decode_point3(value)
    }
}

impl<T: Element> IntoToml for Point3<T> {
    fn into_toml(&self) -> Result<Value> {
        Ok(dispatch::encode_point3(self))
    }
}

// Serde goes through the tree so any format that can carry a `toml::Value`
// (TOML itself, JSON, ...) sees the same table shape.
macro_rules! impl_serde_via_toml {
    ($ty:ty $(, $param:ident)?) => {
        impl$(<$param: Element>)? Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.into_toml()
                    .map_err(serde::ser::Error::custom)?
                    .serialize(serializer)
            }
        }

        impl<'de $(, $param: Element)?> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = Value::deserialize(deserializer)?;
                <$ty as FromToml>::from_toml(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_serde_via_toml!(Mat);
impl_serde_via_toml!(Size<T>, T);
impl_serde_via_toml!(Point<T>, T);
impl_serde_via_toml!(Point3<T>, T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_missing_field() {
        let value = crate::table! { "x" => 1 };
        assert_eq!(
            find::<i32>(&value, "y"),
            Err(Error::MissingField {
                field: "y".to_string()
            })
        );
    }

    #[test]
    fn test_find_on_non_table() {
        let value = Value::Integer(3);
        assert!(matches!(
            find::<i32>(&value, "x"),
            Err(Error::TypeMismatch {
                expected: "table",
                ..
            })
        ));
    }

    #[test]
    fn test_find_names_nested_path() {
        let value = crate::table! {
            "camera" => crate::table! {
                "rows" => 1,
                "cols" => 2,
                "dt" => "u",
                "data" => vec![Value::Integer(1), Value::String("two".into())],
            },
        };
        match find::<Mat>(&value, "camera") {
            Err(Error::TypeMismatch { field, found, .. }) => {
                assert_eq!(field, "camera.data[1]");
                assert_eq!(found, "string");
            }
            other => panic!("Expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_usize_rejects_negative() {
        assert!(usize::from_toml(&Value::Integer(-2)).is_err());
        assert_eq!(usize::from_toml(&Value::Integer(2)).unwrap(), 2);
    }

    #[test]
    fn test_vec_roundtrip() {
        let values = vec![1i16, -2, 3];
        let tree = values.into_toml().unwrap();
        assert_eq!(Vec::<i16>::from_toml(&tree).unwrap(), values);
    }

    #[test]
    fn test_string_roundtrip() {
        let s = "d".to_string();
        assert_eq!(String::from_toml(&s.into_toml().unwrap()).unwrap(), "d");
        assert!(String::from_toml(&Value::Integer(1)).is_err());
    }
}
