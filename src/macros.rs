/// Builds a [`toml::Value::Table`] from `"key" => value` pairs.
///
/// Each value goes through `toml::Value::from`, so integers, floats, strings,
/// booleans, vectors of those and existing `toml::Value`s all work.
///
/// # Examples
///
/// ```rust
/// use voml::{table, Mat};
///
/// let value = table! {
///     "rows" => 2,
///     "cols" => 3,
///     "dt" => "i",
///     "data" => vec![1, 2, 3, 4, 5, 6],
/// };
/// let mat: Mat = voml::from_value(&value).unwrap();
/// assert_eq!(mat.shape(), (2, 3));
/// ```
#[macro_export]
macro_rules! table {
    // Handle empty table
    () => {
        $crate::toml::Value::Table($crate::toml::Table::new())
    };

    // Handle non-empty table
    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut table = $crate::toml::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml::Value::from($value));
        )+
        $crate::toml::Value::Table(table)
    }};
}
