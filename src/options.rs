//! Rendering options.
//!
//! The wire format itself (field names and tags) is fixed; options only
//! change how the tree is laid out as text.
//!
//! ## Examples
//!
//! ```rust
//! use voml::{to_string_with_options, Options, Point};
//!
//! let text = to_string_with_options(&Point::new(1i32, 2), Options::pretty()).unwrap();
//! assert!(text.contains("dt = \"i\""));
//! ```

use serde::{Deserialize, Serialize};

/// Configuration options for rendering TOML text.
///
/// Derives serde so an application can keep it in its own config file.
///
/// # Examples
///
/// ```rust
/// use voml::Options;
///
/// let options: Options = toml::from_str("pretty = true").unwrap();
/// assert!(options.pretty);
///
/// let options: Options = toml::from_str("").unwrap();
/// assert!(!options.pretty);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Spread arrays over several lines.
    pub pretty: bool,
}

impl Options {
    /// Creates default options (compact arrays).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output.
    #[must_use]
    pub fn pretty() -> Self {
        Options { pretty: true }
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
