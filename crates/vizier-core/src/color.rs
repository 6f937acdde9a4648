//! Color handling with CSS color string support.
//!
//! Wraps the `DynamicColor` type from the `color` crate and adds the
//! conveniences the rest of the engine needs: serde decoding from description
//! style records, id-safe names for per-color SVG markers, and conversion
//! into SVG attribute values.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Deserialize, Deserializer, de};

/// A parsed CSS color.
///
/// Accepts any CSS color syntax understood by the `color` crate:
/// `"#ff0000"`, `"rgb(255, 0, 0)"`, `"red"`, `"rgba(0,0,0,0.3)"`, ...
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when the string is not a valid CSS
    /// color.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Returns the alpha component in the `0.0..=1.0` range.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns a sanitized ID-safe string for this color, usable in SVG
    /// element ids such as per-color arrowhead markers.
    pub fn to_id_safe_string(&self) -> String {
        let color_str = self.to_string();
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%'], "_");

        // SVG ids must start with a letter
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").unwrap()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Color::new(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_hex() {
        assert!(Color::new("red").is_ok());
        assert!(Color::new("#4a90e2").is_ok());
        assert!(Color::new("rgb(255, 0, 0)").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let color = Color::new("#ff0000").unwrap();
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_id_safe_string_starts_with_letter() {
        let color = Color::new("#4a90e2").unwrap();
        let id = color.to_id_safe_string();
        assert!(id.chars().next().unwrap().is_ascii_alphabetic());
        assert!(!id.contains('#'));
        assert!(!id.contains('('));
    }

    #[test]
    fn test_deserialize_from_string() {
        let color: Color = serde_json::from_str("\"#666\"").unwrap();
        assert_eq!(color, Color::new("#666").unwrap());
        assert!(serde_json::from_str::<Color>("\"??\"").is_err());
    }
}
