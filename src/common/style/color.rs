use serde::{Serialize, Serializer};
use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use chartdeck::common::RGBColor;
///
/// let blue = RGBColor::new(46, 117, 182);
/// assert_eq!(blue.to_hex(), "2E75B6");
/// assert_eq!(RGBColor::from_hex("#ED7D31"), Some(RGBColor::new(237, 125, 49)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create an RGB color from a hex string ("FF0000" or "#FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to an uppercase hex string without the `#` prefix, the form
    /// DrawingML expects in `<a:srgbClr val="..."/>`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl Serialize for RGBColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = RGBColor::new(237, 125, 49);
        assert_eq!(color.to_hex(), "ED7D31");
        assert_eq!(RGBColor::from_hex("ed7d31"), Some(color));
        assert_eq!(color.to_string(), "#ED7D31");
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(RGBColor::from_hex("12345"), None);
        assert_eq!(RGBColor::from_hex("GGGGGG"), None);
        assert_eq!(RGBColor::from_hex("ééé"), None);
    }
}
