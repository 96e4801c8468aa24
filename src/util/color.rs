//! `#rrggbb` colors as used in options files, with sRGB → linear conversion.

use std::borrow::Cow;
use std::fmt;

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

/// An sRGB color with components in `[0, 1]`.
///
/// Serializes as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel (sRGB).
    pub r: f32,
    /// Green channel (sRGB).
    pub g: f32,
    /// Blue channel (sRGB).
    pub b: f32,
}

/// Error returned when a string is not a valid `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected #rrggbb", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    /// Pure black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Build a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_rgb_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as f32 / 255.0,
            g: ((packed >> 8) & 0xff) as f32 / 255.0,
            b: (packed & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (case-insensitive, leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if the string is not six hex digits.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ColorParseError(s.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_rgb_u32)
            .map_err(|_| ColorParseError(s.to_owned()))
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    /// Linear-light RGB, suitable for shading.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl JsonSchema for Color {
    fn schema_name() -> Cow<'static, str> {
        "Color".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "format": "color",
            "pattern": "^#?[0-9a-fA-F]{6}$"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_case_hex() {
        let c = Color::from_hex("#00FFF0").unwrap();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 240.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.to_hex(), "#00fff0");
    }

    #[test]
    fn rejects_short_and_non_hex() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#00ff8g").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn packed_matches_hex() {
        assert_eq!(
            Color::from_rgb_u32(0x0040_4040),
            Color::from_hex("404040").unwrap()
        );
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(Color::BLACK.to_linear(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        // Mid grey is darker in linear light
        let grey = Color::from_hex("#808080").unwrap().to_linear();
        assert!(grey[0] < 0.5 && grey[0] > 0.2);
    }
}
