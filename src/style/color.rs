use crate::{MapError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::prelude::HashMap;

/// CSS named colors accepted in configuration, beyond `#rgb`/`#rrggbb`.
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    let mut names = HashMap::default();
    names.insert("black", Color::rgb(0, 0, 0));
    names.insert("white", Color::rgb(255, 255, 255));
    names.insert("grey", Color::GREY);
    names.insert("gray", Color::GREY);
    names.insert("orange", Color::ORANGE);
    names.insert("red", Color::rgb(255, 0, 0));
    names.insert("green", Color::rgb(0, 128, 0));
    names.insert("blue", Color::rgb(0, 0, 255));
    names.insert("yellow", Color::rgb(255, 255, 0));
    names.insert("purple", Color::rgb(128, 0, 128));
    names.insert("brown", Color::rgb(165, 42, 42));
    names
});

/// An sRGB color with alpha, written out as a CSS hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    /// Leaflet's default path color
    pub const LEAFLET_BLUE: Color = Color::rgb(0x33, 0x88, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or a known CSS color name.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| MapError::ParseError(format!("invalid hex color: {input}")));
        }
        NAMED_COLORS
            .get(trimmed.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| MapError::ParseError(format!("unknown color: {input}")))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, with an alpha byte only when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#fed976").unwrap(), Color::rgb(0xfe, 0xd9, 0x76));
        assert_eq!(Color::parse("#FFF").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse("#00000080").unwrap(), Color::new(0, 0, 0, 0x80));
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gggggg").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("grey").unwrap(), Color::GREY);
        assert_eq!(Color::parse("Orange").unwrap(), Color::ORANGE);
        assert!(Color::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::rgb(0xb1, 0x00, 0x26).to_hex(), "#b10026");
        assert_eq!(Color::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::ORANGE).unwrap();
        assert_eq!(json, "\"#ffa500\"");
        let back: Color = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(back, Color::ORANGE);
    }
}
