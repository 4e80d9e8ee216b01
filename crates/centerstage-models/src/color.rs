//! Fill colors and sink channel order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default eye-fill color.
    pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in RGB order.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `rrggbb`, optionally prefixed with `#`.
impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[derive(Debug, Error)]
#[error("Invalid color (expected rrggbb hex): {0}")]
pub struct ColorParseError(String);

/// Byte order of the three color channels a sink expects.
///
/// Frames are RGB inside the pipeline; conversion happens once at the
/// sink boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Returns the order name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb",
            ChannelOrder::Bgr => "bgr",
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!("ffff00".parse::<Rgb>().unwrap(), Rgb::YELLOW);
        assert_eq!("#1A2b3C".parse::<Rgb>().unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert!("fff".parse::<Rgb>().is_err());
        assert!("gg0000".parse::<Rgb>().is_err());
        assert!("ffff000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_color_display_is_parseable() {
        let color = Rgb::new(1, 128, 255);
        assert_eq!(color.to_string(), "0180ff");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_channel_order_display() {
        assert_eq!(ChannelOrder::Bgr.to_string(), "bgr");
        assert_eq!(ChannelOrder::default(), ChannelOrder::Rgb);
    }
}
