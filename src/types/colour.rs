//! Linear colour type, luminance and hex notation.

use std::fmt;

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Rec. 709 luminance weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// A linear RGBA colour value, as stored on colour ramp stops.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ColourRepr", into = "[f32; 4]")]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a new colour from linear RGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from linear RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque grey with every channel set to `value`.
    pub const fn grey(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// White.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Perceptual luminance of the colour. Alpha is ignored.
    pub fn luminance(self) -> f32 {
        self.r * LUMA_R + self.g * LUMA_G + self.b * LUMA_B
    }

    /// Parse an sRGB hex colour string into a linear colour.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let [r, g, b, a] = match hex.len() {
            3 | 4 => {
                let mut bytes = [0xFF; 4];
                for (slot, c) in bytes.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                bytes
            }
            6 | 8 => {
                let mut bytes = [0xFF; 4];
                for (i, slot) in bytes.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = parse_hex_byte(&hex[i * 2..i * 2 + 2])?;
                }
                bytes
            }
            _ => return Err(invalid_hex(s)),
        };

        let encoded = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let linear: LinSrgb<f32> = encoded.into_linear();

        Ok(Self::new(linear.red, linear.green, linear.blue, a as f32 / 255.0))
    }

    /// Encode as an sRGB hex string (`#RRGGBB`, or `#RRGGBBAA` when translucent).
    pub fn to_hex(self) -> String {
        let encoded: Srgb<f32> = Srgb::from_linear(LinSrgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        ));
        let byte = |v: f32| (v * 255.0).round() as u8;
        let (r, g, b) = (byte(encoded.red), byte(encoded.green), byte(encoded.blue));

        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, byte(self.a.clamp(0.0, 1.0)))
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Colour> for [f32; 4] {
    fn from(colour: Colour) -> Self {
        colour.to_rgba()
    }
}

/// Document representation: hex string or a list of linear channels.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColourRepr {
    Hex(String),
    Channels(Vec<f32>),
}

impl TryFrom<ColourRepr> for Colour {
    type Error = ConvertError;

    fn try_from(repr: ColourRepr) -> Result<Self> {
        match repr {
            ColourRepr::Hex(s) => Colour::from_hex(&s),
            ColourRepr::Channels(c) => match c.as_slice() {
                [r, g, b] => Ok(Colour::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Colour::new(*r, *g, *b, *a)),
                _ => Err(ConvertError::Parse {
                    message: format!("Colour needs 3 or 4 channels, got {}", c.len()),
                    help: Some("Use [r, g, b], [r, g, b, a] or a hex string".to_string()),
                }),
            },
        }
    }
}

fn invalid_hex(s: &str) -> ConvertError {
    ConvertError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| ConvertError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| ConvertError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
