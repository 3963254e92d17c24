//! Color endpoints and linear interpolation between them.
//!
//! A cell value of `0.0` maps to the obstructed color, `1.0` to the
//! unobstructed color, and anything negative to the no-data color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Default color for fully obstructed cells.
pub const DEFAULT_OBSTRUCTED_COLOR: &str = "FFED524A";
/// Default color for fully unobstructed cells.
pub const DEFAULT_UNOBSTRUCTED_COLOR: &str = "FF3E80E0";
/// Default color for cells without data.
pub const DEFAULT_NO_DATA_COLOR: &str = "00000000";

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse an `AARRGGBB` hex string.
    ///
    /// Digits are case-insensitive and a single leading `#` is tolerated.
    /// Whitespace is not stripped.
    pub fn from_hex(hex: &str) -> RenderResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RenderError::InvalidColorFormat(hex.to_string()));
        }

        let argb = u32::from_str_radix(digits, 16)
            .map_err(|_| RenderError::InvalidColorFormat(hex.to_string()))?;

        Ok(Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        })
    }

    /// CSS-style `rgb(r,g,b)` fill string.
    pub fn to_rgb_string(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// The three configured poles of the obstruction color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorEndpoints {
    pub obstructed: Color,
    pub unobstructed: Color,
    pub no_data: Color,
}

impl ColorEndpoints {
    /// Parse all three endpoints, failing on the first malformed string.
    pub fn from_hex(obstructed: &str, unobstructed: &str, no_data: &str) -> RenderResult<Self> {
        Ok(Self {
            obstructed: Color::from_hex(obstructed)?,
            unobstructed: Color::from_hex(unobstructed)?,
            no_data: Color::from_hex(no_data)?,
        })
    }
}

impl Default for ColorEndpoints {
    fn default() -> Self {
        Self {
            obstructed: Color::new(0xED, 0x52, 0x4A, 0xFF),
            unobstructed: Color::new(0x3E, 0x80, 0xE0, 0xFF),
            no_data: Color::transparent(),
        }
    }
}

/// Channel layout of an output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single intensity byte.
    Grey,
    /// Intensity followed by alpha.
    GreyAlpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_flags(greyscale: bool, alpha: bool) -> Self {
        match (greyscale, alpha) {
            (true, false) => PixelFormat::Grey,
            (true, true) => PixelFormat::GreyAlpha,
            (false, false) => PixelFormat::Rgb,
            (false, true) => PixelFormat::Rgba,
        }
    }

    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Grey => 1,
            PixelFormat::GreyAlpha => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    pub fn is_greyscale(self) -> bool {
        matches!(self, PixelFormat::Grey | PixelFormat::GreyAlpha)
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::GreyAlpha | PixelFormat::Rgba)
    }

    /// Append the channels of `color` in this layout.
    ///
    /// Greyscale layouts use the green channel as intensity.
    pub fn push_color(self, color: &Color, out: &mut Vec<u8>) {
        if self.is_greyscale() {
            out.push(color.g);
        } else {
            out.extend_from_slice(&[color.r, color.g, color.b]);
        }
        if self.has_alpha() {
            out.push(color.a);
        }
    }
}

/// Clamp a cell value into the blend range.
///
/// Returns `None` for the no-data sentinel (negative or NaN).
#[inline]
pub fn normalize(value: f64) -> Option<f64> {
    if value.is_nan() || value < 0.0 {
        None
    } else if value >= 1.0 {
        Some(1.0)
    } else {
        Some(value)
    }
}

/// Blend one channel, rounding half up.
#[inline]
fn blend(t: f64, obstructed: u8, unobstructed: u8) -> u8 {
    let mixed = t * unobstructed as f64 + (1.0 - t) * obstructed as f64;
    (mixed + 0.5).floor() as u8
}

/// Interpolate the full RGBA color for one cell.
pub fn interpolate(value: f64, colors: &ColorEndpoints) -> Color {
    match normalize(value) {
        None => colors.no_data,
        Some(t) => {
            let (o, u) = (&colors.obstructed, &colors.unobstructed);
            Color::new(
                blend(t, o.r, u.r),
                blend(t, o.g, u.g),
                blend(t, o.b, u.b),
                blend(t, o.a, u.a),
            )
        }
    }
}

/// Append the interpolated pixel for one cell, computing only the channels
/// `format` needs.
pub fn push_interpolated(value: f64, colors: &ColorEndpoints, format: PixelFormat, out: &mut Vec<u8>) {
    let Some(t) = normalize(value) else {
        format.push_color(&colors.no_data, out);
        return;
    };

    let (o, u) = (&colors.obstructed, &colors.unobstructed);
    if format.is_greyscale() {
        out.push(blend(t, o.g, u.g));
    } else {
        out.push(blend(t, o.r, u.r));
        out.push(blend(t, o.g, u.g));
        out.push(blend(t, o.b, u.b));
    }
    if format.has_alpha() {
        out.push(blend(t, o.a, u.a));
    }
}
