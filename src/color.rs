//! Color values exchanged with the mixing engine.
//!
//! - [`Color`] - an 8-bit RGB target color
//! - [`ColorWithIntensity`] - an unscaled color plus a separate brightness factor
//!
//! The engine works on normalized `0.0..=1.0` floats internally; [`unit`] and
//! [`to_dmx`] are the only two places where values cross between the two ranges.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color length: {0}. Expected 6 digits")]
    InvalidLength(usize),
    #[error("Invalid hex digit in color: {0}")]
    InvalidHex(String),
}

/// Clamps a normalized working value into `0.0..=1.0`. NaN collapses to 0.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Normalizes a DMX value (0-255) into `0.0..=1.0`.
#[inline]
pub fn unit(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Denormalizes a working value back into a DMX value, clamping first.
#[inline]
pub fn to_dmx(value: f32) -> u8 {
    (clamp01(value) * 255.0).round() as u8
}

/// Target color for a fixture.
/// Each field holds a DMX value (0-255).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from caller-supplied integers, clamping each to 0..=255.
    pub fn from_unclamped(r: i32, g: i32, b: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidHex(hex.to_string()));
        }
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Normalized `(r, g, b)` working values.
    pub fn normalized(&self) -> (f32, f32, f32) {
        (unit(self.r), unit(self.g), unit(self.b))
    }

    pub(crate) fn from_normalized(r: f32, g: f32, b: f32) -> Self {
        Self::new(to_dmx(r), to_dmx(g), to_dmx(b))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// An unscaled color (channel peak values) with its brightness tracked apart.
/// The displayed color is `color * intensity`; see [`ColorWithIntensity::displayed`].
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct ColorWithIntensity {
    pub color: Color,
    /// Brightness multiplier (0.0 - 1.0)
    pub intensity: f32,
}

impl ColorWithIntensity {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity: clamp01(intensity),
        }
    }

    pub fn displayed(&self) -> Color {
        let (r, g, b) = self.color.normalized();
        Color::from_normalized(r * self.intensity, g * self.intensity, b * self.intensity)
    }
}

impl Default for ColorWithIntensity {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}
