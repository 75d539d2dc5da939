//! Stop-style representation: colour stops plus a ramp interpolation mode.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Colour;
use crate::error::{ConvertError, Result};

/// Interpolation modes of a colour ramp.
///
/// Identifiers follow the host's upper-case naming. Anything the host may
/// add later is carried as `Unknown` so conversions can fall back on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RampInterpolation {
    #[default]
    Linear,
    Ease,
    Constant,
    Cardinal,
    BSpline,
    Unknown(String),
}

impl RampInterpolation {
    /// Host identifier for this mode.
    pub fn name(&self) -> &str {
        match self {
            RampInterpolation::Linear => "LINEAR",
            RampInterpolation::Ease => "EASE",
            RampInterpolation::Constant => "CONSTANT",
            RampInterpolation::Cardinal => "CARDINAL",
            RampInterpolation::BSpline => "B_SPLINE",
            RampInterpolation::Unknown(name) => name,
        }
    }
}

impl From<&str> for RampInterpolation {
    fn from(s: &str) -> Self {
        match super::normalize_identifier(s).as_str() {
            "LINEAR" => RampInterpolation::Linear,
            "EASE" => RampInterpolation::Ease,
            "CONSTANT" => RampInterpolation::Constant,
            "CARDINAL" => RampInterpolation::Cardinal,
            "B_SPLINE" => RampInterpolation::BSpline,
            _ => RampInterpolation::Unknown(s.trim().to_string()),
        }
    }
}

impl From<String> for RampInterpolation {
    fn from(s: String) -> Self {
        RampInterpolation::from(s.as_str())
    }
}

impl From<RampInterpolation> for String {
    fn from(mode: RampInterpolation) -> Self {
        mode.name().to_string()
    }
}

impl fmt::Display for RampInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single control point of a colour ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    #[serde(rename = "color")]
    pub colour: Colour,
}

impl ColorStop {
    pub fn new(position: f32, colour: Colour) -> Self {
        Self { position, colour }
    }

    /// A stop whose colour is an opaque grey of the given value.
    pub fn grey(position: f32, value: f32) -> Self {
        Self::new(position, Colour::grey(value))
    }

    /// Scalar value of the stop (luminance of its colour).
    pub fn value(&self) -> f32 {
        self.colour.luminance()
    }
}

/// An ordered, non-empty collection of colour stops.
///
/// Stops are kept sorted by position. The first stop is the anchor: it can
/// be moved and recoloured but never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStopSet")]
pub struct StopSet {
    pub interpolation: RampInterpolation,
    stops: Vec<ColorStop>,
}

#[derive(Deserialize)]
struct RawStopSet {
    #[serde(default)]
    interpolation: RampInterpolation,
    stops: Vec<ColorStop>,
}

impl TryFrom<RawStopSet> for StopSet {
    type Error = ConvertError;

    fn try_from(raw: RawStopSet) -> Result<Self> {
        StopSet::new(raw.interpolation, raw.stops)
    }
}

impl Default for StopSet {
    /// Black to white, the host's default ramp.
    fn default() -> Self {
        Self {
            interpolation: RampInterpolation::Linear,
            stops: vec![
                ColorStop::new(0.0, Colour::BLACK),
                ColorStop::new(1.0, Colour::WHITE),
            ],
        }
    }
}

impl StopSet {
    /// Build a stop set, sorting stops by position.
    pub fn new(interpolation: RampInterpolation, mut stops: Vec<ColorStop>) -> Result<Self> {
        if stops.is_empty() {
            return Err(ConvertError::Parse {
                message: "A colour ramp needs at least one stop".to_string(),
                help: Some("Add a stop at position 0".to_string()),
            });
        }
        stops.sort_by(|a, b| by_position(a, b));
        Ok(Self {
            interpolation,
            stops,
        })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Never true for a set built through `new`.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stop with the lowest position.
    pub fn first(&self) -> &ColorStop {
        &self.stops[0]
    }

    /// The stop with the highest position.
    pub fn last(&self) -> &ColorStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Drop every stop except the anchor and move it back to position 0.
    pub fn reset_to_anchor(&mut self) {
        self.stops.truncate(1);
        self.stops[0].position = 0.0;
    }

    /// Replace the anchor stop, keeping positional order.
    pub fn set_anchor(&mut self, stop: ColorStop) {
        self.stops[0] = stop;
        self.stops.sort_by(|a, b| by_position(a, b));
    }

    /// Insert a stop after any stops at the same or a lower position.
    pub fn insert_stop(&mut self, stop: ColorStop) {
        let idx = self
            .stops
            .partition_point(|s| by_position(s, &stop) != Ordering::Greater);
        self.stops.insert(idx, stop);
    }
}

fn by_position(a: &ColorStop, b: &ColorStop) -> Ordering {
    a.position.total_cmp(&b.position)
}
