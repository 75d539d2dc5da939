//! Range-style representation: bounds, steps, clamp and interpolation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Step count of a freshly created range node.
pub const DEFAULT_STEPS: f32 = 4.0;

/// Interpolation modes of a range-remapping node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RangeInterpolation {
    #[default]
    Linear,
    Stepped,
    Smoothstep,
    Smootherstep,
    Unknown(String),
}

impl RangeInterpolation {
    /// Host identifier for this mode.
    pub fn name(&self) -> &str {
        match self {
            RangeInterpolation::Linear => "LINEAR",
            RangeInterpolation::Stepped => "STEPPED",
            RangeInterpolation::Smoothstep => "SMOOTHSTEP",
            RangeInterpolation::Smootherstep => "SMOOTHERSTEP",
            RangeInterpolation::Unknown(name) => name,
        }
    }
}

impl From<&str> for RangeInterpolation {
    fn from(s: &str) -> Self {
        match super::normalize_identifier(s).as_str() {
            "LINEAR" => RangeInterpolation::Linear,
            "STEPPED" => RangeInterpolation::Stepped,
            "SMOOTHSTEP" => RangeInterpolation::Smoothstep,
            "SMOOTHERSTEP" => RangeInterpolation::Smootherstep,
            _ => RangeInterpolation::Unknown(s.trim().to_string()),
        }
    }
}

impl From<String> for RangeInterpolation {
    fn from(s: String) -> Self {
        RangeInterpolation::from(s.as_str())
    }
}

impl From<RangeInterpolation> for String {
    fn from(mode: RangeInterpolation) -> Self {
        mode.name().to_string()
    }
}

impl fmt::Display for RangeInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a range-remapping node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSpec {
    pub from_min: f32,
    pub from_max: f32,
    pub to_min: f32,
    pub to_max: f32,
    /// Only read when `interpolation` is `Stepped`.
    pub steps: f32,
    pub interpolation: RangeInterpolation,
    pub clamp: bool,
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self {
            from_min: 0.0,
            from_max: 1.0,
            to_min: 0.0,
            to_max: 1.0,
            steps: DEFAULT_STEPS,
            interpolation: RangeInterpolation::Linear,
            clamp: true,
        }
    }
}

impl RangeSpec {
    /// Set the input bounds.
    pub fn with_from(mut self, min: f32, max: f32) -> Self {
        self.from_min = min;
        self.from_max = max;
        self
    }

    /// Set the output bounds.
    pub fn with_to(mut self, min: f32, max: f32) -> Self {
        self.to_min = min;
        self.to_max = max;
        self
    }

    /// Switch to stepped interpolation with the given step count.
    pub fn stepped(mut self, steps: f32) -> Self {
        self.interpolation = RangeInterpolation::Stepped;
        self.steps = steps;
        self
    }

    pub fn with_interpolation(mut self, interpolation: RangeInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}
