//! Core domain types for mapconv.
//!
//! - `Colour` - linear RGBA colour values
//! - `StopSet` / `ColorStop` - the colour ramp representation
//! - `RangeSpec` - the map range representation

mod colour;
mod range;
mod stops;

pub use colour::Colour;
pub use range::{RangeInterpolation, RangeSpec, DEFAULT_STEPS};
pub use stops::{ColorStop, RampInterpolation, StopSet};

/// Normalize an interpolation identifier: upper case, `-` and spaces as `_`.
fn normalize_identifier(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
