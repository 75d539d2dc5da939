//! Conversion between colour ramp stops and map range parameters.
//!
//! Both directions are pure: they read one representation, build the other
//! and send any loss of precision to a [`Reporter`]. Only a stepped range
//! with zero, non-finite or more than [`MAX_STOPS`] worth of steps is a
//! hard error.

mod warning;

pub use warning::{Reporter, Warning, WarningCode, WarningLog};

use crate::error::{ConvertError, Result};
use crate::types::{ColorStop, RampInterpolation, RangeInterpolation, RangeSpec, StopSet};

/// Half-width of the input window used to emulate a constant ramp.
const STEP_WINDOW: f32 = 0.001;

/// Step count written to a range node built from a constant ramp.
const CONSTANT_STEPS: f32 = 0.5;

/// Most stops a host colour ramp can hold.
pub const MAX_STOPS: usize = 32;

/// Range interpolation for a ramp interpolation, and whether it is exact.
fn range_interpolation_for(mode: &RampInterpolation) -> (RangeInterpolation, bool) {
    match mode {
        RampInterpolation::Ease => (RangeInterpolation::Smoothstep, true),
        RampInterpolation::Linear => (RangeInterpolation::Linear, true),
        RampInterpolation::Constant => (RangeInterpolation::Stepped, true),
        RampInterpolation::Cardinal | RampInterpolation::BSpline => {
            (RangeInterpolation::Smoothstep, false)
        }
        RampInterpolation::Unknown(_) => (RangeInterpolation::Smoothstep, false),
    }
}

/// Ramp interpolation for a range interpolation, and whether it is exact.
fn ramp_interpolation_for(mode: &RangeInterpolation) -> (RampInterpolation, bool) {
    match mode {
        RangeInterpolation::Smoothstep => (RampInterpolation::Ease, true),
        RangeInterpolation::Linear => (RampInterpolation::Linear, true),
        RangeInterpolation::Stepped => (RampInterpolation::Constant, true),
        RangeInterpolation::Smootherstep => (RampInterpolation::Ease, false),
        RangeInterpolation::Unknown(_) => (RampInterpolation::Linear, false),
    }
}

/// Convert colour ramp stops into map range parameters.
///
/// Only the first and last stops survive. Stop colours are reduced to
/// their luminance. A constant ramp becomes a stepped range whose input
/// window straddles the last stop, giving a hard threshold there.
pub fn stops_to_range<R: Reporter + ?Sized>(stops: &StopSet, reporter: &mut R) -> RangeSpec {
    let (interpolation, exact) = range_interpolation_for(&stops.interpolation);

    if stops.len() > 2 {
        reporter.warn(Warning::new(
            WarningCode::ExtraStops,
            format!(
                "Cannot convert a Color Ramp with {} stops to a Map Range. Using first and last stops.",
                stops.len()
            ),
        ));
    }

    if !exact {
        reporter.warn(Warning::new(
            WarningCode::UnsupportedInterpolation,
            format!(
                "There is no equivalent Map Range interpolation mode for {}. Using {}.",
                stops.interpolation, interpolation
            ),
        ));
    }

    let first = stops.first();
    let last = stops.last();

    let mut range = RangeSpec::default().with_to(first.value(), last.value());
    if interpolation == RangeInterpolation::Stepped {
        range = range.with_from(last.position - STEP_WINDOW, last.position + STEP_WINDOW);
        range.steps = CONSTANT_STEPS;
    } else {
        range = range.with_from(first.position, last.position);
    }

    range.interpolation = interpolation;
    range.clamp = true;
    range
}

/// Convert map range parameters into colour ramp stops.
///
/// Continuous modes produce two stops at the range's corners. A stepped
/// range is expanded into one constant stop per step, evenly spread over
/// the input range and coloured by the stepped output value.
pub fn range_to_stops<R: Reporter + ?Sized>(range: &RangeSpec, reporter: &mut R) -> Result<StopSet> {
    let (interpolation, exact) = ramp_interpolation_for(&range.interpolation);

    if !exact {
        reporter.warn(Warning::new(
            WarningCode::UnsupportedInterpolation,
            format!(
                "There is no equivalent Color Ramp interpolation mode for {}. Using {}.",
                range.interpolation, interpolation
            ),
        ));
    }

    let points = if interpolation == RampInterpolation::Constant {
        stepped_points(range, reporter)?
    } else {
        vec![(range.from_min, range.to_min), (range.from_max, range.to_max)]
    };

    // A fresh ramp starts black to white; only its first stop may be reused.
    let mut stops = StopSet::default();
    stops.interpolation = interpolation;
    stops.reset_to_anchor();

    for (idx, (position, value)) in points.into_iter().enumerate() {
        let stop = ColorStop::grey(position, value);
        if idx == 0 {
            stops.set_anchor(stop);
        } else {
            stops.insert_stop(stop);
        }
    }

    Ok(stops)
}

/// (position, value) pairs for a stepped range.
fn stepped_points<R: Reporter + ?Sized>(range: &RangeSpec, reporter: &mut R) -> Result<Vec<(f32, f32)>> {
    let mut steps = range.steps;

    if !steps.is_finite() {
        return Err(ConvertError::Conversion {
            message: format!("Cannot expand a stepped Map Range with {} steps", steps),
            help: Some("Set Steps to a finite, non-zero value".to_string()),
        });
    }

    if steps < 0.0 {
        reporter.warn(Warning::new(
            WarningCode::NegativeSteps,
            format!(
                "Negative steps value {} is not supported. Using {}.",
                steps,
                steps.abs()
            ),
        ));
        steps = steps.abs();
    }

    if steps == 0.0 {
        return Err(ConvertError::Conversion {
            message: "Cannot expand a stepped Map Range with 0 steps".to_string(),
            help: Some("Set Steps to a non-zero value".to_string()),
        });
    }

    let stop_count = (steps + 1.0).ceil();
    if stop_count > MAX_STOPS as f32 {
        return Err(ConvertError::Conversion {
            message: format!(
                "A stepped Map Range with {} steps needs {} stops, more than a Color Ramp holds ({})",
                steps, stop_count, MAX_STOPS
            ),
            help: Some(format!("Use at most {} steps", MAX_STOPS - 1)),
        });
    }
    let stop_count = stop_count as usize;
    let start = range.from_min.min(range.from_max);
    let len = (range.from_min - range.from_max).abs();
    let step = (range.to_max - range.to_min) / steps;

    let points = (0..stop_count)
        .map(|idx| {
            let position = start + idx as f32 / (steps + 1.0) * len;
            let value = if idx == stop_count - 1 {
                range.to_max
            } else {
                range.to_min + step * idx as f32
            };
            (position, value)
        })
        .collect();

    Ok(points)
}
