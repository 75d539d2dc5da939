//! Non-fatal conversion warnings and the reporter they are sent to.

use std::fmt;

/// What kind of precision a conversion gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// The source interpolation has no equivalent; a substitute was used.
    UnsupportedInterpolation,
    /// Interior colour stops were dropped.
    ExtraStops,
    /// A negative step count was replaced by its absolute value.
    NegativeSteps,
}

impl WarningCode {
    /// Machine-readable code, e.g. "mapconv::extra-stops".
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::UnsupportedInterpolation => "mapconv::unsupported-interpolation",
            WarningCode::ExtraStops => "mapconv::extra-stops",
            WarningCode::NegativeSteps => "mapconv::negative-steps",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversion warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives warnings raised during a conversion.
///
/// Any `FnMut(Warning)` closure is a reporter, so callers can forward
/// warnings straight to their own UI.
pub trait Reporter {
    fn warn(&mut self, warning: Warning);
}

impl<F: FnMut(Warning)> Reporter for F {
    fn warn(&mut self, warning: Warning) {
        self(warning)
    }
}

/// Collects warnings in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Check whether a warning with the given code was raised.
    pub fn contains(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Iterate over warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

impl Reporter for WarningLog {
    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log() {
        let log = WarningLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(!log.contains(WarningCode::ExtraStops));
    }

    #[test]
    fn test_log_keeps_order() {
        let mut log = WarningLog::new();
        log.warn(Warning::new(WarningCode::ExtraStops, "first"));
        log.warn(Warning::new(WarningCode::NegativeSteps, "second"));

        let messages: Vec<String> = log.iter().map(|w| w.to_string()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(log.contains(WarningCode::NegativeSteps));
    }

    #[test]
    fn test_closure_reporter() {
        let mut seen = Vec::new();
        {
            let mut reporter = |w: Warning| seen.push(w.code);
            reporter.warn(Warning::new(WarningCode::UnsupportedInterpolation, "x"));
        }
        assert_eq!(seen, vec![WarningCode::UnsupportedInterpolation]);
    }

    #[test]
    fn test_code_strings() {
        assert_eq!(WarningCode::ExtraStops.to_string(), "mapconv::extra-stops");
    }
}
