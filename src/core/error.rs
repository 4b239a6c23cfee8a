//! Construction-time errors.
//!
//! Everything here is raised before the physics world is touched, so a failed
//! build or config load never leaves half a rig behind.

use thiserror::Error;

/// Errors raised while configuring a session or assembling a rig.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// A rig dimension (width, height, mass, ...) is zero, negative or not finite.
    #[error("invalid rig dimension `{name}`: {value} (must be finite and > 0)")]
    InvalidDimension {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A point (anchor, gravity, ...) has a non-finite component.
    #[error("non-finite value for `{name}`")]
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// Joint limits where `min > max` or a bound is not finite.
    #[error("invalid rotation limit for joint {joint}: [{min}, {max}]")]
    InvalidLimit {
        /// Joint label, e.g. `torso-head`.
        joint: String,
        /// Lower bound (radians).
        min: f32,
        /// Upper bound (radians).
        max: f32,
    },

    /// Stepper configuration that would not advance time.
    #[error("invalid step configuration: duration {duration} s over {substeps} substeps")]
    InvalidStep {
        /// Total simulated duration per `step()` call.
        duration: f64,
        /// Number of substeps.
        substeps: u32,
    },

    /// Friction or damping outside its allowed range.
    #[error("`{name}` out of range: {value}")]
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// Configuration JSON could not be parsed.
    #[error("invalid session config: {0}")]
    Config(String),
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<f32, RigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RigError::InvalidDimension { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, values: &[f32]) -> Result<(), RigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RigError::NonFinite { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert_eq!(check_positive("w", 2.0), Ok(2.0));
        assert!(check_positive("w", 0.0).is_err());
        assert!(check_positive("w", -1.0).is_err());
        assert!(check_positive("w", f32::NAN).is_err());
        assert!(check_positive("w", f32::INFINITY).is_err());
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let err = check_positive("height", -3.0).unwrap_err();
        assert!(err.to_string().contains("height"));

        let err = check_finite("anchor", &[1.0, f32::NAN]).unwrap_err();
        assert_eq!(err, RigError::NonFinite { name: "anchor" });
    }
}
