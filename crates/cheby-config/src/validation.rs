//! Preset validation.
//!
//! Out-of-range design values are not fatal: the synthesizer clamps them, so
//! validation reports them as [`ValidationWarning`]s carrying the value that
//! will actually be used. Values that cannot be used at all (a zero sample
//! rate, fewer than two poles, non-finite numbers, a degenerate band edge)
//! are [`ValidationError`]s.
//!
//! # Example
//!
//! ```rust
//! use cheby_config::{DesignConfig, FilterPreset, validate_preset};
//!
//! let preset = FilterPreset::new("Odd").with_design(DesignConfig::lowpass(5, 1000.0));
//! let warnings = validate_preset(&preset).unwrap();
//! assert_eq!(warnings.len(), 1);
//! assert_eq!(warnings[0].used, 4.0);
//! ```

use cheby_core::{
    MAX_NORMALIZED_CUTOFF, MAX_POLES, MAX_POLES_LIMIT, MAX_RIPPLE_PERCENT, MIN_POLES, PassType,
};
use std::fmt;
use thiserror::Error;

use crate::preset::FilterPreset;

/// Problems that make a preset unusable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate is zero.
    #[error("sample rate must be greater than 0")]
    InvalidSampleRate,

    /// Fewer than two poles after rounding down to even.
    #[error("pole count {0} is below 2")]
    TooFewPoles(i64),

    /// A numeric field is NaN or infinite.
    #[error("field '{field}' is not a finite number ({value})")]
    NonFinite {
        /// Name of the field.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Both `cutoff_hz` and `normalized_cutoff` are set.
    #[error("set either cutoff_hz or normalized_cutoff, not both")]
    ConflictingCutoff,

    /// Low-pass at 0 or high-pass at Nyquist; the gain cannot be normalized.
    #[error("{pass}-pass filter with normalized cutoff {cutoff} has no pass band")]
    DegenerateCutoff {
        /// Response type.
        pass: PassType,
        /// Normalized cutoff after clamping.
        cutoff: f64,
    },

    /// Engine pole capacity is zero.
    #[error("max_poles must be at least 1")]
    ZeroMaxPoles,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A value that will be adjusted before use.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Name of the field.
    pub field: &'static str,
    /// Value found in the preset.
    pub requested: f64,
    /// Value that will be used.
    pub used: f64,
    /// Why it changes.
    pub reason: &'static str,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} will be used as {} ({})",
            self.field, self.requested, self.used, self.reason
        )
    }
}

/// Checks a preset, returning the clamp warnings or every error found.
pub fn validate_preset(preset: &FilterPreset) -> ValidationResult<Vec<ValidationWarning>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let design = &preset.design;
    let engine = &preset.engine;

    if preset.sample_rate == 0 {
        errors.push(ValidationError::InvalidSampleRate);
    }

    for (field, value) in [
        ("design.ripple", Some(design.ripple)),
        ("design.cutoff_hz", design.cutoff_hz),
        ("design.normalized_cutoff", design.normalized_cutoff),
        ("engine.ramp_ms", Some(engine.ramp_ms)),
    ] {
        if let Some(value) = value
            && !value.is_finite()
        {
            errors.push(ValidationError::NonFinite { field, value });
        }
    }

    // Poles: odd values round down, large values clamp
    let poles = design.poles.min(MAX_POLES as i64);
    let poles = poles - poles % 2;
    if poles < MIN_POLES as i64 {
        errors.push(ValidationError::TooFewPoles(design.poles));
    } else if poles != design.poles {
        warnings.push(ValidationWarning {
            field: "design.poles",
            requested: design.poles as f64,
            used: poles as f64,
            reason: "pole count must be even and between 2 and 20",
        });
    }

    if design.ripple.is_finite() && !(0.0..=MAX_RIPPLE_PERCENT).contains(&design.ripple) {
        warnings.push(ValidationWarning {
            field: "design.ripple",
            requested: design.ripple,
            used: design.ripple.clamp(0.0, MAX_RIPPLE_PERCENT),
            reason: "ripple must be between 0 and 29 percent",
        });
    }

    let cutoff = match (design.cutoff_hz, design.normalized_cutoff) {
        (Some(_), Some(_)) => {
            errors.push(ValidationError::ConflictingCutoff);
            None
        }
        (Some(hz), None) if preset.sample_rate > 0 => {
            Some(("design.cutoff_hz", hz / f64::from(preset.sample_rate), hz))
        }
        (None, Some(normalized)) => Some(("design.normalized_cutoff", normalized, normalized)),
        _ => None,
    };
    if let Some((field, normalized, requested)) = cutoff
        && normalized.is_finite()
    {
        let used = normalized.clamp(0.0, MAX_NORMALIZED_CUTOFF);
        if used != normalized {
            let scale = requested / normalized;
            warnings.push(ValidationWarning {
                field,
                requested,
                used: if scale.is_finite() { used * scale } else { used },
                reason: "cutoff must be between 0 and Nyquist",
            });
        }

        let pass = PassType::from(design.pass);
        let degenerate = match pass {
            PassType::LowPass => used <= 0.0,
            PassType::HighPass => used >= MAX_NORMALIZED_CUTOFF,
        };
        if degenerate {
            errors.push(ValidationError::DegenerateCutoff { pass, cutoff: used });
        }
    }

    if engine.max_poles == 0 {
        errors.push(ValidationError::ZeroMaxPoles);
    } else if engine.max_poles > MAX_POLES_LIMIT {
        warnings.push(ValidationWarning {
            field: "engine.max_poles",
            requested: engine.max_poles as f64,
            used: MAX_POLES_LIMIT as f64,
            reason: "engine capacity is limited to 256 poles",
        });
    }

    let capacity = engine.max_poles.min(MAX_POLES_LIMIT);
    if capacity > 0 && poles >= MIN_POLES as i64 && poles as usize > capacity {
        warnings.push(ValidationWarning {
            field: "engine.max_poles",
            requested: poles as f64,
            used: capacity as f64,
            reason: "designed coefficients will be truncated to the engine capacity",
        });
    }

    if engine.ramp && engine.ramp_ms < 0.0 {
        warnings.push(ValidationWarning {
            field: "engine.ramp_ms",
            requested: engine.ramp_ms,
            used: 0.0,
            reason: "a negative ramp time swaps coefficients within one sample",
        });
    }

    match errors.len() {
        0 => Ok(warnings),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
