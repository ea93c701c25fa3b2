//! Error types for coefficient design and coefficient list handling.
//!
//! Both enums are plain `core` types so the crate stays `no_std`; the
//! `std::error::Error` impls are only compiled with the `std` feature.

/// Errors produced while designing a Chebyshev/Butterworth filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignError {
    /// Pole count is below 2 after truncating to an even value.
    InvalidPoleCount(i64),
    /// Ripple percentage is NaN or infinite.
    InvalidRipple(f64),
    /// Cutoff (normalized or in Hz) is NaN or infinite.
    InvalidCutoff(f64),
    /// Sample rate is zero, negative or non-finite.
    InvalidSampleRate(f64),
    /// Gain normalization divided by zero or produced a non-finite gain.
    ///
    /// Happens for degenerate band edges (a low-pass at cutoff 0, for
    /// example), where every feedforward term collapses to zero.
    DegenerateGain(f64),
}

impl core::fmt::Display for DesignError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPoleCount(p) => {
                write!(f, "pole count {p} is invalid (must be even and between 2 and 20)")
            }
            Self::InvalidRipple(r) => write!(f, "ripple percentage {r} is not a finite number"),
            Self::InvalidCutoff(c) => write!(f, "cutoff {c} is not a finite number"),
            Self::InvalidSampleRate(sr) => write!(f, "sample rate {sr} must be finite and > 0"),
            Self::DegenerateGain(g) => {
                write!(f, "cannot normalize filter gain (gain = {g}); cutoff is degenerate")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DesignError {}

/// Errors produced while decoding a coefficient list.
///
/// Any of these leaves a [`IirFilter`](crate::IirFilter) in pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum CoefficientError {
    /// The list contained no values at all.
    Empty,
    /// A token could not be parsed as a number.
    NonNumeric {
        /// Zero-based position of the offending token.
        index: usize,
    },
    /// A value parsed but is NaN or infinite.
    NonFinite {
        /// Zero-based position of the offending value.
        index: usize,
    },
    /// The list length is even, leaving a coefficient without a partner.
    UnpairedCoefficient {
        /// Length of the rejected list.
        len: usize,
    },
}

impl core::fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "coefficient list is empty"),
            Self::NonNumeric { index } => {
                write!(f, "coefficient list member {index} is not a number")
            }
            Self::NonFinite { index } => {
                write!(f, "coefficient list member {index} is not finite")
            }
            Self::UnpairedCoefficient { len } => write!(
                f,
                "coefficient list of length {len} cannot be split into a0 plus (a, b) pairs"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoefficientError {}
