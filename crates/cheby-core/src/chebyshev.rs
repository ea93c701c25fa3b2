//! Chebyshev (and Butterworth) low-pass/high-pass coefficient synthesis.
//!
//! The designer places `poles` poles on the unit circle, optionally warps
//! them onto an ellipse for pass-band ripple, maps every conjugate pair to a
//! second-order section with a bilinear-style s-to-z conversion, shifts the
//! section to the requested band edge, and cascades all sections into one
//! direct-form transfer function. The final feedforward terms are scaled for
//! unity gain at DC (low-pass) or Nyquist (high-pass).
//!
//! With 0 % ripple the poles stay on the circle and the result is a
//! Butterworth filter.
//!
//! # Numerical range
//!
//! The cascade is collapsed into a single direct-form polynomial, so very
//! high orders combined with cutoffs close to 0 or Nyquist lose precision
//! and can become unstable. Up to 8 poles is safe across the whole band.
//!
//! # Example
//!
//! ```rust
//! use cheby_core::{ChebyshevDesigner, PassType};
//!
//! let mut designer = ChebyshevDesigner::new();
//! designer.set_pass_type(PassType::LowPass);
//! designer.set_pole_count(4).unwrap();
//! designer.set_ripple(0.5).unwrap();
//! designer.set_cutoff_hz(1000.0, 44100.0).unwrap();
//!
//! let coeffs = designer.design().unwrap();
//! assert_eq!(coeffs.poles(), 4);
//! assert!((coeffs.dc_gain() - 1.0).abs() < 1e-9);
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec;
use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;
use libm::{acosh, asinh, cos, cosh, sin, sinh, sqrt};

use crate::coefficients::{CoefficientSet, alternating_sums};
use crate::error::DesignError;

/// `2 * tan(0.5)`, the prewarp constant of the prototype s-to-z mapping.
#[allow(clippy::excessive_precision)]
pub const T: f64 = 1.0926049796875809683172064978862181305885;

/// `T * T`.
#[allow(clippy::excessive_precision)]
pub const TT: f64 = 1.1937856416380991930736854556016623973846;

/// Smallest supported pole count.
pub const MIN_POLES: usize = 2;

/// Largest supported pole count.
pub const MAX_POLES: usize = 20;

/// Largest supported ripple percentage.
///
/// Above roughly 29.3 % the ripple warp takes `acosh` of a value below 1.
pub const MAX_RIPPLE_PERCENT: f64 = 29.0;

/// Nyquist, as a fraction of the sample rate.
pub const MAX_NORMALIZED_CUTOFF: f64 = 0.5;

/// Default normalized cutoff (about 551 Hz at 44.1 kHz).
pub const DEFAULT_NORMALIZED_CUTOFF: f64 = 0.0125;

/// Low-pass or high-pass response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PassType {
    /// Unity gain at DC.
    #[default]
    LowPass,
    /// Unity gain at Nyquist.
    HighPass,
}

impl PassType {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowPass => "low",
            Self::HighPass => "high",
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`PassType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePassTypeError;

impl fmt::Display for ParsePassTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected \"low\" or \"high\"")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParsePassTypeError {}

impl FromStr for PassType {
    type Err = ParsePassTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "lowpass" | "lp" => Ok(Self::LowPass),
            "high" | "highpass" | "hp" => Ok(Self::HighPass),
            _ => Err(ParsePassTypeError),
        }
    }
}

/// Clamps a requested pole count to an even value in `2..=20`.
///
/// Values above 20 clamp to 20 and odd values truncate down. Anything that
/// ends up below 2 (including 0 and 1) is rejected.
pub fn clamp_pole_count(requested: i64) -> Result<usize, DesignError> {
    let clamped = requested.min(MAX_POLES as i64);
    let even = clamped - clamped % 2;
    if even < MIN_POLES as i64 {
        return Err(DesignError::InvalidPoleCount(requested));
    }
    if even != requested {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            requested,
            used = even,
            "pole count must be even and between 2 and 20"
        );
    }
    Ok(even as usize)
}

/// Clamps a ripple percentage to `0..=29`.
pub fn clamp_ripple(requested: f64) -> Result<f64, DesignError> {
    if !requested.is_finite() {
        return Err(DesignError::InvalidRipple(requested));
    }
    let clamped = requested.clamp(0.0, MAX_RIPPLE_PERCENT);
    if clamped != requested {
        #[cfg(feature = "tracing")]
        tracing::warn!(requested, used = clamped, "ripple must be between 0 and 29 %");
    }
    Ok(clamped)
}

/// Clamps a normalized cutoff to `0..=0.5`.
pub fn clamp_normalized_cutoff(requested: f64) -> Result<f64, DesignError> {
    if !requested.is_finite() {
        return Err(DesignError::InvalidCutoff(requested));
    }
    let clamped = requested.clamp(0.0, MAX_NORMALIZED_CUTOFF);
    if clamped != requested {
        #[cfg(feature = "tracing")]
        tracing::warn!(requested, used = clamped, "cutoff must be between 0 and Nyquist");
    }
    Ok(clamped)
}

/// Converts a cutoff in Hz to a fraction of the sample rate, clamped to `0..=0.5`.
pub fn normalize_cutoff(cutoff_hz: f64, sample_rate: f64) -> Result<f64, DesignError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DesignError::InvalidSampleRate(sample_rate));
    }
    if !cutoff_hz.is_finite() {
        return Err(DesignError::InvalidCutoff(cutoff_hz));
    }
    clamp_normalized_cutoff(cutoff_hz / sample_rate)
}

/// Elliptical warp factors `(sinh(V)/K, cosh(V)/K)` for a ripple percentage.
///
/// Returns `(0.0, 0.0)` for zero ripple (circular placement). The ripple must
/// already be clamped to `0..=29`; at 100 % and beyond the result is NaN.
pub fn ripple_parameters(poles: usize, ripple_percent: f64) -> (f64, f64) {
    if ripple_percent <= 0.0 {
        return (0.0, 0.0);
    }

    let n = poles as f64;
    let ratio = 100.0 / (100.0 - ripple_percent);
    let es_inv = 1.0 / sqrt(ratio * ratio - 1.0);
    let v = asinh(es_inv) / n;
    let k = cosh(acosh(es_inv) / n);

    (sinh(v) / k, cosh(v) / k)
}

/// Everything needed to synthesize one filter.
///
/// Fields are only reachable through clamping setters, so a `FilterSpec`
/// always satisfies the synthesizer's preconditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pass_type: PassType,
    pole_count: usize,
    ripple_percent: f64,
    normalized_cutoff: f64,
}

impl FilterSpec {
    /// Builds a spec, clamping each field into range.
    pub fn new(
        pass_type: PassType,
        pole_count: i64,
        ripple_percent: f64,
        normalized_cutoff: f64,
    ) -> Result<Self, DesignError> {
        Ok(Self {
            pass_type,
            pole_count: clamp_pole_count(pole_count)?,
            ripple_percent: clamp_ripple(ripple_percent)?,
            normalized_cutoff: clamp_normalized_cutoff(normalized_cutoff)?,
        })
    }

    /// Butterworth (zero ripple) of the given order.
    pub fn butterworth(
        pass_type: PassType,
        pole_count: i64,
        normalized_cutoff: f64,
    ) -> Result<Self, DesignError> {
        Self::new(pass_type, pole_count, 0.0, normalized_cutoff)
    }

    /// Response type.
    pub fn pass_type(&self) -> PassType {
        self.pass_type
    }

    /// Number of poles (even, `2..=20`).
    pub fn pole_count(&self) -> usize {
        self.pole_count
    }

    /// Pass-band ripple in percent (`0..=29`).
    pub fn ripple_percent(&self) -> f64 {
        self.ripple_percent
    }

    /// Cutoff as a fraction of the sample rate (`0..=0.5`).
    pub fn normalized_cutoff(&self) -> f64 {
        self.normalized_cutoff
    }

    /// Sets the response type.
    pub fn set_pass_type(&mut self, pass_type: PassType) {
        self.pass_type = pass_type;
    }

    /// Sets the pole count, returning the value actually used.
    pub fn set_pole_count(&mut self, poles: i64) -> Result<usize, DesignError> {
        self.pole_count = clamp_pole_count(poles)?;
        Ok(self.pole_count)
    }

    /// Sets the ripple percentage, returning the value actually used.
    pub fn set_ripple(&mut self, ripple_percent: f64) -> Result<f64, DesignError> {
        self.ripple_percent = clamp_ripple(ripple_percent)?;
        Ok(self.ripple_percent)
    }

    /// Sets the normalized cutoff, returning the value actually used.
    pub fn set_cutoff(&mut self, normalized_cutoff: f64) -> Result<f64, DesignError> {
        self.normalized_cutoff = clamp_normalized_cutoff(normalized_cutoff)?;
        Ok(self.normalized_cutoff)
    }

    /// Sets the cutoff from Hz and the host sample rate.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f64, sample_rate: f64) -> Result<f64, DesignError> {
        self.normalized_cutoff = normalize_cutoff(cutoff_hz, sample_rate)?;
        Ok(self.normalized_cutoff)
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            pass_type: PassType::LowPass,
            pole_count: MIN_POLES,
            ripple_percent: 0.0,
            normalized_cutoff: DEFAULT_NORMALIZED_CUTOFF,
        }
    }
}

/// Synthesizes the coefficient set for `spec`.
///
/// Pure function of its input: the same spec always produces bit-identical
/// coefficients.
pub fn synthesize(spec: &FilterSpec) -> Result<CoefficientSet, DesignError> {
    let terms = ripple_parameters(spec.pole_count, spec.ripple_percent);
    synthesize_with(spec, terms)
}

fn synthesize_with(
    spec: &FilterSpec,
    (sinh_term, cosh_term): (f64, f64),
) -> Result<CoefficientSet, DesignError> {
    let poles = spec.pole_count;
    let high = spec.pass_type == PassType::HighPass;
    // Half the digital cutoff frequency.
    let omega_h = spec.normalized_cutoff * PI;

    let k = if high {
        -cos(omega_h + 0.5) / cos(omega_h - 0.5)
    } else {
        sin(0.5 - omega_h) / sin(0.5 + omega_h)
    };
    let kk = k * k;

    // Two guard slots in front so the 3-tap convolution needs no bounds checks.
    let len = poles + 3;
    let mut a = vec![0.0; len];
    let mut b = vec![0.0; len];
    let mut prev_a = vec![0.0; len];
    let mut prev_b = vec![0.0; len];
    a[2] = 1.0;
    b[2] = 1.0;

    let pi_poles = PI / poles as f64;
    let pi_poles2 = PI / (poles as f64 * 2.0);

    for p in 0..poles / 2 {
        let theta = pi_poles2 + p as f64 * pi_poles;
        let mut rp = -cos(theta);
        let mut ip = sin(theta);

        if spec.ripple_percent > 0.0 {
            rp *= sinh_term;
            ip *= cosh_term;
        }

        // s-domain to z-domain
        let m = rp * rp + ip * ip;
        let d = 4.0 - 4.0 * rp * T + m * TT;
        let x0 = TT / d;
        let x1 = 2.0 * x0;
        let x2 = x0;
        let y1 = (8.0 - 2.0 * m * TT) / d;
        let y2 = (-4.0 - 4.0 * rp * T - m * TT) / d;

        // Band edge transform
        let d = 1.0 + y1 * k - y2 * kk;
        let sa0 = (x0 - x1 * k + x2 * kk) / d;
        let mut sa1 = (-2.0 * x0 * k + x1 + x1 * kk - 2.0 * x2 * k) / d;
        let sa2 = (x0 * kk - x1 * k + x2) / d;
        let mut sb1 = (2.0 * k + y1 + y1 * kk - 2.0 * y2 * k) / d;
        let sb2 = (-kk - y1 * k + y2) / d;

        if high {
            sa1 = -sa1;
            sb1 = -sb1;
        }

        prev_a.copy_from_slice(&a);
        prev_b.copy_from_slice(&b);
        for i in 2..len {
            a[i] = sa0 * prev_a[i] + sa1 * prev_a[i - 1] + sa2 * prev_a[i - 2];
            b[i] = prev_b[i] - sb1 * prev_b[i - 1] - sb2 * prev_b[i - 2];
        }
    }

    // Drop the guard slots; b[0] must not feed the output back into itself.
    b[2] = 0.0;
    a.copy_within(2.., 0);
    b.copy_within(2.., 0);
    a.truncate(poles + 1);
    b.truncate(poles + 1);
    for v in &mut b {
        *v = -*v;
    }
    b[0] = 0.0;

    let (sa, sb) = if high {
        alternating_sums(&a, &b)
    } else {
        (a.iter().sum(), b.iter().sum())
    };
    let gain = sa / (1.0 - sb);
    if !gain.is_finite() || gain == 0.0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(gain, "gain normalization failed, keeping previous coefficients");
        return Err(DesignError::DegenerateGain(gain));
    }
    for v in &mut a {
        *v /= gain;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        pass = spec.pass_type.as_str(),
        poles,
        ripple = spec.ripple_percent,
        cutoff = spec.normalized_cutoff,
        "synthesized coefficients"
    );

    Ok(CoefficientSet::from_raw(a, b))
}

/// Stateful front end around [`synthesize`].
///
/// Holds a [`FilterSpec`] and the ripple warp factors derived from it. The
/// warp is refreshed whenever ripple or pole count change; every call to
/// [`design`](Self::design) re-runs the whole pole placement.
#[derive(Debug, Clone)]
pub struct ChebyshevDesigner {
    spec: FilterSpec,
    ripple_terms: (f64, f64),
}

impl ChebyshevDesigner {
    /// Low-pass, 2 poles, no ripple, cutoff 0.0125.
    pub fn new() -> Self {
        Self::from_spec(FilterSpec::default())
    }

    /// Wraps an existing spec.
    pub fn from_spec(spec: FilterSpec) -> Self {
        Self {
            ripple_terms: ripple_parameters(spec.pole_count, spec.ripple_percent),
            spec,
        }
    }

    /// The current spec.
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Selects low-pass or high-pass.
    pub fn set_pass_type(&mut self, pass_type: PassType) {
        self.spec.set_pass_type(pass_type);
    }

    /// Sets the pole count, returning the value actually used.
    pub fn set_pole_count(&mut self, poles: i64) -> Result<usize, DesignError> {
        let used = self.spec.set_pole_count(poles)?;
        self.refresh_ripple();
        Ok(used)
    }

    /// Sets the ripple percentage, returning the value actually used.
    pub fn set_ripple(&mut self, ripple_percent: f64) -> Result<f64, DesignError> {
        let used = self.spec.set_ripple(ripple_percent)?;
        self.refresh_ripple();
        Ok(used)
    }

    /// Sets the normalized cutoff, returning the value actually used.
    pub fn set_cutoff(&mut self, normalized_cutoff: f64) -> Result<f64, DesignError> {
        self.spec.set_cutoff(normalized_cutoff)
    }

    /// Sets the cutoff in Hz for the given sample rate.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f64, sample_rate: f64) -> Result<f64, DesignError> {
        self.spec.set_cutoff_hz(cutoff_hz, sample_rate)
    }

    /// Runs the synthesis for the current spec.
    pub fn design(&self) -> Result<CoefficientSet, DesignError> {
        synthesize_with(&self.spec, self.ripple_terms)
    }

    /// Header line plus the coefficient diagnostic.
    ///
    /// ```text
    /// Fc =  0.0125,  # poles = 2,  % ripple =  0.00
    /// a[00] =  ...
    /// ```
    pub fn report(&self) -> Result<String, DesignError> {
        let coeffs = self.design()?;
        Ok(format!(
            "Fc = {:7.4},  # poles = {},  % ripple = {:5.2}\n{}",
            self.spec.normalized_cutoff, self.spec.pole_count, self.spec.ripple_percent, coeffs
        ))
    }

    fn refresh_ripple(&mut self) {
        self.ripple_terms = ripple_parameters(self.spec.pole_count, self.spec.ripple_percent);
    }
}

impl Default for ChebyshevDesigner {
    fn default() -> Self {
        Self::new()
    }
}
