//! Direct-form recursive filter engine.
//!
//! [`IirFilter`] applies an arbitrary [`CoefficientSet`] to a sample stream:
//!
//! ```text
//! y[n] = a0*x[n] + sum(p = 1..=N) a[p]*x[n-p] + b[p]*y[n-p]
//! ```
//!
//! Coefficients arrive as a flat list (see [`CoefficientOrder`]) and may be
//! swapped at any time. A ramp-enabled engine crossfades linearly from the
//! old coefficients to the new ones over a short window instead of jumping.
//!
//! # State
//!
//! The engine is either [`FilterState::Empty`] (nothing loaded, a rejected
//! list, or released buffers) and copies input to output, or
//! [`FilterState::Active`] and filters. A malformed list always drops the
//! engine back to `Empty`; a partial update is never applied.
//!
//! # Threading
//!
//! All mutation goes through `&mut self`. A host that delivers coefficient
//! updates from a control thread must serialize them with audio processing,
//! for example by keeping the engine behind a `Mutex` and loading between
//! blocks.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::coefficients::{CoefficientOrder, CoefficientSet, parse_coefficient_list};
use crate::effect::Effect;
use crate::error::CoefficientError;
use crate::history::DelayHistory;
use crate::ramp::CoefficientRamp;

/// Default pole capacity of a new engine.
pub const DEFAULT_MAX_POLES: usize = 64;

/// Largest pole capacity an engine can be created with.
pub const MAX_POLES_LIMIT: usize = 256;

/// Whether the engine is filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No usable coefficients; input is copied to output.
    Empty,
    /// Filtering with `poles` pole pairs (0 is a plain gain stage).
    Active {
        /// Current filter order.
        poles: usize,
    },
}

/// Recursive filter with optional coefficient ramping.
///
/// # Example
///
/// ```rust
/// use cheby_core::{CoefficientOrder, FilterState, IirFilter};
///
/// let mut filter = IirFilter::new(8);
/// assert_eq!(filter.process_sample(0.25), 0.25); // empty: pass-through
///
/// // y[n] = 0.5*x[n] + 0.5*x[n-1]
/// filter.load_coefficients(&[0.5, 0.5, 0.0], CoefficientOrder::Alternating).unwrap();
/// assert_eq!(filter.state(), FilterState::Active { poles: 1 });
/// assert_eq!(filter.process_sample(1.0), 0.5);
/// assert_eq!(filter.process_sample(0.0), 0.5);
/// assert_eq!(filter.process_sample(0.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct IirFilter {
    max_poles: usize,
    state: FilterState,
    sample_rate: f64,
    // Effective coefficients, `poles + 1` long with a[0] = a0 and b[0] = 0
    a: Vec<f64>,
    b: Vec<f64>,
    target_a: Vec<f64>,
    target_b: Vec<f64>,
    diff_a: Vec<f64>,
    diff_b: Vec<f64>,
    x: DelayHistory,
    y: DelayHistory,
    ramp: Option<CoefficientRamp>,
}

impl IirFilter {
    /// Creates an engine that swaps coefficients instantly.
    ///
    /// `max_poles` is clamped to `1..=MAX_POLES_LIMIT`.
    pub fn new(max_poles: usize) -> Self {
        let max_poles = clamp_capacity(max_poles);
        Self {
            max_poles,
            state: FilterState::Empty,
            sample_rate: 44100.0,
            a: vec![0.0],
            b: vec![0.0],
            target_a: vec![0.0],
            target_b: vec![0.0],
            diff_a: vec![0.0],
            diff_b: vec![0.0],
            x: DelayHistory::default(),
            y: DelayHistory::default(),
            ramp: None,
        }
    }

    /// Creates an engine that ramps to new coefficients over `ramp_ms`.
    pub fn with_ramp(max_poles: usize, sample_rate: f64, ramp_ms: f64) -> Self {
        let mut filter = Self::new(max_poles);
        filter.sample_rate = sample_rate;
        filter.ramp = Some(CoefficientRamp::from_time(sample_rate, ramp_ms));
        filter
    }

    /// Decodes and loads a flat coefficient list.
    ///
    /// Returns the number of poles now in use. On error the engine reverts to
    /// pass-through with no poles: the previous coefficients are discarded and
    /// the delay lines emptied, so a later load starts from silence.
    pub fn load_coefficients(
        &mut self,
        values: &[f64],
        order: CoefficientOrder,
    ) -> Result<usize, CoefficientError> {
        match CoefficientSet::from_list(values, order) {
            Ok(set) => Ok(self.load_coefficient_set(&set)),
            Err(err) => {
                self.bypass(&err);
                Err(err)
            }
        }
    }

    /// Parses a whitespace/comma separated list, then loads it.
    pub fn load_coefficient_text(
        &mut self,
        text: &str,
        order: CoefficientOrder,
    ) -> Result<usize, CoefficientError> {
        match parse_coefficient_list(text) {
            Ok(values) => self.load_coefficients(&values, order),
            Err(err) => {
                self.bypass(&err);
                Err(err)
            }
        }
    }

    /// Loads an already decoded set.
    ///
    /// Sets with more poles than the engine holds keep only the leading
    /// pole pairs. A ramp-enabled engine crossfades when it is already
    /// active with the same order; a first load or an order change (which
    /// zeroes the delay lines) swaps instantly. Returns the number of poles
    /// now in use.
    pub fn load_coefficient_set(&mut self, set: &CoefficientSet) -> usize {
        let truncated;
        let set = if set.poles() > self.max_poles {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                requested = set.poles(),
                max_poles = self.max_poles,
                "too many poles, truncating coefficient list"
            );
            truncated = set.clone().truncated(self.max_poles);
            &truncated
        } else {
            set
        };
        let poles = set.poles();
        let (a, b) = (set.a(), set.b());

        // Only crossfade between filters of the same order. Fading in from
        // all-zero coefficients is unstable above two poles.
        let mut fresh = self.state == FilterState::Empty;
        if self.a.len() != poles + 1 || self.x.len() != poles {
            self.resize(poles);
            fresh = true;
        }

        let ramp = match self.ramp.as_mut() {
            Some(ramp) if fresh => {
                ramp.cancel();
                None
            }
            other => other,
        };

        match ramp {
            Some(ramp) => {
                self.target_a.copy_from_slice(a);
                self.target_b.copy_from_slice(b);
                for (diff, (old, new)) in self.diff_a.iter_mut().zip(self.a.iter().zip(a)) {
                    *diff = old - new;
                }
                for (diff, (old, new)) in self.diff_b.iter_mut().zip(self.b.iter().zip(b)) {
                    *diff = old - new;
                }
                ramp.start();
            }
            None => {
                self.a.copy_from_slice(a);
                self.b.copy_from_slice(b);
                self.target_a.copy_from_slice(a);
                self.target_b.copy_from_slice(b);
            }
        }

        self.state = FilterState::Active { poles };
        #[cfg(feature = "tracing")]
        tracing::debug!(poles, ramping = self.is_ramping(), "loaded coefficients");
        poles
    }

    /// Filters one sample.
    ///
    /// While a ramp is running every coefficient is re-interpolated first;
    /// the last ramp step writes the targets exactly.
    #[inline]
    pub fn process_sample(&mut self, x0: f64) -> f64 {
        let FilterState::Active { poles } = self.state else {
            return x0;
        };

        if let Some(weight) = self.ramp.as_mut().and_then(CoefficientRamp::advance) {
            for i in 0..=poles {
                self.a[i] = self.target_a[i] + weight * self.diff_a[i];
                self.b[i] = self.target_b[i] + weight * self.diff_b[i];
            }
        }

        let mut y0 = x0 * self.a[0];
        for p in 1..=poles {
            y0 += self.x.get(p - 1) * self.a[p];
            y0 += self.y.get(p - 1) * self.b[p];
        }

        self.x.push(x0);
        self.y.push(y0);
        y0
    }

    /// Zeroes the output history only.
    ///
    /// Silences a filter that has blown up while keeping its coefficients
    /// and input history.
    pub fn clear(&mut self) {
        self.y.clear();
    }

    /// Frees the coefficient and delay buffers and returns to pass-through.
    ///
    /// Safe to call any number of times.
    pub fn release_buffers(&mut self) {
        self.state = FilterState::Empty;
        if let Some(ramp) = self.ramp.as_mut() {
            ramp.cancel();
        }
        for buf in [
            &mut self.a,
            &mut self.b,
            &mut self.target_a,
            &mut self.target_b,
            &mut self.diff_a,
            &mut self.diff_b,
        ] {
            *buf = Vec::new();
        }
        self.x.release();
        self.y.release();
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Filter order in use, `0` when empty.
    #[inline]
    pub fn poles(&self) -> usize {
        match self.state {
            FilterState::Active { poles } => poles,
            FilterState::Empty => 0,
        }
    }

    /// Pole capacity.
    #[inline]
    pub fn max_poles(&self) -> usize {
        self.max_poles
    }

    /// Sample rate used to size the ramp window.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The coefficients currently applied to the stream.
    ///
    /// During a ramp these are the interpolated values, not the targets.
    pub fn coefficients(&self) -> CoefficientSet {
        if self.a.is_empty() {
            return CoefficientSet::from_raw(vec![0.0], vec![0.0]);
        }
        CoefficientSet::from_raw(self.a.clone(), self.b.clone())
    }

    /// True while a coefficient crossfade is in progress.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.ramp.as_ref().is_some_and(CoefficientRamp::is_active)
    }

    /// Ramp window in samples, `None` for an instant-swap engine.
    pub fn ramp_steps(&self) -> Option<usize> {
        self.ramp.as_ref().map(CoefficientRamp::steps)
    }

    /// Enables ramping (or changes its window) for subsequent loads.
    pub fn set_ramp_time_ms(&mut self, ramp_ms: f64) {
        match self.ramp.as_mut() {
            Some(ramp) => ramp.set_ramp_time_ms(ramp_ms),
            None => self.ramp = Some(CoefficientRamp::from_time(self.sample_rate, ramp_ms)),
        }
    }

    /// Turns ramping off. A crossfade in progress jumps to its target.
    pub fn disable_ramp(&mut self) {
        if self.ramp.take().is_some() && !self.a.is_empty() {
            self.a.copy_from_slice(&self.target_a);
            self.b.copy_from_slice(&self.target_b);
        }
    }

    fn resize(&mut self, poles: usize) {
        for buf in [
            &mut self.a,
            &mut self.b,
            &mut self.target_a,
            &mut self.target_b,
            &mut self.diff_a,
            &mut self.diff_b,
        ] {
            buf.clear();
            buf.resize(poles + 1, 0.0);
        }
        self.x.resize(poles);
        self.y.resize(poles);
    }

    fn bypass(&mut self, err: &CoefficientError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %err, "rejected coefficient list, passing input through");
        #[cfg(not(feature = "tracing"))]
        let _ = err;

        self.state = FilterState::Empty;
        if let Some(ramp) = self.ramp.as_mut() {
            ramp.cancel();
        }
        self.resize(0);
    }
}

impl Default for IirFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POLES)
    }
}

impl Effect for IirFilter {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        self.process_sample(input)
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        if let Some(ramp) = self.ramp.as_mut() {
            ramp.set_sample_rate(sample_rate);
        }
    }

    fn reset(&mut self) {
        self.x.clear();
        self.y.clear();
    }
}

/// Same layout as [`CoefficientSet`]'s diagnostic; `a[00] = 0.0` once released.
impl fmt::Display for IirFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a.is_empty() {
            return f.write_str("a[00] = 0.0");
        }
        fmt::Display::fmt(&self.coefficients(), f)
    }
}

fn clamp_capacity(max_poles: usize) -> usize {
    let clamped = max_poles.clamp(1, MAX_POLES_LIMIT);
    if clamped != max_poles {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            requested = max_poles,
            used = clamped,
            "max poles must be between 1 and 256"
        );
    }
    clamped
}
