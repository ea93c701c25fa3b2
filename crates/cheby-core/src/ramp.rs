//! Linear coefficient ramping.
//!
//! Swapping IIR coefficients in the middle of a stream causes an audible
//! click. [`CoefficientRamp`] drives a linear crossfade from the old
//! coefficients to the new ones over a fixed window (10 ms by default):
//!
//! ```text
//! effective = target + (k / steps) * (old - target)
//! ```
//!
//! where `k` counts down from `steps - 1` to `0`, one step per sample. The
//! last step lands exactly on the target; after that the ramp is idle until
//! the next [`start`](CoefficientRamp::start).

/// Default crossfade window in milliseconds.
pub const DEFAULT_RAMP_MS: f64 = 10.0;

const IDLE: i64 = -1;

/// Countdown state for a linear coefficient crossfade.
///
/// # Example
///
/// ```rust
/// use cheby_core::CoefficientRamp;
///
/// let mut ramp = CoefficientRamp::from_time(1000.0, 4.0); // 4 steps
/// ramp.start();
/// assert_eq!(ramp.advance(), Some(0.75));
/// assert_eq!(ramp.advance(), Some(0.5));
/// assert_eq!(ramp.advance(), Some(0.25));
/// assert_eq!(ramp.advance(), Some(0.0));
/// assert_eq!(ramp.advance(), None);
/// ```
#[derive(Debug, Clone)]
pub struct CoefficientRamp {
    /// Total number of interpolation steps
    steps: usize,
    /// Steps left, -1 when idle
    countdown: i64,
    sample_rate: f64,
    ramp_ms: f64,
}

impl CoefficientRamp {
    /// Creates an idle ramp for the given sample rate and window length.
    pub fn from_time(sample_rate: f64, ramp_ms: f64) -> Self {
        let mut ramp = Self {
            steps: 1,
            countdown: IDLE,
            sample_rate,
            ramp_ms,
        };
        ramp.recalculate_steps();
        ramp
    }

    /// Updates the sample rate. Takes effect on the next [`start`](Self::start).
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.recalculate_steps();
    }

    /// Updates the window length. Takes effect on the next [`start`](Self::start).
    pub fn set_ramp_time_ms(&mut self, ramp_ms: f64) {
        self.ramp_ms = ramp_ms;
        self.recalculate_steps();
    }

    /// Number of samples a full ramp takes.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Window length in milliseconds.
    #[inline]
    pub fn ramp_time_ms(&self) -> f64 {
        self.ramp_ms
    }

    /// True while a crossfade is in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.countdown > IDLE
    }

    /// Remaining countdown value, `-1` when idle.
    #[inline]
    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    /// Begins a new crossfade from the current coefficients.
    pub fn start(&mut self) {
        self.countdown = self.steps as i64 - 1;
    }

    /// Stops the crossfade without reaching the target.
    pub fn cancel(&mut self) {
        self.countdown = IDLE;
    }

    /// Weight of the old coefficients for this sample, then steps the countdown.
    ///
    /// Returns `None` once idle. The final step returns `Some(0.0)`.
    #[inline]
    pub fn advance(&mut self) -> Option<f64> {
        if self.countdown <= IDLE {
            return None;
        }
        let weight = self.countdown as f64 / self.steps as f64;
        self.countdown -= 1;
        Some(weight)
    }

    fn recalculate_steps(&mut self) {
        let samples = self.sample_rate * self.ramp_ms / 1000.0;
        self.steps = if samples.is_finite() && samples >= 1.0 {
            samples as usize
        } else {
            1
        };
        // A shorter window must not leave a weight above 1.
        self.countdown = self.countdown.min(self.steps as i64 - 1);
    }
}

impl Default for CoefficientRamp {
    fn default() -> Self {
        Self::from_time(44100.0, DEFAULT_RAMP_MS)
    }
}
