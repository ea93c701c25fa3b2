//! Sample-processing trait shared by the filter engine and its hosts.
//!
//! The [`Effect`] trait is what a host sees: one `f64` in, one `f64` out,
//! plus block helpers. [`IirFilter`](crate::IirFilter) implements it, and
//! [`EffectExt::chain`] puts several filters in series with static dispatch.
//!
//! The trait is object-safe, so `Box<dyn Effect>` works when the chain is
//! only known at runtime.

/// A mono sample processor.
///
/// # Example
///
/// ```rust
/// use cheby_core::Effect;
///
/// struct Gain {
///     gain: f64,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f64) -> f64 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f64) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Processes one sample, advancing any internal state.
    fn process(&mut self, input: f64) -> f64;

    /// Processes a block of samples.
    ///
    /// `input` and `output` must have the same length.
    fn process_block(&mut self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Processes a block in place.
    fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Called when the host sample rate changes.
    fn set_sample_rate(&mut self, sample_rate: f64);

    /// Clears internal history without touching parameters.
    fn reset(&mut self);

    /// Latency introduced by the processor, in samples.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Fluent chaining for any [`Effect`].
pub trait EffectExt: Effect + Sized {
    /// Feeds the output of `self` into `next`.
    fn chain<E: Effect>(self, next: E) -> Chain<Self, E> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: Effect> EffectExt for T {}

/// Two effects in series, created by [`EffectExt::chain`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A: Effect, B: Effect> Effect for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    fn process_block(&mut self, input: &[f64], output: &mut [f64]) {
        self.first.process_block(input, output);
        self.second.process_block_inplace(output);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.first.set_sample_rate(sample_rate);
        self.second.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn latency_samples(&self) -> usize {
        self.first.latency_samples() + self.second.latency_samples()
    }
}
