//! Cheby Core - Chebyshev filter design and recursive filtering
//!
//! This crate has two halves that meet at a flat list of numbers:
//!
//! - a **coefficient synthesizer** that turns a filter spec (low/high-pass,
//!   pole count, ripple, cutoff) into direct-form IIR coefficients, and
//! - a **filter engine** that runs any such coefficient list over a sample
//!   stream, optionally ramping smoothly between coefficient sets.
//!
//! # Coefficient Synthesis
//!
//! - [`ChebyshevDesigner`] - Stateful designer with clamping setters and a diagnostic report
//! - [`FilterSpec`] / [`synthesize`] - Pure synthesis from a validated spec
//! - [`ripple_parameters`] - Elliptical pole warp for a ripple percentage
//!
//! # Coefficient Lists
//!
//! - [`CoefficientSet`] - `a`/`b` vectors with gain helpers and the diagnostic layout
//! - [`CoefficientOrder`] - Alternating (`a0 a1 b1 a2 b2`) or grouped (`a0 a1 a2 b1 b2`)
//! - [`parse_coefficient_list`] - Text to numbers
//!
//! # Filter Engine
//!
//! - [`IirFilter`] - Direct-form engine with pass-through fallback
//! - [`CoefficientRamp`] - Linear crossfade countdown
//! - [`DelayHistory`] - Most-recent-first sample history
//! - [`Effect`] / [`EffectExt`] / [`Chain`] - Host-facing processing trait
//!
//! # no_std Support
//!
//! The crate is `no_std` + `alloc` compatible. Disable the default `std`
//! feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cheby-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get warnings for clamped parameters and
//! rejected coefficient lists.
//!
//! # Example
//!
//! ```rust
//! use cheby_core::{ChebyshevDesigner, CoefficientOrder, IirFilter, PassType};
//!
//! let mut designer = ChebyshevDesigner::new();
//! designer.set_pass_type(PassType::HighPass);
//! designer.set_pole_count(4).unwrap();
//! designer.set_cutoff(0.1).unwrap();
//!
//! // Ship the coefficients as a flat list, as a host would
//! let list = designer.design().unwrap().to_list(CoefficientOrder::Alternating);
//!
//! let mut filter = IirFilter::with_ramp(8, 48000.0, 10.0);
//! filter.load_coefficients(&list, CoefficientOrder::Alternating).unwrap();
//! let out = filter.process_sample(1.0);
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod chebyshev;
pub mod coefficients;
pub mod effect;
pub mod error;
pub mod history;
pub mod iir;
pub mod ramp;

pub use chebyshev::{
    ChebyshevDesigner, DEFAULT_NORMALIZED_CUTOFF, FilterSpec, MAX_NORMALIZED_CUTOFF, MAX_POLES,
    MAX_RIPPLE_PERCENT, MIN_POLES, ParsePassTypeError, PassType, clamp_normalized_cutoff,
    clamp_pole_count, clamp_ripple, normalize_cutoff, ripple_parameters, synthesize,
};
pub use coefficients::{CoefficientOrder, CoefficientSet, ParseOrderError, parse_coefficient_list};
pub use effect::{Chain, Effect, EffectExt};
pub use error::{CoefficientError, DesignError};
pub use history::DelayHistory;
pub use iir::{DEFAULT_MAX_POLES, FilterState, IirFilter, MAX_POLES_LIMIT};
pub use ramp::{CoefficientRamp, DEFAULT_RAMP_MS};
