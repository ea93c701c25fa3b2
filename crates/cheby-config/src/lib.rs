//! Filter presets for cheby.
//!
//! A preset names a complete filter: the design parameters handed to the
//! Chebyshev synthesizer and the engine settings (ramp window, pole capacity)
//! used to run the result.
//!
//! # Features
//!
//! - **Preset Files**: Load and save [`FilterPreset`]s as TOML
//! - **Validation**: Report clamped values as warnings, unusable ones as errors
//! - **Factory Presets**: Built-in designs for common jobs
//!
//! # Example
//!
//! ```rust
//! use cheby_config::{DesignConfig, EngineConfig, FilterPreset, validate_preset};
//!
//! let preset = FilterPreset::new("Hiss cut")
//!     .with_description("Gentle 4-pole low-pass")
//!     .with_sample_rate(48000)
//!     .with_design(DesignConfig::lowpass(4, 6000.0).with_ripple(0.5))
//!     .with_engine(EngineConfig::ramped(15.0));
//!
//! assert!(validate_preset(&preset).unwrap().is_empty());
//!
//! let toml = preset.to_toml().unwrap();
//! let mut filter = FilterPreset::from_toml(&toml).unwrap().build_filter().unwrap();
//! assert!(filter.process_sample(1.0).is_finite());
//! ```

mod error;
mod preset;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{DesignConfig, EngineConfig, FilterPreset, OrderSetting, PassSetting};
pub use validation::{ValidationError, ValidationResult, ValidationWarning, validate_preset};
