//! Preset file format and operations.

use cheby_core::{
    ChebyshevDesigner, CoefficientOrder, CoefficientSet, DEFAULT_MAX_POLES,
    DEFAULT_NORMALIZED_CUTOFF, DEFAULT_RAMP_MS, FilterSpec, IirFilter, PassType, normalize_cutoff,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Response type as written in preset files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassSetting {
    /// Low-pass
    #[default]
    #[serde(alias = "lowpass", alias = "lp")]
    Low,
    /// High-pass
    #[serde(alias = "highpass", alias = "hp")]
    High,
}

impl From<PassSetting> for PassType {
    fn from(pass: PassSetting) -> Self {
        match pass {
            PassSetting::Low => PassType::LowPass,
            PassSetting::High => PassType::HighPass,
        }
    }
}

impl From<PassType> for PassSetting {
    fn from(pass: PassType) -> Self {
        match pass {
            PassType::LowPass => PassSetting::Low,
            PassType::HighPass => PassSetting::High,
        }
    }
}

/// Coefficient list layout as written in preset files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSetting {
    /// `a0 a1 b1 a2 b2 ...`
    #[default]
    #[serde(alias = "aabab")]
    Alternating,
    /// `a0 a1 a2 ... b1 b2 ...`
    #[serde(alias = "aaabb")]
    Grouped,
}

impl From<OrderSetting> for CoefficientOrder {
    fn from(order: OrderSetting) -> Self {
        match order {
            OrderSetting::Alternating => CoefficientOrder::Alternating,
            OrderSetting::Grouped => CoefficientOrder::Grouped,
        }
    }
}

impl From<CoefficientOrder> for OrderSetting {
    fn from(order: CoefficientOrder) -> Self {
        match order {
            CoefficientOrder::Alternating => OrderSetting::Alternating,
            CoefficientOrder::Grouped => OrderSetting::Grouped,
        }
    }
}

/// The `[design]` table: what to synthesize.
///
/// The cutoff is given either in Hz (`cutoff_hz`, resolved against the
/// preset's sample rate) or directly as a fraction of the sample rate
/// (`normalized_cutoff`). With neither, the designer default is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignConfig {
    /// Low-pass or high-pass.
    #[serde(default)]
    pub pass: PassSetting,

    /// Requested pole count (even, 2 to 20).
    #[serde(default = "default_poles")]
    pub poles: i64,

    /// Pass-band ripple in percent (0 to 29, 0 = Butterworth).
    #[serde(default)]
    pub ripple: f64,

    /// Cutoff in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_hz: Option<f64>,

    /// Cutoff as a fraction of the sample rate (0 to 0.5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_cutoff: Option<f64>,

    /// Layout used when the coefficients are written out as a list.
    #[serde(default)]
    pub order: OrderSetting,
}

fn default_poles() -> i64 {
    2
}

impl DesignConfig {
    /// Low-pass design with a cutoff in Hz and no ripple.
    pub fn lowpass(poles: i64, cutoff_hz: f64) -> Self {
        Self {
            pass: PassSetting::Low,
            poles,
            cutoff_hz: Some(cutoff_hz),
            ..Self::default()
        }
    }

    /// High-pass design with a cutoff in Hz and no ripple.
    pub fn highpass(poles: i64, cutoff_hz: f64) -> Self {
        Self {
            pass: PassSetting::High,
            ..Self::lowpass(poles, cutoff_hz)
        }
    }

    /// Set the ripple percentage.
    pub fn with_ripple(mut self, ripple: f64) -> Self {
        self.ripple = ripple;
        self
    }

    /// Replace the cutoff with a normalized one.
    pub fn with_normalized_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff_hz = None;
        self.normalized_cutoff = Some(cutoff);
        self
    }

    /// Set the list layout.
    pub fn with_order(mut self, order: impl Into<OrderSetting>) -> Self {
        self.order = order.into();
        self
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            pass: PassSetting::Low,
            poles: default_poles(),
            ripple: 0.0,
            cutoff_hz: None,
            normalized_cutoff: None,
            order: OrderSetting::Alternating,
        }
    }
}

/// The `[engine]` table: how the coefficients are applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Crossfade to new coefficients instead of swapping them.
    #[serde(default = "default_ramp")]
    pub ramp: bool,

    /// Crossfade window in milliseconds.
    #[serde(default = "default_ramp_ms")]
    pub ramp_ms: f64,

    /// Pole capacity of the engine.
    #[serde(default = "default_max_poles")]
    pub max_poles: usize,
}

fn default_ramp() -> bool {
    true
}

fn default_ramp_ms() -> f64 {
    DEFAULT_RAMP_MS
}

fn default_max_poles() -> usize {
    DEFAULT_MAX_POLES
}

impl EngineConfig {
    /// Engine that swaps coefficients instantly.
    pub fn instant() -> Self {
        Self {
            ramp: false,
            ..Self::default()
        }
    }

    /// Engine that ramps over `ramp_ms`.
    pub fn ramped(ramp_ms: f64) -> Self {
        Self {
            ramp: true,
            ramp_ms,
            ..Self::default()
        }
    }

    /// Set the pole capacity.
    pub fn with_max_poles(mut self, max_poles: usize) -> Self {
        self.max_poles = max_poles;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ramp: default_ramp(),
            ramp_ms: default_ramp_ms(),
            max_poles: default_max_poles(),
        }
    }
}

/// A named filter: design parameters plus engine settings.
///
/// # TOML Format
///
/// ```toml
/// name = "Gentle low-pass"
/// description = "4-pole Chebyshev, half a percent of ripple"
/// sample_rate = 44100
///
/// [design]
/// pass = "low"
/// poles = 4
/// ripple = 0.5
/// cutoff_hz = 1000.0
/// order = "alternating"
///
/// [engine]
/// ramp = true
/// ramp_ms = 10.0
/// max_poles = 64
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the Hz cutoff and ramp window refer to (defaults to 44100).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Filter design.
    #[serde(default)]
    pub design: DesignConfig,

    /// Engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_sample_rate() -> u32 {
    44100
}

impl FilterPreset {
    /// Create a preset with the default design and engine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            design: DesignConfig::default(),
            engine: EngineConfig::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the design table.
    pub fn with_design(mut self, design: DesignConfig) -> Self {
        self.design = design;
        self
    }

    /// Replace the engine table.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Response type.
    pub fn pass_type(&self) -> PassType {
        self.design.pass.into()
    }

    /// List layout.
    pub fn coefficient_order(&self) -> CoefficientOrder {
        self.design.order.into()
    }

    /// Cutoff as a fraction of the sample rate, clamped to `0..=0.5`.
    pub fn normalized_cutoff(&self) -> Result<f64, ConfigError> {
        let cutoff = match (self.design.cutoff_hz, self.design.normalized_cutoff) {
            (Some(hz), _) => normalize_cutoff(hz, f64::from(self.sample_rate))?,
            (None, Some(normalized)) => cheby_core::clamp_normalized_cutoff(normalized)?,
            (None, None) => DEFAULT_NORMALIZED_CUTOFF,
        };
        Ok(cutoff)
    }

    /// The clamped [`FilterSpec`] this preset describes.
    pub fn filter_spec(&self) -> Result<FilterSpec, ConfigError> {
        Ok(FilterSpec::new(
            self.pass_type(),
            self.design.poles,
            self.design.ripple,
            self.normalized_cutoff()?,
        )?)
    }

    /// A designer primed with this preset's spec.
    pub fn designer(&self) -> Result<ChebyshevDesigner, ConfigError> {
        Ok(ChebyshevDesigner::from_spec(self.filter_spec()?))
    }

    /// Synthesize the coefficients.
    pub fn design(&self) -> Result<CoefficientSet, ConfigError> {
        Ok(self.designer()?.design()?)
    }

    /// An empty engine configured from the `[engine]` table.
    pub fn engine(&self) -> IirFilter {
        if self.engine.ramp {
            IirFilter::with_ramp(
                self.engine.max_poles,
                f64::from(self.sample_rate),
                self.engine.ramp_ms,
            )
        } else {
            IirFilter::new(self.engine.max_poles)
        }
    }

    /// An engine with the designed coefficients already loaded.
    pub fn build_filter(&self) -> Result<IirFilter, ConfigError> {
        let coeffs = self.design()?;
        let mut filter = self.engine();
        filter.load_coefficient_set(&coeffs);
        Ok(filter)
    }
}

impl Default for FilterPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
