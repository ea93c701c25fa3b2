//! Shared CLI helpers used across multiple commands.

use cheby_config::{FilterPreset, get_factory_preset, validate_preset};
use cheby_core::{CoefficientOrder, PassType};
use clap::Args;
use std::path::PathBuf;

/// Filter design options shared by `design`, `impulse` and `process`.
///
/// Explicit options override the values of `--preset`.
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// Start from a preset (factory name or TOML path)
    #[arg(long)]
    pub preset: Option<String>,

    /// Response type: low or high
    #[arg(long)]
    pub pass: Option<PassType>,

    /// Pole count (even, 2 to 20)
    #[arg(short, long, allow_negative_numbers = true)]
    pub poles: Option<i64>,

    /// Pass-band ripple in percent (0 for Butterworth, up to 29)
    #[arg(short, long, allow_negative_numbers = true)]
    pub ripple: Option<f64>,

    /// Cutoff in Hz, relative to --sample-rate
    #[arg(short, long, conflicts_with = "normalized")]
    pub cutoff: Option<f64>,

    /// Cutoff as a fraction of the sample rate (0 to 0.5)
    #[arg(long)]
    pub normalized: Option<f64>,

    /// Sample rate used to normalize --cutoff
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Coefficient list layout: alternating (aabab) or grouped (aaabb)
    #[arg(long)]
    pub order: Option<CoefficientOrder>,
}

impl DesignArgs {
    /// Resolve the options into a validated preset, logging clamp warnings.
    pub fn to_preset(&self) -> anyhow::Result<FilterPreset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => FilterPreset::new("command line"),
        };

        if let Some(sample_rate) = self.sample_rate {
            preset.sample_rate = sample_rate;
        }

        let design = &mut preset.design;
        if let Some(pass) = self.pass {
            design.pass = pass.into();
        }
        if let Some(poles) = self.poles {
            design.poles = poles;
        }
        if let Some(ripple) = self.ripple {
            design.ripple = ripple;
        }
        if let Some(hz) = self.cutoff {
            design.cutoff_hz = Some(hz);
            design.normalized_cutoff = None;
        }
        if let Some(normalized) = self.normalized {
            design.cutoff_hz = None;
            design.normalized_cutoff = Some(normalized);
        }
        if let Some(order) = self.order {
            design.order = order.into();
        }

        for warning in validate_preset(&preset)? {
            tracing::warn!("{warning}");
        }

        Ok(preset)
    }
}

/// Load a preset by factory name or file path.
pub fn load_preset(name: &str) -> anyhow::Result<FilterPreset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return FilterPreset::load(&path).map_err(|e| anyhow::anyhow!("{}", e));
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'cheby presets list' to see available presets.",
        name
    )
}

/// Join coefficients into a single whitespace-separated line.
pub fn format_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:e}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert linear amplitude to dB, floored at -120.
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
