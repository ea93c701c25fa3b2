//! Factory presets bundled with cheby.
//!
//! These are always available without external files and cover the common
//! starting points: a plain Butterworth, Chebyshev low- and high-pass, a
//! rumble filter and a steep grouped-order design.

use crate::FilterPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "butterworth-lowpass",
    "chebyshev-lowpass",
    "chebyshev-highpass",
    "rumble-filter",
    "steep-lowpass",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("butterworth-lowpass", BUTTERWORTH_LOWPASS_PRESET),
    ("chebyshev-lowpass", CHEBYSHEV_LOWPASS_PRESET),
    ("chebyshev-highpass", CHEBYSHEV_HIGHPASS_PRESET),
    ("rumble-filter", RUMBLE_FILTER_PRESET),
    ("steep-lowpass", STEEP_LOWPASS_PRESET),
];

const BUTTERWORTH_LOWPASS_PRESET: &str = r#"
name = "Butterworth Low-Pass"
description = "2-pole maximally flat low-pass at 1 kHz"
sample_rate = 44100

[design]
pass = "low"
poles = 2
ripple = 0.0
cutoff_hz = 1000.0
"#;

const CHEBYSHEV_LOWPASS_PRESET: &str = r#"
name = "Chebyshev Low-Pass"
description = "4-pole low-pass at 2 kHz with 0.5% pass-band ripple"
sample_rate = 44100

[design]
pass = "low"
poles = 4
ripple = 0.5
cutoff_hz = 2000.0
"#;

const CHEBYSHEV_HIGHPASS_PRESET: &str = r#"
name = "Chebyshev High-Pass"
description = "4-pole high-pass at 500 Hz with 0.5% pass-band ripple"
sample_rate = 44100

[design]
pass = "high"
poles = 4
ripple = 0.5
cutoff_hz = 500.0
"#;

/// Subsonic cleanup for recordings.
const RUMBLE_FILTER_PRESET: &str = r#"
name = "Rumble Filter"
description = "4-pole Butterworth high-pass at 40 Hz for subsonic rumble"
sample_rate = 48000

[design]
pass = "high"
poles = 4
ripple = 0.0
cutoff_hz = 40.0
"#;

/// Normalized cutoff, so it behaves the same at any sample rate.
const STEEP_LOWPASS_PRESET: &str = r#"
name = "Steep Low-Pass"
description = "8-pole Chebyshev at a tenth of the sample rate, grouped coefficient order"
sample_rate = 48000

[design]
pass = "low"
poles = 8
ripple = 1.0
normalized_cutoff = 0.1
order = "grouped"

[engine]
ramp = true
ramp_ms = 20.0
max_poles = 8
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use cheby_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<FilterPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| FilterPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use cheby_config::get_factory_preset;
///
/// let preset = get_factory_preset("rumble-filter").unwrap();
/// assert_eq!(preset.name, "Rumble Filter");
/// ```
pub fn get_factory_preset(name: &str) -> Option<FilterPreset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return FilterPreset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset identifier or display name.
///
/// ```rust
/// use cheby_config::is_factory_preset;
///
/// assert!(is_factory_preset("steep-lowpass"));
/// assert!(is_factory_preset("Chebyshev High-Pass"));
/// assert!(!is_factory_preset("bandpass"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
