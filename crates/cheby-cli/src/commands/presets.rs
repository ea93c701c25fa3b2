//! Preset management commands.
//!
//! Lists factory presets, shows any preset with its coefficients, and saves
//! presets to TOML files for editing.

use super::common::{DesignArgs, load_preset};
use cheby_config::{factory_presets, validate_preset};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show a preset and the coefficients it produces
    Show {
        /// Preset name or path
        name: String,
    },

    /// Write a preset to a TOML file
    Save {
        /// Name for the new preset
        name: String,

        /// Destination file
        path: PathBuf,

        #[command(flatten)]
        design: DesignArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            path,
            design,
            description,
            force,
        } => save_preset(&name, &path, &design, description, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for (id, preset) in cheby_config::FACTORY_PRESET_NAMES.iter().zip(factory_presets()) {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:20} - {}", id, desc);
    }
    println!();
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Sample Rate: {} Hz", preset.sample_rate);
    println!("Pass:        {}", preset.pass_type());
    println!("Order:       {}", preset.coefficient_order());
    if preset.engine.ramp {
        println!("Ramp:        {} ms", preset.engine.ramp_ms);
    } else {
        println!("Ramp:        off");
    }
    println!();

    for warning in validate_preset(&preset)? {
        println!("warning: {}", warning);
    }

    println!("{}", preset.designer()?.report()?);
    Ok(())
}

fn save_preset(
    name: &str,
    path: &Path,
    design: &DesignArgs,
    description: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let mut preset = design.to_preset()?;
    preset.name = name.to_string();
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }

    preset.save(path)?;

    println!("Saved preset '{}' to {}", name, path.display());
    Ok(())
}
