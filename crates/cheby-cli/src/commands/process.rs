//! File-based filtering command.

use super::common::{DesignArgs, linear_to_db};
use crate::wav::{read_wav, write_wav};
use cheby_config::FilterPreset;
use cheby_core::{IirFilter, normalize_cutoff};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    design: DesignArgs,

    /// Explicit coefficient list instead of a design (layout from the preset or --order)
    #[arg(long, conflicts_with = "sweep_to")]
    coeffs: Option<String>,

    /// Crossfade window in milliseconds when coefficients change
    #[arg(long, value_name = "MS")]
    ramp: Option<f64>,

    /// Sweep the cutoff from the designed value to this frequency (Hz) over the file
    #[arg(long, value_name = "HZ")]
    sweep_to: Option<f64>,

    /// Processing block size; the sweep redesigns once per block
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = f64::from(spec.sample_rate);

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / sample_rate
    );

    // The file's rate wins over any preset or --sample-rate value
    let mut design = args.design.clone();
    design.sample_rate = Some(spec.sample_rate);
    let preset = design.to_preset()?;

    let sweep_block = args.sweep_to.map(|_| args.block_size);
    let mut filter = build_engine(&preset, args.ramp, sweep_block);

    let sweep = match args.sweep_to {
        Some(end_hz) => Some(Sweep::new(&preset, end_hz, samples.len())?),
        None => None,
    };

    match &args.coeffs {
        Some(text) => {
            let poles = filter
                .load_coefficient_text(text, preset.coefficient_order())
                .map_err(|e| anyhow::anyhow!("invalid coefficient list: {}", e))?;
            println!("Filtering with {poles}-pole coefficient list");
        }
        None => {
            let designer = preset.designer()?;
            filter.load_coefficient_set(&designer.design()?);
            println!("{}", designer.report()?);
        }
    }

    if let Some(sweep) = &sweep {
        println!(
            "Sweeping cutoff {:.4} -> {:.4} (ramp {} samples)",
            sweep.start,
            sweep.end,
            filter.ramp_steps().unwrap_or(1)
        );
    }

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output = vec![0.0; samples.len()];
    let mut designer = preset.designer()?;

    for (i, (in_chunk, out_chunk)) in samples
        .chunks(args.block_size)
        .zip(output.chunks_mut(args.block_size))
        .enumerate()
    {
        let position = i * args.block_size;
        if let Some(sweep) = &sweep
            && position > 0
        {
            designer.set_cutoff(sweep.cutoff_at(position))?;
            match designer.design() {
                Ok(coeffs) => {
                    filter.load_coefficient_set(&coeffs);
                }
                Err(e) => tracing::warn!(position, "keeping previous coefficients: {e}"),
            }
        }

        for (x, y) in in_chunk.iter().zip(out_chunk.iter_mut()) {
            *y = filter.process_sample(*x);
        }
        pb.set_position((position + in_chunk.len()) as u64);
    }

    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, spec.sample_rate, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

/// Engine for this run: an explicit `--ramp` wins, an instant engine that
/// sweeps crossfades over one block.
fn build_engine(
    preset: &FilterPreset,
    ramp_ms: Option<f64>,
    sweep_block: Option<usize>,
) -> IirFilter {
    let sample_rate = f64::from(preset.sample_rate);
    let max_poles = preset.engine.max_poles;
    match (ramp_ms, sweep_block) {
        (Some(ms), _) => IirFilter::with_ramp(max_poles, sample_rate, ms),
        (None, Some(block)) if !preset.engine.ramp => {
            // Half a sample of slack so the window floors to exactly one block
            let ms = (block as f64 + 0.5) * 1000.0 / sample_rate;
            IirFilter::with_ramp(max_poles, sample_rate, ms)
        }
        _ => preset.engine(),
    }
}

/// Linear cutoff movement across the file, in normalized units.
struct Sweep {
    start: f64,
    end: f64,
    len: usize,
}

impl Sweep {
    fn new(preset: &FilterPreset, end_hz: f64, len: usize) -> anyhow::Result<Self> {
        Ok(Self {
            start: preset.normalized_cutoff()?,
            end: normalize_cutoff(end_hz, f64::from(preset.sample_rate))?,
            len: len.max(1),
        })
    }

    fn cutoff_at(&self, position: usize) -> f64 {
        let t = (position as f64 / self.len as f64).min(1.0);
        self.start + (self.end - self.start) * t
    }
}

fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f64).sqrt()
}

fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
}
