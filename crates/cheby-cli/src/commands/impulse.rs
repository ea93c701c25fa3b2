//! Impulse response command.

use super::common::DesignArgs;
use cheby_core::IirFilter;
use clap::Args;

#[derive(Args)]
pub struct ImpulseArgs {
    #[command(flatten)]
    design: DesignArgs,

    /// Number of output samples
    #[arg(short = 'n', long, default_value = "200")]
    samples: usize,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    let preset = args.design.to_preset()?;
    let coeffs = preset.design()?;

    let mut filter = IirFilter::new(coeffs.poles());
    filter.load_coefficient_set(&coeffs);

    let response = impulse_response(&mut filter, args.samples);
    for value in &response {
        println!("{value:.9e}");
    }

    let peak = response.iter().map(|v| v.abs()).fold(0.0, f64::max);
    let last = response.last().map_or(0.0, |v| v.abs());
    let sum: f64 = response.iter().sum();
    println!("# peak = {peak:.6e}, final = {last:.6e}, sum = {sum:.6}");

    Ok(())
}

/// Feed a unit impulse through `filter`.
fn impulse_response(filter: &mut IirFilter, samples: usize) -> Vec<f64> {
    (0..samples)
        .map(|n| filter.process_sample(if n == 0 { 1.0 } else { 0.0 }))
        .collect()
}
