//! Coefficient ramp demo: retune a Chebyshev low-pass mid-stream.
//!
//! Run with: cargo run -p cheby-core --example coefficient_ramp_demo

use cheby_core::{ChebyshevDesigner, CoefficientOrder, IirFilter, PassType};

fn main() {
    let sample_rate = 48000.0;

    let mut designer = ChebyshevDesigner::new();
    designer.set_pass_type(PassType::LowPass);
    designer.set_pole_count(4).unwrap();
    designer.set_ripple(0.5).unwrap();
    designer.set_cutoff_hz(500.0, sample_rate).unwrap();

    println!("=== Initial design ===\n");
    println!("{}\n", designer.report().unwrap());

    let list = designer.design().unwrap().to_list(CoefficientOrder::Grouped);
    let mut filter = IirFilter::with_ramp(8, sample_rate, 10.0);
    filter.load_coefficients(&list, CoefficientOrder::Grouped).unwrap();

    // A 2 kHz tone is well above the first cutoff
    let tone = |n: usize| (2.0 * std::f64::consts::PI * 2000.0 * n as f64 / sample_rate).sin();

    let mut n = 0;
    let mut peak = |filter: &mut IirFilter, samples: usize| {
        let mut peak = 0.0_f64;
        for _ in 0..samples {
            peak = peak.max(filter.process_sample(tone(n)).abs());
            n += 1;
        }
        peak
    };

    println!("Peak at 500 Hz cutoff:  {:.4}", peak(&mut filter, 4800));

    designer.set_cutoff_hz(4000.0, sample_rate).unwrap();
    filter.load_coefficient_set(&designer.design().unwrap());
    println!(
        "Retuned to 4 kHz, ramping over {} samples",
        filter.ramp_steps().unwrap_or(0)
    );

    println!("Peak during the ramp:   {:.4}", peak(&mut filter, 480));
    println!("Peak after the ramp:    {:.4}", peak(&mut filter, 4800));
    println!("\n=== Final coefficients ===\n\n{filter}");
}
