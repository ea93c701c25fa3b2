//! Integration tests for cheby-core.
//!
//! Runs designed coefficients through the filter engine and checks the result
//! at signal level: impulse decay, pass-band and stop-band gain measured with
//! sine waves, ramped versus instant loads, and cascaded engines.

use cheby_core::{
    ChebyshevDesigner, CoefficientOrder, Effect, EffectExt, FilterSpec, FilterState, IirFilter,
    PassType, synthesize,
};

const SAMPLE_RATE: f64 = 44100.0;
const TAU: f64 = core::f64::consts::TAU;

fn generate_sine(freq_hz: f64, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|n| libm::sin(TAU * freq_hz * n as f64 / SAMPLE_RATE))
        .collect()
}

fn rms(signal: &[f64]) -> f64 {
    let sum_sq: f64 = signal.iter().map(|&s| s * s).sum();
    libm::sqrt(sum_sq / signal.len() as f64)
}

fn to_db(linear: f64) -> f64 {
    20.0 * libm::log10(linear.max(1e-12))
}

fn designed_filter(pass: PassType, poles: i64, ripple: f64, cutoff_hz: f64) -> IirFilter {
    let mut designer = ChebyshevDesigner::new();
    designer.set_pass_type(pass);
    designer.set_pole_count(poles).unwrap();
    designer.set_ripple(ripple).unwrap();
    designer.set_cutoff_hz(cutoff_hz, SAMPLE_RATE).unwrap();

    let list = designer.design().unwrap().to_list(CoefficientOrder::Alternating);
    let mut filter = IirFilter::new(20);
    filter
        .load_coefficients(&list, CoefficientOrder::Alternating)
        .unwrap();
    filter
}

/// Gain in dB of `filter` for a sine at `freq_hz`, measured after settling.
fn measure_response(filter: &mut impl Effect, freq_hz: f64) -> f64 {
    let num_samples = 8820;
    let settle = 4410;
    let input = generate_sine(freq_hz, num_samples);
    let mut output = vec![0.0; num_samples];
    filter.reset();
    filter.process_block(&input, &mut output);
    to_db(rms(&output[settle..]) / rms(&input[settle..]))
}

// ============================================================================
// Impulse response
// ============================================================================

#[test]
fn lowpass_impulse_decays() {
    let mut filter = designed_filter(PassType::LowPass, 2, 0.0, 1000.0);
    let response: Vec<f64> = (0..201)
        .map(|n| filter.process_sample(if n == 0 { 1.0 } else { 0.0 }))
        .collect();

    assert!(response.iter().all(|y| y.is_finite()));
    let tail_peak = response[100..].iter().fold(0.0_f64, |m, y| m.max(y.abs()));
    assert!(tail_peak < 1e-4, "tail peak {tail_peak}");
    assert!(response[200].abs() < 1e-8, "sample 200 = {}", response[200]);
}

#[test]
fn impulse_sums_to_dc_gain() {
    let mut filter = designed_filter(PassType::LowPass, 4, 0.5, 2000.0);
    let sum: f64 = (0..20_000)
        .map(|n| filter.process_sample(if n == 0 { 1.0 } else { 0.0 }))
        .sum();
    assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
}

// ============================================================================
// Frequency response
// ============================================================================

#[test]
fn lowpass_frequency_response() {
    let mut filter = designed_filter(PassType::LowPass, 4, 0.0, 1000.0);

    let passband = measure_response(&mut filter, 100.0);
    assert!(passband.abs() < 0.5, "100 Hz: {passband:.2} dB");

    let at_cutoff = measure_response(&mut filter, 1000.0);
    assert!(
        (at_cutoff + 3.0).abs() < 0.5,
        "1 kHz: {at_cutoff:.2} dB (expected about -3 dB)"
    );

    let stopband = measure_response(&mut filter, 10_000.0);
    assert!(stopband < -40.0, "10 kHz: {stopband:.2} dB");
}

#[test]
fn highpass_frequency_response() {
    let mut filter = designed_filter(PassType::HighPass, 4, 0.5, 1000.0);

    let passband = measure_response(&mut filter, 10_000.0);
    assert!(passband.abs() < 0.5, "10 kHz: {passband:.2} dB");

    let stopband = measure_response(&mut filter, 100.0);
    assert!(stopband < -40.0, "100 Hz: {stopband:.2} dB");
}

#[test]
fn chained_engines_are_steeper() {
    let mut single = designed_filter(PassType::LowPass, 2, 0.0, 1000.0);
    let mut chain = designed_filter(PassType::LowPass, 2, 0.0, 1000.0)
        .chain(designed_filter(PassType::LowPass, 2, 0.0, 1000.0));

    let single_db = measure_response(&mut single, 5000.0);
    let chain_db = measure_response(&mut chain, 5000.0);
    assert!(
        chain_db < single_db - 10.0,
        "single {single_db:.2} dB, chain {chain_db:.2} dB"
    );
}

// ============================================================================
// Coefficient exchange
// ============================================================================

#[test]
fn known_highpass_coefficients() {
    let spec = FilterSpec::new(PassType::HighPass, 4, 0.0, 0.125).unwrap();
    let c = synthesize(&spec).unwrap();

    let a = [0.3468218, -1.3872872, 2.0809308, -1.3872872, 0.3468218];
    let b = [0.0, 1.9684278, -1.7358607, 0.7244708, -0.1203896];
    for (got, want) in c.a().iter().zip(a) {
        assert!((got - want).abs() < 1e-6, "a: {got} vs {want}");
    }
    for (got, want) in c.b().iter().zip(b) {
        assert!((got - want).abs() < 1e-6, "b: {got} vs {want}");
    }
}

#[test]
fn both_orders_filter_identically() {
    let spec = FilterSpec::new(PassType::LowPass, 6, 1.0, 0.05).unwrap();
    let coeffs = synthesize(&spec).unwrap();

    let mut alt = IirFilter::default();
    let mut grp = IirFilter::default();
    alt.load_coefficients(
        &coeffs.to_list(CoefficientOrder::Alternating),
        CoefficientOrder::Alternating,
    )
    .unwrap();
    grp.load_coefficients(
        &coeffs.to_list(CoefficientOrder::Grouped),
        CoefficientOrder::Grouped,
    )
    .unwrap();

    let input = generate_sine(440.0, 512);
    for &x in &input {
        assert_eq!(alt.process_sample(x), grp.process_sample(x));
    }
}

#[test]
fn ramped_engine_converges_to_instant_engine() {
    let butterworth = |cutoff| {
        synthesize(&FilterSpec::butterworth(PassType::LowPass, 2, cutoff).unwrap()).unwrap()
    };
    let before = butterworth(0.05);
    let coeffs = butterworth(0.02);

    let mut instant = IirFilter::new(8);
    let mut ramped = IirFilter::with_ramp(8, SAMPLE_RATE, 10.0);
    let input = generate_sine(200.0, 4000);

    instant.load_coefficient_set(&before);
    ramped.load_coefficient_set(&before);
    assert!(!ramped.is_ramping());
    for &x in &input[..100] {
        instant.process_sample(x);
        ramped.process_sample(x);
    }

    instant.load_coefficient_set(&coeffs);
    ramped.load_coefficient_set(&coeffs);
    assert!(ramped.is_ramping());
    assert_eq!(ramped.coefficients(), before);

    let mut last = (0.0, 0.0);
    for (n, &x) in input.iter().enumerate() {
        last = (instant.process_sample(x), ramped.process_sample(x));
        if n == 440 {
            assert!(!ramped.is_ramping());
            assert_eq!(ramped.coefficients(), coeffs);
        }
    }
    assert!((last.0 - last.1).abs() < 1e-9, "{last:?}");
}

#[test]
fn cutoff_sweep_stays_bounded() {
    let mut designer = ChebyshevDesigner::new();
    designer.set_pole_count(4).unwrap();
    designer.set_ripple(0.5).unwrap();

    let mut filter = IirFilter::with_ramp(8, SAMPLE_RATE, 10.0);
    let input = generate_sine(800.0, 44_100);

    for (block, chunk) in input.chunks(441).enumerate() {
        // New cutoff every 10 ms, swept from 300 Hz up to about 10 kHz
        let cutoff = 300.0 + block as f64 * 100.0;
        designer.set_cutoff_hz(cutoff, SAMPLE_RATE).unwrap();
        filter.load_coefficient_set(&designer.design().unwrap());

        for &x in chunk {
            let y = filter.process_sample(x);
            assert!(y.is_finite() && y.abs() < 4.0, "block {block}: {y}");
        }
    }
}

#[test]
fn rejected_list_falls_back_to_passthrough() {
    let mut filter = designed_filter(PassType::LowPass, 4, 0.0, 1000.0);
    assert_eq!(filter.state(), FilterState::Active { poles: 4 });

    assert!(
        filter
            .load_coefficient_text("0.1 0.2 bogus 0.3 0.4", CoefficientOrder::Alternating)
            .is_err()
    );
    assert_eq!(filter.state(), FilterState::Empty);

    for x in generate_sine(5000.0, 64) {
        assert_eq!(filter.process_sample(x), x);
    }
}

#[test]
fn designer_report() {
    let mut designer = ChebyshevDesigner::new();
    designer.set_pole_count(4).unwrap();
    designer.set_ripple(0.5).unwrap();
    designer.set_cutoff(0.1).unwrap();

    let report = designer.report().unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Fc =  0.1000,  # poles = 4,  % ripple =  0.50");
    assert_eq!(lines.len(), 6);
    assert!(lines[5].starts_with("a[04] = "));
    assert!(lines[5].contains("   b[04] = "));
}
