//! Criterion benchmarks for cheby-core
//!
//! Run with: cargo bench -p cheby-core
#![allow(missing_docs)]

use cheby_core::{
    ChebyshevDesigner, CoefficientOrder, FilterSpec, IirFilter, PassType, parse_coefficient_list,
    synthesize,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];
const POLE_COUNTS: &[i64] = &[2, 4, 8, 20];

fn generate_test_signal(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Synthesis");

    for &poles in POLE_COUNTS {
        let spec = FilterSpec::new(PassType::LowPass, poles, 0.5, 0.1).unwrap();
        group.bench_with_input(BenchmarkId::new("synthesize", poles), &spec, |b, spec| {
            b.iter(|| black_box(synthesize(black_box(spec))));
        });
    }

    group.bench_function("designer_retune", |b| {
        let mut designer = ChebyshevDesigner::new();
        designer.set_pole_count(8).unwrap();
        designer.set_ripple(0.5).unwrap();
        let mut cutoff = 100.0;
        b.iter(|| {
            cutoff = if cutoff > 10_000.0 { 100.0 } else { cutoff * 1.01 };
            designer.set_cutoff_hz(cutoff, SAMPLE_RATE).unwrap();
            black_box(designer.design())
        });
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("IirFilter");

    for &poles in &[2i64, 8] {
        let coeffs =
            synthesize(&FilterSpec::new(PassType::LowPass, poles, 0.5, 0.05).unwrap()).unwrap();

        for &block_size in BLOCK_SIZES {
            let input = generate_test_signal(block_size);

            group.bench_with_input(
                BenchmarkId::new(format!("steady_{poles}p"), block_size),
                &block_size,
                |b, _| {
                    let mut filter = IirFilter::new(poles as usize);
                    filter.load_coefficient_set(&coeffs);
                    b.iter(|| {
                        for &sample in &input {
                            black_box(filter.process_sample(black_box(sample)));
                        }
                    });
                },
            );

            // Reload every block so the whole block runs interpolated
            group.bench_with_input(
                BenchmarkId::new(format!("ramped_{poles}p"), block_size),
                &block_size,
                |b, _| {
                    let mut filter = IirFilter::with_ramp(poles as usize, SAMPLE_RATE, 100.0);
                    filter.load_coefficient_set(&coeffs);
                    b.iter(|| {
                        filter.load_coefficient_set(&coeffs);
                        for &sample in &input {
                            black_box(filter.process_sample(black_box(sample)));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let coeffs = synthesize(&FilterSpec::new(PassType::HighPass, 20, 1.0, 0.2).unwrap()).unwrap();
    let text = coeffs
        .to_list(CoefficientOrder::Alternating)
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    c.bench_function("parse_and_load_20p", |b| {
        let mut filter = IirFilter::default();
        b.iter(|| {
            let values = parse_coefficient_list(black_box(&text)).unwrap();
            black_box(filter.load_coefficients(&values, CoefficientOrder::Alternating))
        });
    });
}

criterion_group!(benches, bench_synthesis, bench_engine, bench_codec);
criterion_main!(benches);
