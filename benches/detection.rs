use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ecg_analysis::detect::find_peaks;
use ecg_analysis::filter::BandpassDesign;
use ecg_analysis::pipeline::EcgAnalyzer;
use ecg_analysis::signal::RawRecording;

const FS: f64 = 360.0;

/// Synthetic ECG-like trace: a beat every 300 samples over baseline wander
fn synthetic_trace(num_samples: usize) -> (Vec<f64>, Vec<f64>) {
    let time: Vec<f64> = (0..num_samples).map(|i| i as f64 / FS).collect();
    let voltage = time
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let wander = 0.2 * (2.0 * std::f64::consts::PI * 0.3 * t).sin();
            let beat = match i % 300 {
                149 | 151 => 0.4,
                150 => 1.0,
                _ => 0.0,
            };
            wander + beat
        })
        .collect();
    (time, voltage)
}

/// Benchmark the bandpass on recordings of increasing length
fn bench_bandpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandpass");
    let design = BandpassDesign::new(6, 10.0, 60.0, FS);

    for seconds in [10, 30, 60] {
        let num_samples = seconds * FS as usize;
        let (_, voltage) = synthetic_trace(num_samples);

        group.throughput(Throughput::Elements(num_samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}s", seconds)), &voltage, |b, voltage| {
            b.iter(|| black_box(design.filter(black_box(voltage)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark peak picking at the two regime separations
fn bench_find_peaks(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_peaks");
    let (_, voltage) = synthetic_trace(60 * FS as usize);

    for distance in [120, 250] {
        group.bench_with_input(BenchmarkId::from_parameter(distance), &distance, |b, &distance| {
            b.iter(|| black_box(find_peaks(black_box(&voltage), distance)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = EcgAnalyzer::default();

    for seconds in [20, 60] {
        let (time, voltage) = synthetic_trace(seconds * FS as usize);

        group.bench_with_input(BenchmarkId::from_parameter(format!("{}s", seconds)), &seconds, |b, _| {
            b.iter(|| {
                let raw = RawRecording::from_samples(&time, &voltage).unwrap();
                black_box(analyzer.analyze(raw).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bandpass, bench_find_peaks, bench_analyze);
criterion_main!(benches);
