//! Frame Processing Benchmarks
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --package centerstage-media --bench frame_processing
//! ```

use centerstage_media::framing::CropController;
use centerstage_media::occlusion::EyeOccluder;
use centerstage_media::{FrameProcessor, NullDetector, Resampler};
use centerstage_models::{CropRect, EyeFillConfig, FrameSize, FramingConfig, Rect};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use std::time::Duration;

/// Synthetic frame with some variation to simulate real video.
fn create_test_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 7 + y * 11) % 256) as u8,
            ((x * 13 + y * 17) % 256) as u8,
            ((x * 19 + y * 23) % 256) as u8,
        ])
    })
}

fn bench_crop_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_controller");
    let mut controller = CropController::new(&FramingConfig::default(), FrameSize::new(1280, 720));
    let faces = [Rect::new(400, 200, 120, 120), Rect::new(900, 300, 80, 80)];

    group.throughput(Throughput::Elements(1));
    group.bench_function("update", |b| {
        b.iter(|| black_box(controller.update(black_box(&faces))))
    });

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    let resampler = Resampler::new(FrameSize::new(680, 510));
    let resolutions = [(1280, 720), (640, 480)];

    for (width, height) in resolutions {
        let frame = create_test_frame(width, height);
        let crop = CropRect::new(
            width as f64 / 4.0,
            height as f64 / 4.0,
            width as f64 / 2.0,
            height as f64 / 2.0,
        );

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("crop_resize", format!("{}x{}", width, height)),
            &frame,
            |b, frame| b.iter(|| black_box(resampler.resample(black_box(frame), &crop))),
        );
    }

    group.finish();
}

fn bench_eye_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("eye_fill");
    let occluder = EyeOccluder::new(&EyeFillConfig::default());
    let frame = create_test_frame(680, 510);
    let eyes = [Rect::new(250, 180, 60, 40), Rect::new(370, 180, 60, 40)];

    group.throughput(Throughput::Elements(1));
    group.bench_function("two_eyes", |b| {
        b.iter(|| {
            let mut out = frame.clone();
            black_box(occluder.apply(&mut out, black_box(&eyes)))
        })
    });

    group.finish();
}

fn bench_frame_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_processor");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    let frame = create_test_frame(640, 480);
    let mut processor = FrameProcessor::new(
        &FramingConfig::default(),
        &EyeFillConfig::default(),
        FrameSize::new(640, 480),
    );

    group.throughput(Throughput::Elements(1));
    group.bench_function("process_640x480", |b| {
        b.iter(|| black_box(processor.process(black_box(&frame), &mut NullDetector)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_crop_controller,
    bench_resample,
    bench_eye_fill,
    bench_frame_processor
);
criterion_main!(benches);
