//! Benchmarks for the blend pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fragblend::{blend_block, BlendMatrices, Canvas, Gradient, Plan, RandomPolicy};

// -- Blend matrix benchmarks --

fn bench_matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrices");

    let custom = Gradient::custom(&[0.5, 0.5], &[1.0, 2.0]).unwrap();

    group.bench_function("linear_32x32", |b| {
        b.iter(|| BlendMatrices::new(black_box(32), black_box(32), &Gradient::LinearUnity))
    });

    group.bench_function("linear_256x256", |b| {
        b.iter(|| BlendMatrices::new(black_box(256), black_box(256), &Gradient::LinearUnity))
    });

    group.bench_function("custom_256x256", |b| {
        b.iter(|| BlendMatrices::new(black_box(256), black_box(256), &custom))
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");

    // Four 64x64 fragments with varied colour
    let fragments: Vec<RgbImage> = (0..4u32)
        .map(|i| {
            RgbImage::from_fn(64, 64, |x, y| {
                Rgb([
                    ((x * 4 + i * 40) % 256) as u8,
                    ((y * 4) % 256) as u8,
                    (((x + y) * 2 + i * 60) % 256) as u8,
                ])
            })
        })
        .collect();
    let corners = [&fragments[0], &fragments[1], &fragments[2], &fragments[3]];
    let matrices = BlendMatrices::new(32, 32, &Gradient::LinearUnity);

    let canvas = Canvas::new(32, 32);
    let row_len = canvas.row_len();
    let mut band = vec![0.0f32; canvas.band_len(32)];

    group.bench_function("blend_block_32x32", |b| {
        b.iter(|| blend_block(&matrices, black_box(corners), &mut band, row_len, 0))
    });

    group.bench_function("quantize_canvas_512x512", |b| {
        let canvas = Canvas::new(512, 512);
        b.iter(|| black_box(&canvas).to_image())
    });

    group.finish();
}

// -- Planning benchmarks --

fn bench_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("planning");

    let random = RandomPolicy {
        random_frags: true,
        avoid_duplicates: true,
        random_flipping: true,
        random_rotating: true,
    };

    group.bench_function("plan_40x24", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            Plan::build(black_box(40), black_box(24), 6, &random, &mut rng)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_matrices, bench_blocks, bench_planning);
criterion_main!(benches);
