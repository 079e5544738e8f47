use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bandread::bands::{columns_from_labels, sample_columns, segment_bands, SamplingConfig};
use bandread::color::{classify, rgb_to_hsv, BandColor};
use bandread::{BandReader, SegmentConfig};

const BODY: [u8; 3] = [60, 110, 170];

fn synthetic_resistor(w: u32, h: u32) -> RgbImage {
    let bands: [(u32, u32, [u8; 3]); 4] = [
        (40, 40, [89, 51, 31]),
        (80, 40, [26, 26, 26]),
        (120, 40, [191, 29, 29]),
        (160, 20, [179, 143, 71]),
    ];
    let scale = w as f32 / 320.0;
    let mut img = RgbImage::from_pixel(w, h, Rgb(BODY));
    for (start, width, rgb) in bands {
        let x0 = (start as f32 * scale) as u32;
        let x1 = ((start + width) as f32 * scale) as u32;
        for x in x0..x1.min(w) {
            for y in 0..h {
                img.put_pixel(x, y, Rgb(rgb));
            }
        }
    }
    img
}

fn noisy_labels(rng: &mut StdRng, n: usize, flip_prob: f64) -> Vec<BandColor> {
    let clean = |x: usize| match x {
        40..=79 => BandColor::Brown,
        80..=119 => BandColor::Black,
        120..=159 => BandColor::Red,
        160..=179 => BandColor::Gold,
        _ => BandColor::Blue,
    };
    (0..n)
        .map(|x| {
            if rng.gen_bool(flip_prob) {
                BandColor::CANONICAL[rng.gen_range(0..BandColor::CANONICAL.len())]
            } else {
                clean(x)
            }
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pixels: Vec<[u8; 3]> = (0..4096).map(|_| rng.gen()).collect();
    c.bench_function("classify_4096_pixels", |b| {
        b.iter(|| {
            for &[r, g, bl] in &pixels {
                black_box(classify(&rgb_to_hsv(r, g, bl)));
            }
        })
    });
}

fn bench_sampling(c: &mut Criterion) {
    let img = synthetic_resistor(320, 80);
    let cfg = SamplingConfig::default();
    c.bench_function("sample_columns_320x80_vote7", |b| {
        b.iter(|| black_box(sample_columns(black_box(&img), &cfg)))
    });
}

fn bench_segment(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let cols = columns_from_labels(&noisy_labels(&mut rng, 320, 0.05));
    let cfg = SegmentConfig::default();
    c.bench_function("segment_bands_320_noisy", |b| {
        b.iter(|| black_box(segment_bands(black_box(&cols), &cfg)))
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let img = synthetic_resistor(1280, 320);
    let reader = BandReader::new();
    c.bench_function("read_image_1280x320", |b| {
        b.iter(|| black_box(reader.read_image(black_box(&img))))
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_sampling,
    bench_segment,
    bench_end_to_end
);
criterion_main!(benches);
