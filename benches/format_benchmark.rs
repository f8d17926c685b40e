use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mltoolz::{ConfusionMatrix, MatrixFormat};

fn build_matrix(n: usize) -> ConfusionMatrix {
    let labels: Vec<String> = (0..n).map(|i| format!("class_{}", i)).collect();
    let grid: Vec<Vec<u64>> = (0..n)
        .map(|i| (0..n).map(|j| ((i * 31 + j * 17) % 100) as u64).collect())
        .collect();
    ConfusionMatrix::from_counts(&grid, &labels).unwrap()
}

fn bench_render(c: &mut Criterion) {
    let small = build_matrix(10);
    let large = build_matrix(100);
    let plain = MatrixFormat::default();
    let suppressed = MatrixFormat {
        hide_zeroes: true,
        hide_diagonal: true,
        hide_threshold: Some(25.0),
        ..MatrixFormat::default()
    };

    c.bench_function("render_10x10", |b| {
        b.iter(|| black_box(&small).to_text(black_box(&plain)))
    });
    c.bench_function("render_100x100", |b| {
        b.iter(|| black_box(&large).to_text(black_box(&plain)))
    });
    c.bench_function("render_100x100_suppressed", |b| {
        b.iter(|| black_box(&large).to_text(black_box(&suppressed)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
