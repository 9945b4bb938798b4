use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use snapedit::{Editor, EditorConfig, HistoryStack, LoadSource, RasterSnapshot};

fn test_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    })
}

fn full_history(limit: usize) -> HistoryStack {
    let snapshot = RasterSnapshot::from_image(&test_image(320, 240)).unwrap();
    let mut history = HistoryStack::new(limit);
    for _ in 0..limit {
        history.push(snapshot.clone());
    }
    history
}

fn benchmark_snapshot_encode(c: &mut Criterion) {
    let sizes = [(320_u32, 240_u32), (960, 720)];

    let mut group = c.benchmark_group("snapshot_encode");
    for (width, height) in sizes {
        let image = test_image(width, height);
        let id = BenchmarkId::from_parameter(format!("{width}x{height}"));
        group.bench_with_input(id, &image, |b, image| {
            b.iter(|| RasterSnapshot::from_image(black_box(image)).unwrap());
        });
    }
    group.finish();
}

fn benchmark_snapshot_decode(c: &mut Criterion) {
    let snapshot = RasterSnapshot::from_image(&test_image(960, 720)).unwrap();

    c.bench_function("snapshot_decode_960x720", |b| {
        b.iter(|| black_box(&snapshot).decode().unwrap());
    });
}

fn benchmark_history_push_with_eviction(c: &mut Criterion) {
    let snapshot = RasterSnapshot::from_image(&test_image(320, 240)).unwrap();
    let full = full_history(50);

    c.bench_function("history_push_with_eviction", |b| {
        b.iter_batched(
            || full.clone(),
            |mut history| history.push(black_box(snapshot.clone())),
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_undo_redo_walk(c: &mut Criterion) {
    let full = full_history(50);

    c.bench_function("history_full_undo_redo_walk", |b| {
        b.iter_batched(
            || full.clone(),
            |mut history| {
                while history.undo().is_some() {}
                while history.redo().is_some() {}
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_editor_commit_cycle(c: &mut Criterion) {
    // A full edit: decode the current snapshot, transform, re-encode, push.
    let mut editor = Editor::new(EditorConfig::default()).unwrap();
    editor
        .load_image(&test_image(960, 720), LoadSource::Upload)
        .unwrap();

    let mut group = c.benchmark_group("editor_commit_cycle");
    group.sample_size(20);
    group.bench_function("brighten_960x720", |b| {
        b.iter(|| editor.brighten().unwrap());
    });
    group.finish();
}

criterion_group!(
    history_benches,
    benchmark_snapshot_encode,
    benchmark_snapshot_decode,
    benchmark_history_push_with_eviction,
    benchmark_undo_redo_walk,
    benchmark_editor_commit_cycle
);
criterion_main!(history_benches);
