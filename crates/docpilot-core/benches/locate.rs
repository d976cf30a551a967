use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docpilot_core::locate::locate;

fn large_segments(segment_count: usize) -> Vec<String> {
    (0..segment_count)
        .map(|i| {
            format!("{i:06} the quick brown fox jumps over the lazy dog (docpilot benchmark run) ")
        })
        .collect()
}

fn bench_locate_tail_match(c: &mut Criterion) {
    let mut segments = large_segments(10_000);
    let last = segments.len() - 1;
    segments[last].push_str("tail-needle-after-ten-thousand-segments");

    c.bench_function("locate/10k_segments_tail_match", |b| {
        b.iter(|| {
            black_box(locate(
                black_box(&segments),
                "tail-needle-after-ten-thousand-segments",
            ))
        })
    });
}

fn bench_locate_miss(c: &mut Criterion) {
    let segments = large_segments(10_000);

    c.bench_function("locate/10k_segments_miss", |b| {
        b.iter(|| black_box(locate(black_box(&segments), "needle that never occurs")))
    });
}

fn bench_locate_boundary_spanning_match(c: &mut Criterion) {
    // One logical word split across two thousand two-character segments.
    let mut segments: Vec<String> = Vec::new();
    for _ in 0..1_000 {
        segments.push("ab".to_string());
    }
    segments.push("synchro".to_string());
    segments.push("nization".to_string());
    for _ in 0..1_000 {
        segments.push("cd".to_string());
    }

    c.bench_function("locate/boundary_spanning_match", |b| {
        b.iter(|| black_box(locate(black_box(&segments), "synchronization")))
    });
}

criterion_group!(
    benches,
    bench_locate_tail_match,
    bench_locate_miss,
    bench_locate_boundary_spanning_match
);
criterion_main!(benches);
