//! Orientation tag parsing over the EXIF fixtures
//!
//! Covers both byte orders, with and without the JPEG APP1 marker.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glass_core::read_orientation_flag;
use glass_tests::fixtures::OrientationExif;

fn bench_read_flag(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_orientation_flag");

    for big_endian in [false, true] {
        for app1_header in [false, true] {
            let fixture = OrientationExif {
                big_endian,
                app1_header,
            };
            let name = format!(
                "{}{}",
                if big_endian { "be" } else { "le" },
                if app1_header { "_app1" } else { "" }
            );
            let block = fixture.flag(6);
            group.bench_with_input(BenchmarkId::new("short", &name), &block, |b, block| {
                b.iter(|| read_orientation_flag(black_box(block)))
            });
        }
    }

    let ascii = OrientationExif::default().ascii(b"6\0\0\0");
    group.bench_function("ascii", |b| {
        b.iter(|| read_orientation_flag(black_box(&ascii)))
    });

    group.finish();
}

criterion_group!(benches, bench_read_flag);
criterion_main!(benches);
