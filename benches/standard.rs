use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use trapmap::tests::util;
use trapmap::{insert_all, query};

pub fn criterion_benchmark(c: &mut Criterion) {
    const N: usize = 1000;

    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Elements(N as u64));
    group.bench_function("banded_1000", |b| {
        let segments = util::banded_segments(N, 7);
        b.iter(|| {
            let (mut map, mut dag) = util::standard_map();
            insert_all(&mut map, &mut dag, &segments).expect("insertion failed");
            black_box(map.trapezoids().len())
        })
    });
    group.finish();

    let (mut map, mut dag) = util::standard_map();
    insert_all(&mut map, &mut dag, &util::banded_segments(N, 7)).expect("insertion failed");
    let points = util::query_points(10_000, 11);

    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("banded_1000", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(query(&map, &dag, p));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
