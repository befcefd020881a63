use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polyedit_codec::{deserialize, serialize, Coordinate, PolygonSet, Ring};

fn sample_set(rings: usize, vertices: usize) -> PolygonSet {
    (0..rings)
        .map(|r| {
            (0..vertices)
                .map(|v| {
                    let angle = v as f64 / vertices as f64 * std::f64::consts::TAU;
                    Coordinate::new(-67.7 + r as f64 + angle.cos() * 0.01, -53.79 + angle.sin() * 0.01)
                        .unwrap()
                })
                .collect::<Ring>()
        })
        .collect()
}

fn deserialize_single_ring(c: &mut Criterion) {
    let source = "POLYGON((-67.7 -53.79,-67.69 -53.79,-67.69 -53.80,-67.7 -53.79))";

    c.bench_function("deserialize_single_ring", |b| {
        b.iter(|| deserialize(black_box(source)))
    });
}

fn deserialize_large_set(c: &mut Criterion) {
    let source = serialize(&sample_set(20, 500));

    c.bench_function("deserialize_large_set", |b| {
        b.iter(|| deserialize(black_box(&source)))
    });
}

fn serialize_large_set(c: &mut Criterion) {
    let set = sample_set(20, 500);

    c.bench_function("serialize_large_set", |b| {
        b.iter(|| serialize(black_box(&set)))
    });
}

criterion_group!(
    benches,
    deserialize_single_ring,
    deserialize_large_set,
    serialize_large_set
);
criterion_main!(benches);
