use criterion::*;

mod locate_benchmark;

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = locate_benchmark::locate_benchmark, triangulate_benchmark::triangulate_benchmark
}

criterion_main!(benches);
