use std::time::Duration;

use criterion::{measurement::WallTime, BenchmarkGroup, Criterion};
use flipmesh::{
    FloatKernel, Kernel, LastUsedTriangleLocator, LinearScanLocator, PointLocator, Triangulation,
    Triangulator, TrivialKernel,
};

use crate::benchmark_utilities::{uniform_distribution, uniform_f64, SEED2};

pub fn locate_benchmark(c: &mut Criterion) {
    const RANGE: f64 = 1.0e9;
    const NUM_ELEMENTS: usize = 5_000;

    fn single_locate_benchmark<K: Kernel, L: PointLocator>(
        group: &mut BenchmarkGroup<WallTime>,
        name: &str,
        triangulation: &Triangulation,
    ) {
        let mut elements = uniform_f64();
        let mut locator = L::default();

        group.bench_function(name, |b| {
            b.iter_with_setup(
                || elements.next().unwrap(),
                |point| triangulation.locate_with::<K, L>(&mut locator, point),
            )
        });
    }

    let points = uniform_distribution(*SEED2, RANGE)
        .take(NUM_ELEMENTS)
        .collect::<Vec<_>>();
    let triangulation = Triangulator::<FloatKernel, LastUsedTriangleLocator>::new()
        .triangulate(&points)
        .unwrap();

    let mut group = c.benchmark_group("locate benchmark (uniform)");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(4));

    single_locate_benchmark::<TrivialKernel, LinearScanLocator>(
        &mut group,
        "locate (linear scan, trivial kernel)",
        &triangulation,
    );
    single_locate_benchmark::<FloatKernel, LinearScanLocator>(
        &mut group,
        "locate (linear scan, float kernel)",
        &triangulation,
    );
    single_locate_benchmark::<TrivialKernel, LastUsedTriangleLocator>(
        &mut group,
        "locate (last used triangle, trivial kernel)",
        &triangulation,
    );
    single_locate_benchmark::<FloatKernel, LastUsedTriangleLocator>(
        &mut group,
        "locate (last used triangle, float kernel)",
        &triangulation,
    );

    group.finish();
}
