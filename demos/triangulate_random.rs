//! Triangulates uniformly distributed random points and prints a short summary.
//!
//! Usage: `cargo run --example triangulate_random -- [num_points] [seed]`
//!
//! Set `RUST_LOG=flipmesh=trace` to follow every split and flip.

use anyhow::{Context, Result};
use flipmesh::{FloatKernel, LastUsedTriangleLocator, Point2, Triangulator};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let num_points: usize = match args.next() {
        Some(arg) => arg.parse().context("num_points must be a positive integer")?,
        None => 1000,
    };
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse().context("seed must be an integer")?,
        None => 42,
    };

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let range = Uniform::new(-100.0, 100.0);
    let points: Vec<_> = (0..num_points)
        .map(|_| Point2::new(range.sample(&mut rng), range.sample(&mut rng)))
        .collect();

    let triangulation = Triangulator::<FloatKernel, LastUsedTriangleLocator>::with_capacity(
        num_points,
    )
    .triangulate(&points)
    .context("could not triangulate the generated points")?;

    let statistics = triangulation.statistics();
    let area: f64 = triangulation.triangles().map(|t| t.area()).sum();
    let smallest_angle = triangulation
        .triangles()
        .map(|t| smallest_angle(t.positions()))
        .fold(f64::INFINITY, f64::min);

    println!("points:          {}", num_points);
    println!("triangles:       {}", triangulation.num_triangles());
    println!("edges:           {}", triangulation.undirected_edges().len());
    println!("hull vertices:   {}", triangulation.convex_hull().len());
    println!("covered area:    {:.3}", area);
    println!("smallest angle:  {:.3} deg", smallest_angle.to_degrees());
    println!("flips:           {}", statistics.flips);
    println!("duplicates:      {}", statistics.duplicates);
    println!("hull fills:      {}", statistics.hull_triangles_filled);
    Ok(())
}

fn smallest_angle([a, b, c]: [Point2<f64>; 3]) -> f64 {
    let angle = |p: Point2<f64>, q: Point2<f64>, r: Point2<f64>| {
        let (ux, uy) = (q.x - p.x, q.y - p.y);
        let (vx, vy) = (r.x - p.x, r.y - p.y);
        (ux * vy - uy * vx).abs().atan2(ux * vx + uy * vy)
    };
    angle(a, b, c).min(angle(b, c, a)).min(angle(c, a, b))
}
