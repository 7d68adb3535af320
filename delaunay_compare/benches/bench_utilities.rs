use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SEED: &[u8; 32] = b"\xfb\xdc\x4e\xa0\x30\xde\x82\xba\x69\x97\x3c\x52\x49\x4d\x00\xca
\x5c\x21\xa3\x8d\x5c\xf2\x34\x4e\x58\x7d\x80\x16\x66\x23\x30";

pub const RANGE: f64 = 1.0e9;

/// Points spread evenly over `[-range, range]²`.
pub fn uniform_f64() -> impl Iterator<Item = [f64; 2]> {
    let range = rand::distributions::Uniform::new_inclusive(-RANGE, RANGE);
    let mut rng = StdRng::from_seed(*SEED);
    std::iter::from_fn(move || Some([rng.sample(range), rng.sample(range)]))
}

/// Points of a random walk with unit steps. Consecutive points are close to each other, which
/// favors walking locators.
pub fn walk_f64() -> impl Iterator<Item = [f64; 2]> {
    let range = rand::distributions::Uniform::new_inclusive(-1.0, 1.0);
    let (mut x, mut y) = (0.0, 1.0);
    let mut rng = StdRng::from_seed(*SEED);
    std::iter::from_fn(move || {
        x += rng.sample(range);
        y += rng.sample(range);
        Some([x, y])
    })
}
