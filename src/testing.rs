use rand::Rng;
use rand::SeedableRng;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Strictly increasing grid on `[0, 1]` with `n >= 2` knots and random spacing
pub fn random_grid(rng: &mut StdRng, n: usize) -> Vec<f64> {
    // Offsetting every step keeps neighbours well apart from the merge tolerance
    let steps: Vec<f64> = randn::<f64>(rng, n - 1).iter().map(|x| x + 0.05).collect();
    let total: f64 = steps.iter().sum();
    let mut grid = Vec::with_capacity(n);
    grid.push(0.0);
    let mut acc = 0.0;
    for s in &steps[..n - 2] {
        acc += s / total;
        grid.push(acc);
    }
    grid.push(1.0);
    grid
}

/// Relative-or-absolute closeness check used throughout the tests
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "{actual} != {expected} (tol {tol})"
    );
}
