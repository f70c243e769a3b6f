//! Convenience methods for constructing grids in a way that echoes,
//! but does not exactly match, methods common in scripting languages.
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// `n == 0` gives an empty grid and `n == 1` gives `[start]`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = T::from(n - 1).unwrap_or_else(T::one);
            let dx: T = (stop - start) / last;
            let mut grid: Vec<T> = (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::zero) * dx)
                .collect();
            // Pin the endpoint so default grids end exactly on `stop`
            grid[n - 1] = stop;
            grid
        }
    }
}

/// Uniform partition of `[0, 1]` with `n` knots.
pub fn unit_grid(n: usize) -> Vec<f64> {
    linspace(0.0, 1.0, n)
}

/// Midpoints of consecutive knots.
pub fn midpoints(grid: &[f64]) -> Vec<f64> {
    grid.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}
