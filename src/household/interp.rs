//! Linear interpolation and bracketing on monotone grids.
//!
//! Used by the EGM step (savings as a function of cash-on-hand) and by the
//! histogram simulator (splitting mass between bracketing asset points).
//! Grids are assumed strictly increasing with at least two points.

/// Index `i` in `[0, n - 2]` such that `grid[i] <= x < grid[i + 1]`, clamped
/// at both ends so that `(i, i + 1)` is always a valid segment.
pub fn bracket(grid: &[f64], x: f64) -> usize {
    let n = grid.len();
    debug_assert!(n >= 2);
    if x <= grid[0] {
        return 0;
    }
    if x >= grid[n - 2] {
        return n - 2;
    }
    // first index with grid[idx] > x, minus one
    grid.partition_point(|&g| g <= x) - 1
}

/// Piecewise-linear interpolation of `(grid, values)` at `x`, extrapolating
/// linearly from the first/last segment outside the grid.
pub fn interp_linear(grid: &[f64], values: &[f64], x: f64) -> f64 {
    let i = bracket(grid, x);
    let slope = (values[i + 1] - values[i]) / (grid[i + 1] - grid[i]);
    values[i] + slope * (x - grid[i])
}

/// Weight on the lower bracketing point for a lottery between `grid[i]` and
/// `grid[i + 1]` that preserves the mean `x`; clamped to `[0, 1]`.
pub fn lower_weight(grid: &[f64], i: usize, x: f64) -> f64 {
    ((grid[i + 1] - x) / (grid[i + 1] - grid[i])).clamp(0.0, 1.0)
}
