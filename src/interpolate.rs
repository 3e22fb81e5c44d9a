/// Re-maps `x` from `[x0, x1]` onto `[y0, y1]` using integer arithmetic.
///
/// The result is truncated toward zero. `x` is not clamped to the input
/// range, so values outside it extrapolate.
pub fn map(x: i32, x0: i32, x1: i32, y0: i32, y1: i32) -> i32 {
    debug_assert!(x0 != x1, "The input range must not be empty");

    (x - x0) * (y1 - y0) / (x1 - x0) + y0
}

/// Re-maps `x` from `[x0, x1]` onto `[y0, y1]` in floating point.
pub fn map_f32(x: f32, x0: f32, x1: f32, y0: f32, y1: f32) -> f32 {
    debug_assert!(x0 != x1, "The input range must not be empty");

    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
