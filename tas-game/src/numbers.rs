//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Arithmetic mean of `total` over `count` samples; zero samples yield 0.0.
#[must_use]
pub fn mean(total: i64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    i64_to_f64(total) / usize_to_f64(count)
}

/// Convert a usize to i32, saturating at `i32::MAX`.
#[must_use]
pub fn usize_to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
