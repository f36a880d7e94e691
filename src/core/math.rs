// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Average of whichever values are present
///
/// Returns `None` only when both are missing.
pub fn mean_present(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Scale an integer amount and round down
pub fn floor_scaled(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).floor() as i32
}
