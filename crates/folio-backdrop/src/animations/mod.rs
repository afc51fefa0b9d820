//! The two animated layers of the backdrop.

pub mod particles;
pub mod shapes;

/// Wrap `value` into `[low, high)`, leaving in-range values untouched.
pub(crate) fn wrap(value: f32, low: f32, high: f32) -> f32 {
    if value >= low && value < high {
        return value;
    }
    let span = high - low;
    if !(span > 0.0) || !value.is_finite() {
        return low;
    }
    let wrapped = low + (value - low).rem_euclid(span);
    if wrapped >= low && wrapped < high {
        wrapped
    } else {
        low
    }
}
