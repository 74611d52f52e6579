use ordered_float::OrderedFloat;

#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Inverse of [`lerp`]; a zero-width range maps to `0`.
#[must_use]
pub fn inverse_lerp(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        return 0.0;
    }
    (value - start) / span
}

/// Largest value of `values`, starting from `0.0`.
///
/// Negative-only input therefore yields `0.0`.
#[must_use]
pub fn non_negative_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .map(OrderedFloat)
        .fold(OrderedFloat(0.0), std::cmp::max)
        .into_inner()
}

/// Replaces a zero divisor by `1.0`.
#[must_use]
pub fn nonzero_or_one(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::{inverse_lerp, lerp, non_negative_max, nonzero_or_one};

    #[test]
    fn lerp_and_inverse_lerp_agree() {
        let value = lerp(3.0, 20.0, 0.25);
        assert!((inverse_lerp(3.0, 20.0, value) - 0.25).abs() <= 1e-12);
    }

    #[test]
    fn non_negative_max_starts_at_zero() {
        assert_eq!(non_negative_max([-4.0, -1.0]), 0.0);
        assert_eq!(non_negative_max([2.0, 7.5, 1.0]), 7.5);
        assert_eq!(non_negative_max(std::iter::empty()), 0.0);
    }

    #[test]
    fn zero_divisor_is_replaced() {
        assert_eq!(nonzero_or_one(0.0), 1.0);
        assert_eq!(nonzero_or_one(4.0), 4.0);
    }
}
