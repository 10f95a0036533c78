//! Histogram bucket boundaries for connection timings.
//!
//! Boundaries double from `min` and stop before reaching `2 * max`, so the
//! last bucket always sits below twice the nominal maximum. Dashboards
//! depend on the resulting bucket count; keep the loop condition as is.

use crate::errors::{MetricsError, Result};

/// Lower bound for connection duration buckets (milliseconds).
pub const CONNECTION_DURATION_MIN_MS: f64 = 250.0;

/// Upper bound for connection duration buckets: one week in milliseconds.
pub const CONNECTION_DURATION_MAX_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Lower bound for handshake latency buckets (milliseconds).
pub const HANDSHAKE_LATENCY_MIN_MS: f64 = 1.0;

/// Upper bound for handshake latency buckets: one minute in milliseconds.
pub const HANDSHAKE_LATENCY_MAX_MS: f64 = 60.0 * 1000.0;

/// Generate exponential bucket boundaries `min, 2*min, 4*min, ...` while
/// the next boundary is strictly below `2 * max`.
///
/// # Errors
///
/// Returns `MetricsError::InvalidParameter` if `min` is not a positive
/// finite number, `max` is not finite, or `max < min`.
pub fn exponential_buckets(min: f64, max: f64) -> Result<Vec<f64>> {
    if !min.is_finite() || min <= 0.0 {
        return Err(MetricsError::InvalidParameter(format!(
            "bucket minimum must be a positive finite number, got {min}"
        )));
    }
    if !max.is_finite() {
        return Err(MetricsError::InvalidParameter(format!(
            "bucket maximum must be finite, got {max}"
        )));
    }
    if max < min {
        return Err(MetricsError::InvalidParameter(format!(
            "bucket maximum {max} must not be below minimum {min}"
        )));
    }

    let limit = 2.0 * max;
    let mut buckets = Vec::new();
    let mut bound = min;
    while bound < limit {
        buckets.push(bound);
        bound *= 2.0;
    }
    Ok(buckets)
}

/// Buckets for `swarm/connection_duration`: 250ms up to one week.
///
/// # Errors
///
/// Never fails for the built-in bounds; the `Result` comes from
/// [`exponential_buckets`].
pub fn connection_duration_buckets() -> Result<Vec<f64>> {
    exponential_buckets(CONNECTION_DURATION_MIN_MS, CONNECTION_DURATION_MAX_MS)
}

/// Buckets for `swarm/handshake_latency`: 1ms up to 60s.
///
/// # Errors
///
/// Never fails for the built-in bounds; the `Result` comes from
/// [`exponential_buckets`].
pub fn handshake_latency_buckets() -> Result<Vec<f64>> {
    exponential_buckets(HANDSHAKE_LATENCY_MIN_MS, HANDSHAKE_LATENCY_MAX_MS)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    fn assert_well_formed(buckets: &[f64], min: f64, max: f64) {
        assert_eq!(buckets.first().copied(), Some(min));
        assert!(buckets.windows(2).all(|w| w[0] < w[1]));
        assert!(buckets.iter().all(|b| *b < 2.0 * max));
        // The next doubling would have reached 2*max
        let last = buckets.last().copied().unwrap();
        assert!(last * 2.0 >= 2.0 * max);
    }

    #[test]
    fn test_worked_example() {
        let buckets = exponential_buckets(250.0, 500.0).unwrap();
        assert_eq!(buckets, vec![250.0, 500.0]);
    }

    #[test]
    fn test_min_equals_max() {
        let buckets = exponential_buckets(10.0, 10.0).unwrap();
        assert_eq!(buckets, vec![10.0]);
    }

    #[test]
    fn test_properties_for_assorted_bounds() {
        let cases = [(1.0, 3.0), (0.5, 100.0), (7.0, 1000.0), (250.0, 600_000.0)];
        for (min, max) in cases {
            let buckets = exponential_buckets(min, max).unwrap();
            assert_well_formed(&buckets, min, max);
        }
    }

    #[test]
    fn test_connection_duration_buckets() {
        let buckets = connection_duration_buckets().unwrap();

        assert_eq!(buckets.len(), 23);
        assert_eq!(buckets[0], 250.0);
        assert_eq!(buckets[22], 250.0 * f64::from(1u32 << 22));
        assert_well_formed(&buckets, CONNECTION_DURATION_MIN_MS, CONNECTION_DURATION_MAX_MS);
    }

    #[test]
    fn test_handshake_latency_buckets() {
        let buckets = handshake_latency_buckets().unwrap();

        assert_eq!(buckets.len(), 17);
        assert_eq!(buckets[0], 1.0);
        assert_eq!(buckets[16], 65_536.0);
        assert_well_formed(&buckets, HANDSHAKE_LATENCY_MIN_MS, HANDSHAKE_LATENCY_MAX_MS);
    }

    #[test]
    fn test_rejects_non_positive_min() {
        for min in [0.0, -1.0, -0.0] {
            let result = exponential_buckets(min, 100.0);
            assert!(
                matches!(result, Err(MetricsError::InvalidParameter(ref msg)) if msg.contains("positive")),
                "min={min} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_bounds() {
        assert!(exponential_buckets(f64::NAN, 100.0).is_err());
        assert!(exponential_buckets(f64::INFINITY, 100.0).is_err());
        assert!(exponential_buckets(1.0, f64::INFINITY).is_err());
        assert!(exponential_buckets(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_max_below_min() {
        let result = exponential_buckets(100.0, 10.0);
        assert!(matches!(result, Err(MetricsError::InvalidParameter(_))));
    }
}
