//! Total helpers for reading typed parameters out of a `serde_json::Value`.
//!
//! A missing key, a wrong type, or a value outside the helper's domain falls
//! back to the caller's default. None of these fail.

use glam::DVec2;
use serde_json::Value;

/// `params[name]` as a finite `f64`, else `default`.
///
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// `params[name]` as a strictly positive `f64`, else `default`.
pub fn param_positive(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

/// `params[name]` as a non-negative integer, else `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as a 2D vector.
///
/// Accepts `[x, y]` or a single number applied to both axes. Anything else,
/// including arrays of the wrong length, gives `default`.
pub fn param_pair(params: &Value, name: &str, default: DVec2) -> DVec2 {
    match params.get(name) {
        Some(Value::Array(items)) if items.len() == 2 => {
            match (items[0].as_f64(), items[1].as_f64()) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => DVec2::new(x, y),
                _ => default,
            }
        }
        Some(v) => v
            .as_f64()
            .filter(|s| s.is_finite())
            .map(DVec2::splat)
            .unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"multiplier": 250.5});
        assert!((param_f64(&params, "multiplier", 1.0) - 250.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"multiplier": 200});
        assert!((param_f64(&params, "multiplier", 0.0) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing_or_wrong_type() {
        assert_eq!(param_f64(&json!({}), "jitter", 36.0), 36.0);
        assert_eq!(param_f64(&json!({"jitter": "lots"}), "jitter", 36.0), 36.0);
        assert_eq!(param_f64(&json!({"jitter": null}), "jitter", 36.0), 36.0);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        assert_eq!(param_f64(&json!([1, 2]), "jitter", 7.0), 7.0);
    }

    // -- param_positive --

    #[test]
    fn param_positive_accepts_positive() {
        assert_eq!(param_positive(&json!({"mass": 0.9}), "mass", 1.0), 0.9);
    }

    #[test]
    fn param_positive_rejects_zero_and_negative() {
        assert_eq!(param_positive(&json!({"mass": 0}), "mass", 1.0), 1.0);
        assert_eq!(param_positive(&json!({"mass": -2.5}), "mass", 1.0), 1.0);
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        assert_eq!(param_usize(&json!({"count": 30}), "count", 12), 30);
    }

    #[test]
    fn param_usize_returns_default_for_float_or_negative() {
        assert_eq!(param_usize(&json!({"count": 2.5}), "count", 12), 12);
        assert_eq!(param_usize(&json!({"count": -1}), "count", 12), 12);
    }

    // -- param_pair --

    #[test]
    fn param_pair_reads_array() {
        let v = param_pair(&json!({"freq": [0.012, 0.014]}), "freq", DVec2::ZERO);
        assert_eq!(v, DVec2::new(0.012, 0.014));
    }

    #[test]
    fn param_pair_splats_scalar() {
        let v = param_pair(&json!({"freq": 0.5}), "freq", DVec2::ZERO);
        assert_eq!(v, DVec2::splat(0.5));
    }

    #[test]
    fn param_pair_rejects_bad_shapes() {
        let d = DVec2::new(1.0, 2.0);
        assert_eq!(param_pair(&json!({"freq": [1.0]}), "freq", d), d);
        assert_eq!(param_pair(&json!({"freq": [1.0, "x"]}), "freq", d), d);
        assert_eq!(param_pair(&json!({"freq": {"x": 1}}), "freq", d), d);
        assert_eq!(param_pair(&json!({}), "freq", d), d);
    }
}
