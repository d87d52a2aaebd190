//! Numerically stable primitives for log-domain odds math.

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    if a == f64::INFINITY || b == f64::INFINITY {
        return f64::INFINITY;
    }
    let m = a.max(b);
    let diff = (a - b).abs();
    m + (-diff).exp().ln_1p()
}

/// Natural log that maps zero to -inf and rejects negative or NaN input.
///
/// Returns `None` for values that have no real logarithm.
pub fn ln_nonnegative(value: f64) -> Option<f64> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    if value == 0.0 {
        return Some(f64::NEG_INFINITY);
    }
    Some(value.ln())
}
