/// Floating point type used throughout the dashboard
pub type Real = f64;

/// `value / max * 100`, clamped into `[0, 100]`. NaN and infinities map to 0.
pub fn percent_of(value: Real, max: Real) -> Real {
    let pct = value / max * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
