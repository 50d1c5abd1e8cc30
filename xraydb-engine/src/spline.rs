/// Cubic spline interpolation using pre-computed second derivatives (Elam method).
///
/// This is the core interpolation used for all Elam photoabsorption and
/// scattering cross-section lookups, evaluated in ln(E)/ln(sigma) space.
///
/// `xin` must be non-decreasing with at least two distinct values. A pair
/// of equal consecutive knots marks an absorption edge: the first carries
/// the value just below the edge, the second the value just above. A point
/// lying exactly on a knot is evaluated on the segment that starts there,
/// so an energy exactly at an edge gets the above-edge value. Points outside
/// the knots are evaluated with the first or last segment's cubic.
///
/// # Arguments
/// * `xin` - Knot positions
/// * `yin` - Knot values
/// * `yspl` - Second derivatives of y at the knots
/// * `x` - Position to evaluate
pub fn elam_spline_one(xin: &[f64], yin: &[f64], yspl: &[f64], x: f64) -> f64 {
    let n = xin.len();
    if n < 2 {
        return yin.first().copied().unwrap_or(f64::NAN);
    }

    let hi = xin.partition_point(|&v| v <= x).clamp(1, n - 1);
    let lo = hi - 1;

    let diff = xin[hi] - xin[lo];
    debug_assert!(diff > 0.0, "segment [{lo}, {hi}] has zero width");

    let a = (xin[hi] - x) / diff;
    let b = (x - xin[lo]) / diff;

    a * yin[lo]
        + b * yin[hi]
        + (diff * diff / 6.0) * ((a * a - 1.0) * a * yspl[lo] + (b * b - 1.0) * b * yspl[hi])
}

/// Evaluate [`elam_spline_one`] at each of `xout`.
pub fn elam_spline(xin: &[f64], yin: &[f64], yspl: &[f64], xout: &[f64]) -> Vec<f64> {
    xout.iter()
        .map(|&x| elam_spline_one(xin, yin, yspl, x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_at_knot_points() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![1.0, 4.0, 9.0, 16.0, 25.0];
        let spl = vec![0.3, -0.2, 0.5, 0.1, 0.0];

        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let result = elam_spline_one(&x, &y, &spl, xi);
            assert!(
                (result - yi).abs() < 1e-10,
                "at x={xi}: got {result} expected {yi}"
            );
        }
    }

    #[test]
    fn test_spline_linear_interpolation() {
        // With zero spline coefficients, should do linear interpolation
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        let spl = vec![0.0; 3];

        let result = elam_spline(&x, &y, &spl, &[0.5, 1.5]);
        assert!((result[0] - 0.5).abs() < 1e-10);
        assert!((result[1] - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_spline_continuous_at_interior_knot() {
        let x = vec![0.0, 1.0, 2.5, 3.0];
        let y = vec![2.0, 1.0, 0.5, 0.2];
        let spl = vec![0.0, 0.8, -0.4, 0.0];

        let below = elam_spline_one(&x, &y, &spl, 1.0 - 1e-9);
        let above = elam_spline_one(&x, &y, &spl, 1.0 + 1e-9);
        assert!((below - above).abs() < 1e-7, "{below} vs {above}");
    }

    #[test]
    fn test_spline_edge_takes_upper_segment() {
        // knots 1 and 2 share x = 1.0: an absorption edge
        let x = vec![0.0, 1.0, 1.0, 2.0];
        let y = vec![1.0, 0.5, 3.0, 2.0];
        let spl = vec![0.0; 4];

        assert!((elam_spline_one(&x, &y, &spl, 1.0) - 3.0).abs() < 1e-12);
        assert!((elam_spline_one(&x, &y, &spl, 1.0 - 1e-9) - 0.5).abs() < 1e-6);
        assert!((elam_spline_one(&x, &y, &spl, 1.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_spline_extends_end_segments() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 3.0];
        let spl = vec![0.0; 3];

        assert!((elam_spline_one(&x, &y, &spl, -1.0) + 1.0).abs() < 1e-12);
        assert!((elam_spline_one(&x, &y, &spl, 3.0) - 5.0).abs() < 1e-12);
        assert!((elam_spline_one(&x, &y, &spl, 2.0) - 3.0).abs() < 1e-12);
    }
}
