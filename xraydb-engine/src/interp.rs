//! Two-point interpolation on tabulated grids (Chantler data).
//!
//! Every scheme draws a straight line through one pair of neighbouring grid
//! points in some transformed space. Outside the grid the first or last pair
//! is used, so extrapolation continues the end slope.

/// Index of the lower point of the pair used for `x`.
///
/// `xp` must be strictly increasing with at least two points.
pub fn bracket(xp: &[f64], x: f64) -> usize {
    xp.partition_point(|&v| v <= x).clamp(1, xp.len() - 1) - 1
}

/// True when `x` lies outside `[xp[0], xp[n-1]]`.
pub fn outside(xp: &[f64], x: f64) -> bool {
    match (xp.first(), xp.last()) {
        (Some(&lo), Some(&hi)) => x < lo || x > hi,
        _ => true,
    }
}

#[inline]
fn line(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Returns the tabulated value itself when `x` sits on a grid point of the pair.
#[inline]
fn on_grid(xp: &[f64], fp: &[f64], lo: usize, x: f64) -> Option<f64> {
    if x == xp[lo] {
        Some(fp[lo])
    } else if x == xp[lo + 1] {
        Some(fp[lo + 1])
    } else {
        None
    }
}

/// Linear interpolation in ln(x), ln(y). All `xp`, `fp` and `x` must be positive.
pub fn interp_loglog_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let lo = bracket(xp, x);
    if let Some(v) = on_grid(xp, fp, lo, x) {
        return v;
    }
    line(
        x.ln(),
        xp[lo].ln(),
        fp[lo].ln(),
        xp[lo + 1].ln(),
        fp[lo + 1].ln(),
    )
    .exp()
}

/// Linear interpolation of y against ln(x); y may take any sign.
pub fn interp_loglinear_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let lo = bracket(xp, x);
    if let Some(v) = on_grid(xp, fp, lo, x) {
        return v;
    }
    line(x.ln(), xp[lo].ln(), fp[lo], xp[lo + 1].ln(), fp[lo + 1])
}

/// Log-log interpolation of `fp + offset`, returned with the offset removed.
///
/// Falls back to [`interp_loglinear_one`] on pairs where the shifted values
/// are not both positive.
pub fn interp_offset_loglog_one(x: f64, xp: &[f64], fp: &[f64], offset: f64) -> f64 {
    let lo = bracket(xp, x);
    if let Some(v) = on_grid(xp, fp, lo, x) {
        return v;
    }
    let (y0, y1) = (fp[lo] + offset, fp[lo + 1] + offset);
    if y0 > 0.0 && y1 > 0.0 {
        line(x.ln(), xp[lo].ln(), y0.ln(), xp[lo + 1].ln(), y1.ln()).exp() - offset
    } else {
        line(x.ln(), xp[lo].ln(), fp[lo], xp[lo + 1].ln(), fp[lo + 1])
    }
}
