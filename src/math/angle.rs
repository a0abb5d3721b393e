//! Angle normalization and directed-sweep math.
//!
//! Every arc in the engine is swept in the direction its chirality
//! dictates. [`directed_sweep`] pins that down: the result is the signed
//! angular travel from `from` to `to`, strictly positive for CCW and
//! strictly negative for CW, with a full turn added whenever the naive
//! delta points the wrong way. Getting this wrong produces "wrong-way"
//! arcs that wind the long way around a disk.

use std::f64::consts::PI;

/// Normalizes an angle into `(-pi, pi]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// `acos` with the argument clamped into `[-1, 1]`.
///
/// At exact tangency the cosine argument lands on ±1 only up to floating
/// round-off; clamping keeps the result finite instead of NaN.
#[must_use]
pub fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Signed angular sweep from `from` to `to` in the given rotational
/// direction.
///
/// The naive delta is normalized into `(-pi, pi]`, then forced positive
/// (CCW) or negative (CW) by adding or subtracting a full turn. The
/// magnitude is always in `(0, 2*pi]`; a zero delta maps to a full turn,
/// never to an empty sweep.
#[must_use]
pub fn directed_sweep(from: f64, to: f64, ccw: bool) -> f64 {
    let mut delta = normalize_angle(to - from);
    if ccw {
        if delta <= 0.0 {
            delta += 2.0 * PI;
        }
    } else if delta >= 0.0 {
        delta -= 2.0 * PI;
    }
    delta
}

/// Counter-clockwise turn from `from` to `to`, in `[0, 2*pi)`.
///
/// Unlike [`directed_sweep`] a zero delta stays zero; used for hull
/// candidate selection where "no turn" is a valid (and preferred) choice.
#[must_use]
pub fn ccw_turn(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % (2.0 * PI);
    if delta < 0.0 {
        delta += 2.0 * PI;
    }
    delta
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn normalize_within_range() {
        assert!((normalize_angle(0.0)).abs() < TOL);
        assert!((normalize_angle(3.0 * PI) - PI).abs() < TOL);
        assert!((normalize_angle(-3.0 * PI) - PI).abs() < TOL);
        assert!((normalize_angle(-PI) - PI).abs() < TOL);
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < TOL);
    }

    #[test]
    fn clamped_acos_never_nan() {
        assert!(clamped_acos(1.0 + 1e-12).abs() < 1e-5);
        assert!((clamped_acos(-1.0 - 1e-12) - PI).abs() < 1e-5);
        assert!((clamped_acos(0.0) - PI / 2.0).abs() < TOL);
    }

    #[test]
    fn ccw_sweep_is_positive() {
        let s = directed_sweep(0.0, PI / 2.0, true);
        assert!((s - PI / 2.0).abs() < TOL, "s={s}");
        // Backwards delta gets a full turn added.
        let s = directed_sweep(PI / 2.0, 0.0, true);
        assert!((s - 1.5 * PI).abs() < TOL, "s={s}");
    }

    #[test]
    fn cw_sweep_is_negative() {
        let s = directed_sweep(PI / 2.0, 0.0, false);
        assert!((s + PI / 2.0).abs() < TOL, "s={s}");
        let s = directed_sweep(0.0, PI / 2.0, false);
        assert!((s + 1.5 * PI).abs() < TOL, "s={s}");
    }

    #[test]
    fn zero_delta_is_full_turn() {
        assert!((directed_sweep(1.0, 1.0, true) - 2.0 * PI).abs() < TOL);
        assert!((directed_sweep(1.0, 1.0, false) + 2.0 * PI).abs() < TOL);
    }

    #[test]
    fn ccw_turn_zero_stays_zero() {
        assert!(ccw_turn(1.0, 1.0).abs() < TOL);
        assert!((ccw_turn(0.0, -PI / 2.0) - 1.5 * PI).abs() < TOL);
    }
}
