//! Closed-form polynomial root finding.
//!
//! Only non-negative real roots are kept: every caller searches for a time
//! offset inside a phase.

use core::f64::consts::{FRAC_PI_2, PI};

use heapless::Vec;
use libm::{atan, cbrt, cos, fabs, sin, sqrt};

/// Set of non-negative real roots (at most three).
pub type PositiveRoots = Vec<f64, 3>;

const COS_120: f64 = -0.5;
const SIN_120: f64 = 0.866_025_403_784_438_6;

fn insert(roots: &mut PositiveRoots, x: f64) {
    if x >= 0.0 {
        // Capacity is never exceeded: at most three roots are inserted.
        let _ = roots.push(x);
    }
}

/// Real non-negative roots of `a·x² + b·x + c = 0`.
///
/// Degenerates to the linear equation when `a` vanishes.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> PositiveRoots {
    let mut roots = PositiveRoots::new();
    solve_quadratic_into(&mut roots, a, b, c);
    roots
}

fn solve_quadratic_into(roots: &mut PositiveRoots, a: f64, b: f64, c: f64) {
    if fabs(a) < f64::EPSILON {
        if fabs(b) > f64::EPSILON {
            insert(roots, -c / b);
        }
        return;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant >= 0.0 {
        let inv_2a = 1.0 / (2.0 * a);
        let y = sqrt(discriminant);
        insert(roots, (-b + y) * inv_2a);
        insert(roots, (-b - y) * inv_2a);
    }
}

/// Real non-negative roots of `a·x³ + b·x² + c·x + d = 0`.
///
/// Uses Cardano's method with the trigonometric form for three real roots.
/// Vanishing leading coefficients reduce the degree; a vanishing constant term
/// yields the root `0` and reduces the degree as well.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> PositiveRoots {
    let mut roots = PositiveRoots::new();
    let (mut a, mut b, mut c, mut d) = (a, b, c, d);

    if fabs(d) < f64::EPSILON {
        insert(&mut roots, 0.0);
        d = c;
        c = b;
        b = a;
        a = 0.0;
    }

    if fabs(a) < f64::EPSILON {
        solve_quadratic_into(&mut roots, b, c, d);
        return roots;
    }

    let inv_a = 1.0 / a;
    let inv_aa = inv_a * inv_a;
    let bb = b * b;
    let b_over_3a = b * inv_a / 3.0;
    let p = (a * c - bb / 3.0) * inv_aa;
    let half_q = (2.0 * bb * b - 9.0 * a * b * c + 27.0 * a * a * d) / 54.0 * inv_aa * inv_a;
    let yy = p * p * p / 27.0 + half_q * half_q;

    if yy > f64::EPSILON {
        // One real root
        let y = sqrt(yy);
        let uuu = -half_q + y;
        let vvv = -half_q - y;
        let www = if fabs(uuu) > fabs(vvv) { uuu } else { vvv };
        let w = cbrt(www);
        insert(&mut roots, w - p / (3.0 * w) - b_over_3a);
    } else if yy < -f64::EPSILON {
        // Three real roots
        let x = -half_q;
        let y = sqrt(-yy);
        let (mut theta, mut r) = if fabs(x) > f64::EPSILON {
            let theta = if x > 0.0 { atan(y / x) } else { atan(y / x) + PI };
            (theta, sqrt(x * x - yy))
        } else {
            (FRAC_PI_2, y)
        };

        theta /= 3.0;
        r = 2.0 * cbrt(r);
        let ux = cos(theta) * r;
        let uyi = sin(theta) * r;

        insert(&mut roots, ux - b_over_3a);
        insert(&mut roots, ux * COS_120 - uyi * SIN_120 - b_over_3a);
        insert(&mut roots, ux * COS_120 + uyi * SIN_120 - b_over_3a);
    } else {
        // Double root
        let w = 2.0 * cbrt(-half_q);
        insert(&mut roots, w - b_over_3a);
        insert(&mut roots, w * COS_120 - b_over_3a);
    }

    roots
}
