use crate::scalar::{Float, Scalar};
use crate::{Box3D, Point, Vector};
use arrayvec::ArrayVec;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sum of the absolute values of the components (taxicab norm).
#[inline]
pub fn l1_length<S: Scalar>(v: Vector<S>) -> S {
    v.x.abs() + v.y.abs() + v.z.abs()
}

/// Largest absolute component (Chebyshev norm).
#[inline]
pub fn linf_length<S: Scalar>(v: Vector<S>) -> S {
    v.x.abs().max(v.y.abs()).max(v.z.abs())
}

/// Whether two points are equal within `epsilon` on every axis.
#[inline]
pub fn fuzzy_eq_point<S: Scalar>(a: Point<S>, b: Point<S>, epsilon: S) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon && (a.z - b.z).abs() <= epsilon
}

/// Smallest box containing both boxes.
#[inline]
pub fn box_union<S: Scalar>(a: &Box3D<S>, b: &Box3D<S>) -> Box3D<S> {
    Box3D {
        min: a.min.min(b.min),
        max: a.max.max(b.max),
    }
}

/// Smallest box containing all of the points, or `None` if the iterator is empty.
pub fn points_bounding_box<S, I>(points: I) -> Option<Box3D<S>>
where
    S: Scalar,
    I: IntoIterator<Item = Point<S>>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut result = Box3D {
        min: first,
        max: first,
    };
    for p in points {
        result.min = result.min.min(p);
        result.max = result.max.max(p);
    }

    Some(result)
}

/// Real roots of `a * x² + b * x + c`.
///
/// Degenerates to the linear equation when `a` is (almost) zero.
pub fn quadratic_polynomial_roots<S: Scalar>(a: S, b: S, c: S) -> ArrayVec<S, 2> {
    let mut result = ArrayVec::new();

    let m = a.abs().max(b.abs()).max(c.abs());
    let epsilon = S::value(1e-9) * if m > S::ONE { m } else { S::ONE };

    if a.abs() < epsilon {
        if b.abs() >= epsilon {
            result.push(-c / b);
        }
        return result;
    }

    let delta = b * b - S::FOUR * a * c;
    if delta > S::ZERO {
        let sqrt_delta = delta.sqrt();
        result.push((-b - sqrt_delta) / (S::TWO * a));
        result.push((-b + sqrt_delta) / (S::TWO * a));
    } else if delta.abs() < epsilon {
        result.push(-b / (S::TWO * a));
    }

    result
}

/// Real roots of `a * x³ + b * x² + c * x + d`.
///
/// Degenerates to [`quadratic_polynomial_roots`] when `a` is (almost) zero.
pub fn cubic_polynomial_roots<S: Scalar>(a: S, b: S, c: S, d: S) -> ArrayVec<S, 3> {
    let mut result = ArrayVec::new();

    let m = b.abs().max(c.abs()).max(d.abs());
    if a.abs() <= S::value(1e-9) * if m > S::ONE { m } else { S::ONE } {
        for root in quadratic_polynomial_roots(b, c, d) {
            result.push(root);
        }
        return result;
    }

    let frac_1_3 = S::ONE / S::THREE;
    let nine = S::THREE * S::THREE;

    let bn = b / a;
    let cn = c / a;
    let dn = d / a;

    let delta0 = (S::THREE * cn - bn * bn) / nine;
    let delta1 =
        (nine * bn * cn - S::value(27.0) * dn - S::TWO * bn * bn * bn) / S::value(54.0);
    let delta_01 = delta0 * delta0 * delta0 + delta1 * delta1;

    if delta_01 >= S::ZERO {
        let delta_p_sqrt = delta1 + delta_01.sqrt();
        let delta_m_sqrt = delta1 - delta_01.sqrt();

        let s = delta_p_sqrt.signum() * delta_p_sqrt.abs().powf(frac_1_3);
        let t = delta_m_sqrt.signum() * delta_m_sqrt.abs().powf(frac_1_3);

        result.push(-bn * frac_1_3 + (s + t));

        if (s - t).abs() < S::value(1e-5) {
            result.push(-bn * frac_1_3 - (s + t) / S::TWO);
        }
    } else {
        let cos_theta = (delta1 / (-delta0 * delta0 * delta0).sqrt())
            .max(-S::ONE)
            .min(S::ONE);
        let theta = cos_theta.acos();
        let two_sqrt_delta0 = S::TWO * (-delta0).sqrt();
        let two_pi = S::TWO * S::PI();
        result.push(two_sqrt_delta0 * Float::cos(theta * frac_1_3) - bn * frac_1_3);
        result.push(two_sqrt_delta0 * Float::cos((theta + two_pi) * frac_1_3) - bn * frac_1_3);
        result.push(
            two_sqrt_delta0 * Float::cos((theta + S::TWO * two_pi) * frac_1_3) - bn * frac_1_3,
        );
    }

    result
}

#[cfg(test)]
fn assert_roots(mut roots: Vec<f64>, expected: &[f64], epsilon: f64) {
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(roots.len(), expected.len(), "{:?} != {:?}", roots, expected);
    for (r, e) in roots.iter().zip(expected) {
        assert!((r - e).abs() <= epsilon, "{:?} != {:?}", roots, expected);
    }
}

#[test]
fn cubic_polynomial() {
    // (x - 1)(x - 2)(x - 3)
    assert_roots(
        cubic_polynomial_roots(1.0, -6.0, 11.0, -6.0).to_vec(),
        &[1.0, 2.0, 3.0],
        1e-9,
    );
    // -(x - 1)(x² + 1)
    assert_roots(cubic_polynomial_roots(-1.0, 1.0, -1.0, 1.0).to_vec(), &[1.0], 1e-6);
    assert_roots(cubic_polynomial_roots(-2.0, 2.0, -1.0, 10.0).to_vec(), &[2.0], 5e-5);
}

#[test]
fn cubic_polynomial_f32() {
    // (x + 1)(x - 0.5)(x - 2)
    let roots: Vec<f64> = cubic_polynomial_roots(1.0f32, -1.5, -1.5, 1.0)
        .iter()
        .map(|&r| r as f64)
        .collect();
    assert_roots(roots, &[-1.0, 0.5, 2.0], 1e-4);
}

#[test]
fn cubic_polynomial_with_double_root() {
    // 2x(x - 1)²
    let roots = cubic_polynomial_roots(2.0, -4.0, 2.0, 0.0);
    assert!(roots.iter().any(|r| r.abs() < 1e-6));
    assert!(roots.iter().any(|r| (r - 1.0).abs() < 1e-6));
    assert!(roots.iter().all(|r| r.is_finite()));
}

#[test]
fn cubic_polynomial_degenerates_to_quadratic() {
    // x² - 3x + 2
    assert_roots(cubic_polynomial_roots(0.0, 1.0, -3.0, 2.0).to_vec(), &[1.0, 2.0], 1e-12);
    // 2x - 1
    assert_roots(cubic_polynomial_roots(0.0, 0.0, 2.0, -1.0).to_vec(), &[0.5], 1e-12);
    assert!(cubic_polynomial_roots(0.0, 0.0, 0.0, 1.0).is_empty());
}

#[test]
fn quadratic_polynomial() {
    assert_roots(quadratic_polynomial_roots(1.0, 0.0, -4.0).to_vec(), &[-2.0, 2.0], 1e-12);
    assert_roots(quadratic_polynomial_roots(1.0, -2.0, 1.0).to_vec(), &[1.0], 1e-12);
    assert!(quadratic_polynomial_roots(1.0, 0.0, 1.0).is_empty());
}

#[test]
fn norms() {
    use crate::vector;

    let v = vector(3.0f64, -4.0, 1.0);
    assert_eq!(l1_length(v), 8.0);
    assert_eq!(linf_length(v), 4.0);
}

#[test]
fn bounding_box_of_points() {
    use crate::point;

    let b = points_bounding_box(vec![
        point(1.0f64, 2.0, 3.0),
        point(-1.0, 5.0, 0.0),
        point(0.0, 0.0, 4.0),
    ])
    .unwrap();
    assert_eq!(b.min, point(-1.0, 0.0, 0.0));
    assert_eq!(b.max, point(1.0, 5.0, 4.0));
    assert!(points_bounding_box(Vec::<Point<f64>>::new()).is_none());

    let u = box_union(&b, &Box3D { min: point(2.0, 2.0, 2.0), max: point(3.0, 3.0, 3.0) });
    assert_eq!(u.max, point(3.0, 5.0, 4.0));
}

/// Number of uniform steps in `t` needed for the chords of a curve to stay within
/// `tolerance` of it, given an upper bound of the magnitude of its second derivative.
///
/// Always at least one step.
pub fn uniform_flattening_steps<S: Scalar>(max_second_derivative: S, tolerance: S) -> u32 {
    const MAX_STEPS: u32 = 4096;

    let n = (max_second_derivative / (S::EIGHT * tolerance)).sqrt().ceil();
    if n.is_nan() || n <= S::ONE {
        return 1;
    }

    match n.to_u32() {
        Some(n) => n.min(MAX_STEPS),
        None => MAX_STEPS,
    }
}

#[test]
fn flattening_steps() {
    assert_eq!(uniform_flattening_steps(0.0f64, 0.1), 1);
    assert_eq!(uniform_flattening_steps(8.0f64, 1.0), 1);
    assert_eq!(uniform_flattening_steps(32.0f64, 0.25), 4);
    assert_eq!(uniform_flattening_steps(33.0f64, 0.25), 5);
    assert_eq!(uniform_flattening_steps(1.0f64, 0.0), 4096);
    assert_eq!(uniform_flattening_steps(f64::NAN, 0.1), 1);
}
