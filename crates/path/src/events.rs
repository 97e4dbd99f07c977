use crate::geom::traits::Transformation;
use crate::geom::utils::fuzzy_eq_point;
use crate::geom::LineSegment;
use crate::math::{Point, Vector};
use crate::PathElementType;

/// One element of a path, with its implicit start point made explicit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathElement {
    MoveTo {
        to: Point,
    },
    LineTo {
        from: Point,
        to: Point,
    },
    QuadTo {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    CurveTo {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// Goes back from `last` to the start of the subpath (`first`).
    Close {
        last: Point,
        first: Point,
    },
}

impl PathElement {
    pub fn element_type(&self) -> PathElementType {
        match self {
            PathElement::MoveTo { .. } => PathElementType::MoveTo,
            PathElement::LineTo { .. } => PathElementType::LineTo,
            PathElement::QuadTo { .. } => PathElementType::QuadTo,
            PathElement::CurveTo { .. } => PathElementType::CurveTo,
            PathElement::Close { .. } => PathElementType::Close,
        }
    }

    /// Start point. A move-to starts where it ends.
    pub fn from(&self) -> Point {
        match *self {
            PathElement::LineTo { from, .. }
            | PathElement::QuadTo { from, .. }
            | PathElement::CurveTo { from, .. }
            | PathElement::MoveTo { to: from }
            | PathElement::Close { last: from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            PathElement::LineTo { to, .. }
            | PathElement::QuadTo { to, .. }
            | PathElement::CurveTo { to, .. }
            | PathElement::MoveTo { to }
            | PathElement::Close { first: to, .. } => to,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.element_type().is_drawing()
    }

    pub fn is_curve(&self) -> bool {
        self.element_type().is_curve()
    }

    /// The straight edge drawn by line-to and close elements.
    pub fn as_line(&self) -> Option<LineSegment<f64>> {
        match *self {
            PathElement::LineTo { from, to } | PathElement::Close { last: from, first: to } => {
                Some(LineSegment { from, to })
            }
            _ => None,
        }
    }

    pub fn transformed<T: Transformation<f64>>(&self, mat: &T) -> Self {
        match *self {
            PathElement::MoveTo { to } => PathElement::MoveTo {
                to: mat.transform_point(to),
            },
            PathElement::LineTo { from, to } => PathElement::LineTo {
                from: mat.transform_point(from),
                to: mat.transform_point(to),
            },
            PathElement::QuadTo { from, ctrl, to } => PathElement::QuadTo {
                from: mat.transform_point(from),
                ctrl: mat.transform_point(ctrl),
                to: mat.transform_point(to),
            },
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => PathElement::CurveTo {
                from: mat.transform_point(from),
                ctrl1: mat.transform_point(ctrl1),
                ctrl2: mat.transform_point(ctrl2),
                to: mat.transform_point(to),
            },
            PathElement::Close { last, first } => PathElement::Close {
                last: mat.transform_point(last),
                first: mat.transform_point(first),
            },
        }
    }

    #[inline]
    pub fn translated(&self, by: Vector) -> Self {
        self.transformed(&by)
    }

    /// Same type and every coordinate within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let eq = |a: Point, b: Point| fuzzy_eq_point(a, b, epsilon);
        match (*self, *other) {
            (PathElement::MoveTo { to: a }, PathElement::MoveTo { to: b }) => eq(a, b),
            (PathElement::LineTo { from: f1, to: t1 }, PathElement::LineTo { from: f2, to: t2 }) => {
                eq(f1, f2) && eq(t1, t2)
            }
            (
                PathElement::QuadTo {
                    from: f1,
                    ctrl: c1,
                    to: t1,
                },
                PathElement::QuadTo {
                    from: f2,
                    ctrl: c2,
                    to: t2,
                },
            ) => eq(f1, f2) && eq(c1, c2) && eq(t1, t2),
            (
                PathElement::CurveTo {
                    from: f1,
                    ctrl1: a1,
                    ctrl2: b1,
                    to: t1,
                },
                PathElement::CurveTo {
                    from: f2,
                    ctrl1: a2,
                    ctrl2: b2,
                    to: t2,
                },
            ) => eq(f1, f2) && eq(a1, a2) && eq(b1, b2) && eq(t1, t2),
            (
                PathElement::Close {
                    last: l1,
                    first: f1,
                },
                PathElement::Close {
                    last: l2,
                    first: f2,
                },
            ) => eq(l1, l2) && eq(f1, f2),
            _ => false,
        }
    }
}

/// Compares two element sequences element-wise within `epsilon`.
pub fn elements_approx_eq<A, B>(a: A, b: B, epsilon: f64) -> bool
where
    A: IntoIterator<Item = PathElement>,
    B: IntoIterator<Item = PathElement>,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(e1), Some(e2)) if e1.approx_eq(&e2, epsilon) => {}
            _ => return false,
        }
    }
}

#[test]
fn element_endpoints() {
    use crate::math::point;

    let close = PathElement::Close {
        last: point(1.0, 2.0, 3.0),
        first: point(0.0, 0.0, 0.0),
    };
    assert_eq!(close.element_type(), PathElementType::Close);
    assert_eq!(close.from(), point(1.0, 2.0, 3.0));
    assert_eq!(close.to(), point(0.0, 0.0, 0.0));
    assert!(close.as_line().is_some());

    let m = PathElement::MoveTo {
        to: point(4.0, 5.0, 6.0),
    };
    assert_eq!(m.from(), m.to());
    assert!(!m.is_drawing());
    assert!(m.as_line().is_none());
}

#[test]
fn element_comparison() {
    use crate::math::{point, vector};

    let a = PathElement::QuadTo {
        from: point(0.0, 0.0, 0.0),
        ctrl: point(1.0, 1.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    };
    let b = a.translated(vector(1e-10, 0.0, 0.0));
    assert!(a.approx_eq(&b, 1e-8));
    assert!(!a.approx_eq(&a.translated(vector(0.0, 1.0, 0.0)), 1e-8));

    let line = PathElement::LineTo {
        from: point(0.0, 0.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    };
    assert!(!a.approx_eq(&line, 1e-8));
    assert!(elements_approx_eq(vec![a, line], vec![b, line], 1e-8));
    assert!(!elements_approx_eq(vec![a, line], vec![a], 1e-8));
}
