//! Determine whether a point is inside a path.
//!
//! Paths are classified in their projection onto the XY plane: the z coordinates of
//! the path and of the query point are ignored.
//!
//! Only subpaths terminated by a close element have an interior. Open subpaths only
//! contain the points of their outline.

use crate::aabb::fast_bounding_box;
use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::Point;
use crate::path::{PathElement, WindingRule};

/// Returns whether the point is inside the path.
///
/// Points on the outline (within `epsilon`) are inside.
pub fn hit_test_path<Iter>(
    point: &Point,
    path: Iter,
    winding_rule: WindingRule,
    tolerance: f64,
    epsilon: f64,
) -> bool
where
    Iter: IntoIterator<Item = PathElement> + Clone,
{
    let bounds = fast_bounding_box(path.clone());
    if point.x < bounds.min.x - epsilon
        || point.x > bounds.max.x + epsilon
        || point.y < bounds.min.y - epsilon
        || point.y > bounds.max.y + epsilon
    {
        return false;
    }

    let mut winding = Winding::new(*point, epsilon);
    visit_edges(*point, path, tolerance, epsilon, &mut winding);

    winding.on_outline || winding_rule.is_in(winding.total)
}

/// Compute the winding number of a given position with respect to the closed subpaths
/// of the path.
pub fn path_winding_number_at_position<Iter>(point: &Point, path: Iter, tolerance: f64) -> i32
where
    Iter: IntoIterator<Item = PathElement>,
{
    let mut winding = Winding::new(*point, -1.0);
    visit_edges(*point, path, tolerance, 0.0, &mut winding);

    winding.total
}

/// Returns whether the point lies on the outline of the path, within `epsilon`.
///
/// Open subpaths are part of the outline.
pub fn is_on_outline<Iter>(point: &Point, path: Iter, tolerance: f64, epsilon: f64) -> bool
where
    Iter: IntoIterator<Item = PathElement>,
{
    let mut winding = Winding::new(*point, epsilon);
    visit_edges(*point, path, tolerance, epsilon, &mut winding);

    winding.on_outline
}

struct Winding {
    point: Point,
    square_epsilon: f64,
    check_outline: bool,
    on_outline: bool,
    // Winding of the subpath being visited, only counted once it is closed.
    pending: i32,
    total: i32,
}

impl Winding {
    fn new(point: Point, epsilon: f64) -> Self {
        Winding {
            point: flat(point),
            square_epsilon: epsilon * epsilon,
            check_outline: epsilon >= 0.0,
            on_outline: false,
            pending: 0,
            total: 0,
        }
    }

    fn edge(&mut self, segment: &LineSegment<f64>) {
        let segment = LineSegment {
            from: flat(segment.from),
            to: flat(segment.to),
        };
        if self.check_outline
            && !self.on_outline
            && segment.square_distance_to_point(self.point) <= self.square_epsilon
        {
            self.on_outline = true;
        }
        test_segment(self.point, &segment, &mut self.pending);
    }

    fn close(&mut self) {
        self.total += self.pending;
        self.pending = 0;
    }

    fn discard(&mut self) {
        self.pending = 0;
    }
}

fn visit_edges<Iter>(point: Point, path: Iter, tolerance: f64, epsilon: f64, winding: &mut Winding)
where
    Iter: IntoIterator<Item = PathElement>,
{
    let margin = epsilon.max(0.0);
    for element in path {
        match element {
            PathElement::MoveTo { to } => {
                winding.discard();
                if winding.check_outline
                    && (flat(to) - winding.point).square_length() <= winding.square_epsilon
                {
                    winding.on_outline = true;
                }
            }
            PathElement::LineTo { from, to } => {
                winding.edge(&LineSegment { from, to });
            }
            PathElement::Close { last, first } => {
                winding.edge(&LineSegment {
                    from: last,
                    to: first,
                });
                winding.close();
            }
            PathElement::QuadTo { from, ctrl, to } => {
                let segment = QuadraticBezierSegment { from, ctrl, to };
                let (min, max) = segment.fast_bounding_range_y();
                if min > point.y + margin || max < point.y - margin {
                    continue;
                }
                segment.for_each_flattened(tolerance, &mut |line| {
                    winding.edge(line);
                });
            }
            PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                let segment = CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                };
                let (min, max) = segment.fast_bounding_range_y();
                if min > point.y + margin || max < point.y - margin {
                    continue;
                }
                segment.for_each_flattened(tolerance, &mut |line| {
                    winding.edge(line);
                });
            }
        }
    }
}

#[inline]
fn flat(p: Point) -> Point {
    Point::new(p.x, p.y, 0.0)
}

fn test_segment(point: Point, segment: &LineSegment<f64>, winding: &mut i32) {
    let y0 = segment.from.y;
    let y1 = segment.to.y;
    let min_y = f64::min(y0, y1);
    let max_y = f64::max(y0, y1);

    if min_y > point.y || max_y <= point.y || f64::min(segment.from.x, segment.to.x) > point.x {
        return;
    }

    if y0 == y1 {
        return;
    }

    let d = y1 - y0;

    let t = (point.y - y0) / d;
    let x = segment.sample(t).x;

    if x > point.x {
        return;
    }

    let w = if d > 0.0 { 1 } else { -1 };

    *winding += w;
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::Path;

#[cfg(test)]
fn polygon(points: &[(f64, f64)], close: bool) -> Path {
    let mut path = Path::new();
    path.move_to(point(points[0].0, points[0].1, 0.0)).unwrap();
    for &(x, y) in &points[1..] {
        path.line_to(point(x, y, 0.0)).unwrap();
    }
    if close {
        path.close();
    }
    path
}

#[test]
fn test_hit_test() {
    let mut path = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], true);
    let hole = polygon(&[(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.20, 0.75)], true);
    path.extend_from_elements(hole.iter()).unwrap();

    let hit = |x: f64, y: f64, rule| hit_test_path(&point(x, y, 0.0), path.iter(), rule, 0.1, 1e-8);

    assert!(!hit(-1.0, 0.5, WindingRule::EvenOdd));
    assert!(!hit(2.0, 0.5, WindingRule::EvenOdd));
    assert!(!hit(2.0, 0.0, WindingRule::EvenOdd));
    assert!(!hit(0.5, -1.0, WindingRule::EvenOdd));
    assert!(!hit(0.5, 2.0, WindingRule::EvenOdd));

    assert!(!hit(0.5, 0.5, WindingRule::EvenOdd));
    assert!(hit(0.5, 0.5, WindingRule::NonZero));
    assert!(hit(0.2, 0.5, WindingRule::EvenOdd));
    assert!(hit(0.8, 0.5, WindingRule::EvenOdd));

    // On the outline.
    assert!(hit(1.0, 0.5, WindingRule::EvenOdd));
    assert!(hit(0.5, 0.25, WindingRule::EvenOdd));
}

#[test]
fn hit_test_point_aligned() {
    let path = polygon(
        &[(-10.0, 10.0), (10.0, 10.0), (10.0, 5.0), (10.0, -10.0), (-10.0, -10.0)],
        true,
    );

    assert!(hit_test_path(&point(0.0, 5.0, 0.0), path.iter(), WindingRule::NonZero, 0.1, 1e-8));
    assert!(!hit_test_path(&point(15.0, 5.0, 0.0), path.iter(), WindingRule::NonZero, 0.1, 1e-8));
}

#[test]
fn hit_test_double_square() {
    let path = polygon(
        &[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ],
        true,
    );

    assert_eq!(path_winding_number_at_position(&point(0.5, 0.5, 0.0), &path, 0.1), -2);
}

#[test]
fn hit_test_double_count() {
    let path = polygon(
        &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (1.0, 3.0), (3.0, 3.0), (3.0, 0.0)],
        true,
    );

    assert_eq!(path_winding_number_at_position(&point(2.0, 1.0, 0.0), &path, 0.1), 1);
    assert_eq!(path_winding_number_at_position(&point(2.0, 2.0, 0.0), &path, 0.1), 1);
}

#[test]
fn hit_test_vertex_on_ray() {
    let path = polygon(
        &[(0.0, 50.0), (50.0, 50.0), (50.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 50.0)],
        true,
    );

    assert!(hit_test_path(&point(55.0, 50.0, 0.0), path.iter(), WindingRule::EvenOdd, 1.0, 1e-8));
}

#[test]
fn winding_rules_diverge_on_self_intersecting_path() {
    let path = polygon(
        &[
            (1.0, -3.0),
            (4.0, -4.0),
            (6.0, -2.0),
            (7.0, 2.0),
            (5.0, 5.0),
            (4.0, 1.0),
            (5.0, 0.0),
            (12.0, -1.0),
            (13.0, -4.0),
            (10.0, -5.0),
            (4.0, -2.0),
            (1.0, 2.0),
            (3.0, 4.0),
            (9.0, 4.0),
            (9.0, -3.0),
            (4.0, -6.0),
        ],
        true,
    );

    let p = point(7.0, -1.0, 0.0);
    assert_eq!(path_winding_number_at_position(&p, &path, 0.1).abs(), 2);
    assert!(!hit_test_path(&p, path.iter(), WindingRule::EvenOdd, 0.1, 1e-8));
    assert!(hit_test_path(&p, path.iter(), WindingRule::NonZero, 0.1, 1e-8));
}

#[test]
fn open_subpaths_have_no_interior() {
    let open = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], false);
    let closed = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], true);

    let inside = point(2.0, 2.0, 0.0);
    assert!(!hit_test_path(&inside, open.iter(), WindingRule::NonZero, 0.1, 1e-8));
    assert!(hit_test_path(&inside, closed.iter(), WindingRule::NonZero, 0.1, 1e-8));
    assert_eq!(path_winding_number_at_position(&inside, &open, 0.1), 0);

    // The outline of an open path still counts.
    assert!(hit_test_path(&point(4.0, 2.0, 0.0), open.iter(), WindingRule::NonZero, 0.1, 1e-8));
    assert!(!hit_test_path(&point(0.0, 2.0, 0.0), open.iter(), WindingRule::NonZero, 0.1, 1e-8));
    assert!(is_on_outline(&point(0.0, 2.0, 0.0), closed.iter(), 0.1, 1e-8));
}

#[test]
fn curved_path() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0, 0.0)).unwrap();
    path.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
    path.curve_to(point(5.0, -1.0, 0.0), point(6.0, 5.0, 0.0), point(7.0, -5.0, 0.0))
        .unwrap();

    let hit = |path: &Path, x: f64, y: f64| {
        hit_test_path(&point(x, y, 0.0), path.iter(), WindingRule::NonZero, 0.001, 1e-8)
    };

    for &(x, y) in &[(-5.0, 1.0), (3.0, 6.0), (3.0, -10.0), (11.0, 1.0), (4.0, 1.0)] {
        assert!(!hit(&path, x, y));
    }
    assert!(hit(&path, 4.0, 3.0));

    path.close();
    for &(x, y) in &[(-5.0, 1.0), (3.0, 6.0), (3.0, -10.0), (11.0, 1.0)] {
        assert!(!hit(&path, x, y));
    }
    assert!(hit(&path, 4.0, 1.0));
    assert!(hit(&path, 4.0, 3.0));
    assert!(hit(&path, 1.0, 0.0));
    assert!(hit(&path, 3.0, 0.0));
}

#[test]
fn z_is_ignored() {
    let path = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], true);
    assert!(hit_test_path(&point(2.0, 2.0, 10.0), path.iter(), WindingRule::EvenOdd, 0.1, 1e-8));
}
