//! Paths as shapes.

use crate::algorithms::aabb::{bounding_box, fast_bounding_box};
use crate::algorithms::distance;
use crate::algorithms::hit_test::{hit_test_path, path_winding_number_at_position};
use crate::algorithms::length::approximate_length;
use crate::geom::LineSegment;
use crate::math::{Box3D, Point, Vector};
use crate::path::{Path, PathElement, WindingRule};
use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
use crate::{QueryOptions, ShapeError};

use std::ops::{Deref, DerefMut};

/// A [`Path`] exposed through the shape queries.
///
/// Containment follows the winding rule of the path and is evaluated on the projection
/// of the path onto the XY plane. Distances are measured in space.
///
/// The path is reachable through `Deref`, so it can be built in place:
///
/// ```
/// use afp_shapes::{PathShape, Shape};
/// use afp_shapes::math::point;
///
/// let mut shape = PathShape::new();
/// shape.move_to(point(0.0, 0.0, 0.0)).unwrap();
/// shape.line_to(point(2.0, 0.0, 0.0)).unwrap();
/// shape.line_to(point(2.0, 2.0, 0.0)).unwrap();
/// shape.close();
///
/// assert!(shape.contains_point(&point(1.5, 0.5, 0.0)));
/// ```
#[derive(Clone, Debug)]
pub struct PathShape {
    path: Path,
    epsilon: f64,
}

impl PathShape {
    pub fn new() -> Self {
        PathShape::from(Path::new())
    }

    pub fn with_winding_rule(winding_rule: WindingRule) -> Self {
        PathShape::from(Path::with_winding_rule(winding_rule))
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets the distance under which points are considered on the outline.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// The box of the endpoints and control points.
    pub fn control_point_bounding_box(&self) -> Box3D {
        fast_bounding_box(self.path.iter())
    }

    /// The smallest box containing the drawn outline.
    pub fn drawable_bounding_box(&self) -> Box3D {
        bounding_box(self.path.iter())
    }

    /// Length of the outline, closing edges included.
    pub fn length(&self) -> f64 {
        approximate_length(self.path.iter(), self.path.tolerance())
    }

    /// Winding number of the closed subpaths around `p`, in the XY plane.
    pub fn winding_number(&self, p: &Point) -> i32 {
        path_winding_number_at_position(p, self.path.iter(), self.path.tolerance())
    }

    /// Whether the path has a closed subpath, which gives it an interior.
    pub fn has_interior(&self) -> bool {
        self.path
            .iter()
            .any(|e| matches!(e, PathElement::Close { .. }))
    }

    /// The flattened outline as straight edges.
    ///
    /// Isolated move-to points are yielded as degenerate edges.
    pub fn outline_edges(&self) -> impl Iterator<Item = LineSegment<f64>> + '_ {
        let mut elements = self.path.flattened(self.path.tolerance()).peekable();
        std::iter::from_fn(move || loop {
            match elements.next()? {
                PathElement::MoveTo { to } => {
                    let isolated = match elements.peek() {
                        Some(next) => !next.is_drawing(),
                        None => true,
                    };
                    if isolated {
                        return Some(LineSegment { from: to, to });
                    }
                }
                PathElement::LineTo { from, to }
                | PathElement::Close {
                    last: from,
                    first: to,
                } => return Some(LineSegment { from, to }),
                _ => {}
            }
        })
    }
}

impl From<Path> for PathShape {
    fn from(path: Path) -> Self {
        PathShape {
            path,
            epsilon: QueryOptions::DEFAULT_EPSILON,
        }
    }
}

impl Default for PathShape {
    fn default() -> Self {
        PathShape::new()
    }
}

impl Deref for PathShape {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl DerefMut for PathShape {
    fn deref_mut(&mut self) -> &mut Path {
        &mut self.path
    }
}

impl Shape for PathShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Path(self)
    }

    fn options(&self) -> QueryOptions {
        QueryOptions::tolerance(self.path.tolerance()).with_epsilon(self.epsilon)
    }

    fn bounding_box(&self) -> Box3D {
        self.drawable_bounding_box()
    }

    fn contains_point(&self, p: &Point) -> bool {
        hit_test_path(
            p,
            self.path.iter(),
            self.path.winding_rule(),
            self.path.tolerance(),
            self.epsilon,
        )
    }

    /// Conservative: the four corners of the XY footprint of the box must be inside and no
    /// edge of the outline may cross the box.
    fn contains_box(&self, b: &Box3D) -> bool {
        let corners = [
            Point::new(b.min.x, b.min.y, 0.0),
            Point::new(b.max.x, b.min.y, 0.0),
            Point::new(b.min.x, b.max.y, 0.0),
            Point::new(b.max.x, b.max.y, 0.0),
        ];
        if !corners.iter().all(|c| self.contains_point(c)) {
            return false;
        }

        let e = self.epsilon;
        let interior = Box3D {
            min: Point::new(b.min.x + e, b.min.y + e, 0.0),
            max: Point::new(b.max.x - e, b.max.y - e, 0.0),
        };
        if interior.min.x > interior.max.x || interior.min.y > interior.max.y {
            return true;
        }

        !self.outline_edges().any(|edge| {
            let flat = LineSegment {
                from: Point::new(edge.from.x, edge.from.y, 0.0),
                to: Point::new(edge.to.x, edge.to.y, 0.0),
            };
            flat.intersects_box(&interior)
        })
    }

    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        if self.contains_point(p) {
            return Ok(*p);
        }

        distance::closest_point(p, self.path.iter())
            .map(|c| c.point)
            .ok_or(ShapeError::EmptyShape)
    }

    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        distance::farthest_point(p, self.path.iter(), self.path.tolerance())
            .map(|f| f.point)
            .ok_or(ShapeError::EmptyShape)
    }

    fn path_elements(&self) -> PathElements {
        Box::new(self.path.iter())
    }
}

impl ShapeMut for PathShape {
    fn translate(&mut self, by: Vector) {
        self.path.translate(by);
    }

    fn clear(&mut self) {
        self.path.clear();
    }

    fn revision(&self) -> u64 {
        self.path.revision()
    }

    fn clone_shared(&self) -> SharedShape {
        shared(self.clone())
    }
}

impl_translation_ops!(PathShape);

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{point, vector};
    use crate::path::PathError;
    use approx::assert_abs_diff_eq;

    fn fixture(close: bool) -> PathShape {
        let mut shape = PathShape::new();
        shape.move_to(point(0.0, 0.0, 0.0)).unwrap();
        shape.line_to(point(1.0, 1.0, 0.0)).unwrap();
        shape.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
        shape
            .curve_to(point(5.0, -1.0, 0.0), point(6.0, 5.0, 0.0), point(7.0, -5.0, 0.0))
            .unwrap();
        if close {
            shape.close();
        }
        shape
    }

    #[test]
    fn bounding_boxes() {
        let shape = fixture(false);
        assert_eq!(
            shape.control_point_bounding_box(),
            Box3D::new(point(0.0, -5.0, 0.0), point(7.0, 5.0, 0.0))
        );
        let b = shape.bounding_box();
        assert_abs_diff_eq!(b.min.y, -5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.x, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.y, 3.0, epsilon = 1e-9);
        assert_eq!(PathShape::new().bounding_box(), crate::math::zero_box());
    }

    #[test]
    fn nan_points_are_rejected() {
        let mut shape = PathShape::new();
        let err: Result<(), ShapeError> = shape.move_to(point(f64::NAN, 0.0, 0.0)).map_err(Into::into);
        assert_eq!(
            err,
            Err(ShapeError::Path(PathError::InvalidArgument("NaN coordinate")))
        );
        assert!(shape.is_empty());
        assert_eq!(shape.revision(), 0);
        assert!(shape.line_to(point(1.0, 1.0, 0.0)).is_err());
        assert_eq!(shape.distance(&point(0.0, 0.0, 0.0)), Err(ShapeError::EmptyShape));

        let mut shape = fixture(false);
        let revision = shape.revision();
        assert!(shape.line_to(point(8.0, f64::NAN, 0.0)).is_err());
        assert_eq!(shape.revision(), revision);
        assert_eq!(shape.current_point(), Some(point(7.0, -5.0, 0.0)));
    }

    #[test]
    fn outline_epsilon() {
        let mut shape = fixture(false);
        let near = point(0.5, 0.51, 0.0);
        assert!(!shape.contains_point(&near));

        shape.set_epsilon(0.1);
        assert_eq!(shape.options().epsilon, 0.1);
        assert!(shape.contains_point(&near));
        assert_eq!(shape.closest_point(&near).unwrap(), near);
    }

    #[test]
    fn lengths() {
        assert_abs_diff_eq!(fixture(false).length(), 14.7277, epsilon = 1e-2);
        assert_abs_diff_eq!(fixture(true).length(), 23.33, epsilon = 1e-2);
    }

    #[test]
    fn open_path_contains_its_outline_only() {
        let shape = fixture(false);
        assert!(!shape.has_interior());
        for &(x, y) in &[(-5.0, 1.0), (3.0, 6.0), (3.0, -10.0), (11.0, 1.0), (4.0, 1.0), (1.0, 0.0)] {
            assert!(!shape.contains_point(&point(x, y, 0.0)));
        }
        assert!(shape.contains_point(&point(4.0, 3.0, 0.0)));
        assert!(shape.contains_point(&point(0.5, 0.5, 0.0)));
    }

    #[test]
    fn closed_path_containment() {
        let shape = fixture(true);
        assert!(shape.has_interior());
        for &(x, y) in &[(-5.0, 1.0), (3.0, 6.0), (3.0, -10.0), (11.0, 1.0)] {
            assert!(!shape.contains_point(&point(x, y, 0.0)));
        }
        for &(x, y) in &[(4.0, 1.0), (4.0, 3.0), (1.0, 0.0), (3.0, 0.0)] {
            assert!(shape.contains_point(&point(x, y, 0.0)));
        }
        assert_eq!(shape.winding_number(&point(4.0, 1.0, 0.0)).abs(), 1);
    }

    #[test]
    fn box_containment() {
        let shape = fixture(true);
        assert!(shape.contains_box(&Box3D::new(point(3.0, 0.0, 0.0), point(5.0, 1.0, 0.0))));
        assert!(!shape.contains_box(&Box3D::new(point(4.0, 3.0, 0.0), point(6.0, 4.0, 0.0))));
        assert!(!fixture(false).contains_box(&Box3D::new(point(3.0, 0.0, 0.0), point(5.0, 1.0, 0.0))));
    }

    #[test]
    fn closest_point_on_outline() {
        let open = fixture(false);

        let p = point(-2.0, 1.0, 0.0);
        assert_eq!(open.closest_point(&p).unwrap(), point(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(open.distance(&p).unwrap(), 5.0f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(open.distance_squared(&p).unwrap(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(open.distance_l1(&p).unwrap(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(open.distance_linf(&p).unwrap(), 2.0, epsilon = 1e-9);

        let c = open.closest_point(&point(1.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(c.x, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 0.5, epsilon = 1e-9);

        let p = point(3.0, 0.0, 0.0);
        let c = open.closest_point(&p).unwrap();
        assert_abs_diff_eq!(c.x, 2.56537, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, 0.89390, epsilon = 1e-4);
        assert_abs_diff_eq!(open.distance(&p).unwrap(), 0.99396, epsilon = 1e-4);

        let p = point(1.0, -4.0, 0.0);
        assert_abs_diff_eq!(open.distance(&p).unwrap(), 17.0f64.sqrt(), epsilon = 1e-9);

        let closed = fixture(true);
        let c = closed.closest_point(&p).unwrap();
        assert_abs_diff_eq!(c.x, 2.55405, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, -1.82432, epsilon = 1e-4);
        assert_abs_diff_eq!(closed.distance(&p).unwrap(), 2.6737, epsilon = 1e-4);

        // Inside the closed path.
        let inside = point(4.0, 1.0, 0.0);
        assert_eq!(closed.closest_point(&inside).unwrap(), inside);
        assert_eq!(closed.distance(&inside).unwrap(), 0.0);
    }

    #[test]
    fn farthest_point_on_outline() {
        let open = fixture(false);
        for &(x, y) in &[(-2.0, 1.0), (1.0, 0.0), (3.0, 0.0)] {
            assert_eq!(open.farthest_point(&point(x, y, 0.0)).unwrap(), point(7.0, -5.0, 0.0));
        }
        assert_eq!(open.farthest_point(&point(1.0, -4.0, 0.0)).unwrap(), point(4.0, 3.0, 0.0));
    }

    #[test]
    fn empty_path() {
        let shape = PathShape::new();
        let p = point(1.0, 2.0, 3.0);
        assert!(!shape.contains_point(&p));
        assert_eq!(shape.closest_point(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shape.farthest_point(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shape.distance(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shape.distance_l1(&p), Err(ShapeError::EmptyShape));
    }

    #[test]
    fn translation_invariance() {
        let shape = fixture(true);
        let by = vector(10.0, -3.0, 2.0);
        let moved = shape.translated(by);
        assert_ne!(moved.revision(), shape.revision());

        for &(x, y) in &[(4.0, 1.0), (1.0, 0.0), (-5.0, 1.0), (3.0, 6.0)] {
            let p = point(x, y, 0.0);
            assert_eq!(shape.contains_point(&p), moved.contains_point(&(p + by)));
            assert_abs_diff_eq!(
                shape.distance(&p).unwrap(),
                moved.distance(&(p + by)).unwrap(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn clone_is_independent() {
        let shape = fixture(true);
        let mut copy = shape.clone();
        assert!(shape.equals_to_shape(&copy));
        assert!(shape.equals_to_elements(&mut copy.iter()));

        copy.line_to(point(0.0, 5.0, 0.0)).unwrap();
        assert!(!shape.equals_to_shape(&copy));
        assert_eq!(shape.len(), 5);
    }

    #[test]
    fn transformed_outline() {
        use crate::math::Transform;

        let shape = fixture(false);
        let transform = Transform::translation(1.0, 2.0, 3.0);
        let moved = shape.transformed(&transform).unwrap();
        assert!(moved.equals_to_shape(&shape.translated(vector(1.0, 2.0, 3.0))));
        assert_eq!(moved.first_point(), Some(point(1.0, 2.0, 3.0)));
    }
}
