//! Composite shapes.
//!
//! A [`MultiShape`] owns an ordered list of shared child shapes and answers the shape
//! queries by delegating to them, in insertion order.
//!
//! The children are shared handles: they can be mutated after insertion, through the handle
//! or through another composite holding the same handle. The bounding box of the composite
//! is cached and validated against the revision counters of the children on each read.

use crate::geom::utils::box_union;
use crate::math::{zero_box, Box3D, Point, Vector};
use crate::path::PathElement;
use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
use crate::{QueryOptions, ShapeError};

use parking_lot::Mutex;

use std::sync::Arc;

#[derive(Clone, Debug)]
struct CachedBounds {
    revisions: Vec<u64>,
    bounds: Box3D,
}

/// An ordered collection of shapes, queried as a single shape.
///
/// # Example
///
/// ```
/// use afp_shapes::{shared, AlignedBox, MultiShape, Shape, Sphere};
/// use afp_shapes::math::point;
///
/// let mut shapes = MultiShape::new();
/// let b = shapes.add_shape(AlignedBox::new(point(5.0, 8.0, 0.0), point(7.0, 9.0, 0.0)).unwrap());
/// shapes.add(shared(Sphere::new(point(-5.0, 18.0, 0.0), 2.0).unwrap()));
///
/// assert!(shapes.contains_point(&point(-4.0, 19.0, 0.0)));
///
/// let first = shapes.first_shape_containing(&point(6.0, 8.25, 0.0)).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &b));
/// ```
#[derive(Debug)]
pub struct MultiShape {
    children: Vec<SharedShape>,
    // Also absorbs the revisions of the removed children so that the sum with the revisions
    // of the remaining children never goes back to a previous value.
    revision: u64,
    options: QueryOptions,
    bounds: Mutex<Option<CachedBounds>>,
}

impl MultiShape {
    pub fn new() -> Self {
        MultiShape {
            children: Vec::new(),
            revision: 0,
            options: QueryOptions::DEFAULT,
            bounds: Mutex::new(None),
        }
    }

    pub fn with_options(options: QueryOptions) -> Self {
        MultiShape {
            options,
            ..MultiShape::new()
        }
    }

    pub fn set_options(&mut self, options: QueryOptions) {
        self.options = options;
    }

    #[inline]
    pub fn children(&self) -> &[SharedShape] {
        &self.children
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SharedShape> {
        self.children.get(index)
    }

    /// Appends a shape.
    pub fn add(&mut self, shape: SharedShape) {
        log::trace!("composite: add child #{}", self.children.len());
        self.children.push(shape);
        self.invalidate();
    }

    /// Wraps a shape into a shared handle, appends it and returns the handle.
    pub fn add_shape<S: ShapeMut + 'static>(&mut self, shape: S) -> SharedShape {
        let handle = shared(shape);
        self.add(Arc::clone(&handle));
        handle
    }

    /// Removes the first child that is the same handle as `shape`.
    ///
    /// Returns whether a child was removed.
    pub fn remove(&mut self, shape: &SharedShape) -> bool {
        let index = match self.children.iter().position(|c| same_handle(c, shape)) {
            Some(index) => index,
            None => return false,
        };

        log::trace!("composite: remove child #{}", index);
        let removed = self.children.remove(index);
        self.retire(&removed);
        self.invalidate();

        true
    }

    /// The first child containing the point, in insertion order.
    pub fn first_shape_containing(&self, p: &Point) -> Option<SharedShape> {
        self.children
            .iter()
            .find(|c| c.read().contains_point(p))
            .cloned()
    }

    /// All of the children containing the point, in insertion order.
    pub fn shapes_containing(&self, p: &Point) -> Vec<SharedShape> {
        self.children
            .iter()
            .filter(|c| c.read().contains_point(p))
            .cloned()
            .collect()
    }

    /// The first child intersecting the shape, in insertion order.
    pub fn first_shape_intersecting(&self, other: &dyn Shape) -> Option<SharedShape> {
        self.children
            .iter()
            .find(|c| c.read().intersects(other))
            .cloned()
    }

    /// All of the children intersecting the shape, in insertion order.
    pub fn shapes_intersecting(&self, other: &dyn Shape) -> Vec<SharedShape> {
        self.children
            .iter()
            .filter(|c| c.read().intersects(other))
            .cloned()
            .collect()
    }

    fn retire(&mut self, child: &SharedShape) {
        let r = child.read().revision();
        self.revision = self.revision.wrapping_add(r).wrapping_add(1);
    }

    fn invalidate(&mut self) {
        *self.bounds.get_mut() = None;
    }

    /// Picks the best answer of the children according to its square distance to `p`.
    ///
    /// Children without geometry are skipped, ties go to the first child.
    fn select<F, B>(&self, p: Point, query: F, better: B) -> Result<Point, ShapeError>
    where
        F: Fn(&dyn ShapeMut) -> Result<Point, ShapeError>,
        B: Fn(f64, f64) -> bool,
    {
        let mut best: Option<(Point, f64)> = None;
        for child in &self.children {
            let candidate = match query(&*child.read()) {
                Ok(candidate) => candidate,
                Err(ShapeError::EmptyShape) => continue,
                Err(e) => return Err(e),
            };
            let d = (candidate - p).square_length();
            match best {
                Some((_, best_d)) if !better(d, best_d) => {}
                _ => best = Some((candidate, d)),
            }
        }

        best.map(|(p, _)| p).ok_or(ShapeError::EmptyShape)
    }

    /// The smallest value of a distance metric over the children.
    ///
    /// Each metric is minimized on its own: the child nearest in one metric is not
    /// always the nearest in another.
    fn min_metric<F>(&self, metric: F) -> Result<f64, ShapeError>
    where
        F: Fn(&dyn ShapeMut) -> Result<f64, ShapeError>,
    {
        let mut min: Option<f64> = None;
        for child in &self.children {
            let d = match metric(&*child.read()) {
                Ok(d) => d,
                Err(ShapeError::EmptyShape) => continue,
                Err(e) => return Err(e),
            };
            min = Some(match min {
                Some(m) if m <= d => m,
                _ => d,
            });
        }

        min.ok_or(ShapeError::EmptyShape)
    }
}

fn same_handle(a: &SharedShape, b: &SharedShape) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const u8, Arc::as_ptr(b) as *const u8)
}

impl Default for MultiShape {
    fn default() -> Self {
        MultiShape::new()
    }
}

/// Deep copy: the children of the copy are new handles.
impl Clone for MultiShape {
    fn clone(&self) -> Self {
        MultiShape {
            children: self.children.iter().map(|c| c.read().clone_shared()).collect(),
            revision: self.revision,
            options: self.options,
            bounds: Mutex::new(None),
        }
    }
}

impl Shape for MultiShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Multi(self)
    }

    fn options(&self) -> QueryOptions {
        self.options
    }

    /// The union of the bounding boxes of the children, or the zero box if there is none.
    fn bounding_box(&self) -> Box3D {
        let revisions: Vec<u64> = self.children.iter().map(|c| c.read().revision()).collect();

        let mut cache = self.bounds.lock();
        if let Some(cached) = &*cache {
            if cached.revisions == revisions {
                return cached.bounds;
            }
        }

        let bounds = self
            .children
            .iter()
            .map(|c| c.read().bounding_box())
            .fold(None, |acc: Option<Box3D>, b| match acc {
                Some(acc) => Some(box_union(&acc, &b)),
                None => Some(b),
            })
            .unwrap_or_else(zero_box);

        log::debug!(
            "composite: rebuilt bounds of {} children: {:?}",
            self.children.len(),
            bounds
        );
        *cache = Some(CachedBounds { revisions, bounds });

        bounds
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.children.iter().any(|c| c.read().contains_point(p))
    }

    /// Conservative: a box split across several children is not contained.
    fn contains_box(&self, b: &Box3D) -> bool {
        self.children.iter().any(|c| c.read().contains_box(b))
    }

    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        self.select(*p, |c| c.closest_point(p), |d, best| d < best)
    }

    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        self.select(*p, |c| c.farthest_point(p), |d, best| d > best)
    }

    fn distance_squared(&self, p: &Point) -> Result<f64, ShapeError> {
        self.min_metric(|c| c.distance_squared(p))
    }

    fn distance(&self, p: &Point) -> Result<f64, ShapeError> {
        self.min_metric(|c| c.distance(p))
    }

    fn distance_l1(&self, p: &Point) -> Result<f64, ShapeError> {
        self.min_metric(|c| c.distance_l1(p))
    }

    fn distance_linf(&self, p: &Point) -> Result<f64, ShapeError> {
        self.min_metric(|c| c.distance_linf(p))
    }

    fn path_elements(&self) -> PathElements {
        let elements: Vec<PathElement> = self
            .children
            .iter()
            .flat_map(|c| {
                let child = c.read();
                let elements: Vec<PathElement> = child.path_elements().collect();
                elements
            })
            .collect();

        Box::new(elements.into_iter())
    }
}

impl ShapeMut for MultiShape {
    fn translate(&mut self, by: Vector) {
        for child in &self.children {
            child.write().translate(by);
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Removes all of the children.
    fn clear(&mut self) {
        log::trace!("composite: clear {} children", self.children.len());
        for child in std::mem::take(&mut self.children) {
            self.retire(&child);
        }
        self.invalidate();
    }

    fn revision(&self) -> u64 {
        self.children
            .iter()
            .fold(self.revision, |r, c| r.wrapping_add(c.read().revision()))
    }

    fn clone_shared(&self) -> SharedShape {
        shared(self.clone())
    }
}

impl_translation_ops!(MultiShape);

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{point, size, vector};
    use crate::{AlignedBox, PathShape, Segment, Sphere};
    use approx::assert_abs_diff_eq;
    use parking_lot::RwLock;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn same(a: &SharedShape, b: &SharedShape) -> bool {
        same_handle(a, b)
    }

    // A box over x in [5, 7] and y in [8, 9], then a ball of radius 2 at (-5, 18).
    fn scene() -> (MultiShape, SharedShape, SharedShape) {
        let mut shapes = MultiShape::new();
        let b = shapes.add_shape(
            AlignedBox::from_corner_and_size(point(5.0, 8.0, 0.0), size(2.0, 1.0, 1.0)).unwrap(),
        );
        let s = shapes.add_shape(Sphere::new(point(-5.0, 18.0, 0.0), 2.0).unwrap());

        (shapes, b, s)
    }

    #[test]
    fn composite_queries() {
        init_logger();
        let (shapes, b, s) = scene();

        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 20.0, 2.0))
        );

        assert!(shapes.contains_point(&point(6.0, 8.25, 0.0)));
        assert!(shapes.contains_point(&point(-4.0, 19.0, 0.0)));
        assert!(!shapes.contains_point(&point(0.0, 0.0, 0.0)));

        let first = shapes.first_shape_containing(&point(6.0, 8.25, 0.0)).unwrap();
        assert!(same(&first, &b));
        let first = shapes.first_shape_containing(&point(-4.0, 19.0, 0.0)).unwrap();
        assert!(same(&first, &s));
        assert!(shapes.first_shape_containing(&point(0.0, 0.0, 0.0)).is_none());

        assert!(shapes.contains_box(&Box3D::new(point(5.5, 8.5, 0.0), point(6.0, 9.0, 1.0))));
        // Spans both children, which none of them contains on its own.
        assert!(!shapes.contains_box(&Box3D::new(point(-5.0, 8.5, 0.0), point(6.0, 18.0, 0.0))));
    }

    #[test]
    fn closest_and_farthest_across_children() {
        let (shapes, _, _) = scene();
        let p = point(0.0, 8.5, 0.5);

        assert_eq!(shapes.closest_point(&p).unwrap(), point(5.0, 8.5, 0.5));
        assert_eq!(shapes.distance(&p).unwrap(), 5.0);
        assert_eq!(shapes.distance_l1(&p).unwrap(), 5.0);

        let farthest = shapes.farthest_point(&p).unwrap();
        assert_abs_diff_eq!((farthest - p).length(), 115.5f64.sqrt() + 2.0, epsilon = 1e-9);

        let inside = point(6.0, 8.25, 0.5);
        assert_eq!(shapes.closest_point(&inside).unwrap(), inside);
        assert_eq!(shapes.distance(&inside).unwrap(), 0.0);
        assert_eq!(shapes.distance_linf(&inside).unwrap(), 0.0);
    }

    // Same layout as `scene`, with the box flattened onto the z = 0 plane.
    fn flat_scene() -> (MultiShape, SharedShape, SharedShape) {
        let mut shapes = MultiShape::new();
        let b = shapes.add_shape(
            AlignedBox::from_corner_and_size(point(5.0, 8.0, 0.0), size(2.0, 1.0, 0.0)).unwrap(),
        );
        let s = shapes.add_shape(Sphere::new(point(-5.0, 18.0, 0.0), 2.0).unwrap());

        (shapes, b, s)
    }

    // (x, y, distance, l1, linf, farthest x, farthest y), all in the z = 0 plane.
    const FLAT_SCENE_QUERIES: [(f64, f64, f64, f64, f64, f64, f64); 12] = [
        (-10.0, 2.0, 14.76305, 18.49449, 14.09104, -4.40345, 19.90896),
        (-10.0, 14.0, 4.40312, 6.18887, 3.43826, 7.0, 8.0),
        (-10.0, 25.0, 6.60233, 9.21006, 5.37253, 7.0, 8.0),
        (-1.0, 25.0, 6.06226, 8.27123, 5.26351, 7.0, 8.0),
        (1.0, 2.0, 7.21110, 10.0, 6.0, -5.70225, 19.87266),
        (12.0, 2.0, 7.81025, 11.0, 6.0, -6.4564, 19.37073),
        (12.0, 14.0, 7.07107, 10.0, 5.0, -6.94683, 18.45808),
        (12.0, 25.0, 16.38478, 21.0, 15.15064, -6.84936, 17.2385),
        (-6.0, 8.0, 8.04988, 8.81092, 8.00993, 7.0, 9.0),
        (4.0, 17.0, 7.05538, 7.79137, 7.01223, -6.98777, 18.22086),
        (-4.0, 19.0, 0.0, 0.0, 0.0, 7.0, 8.0),
        (6.0, 8.25, 0.0, 0.0, 0.0, -6.49669, 19.32662),
    ];

    #[test]
    fn flat_scene_point_queries() {
        init_logger();
        let (shapes, _, _) = flat_scene();

        for (i, &(x, y, d, l1, linf, fx, fy)) in FLAT_SCENE_QUERIES.iter().enumerate() {
            let p = point(x, y, 0.0);
            assert_abs_diff_eq!(shapes.distance(&p).unwrap(), d, epsilon = 1e-3);
            assert_abs_diff_eq!(shapes.distance_squared(&p).unwrap(), d * d, epsilon = 1e-2);
            assert_abs_diff_eq!(shapes.distance_l1(&p).unwrap(), l1, epsilon = 1e-3);
            assert_abs_diff_eq!(shapes.distance_linf(&p).unwrap(), linf, epsilon = 1e-3);

            let farthest = shapes.farthest_point(&p).unwrap();
            assert_abs_diff_eq!(farthest.x, fx, epsilon = 1e-3);
            assert_abs_diff_eq!(farthest.y, fy, epsilon = 1e-3);
            assert_eq!(farthest.z, 0.0);

            assert_eq!(shapes.contains_point(&p), i >= 10, "{:?}", p);
        }
    }

    #[test]
    fn metrics_are_minimized_independently() {
        let (shapes, b, s) = flat_scene();
        let p = point(12.0, 25.0, 0.0);

        let metrics = |shape: &SharedShape| {
            let shape = shape.read();
            (
                shape.distance(&p).unwrap(),
                shape.distance_l1(&p).unwrap(),
                shape.distance_linf(&p).unwrap(),
            )
        };
        let (ball_d, ball_l1, ball_linf) = metrics(&s);
        let (box_d, box_l1, _) = metrics(&b);

        // The ball is nearer in euclidean distance, the box is nearer in taxicab distance.
        assert!(ball_d < box_d);
        assert!(box_l1 < ball_l1);

        assert_eq!(shapes.distance(&p).unwrap(), ball_d);
        assert_abs_diff_eq!(shapes.distance_squared(&p).unwrap(), ball_d * ball_d, epsilon = 1e-9);
        assert_eq!(shapes.distance_l1(&p).unwrap(), box_l1);
        assert_abs_diff_eq!(box_l1, 21.0, epsilon = 1e-9);
        assert_eq!(shapes.distance_linf(&p).unwrap(), ball_linf);

        // Nested composites minimize each metric the same way.
        let mut outer = MultiShape::new();
        outer.add_shape(shapes.clone());
        assert_abs_diff_eq!(outer.distance_l1(&p).unwrap(), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn flat_scene_box_queries() {
        let (shapes, _, _) = flat_scene();
        let cases = [
            (-20.0, 14.0, false, false),
            (-2.0, -10.0, false, false),
            (-6.0, 16.0, false, true),
            (4.75, 8.0, false, true),
            (-4.0, 18.0, true, true),
            (5.5, 8.5, true, true),
        ];

        for &(x, y, contained, touched) in &cases {
            let min = point(x, y, 0.0);
            let max = point(x + 0.5, y + 0.5, 0.0);
            assert_eq!(shapes.contains_box(&Box3D::new(min, max)), contained, "{:?}", min);

            let aabb = AlignedBox::new(min, max).unwrap();
            assert_eq!(shapes.intersects(&aabb), touched, "{:?}", min);
            assert_eq!(aabb.intersects(&shapes), touched, "{:?}", min);

            let ball = Sphere::new(min, 0.5).unwrap();
            assert_eq!(shapes.intersects(&ball), touched, "{:?}", min);
        }
    }

    #[test]
    fn flat_scene_polylines_intersect_once_closed() {
        let (shapes, b, s) = flat_scene();
        let polylines: [&[(f64, f64)]; 3] = [
            &[(-6.0, 2.0), (10.0, 6.0), (8.0, 14.0), (-4.0, 12.0), (-12.0, 22.0), (6.0, 20.0)],
            &[(-6.0, 2.0), (10.0, 6.0), (8.0, 14.0), (-4.0, 12.0), (6.0, 20.0)],
            &[(-6.0, 2.0), (8.0, 14.0), (-4.0, 12.0), (-12.0, 22.0), (6.0, 20.0)],
        ];

        for (i, polyline) in polylines.iter().enumerate() {
            let mut path = PathShape::new();
            path.move_to(point(polyline[0].0, polyline[0].1, 0.0)).unwrap();
            for &(x, y) in &polyline[1..] {
                path.line_to(point(x, y, 0.0)).unwrap();
            }
            assert!(!shapes.intersects(&path), "open polyline {}", i);

            path.close();
            assert!(shapes.intersects(&path), "closed polyline {}", i);

            if i == 0 {
                // The closed outline surrounds both children without crossing them.
                let all = shapes.shapes_intersecting(&path);
                assert_eq!(all.len(), 2);
                assert!(same(&all[0], &b));
                assert!(same(&all[1], &s));
            }
        }
    }

    #[test]
    fn queries_follow_translation() {
        let (shapes, _, _) = flat_scene();
        let v = vector(-3.0, 11.0, 4.0);
        let moved = shapes.translated(v);

        for &(x, y, ..) in &FLAT_SCENE_QUERIES {
            let p = point(x, y, 0.0);
            let q = p + v;
            let d = shapes.distance(&p).unwrap();
            let l1 = shapes.distance_l1(&p).unwrap();
            let linf = shapes.distance_linf(&p).unwrap();
            assert_abs_diff_eq!(moved.distance(&q).unwrap(), d, epsilon = 1e-9);
            assert_abs_diff_eq!(moved.distance_l1(&q).unwrap(), l1, epsilon = 1e-9);
            assert_abs_diff_eq!(moved.distance_linf(&q).unwrap(), linf, epsilon = 1e-9);
            let far = moved.farthest_point(&q).unwrap() - v;
            let expected = shapes.farthest_point(&p).unwrap();
            assert_abs_diff_eq!((far - expected).length(), 0.0, epsilon = 1e-9);
            assert_eq!(moved.contains_point(&q), shapes.contains_point(&p));
        }
    }

    #[test]
    fn first_match_follows_insertion_order() {
        let mut shapes = MultiShape::new();
        let s1 = shapes.add_shape(Sphere::new(point(0.0, 0.0, 0.0), 2.0).unwrap());
        let s2 = shapes.add_shape(Sphere::new(point(1.0, 0.0, 0.0), 2.0).unwrap());
        let s3 = shapes.add_shape(Sphere::new(point(10.0, 0.0, 0.0), 1.0).unwrap());

        let p = point(0.5, 0.0, 0.0);
        assert!(same(&shapes.first_shape_containing(&p).unwrap(), &s1));
        let all = shapes.shapes_containing(&p);
        assert_eq!(all.len(), 2);
        assert!(same(&all[0], &s1));
        assert!(same(&all[1], &s2));

        let line = Segment::new(point(2.5, 0.0, 0.0), point(9.5, 0.0, 0.0)).unwrap();
        assert!(same(&shapes.first_shape_intersecting(&line).unwrap(), &s2));
        let all = shapes.shapes_intersecting(&line);
        assert_eq!(all.len(), 2);
        assert!(same(&all[0], &s2));
        assert!(same(&all[1], &s3));

        let far = Sphere::new(point(0.0, 50.0, 0.0), 1.0).unwrap();
        assert!(shapes.first_shape_intersecting(&far).is_none());
        assert!(shapes.shapes_intersecting(&far).is_empty());
        assert!(!shapes.intersects(&far));
        assert!(far.intersects(&shapes) == shapes.intersects(&far));
    }

    #[test]
    fn options_set_the_contact_distance() {
        let base = Segment::new(point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)).unwrap();
        let above = Segment::new(point(0.5, 0.05, 0.0), point(0.5, 1.0, 0.0)).unwrap();

        let mut shapes = MultiShape::new();
        shapes.add_shape(base);
        assert_eq!(shapes.options(), QueryOptions::DEFAULT);
        assert!(!shapes.intersects(&above));

        shapes.set_options(QueryOptions::DEFAULT.with_epsilon(0.1));
        assert!(shapes.intersects(&above));

        let mut loose = MultiShape::with_options(QueryOptions::DEFAULT.with_epsilon(0.1));
        loose.add_shape(base);
        assert_eq!(loose.options().epsilon, 0.1);
        assert!(loose.intersects(&above));
        assert!(loose.clone().intersects(&above));
    }

    #[test]
    fn bounds_follow_mutated_children() {
        init_logger();
        let (mut shapes, _, _) = scene();
        let ball = Arc::new(RwLock::new(Sphere::new(point(0.0, 30.0, 0.0), 1.0).unwrap()));
        let handle: SharedShape = ball.clone();
        shapes.add(Arc::clone(&handle));

        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 31.0, 2.0))
        );

        let revision = shapes.revision();
        ball.write().set_radius(3.0).unwrap();
        assert_ne!(shapes.revision(), revision);
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -3.0), point(7.0, 33.0, 3.0))
        );

        handle.write().translate(vector(0.0, 0.0, 10.0));
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 33.0, 13.0))
        );
    }

    #[test]
    fn removed_children_no_longer_count() {
        let (mut shapes, b, s) = scene();
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 20.0, 2.0))
        );

        let revision = shapes.revision();
        assert!(shapes.remove(&s));
        assert!(shapes.revision() > revision);
        assert!(!shapes.remove(&s));
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(5.0, 8.0, 0.0), point(7.0, 9.0, 1.0))
        );

        s.write().translate(vector(100.0, 0.0, 0.0));
        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(5.0, 8.0, 0.0), point(7.0, 9.0, 1.0))
        );
        assert!(!shapes.contains_point(&point(-4.0, 19.0, 0.0)));

        let revision = shapes.revision();
        shapes.clear();
        assert!(shapes.revision() > revision);
        assert!(shapes.is_empty());
        assert_eq!(shapes.bounding_box(), zero_box());

        // Still usable on its own.
        assert!(b.read().contains_point(&point(6.0, 8.5, 0.5)));
    }

    #[test]
    fn nested_composites() {
        let (inner, b, _) = scene();
        let mut outer = MultiShape::new();
        outer.add_shape(inner);
        outer.add_shape(Segment::new(point(0.0, 0.0, 0.0), point(1.0, 1.0, 1.0)).unwrap());

        assert_eq!(
            outer.bounding_box(),
            Box3D::new(point(-7.0, 0.0, -2.0), point(7.0, 20.0, 2.0))
        );

        b.write().translate(vector(10.0, 0.0, 0.0));
        assert_eq!(
            outer.bounding_box(),
            Box3D::new(point(-7.0, 0.0, -2.0), point(17.0, 20.0, 2.0))
        );
        assert!(outer.contains_point(&point(16.0, 8.5, 0.5)));
    }

    #[test]
    fn translation_moves_every_child() {
        let (mut shapes, b, _) = scene();
        shapes += vector(1.0, -8.0, 0.0);

        assert_eq!(
            shapes.bounding_box(),
            Box3D::new(point(-6.0, 0.0, -2.0), point(8.0, 12.0, 2.0))
        );
        assert_eq!(
            b.read().bounding_box(),
            Box3D::new(point(6.0, 0.0, 0.0), point(8.0, 1.0, 1.0))
        );
    }

    #[test]
    fn clone_is_deep() {
        let (shapes, b, _) = scene();
        let copy = shapes.clone();
        let moved = shapes.translated(vector(0.0, 0.0, 5.0));

        b.write().translate(vector(-20.0, 0.0, 0.0));

        assert_eq!(
            copy.bounding_box(),
            Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 20.0, 2.0))
        );
        assert_eq!(
            moved.bounding_box(),
            Box3D::new(point(-7.0, 8.0, 3.0), point(7.0, 20.0, 7.0))
        );
        assert!(!same(&copy.children()[0], &b));
        assert!(copy.contains_point(&point(6.0, 8.25, 0.0)));
        assert!(!shapes.contains_point(&point(6.0, 8.25, 0.0)));
    }

    #[test]
    fn outline_is_the_concatenation_of_the_children() {
        let mut shapes = MultiShape::new();
        let seg = Segment::new(point(0.0, 0.0, 0.0), point(1.0, 1.0, 0.0)).unwrap();
        let aabb = AlignedBox::new(point(2.0, 2.0, 0.0), point(3.0, 3.0, 0.0)).unwrap();
        shapes.add_shape(seg);
        shapes.add_shape(aabb);

        let mut expected: Vec<PathElement> = seg.path_elements().collect();
        expected.extend(aabb.path_elements());
        assert_eq!(expected.len(), 7);

        let elements: Vec<PathElement> = shapes.path_elements().collect();
        assert_eq!(elements, expected);
        assert!(shapes.equals_to_elements(&mut expected.into_iter()));
    }

    #[test]
    fn empty_composite() {
        let mut shapes = MultiShape::new();
        let p = point(1.0, 2.0, 3.0);

        assert_eq!(shapes.bounding_box(), zero_box());
        assert!(!shapes.contains_point(&p));
        assert_eq!(shapes.closest_point(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shapes.farthest_point(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shapes.distance(&p), Err(ShapeError::EmptyShape));
        assert_eq!(shapes.path_elements().count(), 0);

        // Children without geometry do not help.
        shapes.add_shape(PathShape::new());
        assert_eq!(shapes.closest_point(&p), Err(ShapeError::EmptyShape));
    }

    #[test]
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MultiShape>();
        assert_send_sync::<SharedShape>();

        let (shapes, _, _) = scene();
        let shapes = Arc::new(shapes);
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let shapes = Arc::clone(&shapes);
                std::thread::spawn(move || shapes.bounding_box())
            })
            .collect();

        for worker in workers {
            assert_eq!(
                worker.join().unwrap(),
                Box3D::new(point(-7.0, 8.0, -2.0), point(7.0, 20.0, 2.0))
            );
        }
    }
}
