//! Views over the endpoints and control points of a path.
//!
//! These views borrow the storage of the path, nothing is copied.

use crate::math::Point;
use crate::path::check_point;
use crate::{Path, PathError};

use std::ops::Index;

/// Read-only view over the points of a path, in storage order.
#[derive(Copy, Clone, Debug)]
pub struct Points<'l> {
    points: &'l [Point],
}

impl<'l> Points<'l> {
    pub(crate) fn new(points: &'l [Point]) -> Self {
        Points { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).cloned()
    }

    pub fn iter(&self) -> std::iter::Cloned<std::slice::Iter<'l, Point>> {
        self.points.iter().cloned()
    }
}

impl<'l> Index<usize> for Points<'l> {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'l> IntoIterator for Points<'l> {
    type Item = Point;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'l, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable view over the points of a path.
///
/// Every write counts as a modification of the path.
pub struct PointsMut<'l> {
    path: &'l mut Path,
}

impl<'l> PointsMut<'l> {
    pub(crate) fn new(path: &'l mut Path) -> Self {
        PointsMut { path }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.path.points.get(index).cloned()
    }

    pub fn set(&mut self, index: usize, p: Point) -> Result<(), PathError> {
        let len = self.path.points.len();
        let slot = self
            .path
            .points
            .get_mut(index)
            .ok_or(PathError::IndexOutOfBounds { index, len })?;
        check_point(p)?;
        *slot = p;
        self.path.touch();

        Ok(())
    }

    pub fn iter(&self) -> std::iter::Cloned<std::slice::Iter<Point>> {
        self.path.points.iter().cloned()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::point;

    fn triangle() -> Path {
        let mut path = Path::new();
        path.move_to(point(0.0, 0.0, 0.0)).unwrap();
        path.line_to(point(1.0, 0.0, 0.0)).unwrap();
        path.quad_to(point(1.0, 1.0, 0.0), point(0.0, 1.0, 1.0))
            .unwrap();
        path.close();
        path
    }

    #[test]
    fn read_view() {
        let path = triangle();
        let points = path.points();
        assert_eq!(points.len(), 4);
        assert!(!points.is_empty());
        assert_eq!(points[2], point(1.0, 1.0, 0.0));
        assert_eq!(points.get(3), Some(point(0.0, 1.0, 1.0)));
        assert_eq!(points.get(4), None);
        assert_eq!(points.iter().count(), 4);
        assert_eq!(points.into_iter().last(), Some(point(0.0, 1.0, 1.0)));
        assert!(Path::new().points().is_empty());
    }

    #[test]
    fn write_view() {
        let mut path = triangle();
        let revision = path.revision();
        {
            let mut points = path.points_mut();
            assert_eq!(points.len(), 4);
            points.set(1, point(2.0, 0.0, 0.0)).unwrap();
            assert_eq!(points.get(1), Some(point(2.0, 0.0, 0.0)));
            assert_eq!(
                points.set(4, point(0.0, 0.0, 0.0)),
                Err(PathError::IndexOutOfBounds { index: 4, len: 4 })
            );
            assert_eq!(
                points.set(0, point(0.0, f64::NAN, 0.0)),
                Err(PathError::InvalidArgument("NaN coordinate"))
            );
            assert_eq!(points.get(0), Some(point(0.0, 0.0, 0.0)));
        }
        assert_ne!(path.revision(), revision);
        assert_eq!(path.iter().nth(1).map(|e| e.to()), Some(point(2.0, 0.0, 0.0)));
    }
}
