//! The default path data structure.
//!

use crate::geom::traits::Transformation;
use crate::geom::utils::fuzzy_eq_point;
use crate::geom::Scalar;
use crate::iterator::{Flattened, PathIterator, Transformed};
use crate::math::*;
use crate::points::{Points, PointsMut};
use crate::polyline::Polyline;
use crate::{PathElement, PathElementType, PathError, WindingRule};

use std::fmt;

/// Default maximum distance between a curve and its flattened approximation.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Enumeration corresponding to the [`PathElement`] enum without the parameters.
///
/// This is used by the [`Path`] data structure to store path elements a tad
/// more efficiently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    MoveTo,
    LineTo,
    QuadTo,
    CurveTo,
    Close,
}

impl Verb {
    /// Number of points stored for this verb.
    #[inline]
    pub(crate) fn num_points(self) -> usize {
        match self {
            Verb::MoveTo | Verb::LineTo => 1,
            Verb::QuadTo => 2,
            Verb::CurveTo => 3,
            Verb::Close => 0,
        }
    }

    #[inline]
    fn element_type(self) -> PathElementType {
        match self {
            Verb::MoveTo => PathElementType::MoveTo,
            Verb::LineTo => PathElementType::LineTo,
            Verb::QuadTo => PathElementType::QuadTo,
            Verb::CurveTo => PathElementType::CurveTo,
            Verb::Close => PathElementType::Close,
        }
    }
}

/// A mutable 3D path.
///
/// # Representation
///
/// Paths contain two buffers:
/// - a buffer of commands (MoveTo, LineTo, QuadTo, CurveTo or Close),
/// - and a buffer of points: the endpoints and control points of the commands.
///
/// The order of storage for points is determined by the sequence of commands.
/// Close stores no point, it goes back to the point of the last move-to.
///
/// ```ascii
///  ____________________________________
/// |        |        |        |        |
/// | MoveTo | LineTo | QuadTo | Close  | ...
/// |________|________|________|________|_
///  ______________________________________
/// |          |        |          |        |
/// |start xyz | to xyz | ctrl xyz | to xyz | ...
/// |__________|________|__________|________|_
/// ```
///
/// Each path carries the winding rule used to classify points as inside or outside,
/// the tolerance used when its curves are flattened, and a revision counter that
/// changes whenever the geometry changes.
#[derive(Clone)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    pub(crate) verbs: Vec<Verb>,
    pub(crate) points: Vec<Point>,
    winding_rule: WindingRule,
    tolerance: f64,
    revision: u64,
}

impl Path {
    /// Creates an empty `Path` with the non-zero winding rule.
    #[inline]
    pub fn new() -> Path {
        Path::with_winding_rule(WindingRule::NonZero)
    }

    #[inline]
    pub fn with_winding_rule(winding_rule: WindingRule) -> Path {
        Path {
            verbs: Vec::new(),
            points: Vec::new(),
            winding_rule,
            tolerance: DEFAULT_TOLERANCE,
            revision: 0,
        }
    }

    /// Builds a path out of a sequence of elements.
    ///
    /// See [`Path::extend_from_elements`].
    pub fn from_elements<I>(elements: I) -> Result<Path, PathError>
    where
        I: IntoIterator<Item = PathElement>,
    {
        let mut path = Path::new();
        path.extend_from_elements(elements)?;

        Ok(path)
    }

    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    pub fn set_winding_rule(&mut self, winding_rule: WindingRule) {
        if self.winding_rule != winding_rule {
            self.winding_rule = winding_rule;
            self.touch();
        }
    }

    /// Maximum distance between the curves of this path and their flattened approximation.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
        self.touch();
    }

    /// A counter that changes each time the path is modified.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Starts a new subpath.
    ///
    /// A move-to directly following another move-to replaces it. Points with a NaN
    /// coordinate are rejected and leave the path untouched, the same goes for every
    /// other builder method.
    pub fn move_to(&mut self, to: Point) -> Result<(), PathError> {
        check_point(to)?;
        if self.verbs.last() == Some(&Verb::MoveTo) {
            if let Some(last) = self.points.last_mut() {
                *last = to;
            }
        } else {
            self.verbs.push(Verb::MoveTo);
            self.points.push(to);
        }
        self.touch();

        Ok(())
    }

    pub fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        self.check_started(PathElementType::LineTo)?;
        check_point(to)?;
        self.verbs.push(Verb::LineTo);
        self.points.push(to);
        self.touch();

        Ok(())
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> Result<(), PathError> {
        self.check_started(PathElementType::QuadTo)?;
        check_point(ctrl)?;
        check_point(to)?;
        self.verbs.push(Verb::QuadTo);
        self.points.push(ctrl);
        self.points.push(to);
        self.touch();

        Ok(())
    }

    pub fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Result<(), PathError> {
        self.check_started(PathElementType::CurveTo)?;
        check_point(ctrl1)?;
        check_point(ctrl2)?;
        check_point(to)?;
        self.verbs.push(Verb::CurveTo);
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.touch();

        Ok(())
    }

    /// Closes the current subpath.
    ///
    /// Does nothing if the path is empty or if the current subpath has nothing to close.
    pub fn close(&mut self) {
        match self.verbs.last() {
            None | Some(Verb::MoveTo) | Some(Verb::Close) => {}
            _ => {
                self.verbs.push(Verb::Close);
                self.touch();
            }
        }
    }

    fn check_started(&self, element: PathElementType) -> Result<(), PathError> {
        if self.verbs.is_empty() {
            log::warn!("Rejected {:?}: the path does not start with a move-to.", element);
            return Err(PathError::MissingMoveTo(element));
        }

        Ok(())
    }

    /// Appends a sequence of elements to this path.
    ///
    /// Only the endpoints and control points of the elements are used: each one continues
    /// from the current point of this path. Close elements go back to the last move-to of
    /// this path.
    pub fn extend_from_elements<I>(&mut self, elements: I) -> Result<(), PathError>
    where
        I: IntoIterator<Item = PathElement>,
    {
        for element in elements {
            match element {
                PathElement::MoveTo { to } => self.move_to(to)?,
                PathElement::LineTo { to, .. } => self.line_to(to)?,
                PathElement::QuadTo { ctrl, to, .. } => self.quad_to(ctrl, to)?,
                PathElement::CurveTo {
                    ctrl1, ctrl2, to, ..
                } => self.curve_to(ctrl1, ctrl2, to)?,
                PathElement::Close { .. } => self.close(),
            }
        }

        Ok(())
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Number of stored endpoints and control points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Coordinate at `index` in the flat `x, y, z, x, y, z, ...` view of the stored points.
    pub fn coord_at(&self, index: usize) -> Result<f64, PathError> {
        let p = self
            .points
            .get(index / 3)
            .ok_or(PathError::IndexOutOfBounds {
                index,
                len: self.points.len() * 3,
            })?;

        Ok(match index % 3 {
            0 => p.x,
            1 => p.y,
            _ => p.z,
        })
    }

    /// The point the next drawing element would start from.
    pub fn current_point(&self) -> Option<Point> {
        match self.verbs.last()? {
            Verb::Close => self.last_move_to(),
            _ => self.points.last().cloned(),
        }
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points.first().cloned()
    }

    fn last_move_to(&self) -> Option<Point> {
        let mut offset = 0;
        let mut result = None;
        for verb in &self.verbs {
            if *verb == Verb::MoveTo {
                result = self.points.get(offset).cloned();
            }
            offset += verb.num_points();
        }

        result
    }

    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.touch();
    }

    /// Replaces the last stored point.
    ///
    /// Returns false if the path is empty.
    pub fn set_last_point(&mut self, to: Point) -> Result<bool, PathError> {
        check_point(to)?;
        match self.points.last_mut() {
            Some(last) => {
                *last = to;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the last element.
    pub fn remove_last(&mut self) -> Option<PathElementType> {
        let verb = self.verbs.pop()?;
        let len = self.points.len() - verb.num_points();
        self.points.truncate(len);
        self.touch();

        Some(verb.element_type())
    }

    /// Removes the first element that stores `p` as its endpoint or one of its control points.
    ///
    /// When the removed element is a move-to followed by a drawing element, that element
    /// is turned into the move-to of its own endpoint. Returns whether an element was removed.
    pub fn remove_point(&mut self, p: Point) -> bool {
        let mut offset = 0;
        let mut found = None;
        for (i, verb) in self.verbs.iter().enumerate() {
            let n = verb.num_points();
            let stored = &self.points[offset..offset + n];
            if stored.iter().any(|q| fuzzy_eq_point(*q, p, <f64 as Scalar>::EPSILON)) {
                found = Some((i, offset));
                break;
            }
            offset += n;
        }

        let (index, offset) = match found {
            Some(found) => found,
            None => return false,
        };

        let verb = self.verbs[index];
        let n = verb.num_points();
        match self.verbs.get(index + 1).cloned() {
            Some(next) if verb == Verb::MoveTo && next != Verb::MoveTo && next != Verb::Close => {
                let end = offset + n + next.num_points();
                let to = self.points[end - 1];
                self.points.drain(offset..end);
                self.points.insert(offset, to);
                self.verbs[index + 1] = Verb::MoveTo;
            }
            _ => {
                self.points.drain(offset..offset + n);
            }
        }
        self.verbs.remove(index);
        self.normalize();
        self.touch();

        true
    }

    // Drops closes that have nothing to close and collapses consecutive move-tos.
    fn normalize(&mut self) {
        let mut verbs = Vec::with_capacity(self.verbs.len());
        let mut points = Vec::with_capacity(self.points.len());
        let mut offset = 0;
        for &verb in &self.verbs {
            let n = verb.num_points();
            let stored = &self.points[offset..offset + n];
            offset += n;
            match (verbs.last().cloned(), verb) {
                (None, Verb::Close)
                | (Some(Verb::MoveTo), Verb::Close)
                | (Some(Verb::Close), Verb::Close) => continue,
                (Some(Verb::MoveTo), Verb::MoveTo) => {
                    verbs.pop();
                    points.pop();
                }
                _ => {}
            }
            verbs.push(verb);
            points.extend_from_slice(stored);
        }
        self.verbs = verbs;
        self.points = points;
    }

    /// Whether the path contains at least one quadratic or cubic curve.
    pub fn is_curved(&self) -> bool {
        self.verbs
            .iter()
            .any(|verb| *verb == Verb::QuadTo || *verb == Verb::CurveTo)
    }

    /// Number of subpaths.
    ///
    /// Drawing elements following a close implicitly start a new subpath at the
    /// last move-to.
    pub fn num_subpaths(&self) -> usize {
        let mut count = 0;
        let mut previous = None;
        for &verb in &self.verbs {
            match (previous, verb) {
                (_, Verb::MoveTo) => count += 1,
                (Some(Verb::Close), Verb::LineTo)
                | (Some(Verb::Close), Verb::QuadTo)
                | (Some(Verb::Close), Verb::CurveTo) => count += 1,
                _ => {}
            }
            previous = Some(verb);
        }

        count
    }

    #[inline]
    pub fn is_multi_parts(&self) -> bool {
        self.num_subpaths() > 1
    }

    /// Whether the path is a single closed subpath.
    pub fn is_polygon(&self) -> bool {
        !self.is_multi_parts() && self.verbs.last() == Some(&Verb::Close)
    }

    /// Whether the path is a single open subpath made of at least one line.
    pub fn is_polyline(&self) -> bool {
        self.verbs.len() > 1
            && !self.is_multi_parts()
            && self.verbs[1..].iter().all(|verb| *verb == Verb::LineTo)
    }

    pub fn translate(&mut self, by: Vector) {
        for p in &mut self.points {
            *p += by;
        }
        self.touch();
    }

    /// Applies a transform to all of the points of the path.
    pub fn transform<T: Transformation<f64>>(&mut self, transform: &T) {
        for p in &mut self.points {
            *p = transform.transform_point(*p);
        }
        self.touch();
    }

    /// Returns a transformed copy of this path.
    pub fn transformed<T: Transformation<f64>>(mut self, transform: &T) -> Self {
        self.transform(transform);
        self
    }

    /// Iterates over the elements of the path.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.points, &self.verbs)
    }

    /// Iterates over the elements of the path with a transform applied.
    pub fn iter_transformed<'l, T: Transformation<f64>>(
        &'l self,
        transform: &'l T,
    ) -> Transformed<'l, Iter<'l>, T> {
        self.iter().transformed(transform)
    }

    /// Iterates over the elements of the path with the curves approximated by lines.
    pub fn flattened(&self, tolerance: f64) -> Flattened<Iter> {
        self.iter().flattened(tolerance)
    }

    /// A view over the endpoints and control points of the path.
    pub fn points(&self) -> Points {
        Points::new(&self.points)
    }

    /// A mutable view over the endpoints and control points of the path.
    pub fn points_mut(&mut self) -> PointsMut {
        PointsMut::new(self)
    }

    /// Each subpath flattened with the tolerance of the path.
    pub fn polylines(&self) -> Result<Vec<Polyline>, PathError> {
        Polyline::from_elements(self.flattened(self.tolerance))
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathElement;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fn write_point(formatter: &mut fmt::Formatter, point: Point) -> fmt::Result {
            write!(formatter, " {} {} {}", point.x, point.y, point.z)
        }

        write!(formatter, "\"")?;
        let mut points = self.points.iter();
        for verb in &self.verbs {
            let cmd = match verb {
                Verb::MoveTo => "M",
                Verb::LineTo => "L",
                Verb::QuadTo => "Q",
                Verb::CurveTo => "C",
                Verb::Close => "Z",
            };
            write!(formatter, " {}", cmd)?;
            for _ in 0..verb.num_points() {
                if let Some(p) = points.next() {
                    write_point(formatter, *p)?;
                }
            }
        }
        write!(formatter, "\"")
    }
}

pub(crate) fn check_point(p: Point) -> Result<(), PathError> {
    if p.x.is_nan() || p.y.is_nan() || p.z.is_nan() {
        log::warn!("Rejected point {:?} with a NaN coordinate.", p);
        return Err(PathError::InvalidArgument("NaN coordinate"));
    }

    Ok(())
}

/// An iterator for `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: std::slice::Iter<'l, Point>,
    verbs: std::slice::Iter<'l, Verb>,
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
            current: Point::origin(),
            first: Point::origin(),
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathElement;
    #[inline]
    fn next(&mut self) -> Option<PathElement> {
        match self.verbs.next()? {
            Verb::MoveTo => {
                self.current = *self.points.next()?;
                self.first = self.current;
                Some(PathElement::MoveTo { to: self.current })
            }
            Verb::LineTo => {
                let from = self.current;
                self.current = *self.points.next()?;
                Some(PathElement::LineTo {
                    from,
                    to: self.current,
                })
            }
            Verb::QuadTo => {
                let from = self.current;
                let ctrl = *self.points.next()?;
                self.current = *self.points.next()?;
                Some(PathElement::QuadTo {
                    from,
                    ctrl,
                    to: self.current,
                })
            }
            Verb::CurveTo => {
                let from = self.current;
                let ctrl1 = *self.points.next()?;
                let ctrl2 = *self.points.next()?;
                self.current = *self.points.next()?;
                Some(PathElement::CurveTo {
                    from,
                    ctrl1,
                    ctrl2,
                    to: self.current,
                })
            }
            Verb::Close => {
                let last = self.current;
                self.current = self.first;
                Some(PathElement::Close {
                    last,
                    first: self.first,
                })
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.verbs.len();
        (len, Some(len))
    }
}

#[cfg(test)]
fn fixture() -> Path {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 1.0, 0.0)).unwrap();
    path.quad_to(point(3.0, 0.0, 0.0), point(4.0, 3.0, 0.0)).unwrap();
    path.curve_to(
        point(5.0, -1.0, 0.0),
        point(6.0, 5.0, 0.0),
        point(7.0, -5.0, 0.0),
    )
    .unwrap();
    path
}

#[cfg(test)]
fn second_path() -> Path {
    let mut path = Path::new();
    path.move_to(point(7.0, -5.0, 0.0)).unwrap();
    path.line_to(point(4.0, 6.0, 0.0)).unwrap();
    path.line_to(point(0.0, 8.0, 0.0)).unwrap();
    path.line_to(point(5.0, -3.0, 0.0)).unwrap();
    path.close();
    path
}

#[cfg(test)]
fn types(path: &Path) -> Vec<PathElementType> {
    path.iter().map(|e| e.element_type()).collect()
}

#[test]
fn test_iter() {
    let path = fixture();
    let mut it = path.iter();
    assert_eq!(
        it.next(),
        Some(PathElement::MoveTo {
            to: point(0.0, 0.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathElement::LineTo {
            from: point(0.0, 0.0, 0.0),
            to: point(1.0, 1.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathElement::QuadTo {
            from: point(1.0, 1.0, 0.0),
            ctrl: point(3.0, 0.0, 0.0),
            to: point(4.0, 3.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathElement::CurveTo {
            from: point(4.0, 3.0, 0.0),
            ctrl1: point(5.0, -1.0, 0.0),
            ctrl2: point(6.0, 5.0, 0.0),
            to: point(7.0, -5.0, 0.0)
        })
    );
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);

    // Iterators restart from the beginning.
    assert_eq!(path.iter().count(), 4);
}

#[test]
fn test_missing_move_to() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut path = Path::new();
    assert_eq!(
        path.line_to(point(1.0, 2.0, 3.0)),
        Err(PathError::MissingMoveTo(PathElementType::LineTo))
    );
    assert_eq!(
        path.quad_to(point(1.0, 2.0, 3.0), point(4.0, 5.0, 6.0)),
        Err(PathError::MissingMoveTo(PathElementType::QuadTo))
    );
    assert_eq!(
        path.curve_to(
            point(1.0, 2.0, 3.0),
            point(4.0, 5.0, 6.0),
            point(7.0, 8.0, 9.0)
        ),
        Err(PathError::MissingMoveTo(PathElementType::CurveTo))
    );
    assert!(path.is_empty());
    assert_eq!(path.revision(), 0);

    // Closing an empty path is silently ignored.
    path.close();
    assert!(path.is_empty());
}

#[test]
fn test_nan_coordinates_are_rejected() {
    let _ = env_logger::builder().is_test(true).try_init();

    let nan = point(f64::NAN, 0.0, 0.0);
    let err = Err(PathError::InvalidArgument("NaN coordinate"));

    let mut path = Path::new();
    assert_eq!(path.move_to(nan), err);
    assert!(path.is_empty());
    assert_eq!(path.revision(), 0);
    assert_eq!(
        path.line_to(point(1.0, 1.0, 0.0)),
        Err(PathError::MissingMoveTo(PathElementType::LineTo))
    );

    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    let revision = path.revision();
    assert_eq!(path.move_to(point(0.0, f64::NAN, 0.0)), err);
    assert_eq!(path.line_to(point(0.0, 0.0, f64::NAN)), err);
    assert_eq!(path.quad_to(nan, point(1.0, 0.0, 0.0)), err);
    assert_eq!(path.curve_to(point(1.0, 0.0, 0.0), nan, point(2.0, 0.0, 0.0)), err);
    assert_eq!(path.set_last_point(nan).map(|_| ()), err);
    assert_eq!(path.extend_from_elements(vec![PathElement::MoveTo { to: nan }]), err);
    assert_eq!(path.current_point(), Some(point(0.0, 0.0, 0.0)));
    assert_eq!(path.revision(), revision);

    // Infinite coordinates are not NaN and go through.
    path.line_to(point(f64::INFINITY, 0.0, 0.0)).unwrap();
    assert_eq!(path.len(), 2);
}

#[test]
fn test_move_to_replaces_move_to() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0, 1.0)).unwrap();
    path.move_to(point(2.0, 2.0, 2.0)).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.current_point(), Some(point(2.0, 2.0, 2.0)));

    path.close();
    assert_eq!(path.len(), 1);
}

#[test]
fn test_close() {
    let mut path = fixture();
    path.close();
    path.close();
    assert_eq!(path.len(), 5);
    assert_eq!(path.current_point(), Some(point(0.0, 0.0, 0.0)));
    assert_eq!(
        path.iter().last(),
        Some(PathElement::Close {
            last: point(7.0, -5.0, 0.0),
            first: point(0.0, 0.0, 0.0)
        })
    );
}

#[test]
fn test_coord_at() {
    let path = fixture();
    let expected = [
        0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 3.0, 0.0, 0.0, 4.0, 3.0, 0.0, 5.0, -1.0, 0.0, 6.0, 5.0, 0.0,
        7.0, -5.0, 0.0,
    ];
    for (i, value) in expected.iter().enumerate() {
        assert_eq!(path.coord_at(i), Ok(*value));
    }
    assert_eq!(
        path.coord_at(21),
        Err(PathError::IndexOutOfBounds { index: 21, len: 21 })
    );
    assert_eq!(path.num_points(), 7);
}

#[test]
fn test_extend_open() {
    let mut path = fixture();
    let other = second_path();
    let mut it = other.iter();
    it.next();
    path.extend_from_elements(it).unwrap();

    use PathElementType::*;
    assert_eq!(
        types(&path),
        vec![MoveTo, LineTo, QuadTo, CurveTo, LineTo, LineTo, LineTo, Close]
    );
    assert_eq!(
        path.iter().last(),
        Some(PathElement::Close {
            last: point(5.0, -3.0, 0.0),
            first: point(0.0, 0.0, 0.0)
        })
    );

    // Already closed.
    path.close();
    assert_eq!(path.len(), 8);
}

#[test]
fn test_extend_after_close() {
    let mut path = fixture();
    path.close();
    let other = second_path();
    let mut it = other.iter();
    it.next();
    path.extend_from_elements(it).unwrap();

    use PathElementType::*;
    assert_eq!(
        types(&path),
        vec![MoveTo, LineTo, QuadTo, CurveTo, Close, LineTo, LineTo, LineTo, Close]
    );
    let elements: Vec<PathElement> = path.iter().collect();
    assert_eq!(
        elements[5],
        PathElement::LineTo {
            from: point(0.0, 0.0, 0.0),
            to: point(4.0, 6.0, 0.0)
        }
    );
    assert_eq!(elements[8].to(), point(0.0, 0.0, 0.0));
    assert!(path.is_multi_parts());
}

#[test]
fn test_extend_without_move_to() {
    let mut path = Path::new();
    let other = second_path();
    let mut it = other.iter();
    it.next();
    assert_eq!(
        path.extend_from_elements(it),
        Err(PathError::MissingMoveTo(PathElementType::LineTo))
    );

    let copy = Path::from_elements(other.iter()).unwrap();
    assert_eq!(types(&copy), types(&other));
}

#[test]
fn test_remove_point() {
    let mut path = fixture();
    assert!(path.remove_point(point(5.0, -1.0, 0.0)));
    assert_eq!(path.current_point(), Some(point(4.0, 3.0, 0.0)));
    assert!(path.remove_point(point(1.0, 1.0, 0.0)));
    assert_eq!(path.num_points(), 3);
    assert!(!path.remove_point(point(35.0, 35.0, 0.0)));

    // Removing the start of a subpath moves it to the end of the next element.
    assert!(path.remove_point(point(0.0, 0.0, 0.0)));
    assert_eq!(
        path.iter().collect::<Vec<_>>(),
        vec![PathElement::MoveTo {
            to: point(4.0, 3.0, 0.0)
        }]
    );
}

#[test]
fn test_remove_point_drops_empty_close() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.line_to(point(1.0, 0.0, 0.0)).unwrap();
    path.close();
    assert!(path.remove_point(point(1.0, 0.0, 0.0)));
    assert_eq!(types(&path), vec![PathElementType::MoveTo]);
}

#[test]
fn test_tolerance_drives_polylines() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0, 0.0)).unwrap();
    path.quad_to(point(5.0, 10.0, 0.0), point(10.0, 0.0, 0.0)).unwrap();
    assert_eq!(path.tolerance(), DEFAULT_TOLERANCE);

    let fine = path.polylines().unwrap()[0].points().len();
    let revision = path.revision();

    path.set_tolerance(1.0);
    assert_eq!(path.tolerance(), 1.0);
    assert_ne!(path.revision(), revision);

    let coarse = path.polylines().unwrap()[0].points().len();
    assert!(coarse < fine);
    assert!(coarse >= 2);
}

#[test]
fn test_set_last_point() {
    let mut path = fixture();
    assert_eq!(path.current_point(), Some(point(7.0, -5.0, 0.0)));
    assert_eq!(path.set_last_point(point(2.0, 2.0, 0.0)), Ok(true));
    assert_eq!(path.current_point(), Some(point(2.0, 2.0, 0.0)));
    assert_eq!(
        path.iter().last(),
        Some(PathElement::CurveTo {
            from: point(4.0, 3.0, 0.0),
            ctrl1: point(5.0, -1.0, 0.0),
            ctrl2: point(6.0, 5.0, 0.0),
            to: point(2.0, 2.0, 0.0)
        })
    );

    assert_eq!(Path::new().set_last_point(point(1.0, 1.0, 1.0)), Ok(false));
}

#[test]
fn test_remove_last() {
    let mut path = fixture();
    assert_eq!(path.remove_last(), Some(PathElementType::CurveTo));
    assert_eq!(path.num_points(), 4);
    assert_eq!(path.current_point(), Some(point(4.0, 3.0, 0.0)));
    path.clear();
    assert_eq!(path.remove_last(), None);
}

#[test]
fn test_predicates() {
    let mut path = fixture();
    assert!(path.is_curved());
    assert!(!path.is_multi_parts());
    assert!(!path.is_polygon());
    assert!(!path.is_polyline());

    path.close();
    assert!(path.is_polygon());

    path.move_to(point(1.0, 2.0, 0.0)).unwrap();
    path.move_to(point(3.0, 4.0, 0.0)).unwrap();
    path.close();
    assert!(path.is_multi_parts());
    assert!(!path.is_polygon());

    let mut lines = Path::new();
    lines.move_to(point(1.0, 2.0, 0.0)).unwrap();
    assert!(!lines.is_polyline());
    lines.line_to(point(3.0, 4.0, 0.0)).unwrap();
    assert!(lines.is_polyline());
    assert!(!lines.is_curved());
    lines.move_to(point(5.0, 6.0, 0.0)).unwrap();
    assert!(!lines.is_polyline());
    assert!(lines.is_multi_parts());

    let mut degenerate = Path::new();
    degenerate.move_to(point(3.0, 4.0, 0.0)).unwrap();
    degenerate.line_to(point(3.0, 4.0, 0.0)).unwrap();
    degenerate.close();
    assert!(degenerate.is_polygon());
}

#[test]
fn test_transform() {
    let mut path = fixture();
    path.close();
    let transform = Transform::scale(2.0, 1.0, 1.0).then_translate(vector(1.0, 2.0, 3.0));
    let transformed = path.clone().transformed(&transform);

    let expected: Vec<PathElement> = path.iter_transformed(&transform).collect();
    let actual: Vec<PathElement> = transformed.iter().collect();
    assert_eq!(actual, expected);
    assert_eq!(transformed.first_point(), Some(point(1.0, 2.0, 3.0)));
    assert_eq!(transformed.current_point(), Some(point(1.0, 2.0, 3.0)));

    let mut translated = path.clone();
    translated.translate(vector(1.0, 2.0, 3.0));
    assert_eq!(translated.points().get(6), Some(point(8.0, -3.0, 3.0)));
}

#[test]
fn test_revision() {
    let mut path = fixture();
    let r0 = path.revision();
    path.translate(vector(1.0, 0.0, 0.0));
    let r1 = path.revision();
    assert_ne!(r0, r1);
    path.set_winding_rule(WindingRule::NonZero);
    assert_eq!(path.revision(), r1);
    path.set_winding_rule(WindingRule::EvenOdd);
    assert_ne!(path.revision(), r1);
    assert_eq!(path.winding_rule(), WindingRule::EvenOdd);
}

#[test]
fn test_debug_format() {
    let mut path = Path::new();
    path.move_to(point(0.0, 1.0, 2.0)).unwrap();
    path.line_to(point(3.0, 4.0, 5.0)).unwrap();
    path.close();
    assert_eq!(format!("{:?}", path), "\" M 0 1 2 L 3 4 5 Z\"");
}
