//! Subpaths made of straight lines only.

use crate::geom::LineSegment;
use crate::iterator::FromPolyline;
use crate::math::Point;
use crate::{PathElement, PathError};

/// A sequence of points joined by straight lines, optionally closed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Polyline { points, closed }
    }

    /// Splits a sequence of flat elements into one polyline per subpath.
    ///
    /// Curves are rejected with [`PathError::UnsupportedElementType`], flatten the
    /// input first.
    pub fn from_elements<I>(elements: I) -> Result<Vec<Polyline>, PathError>
    where
        I: IntoIterator<Item = PathElement>,
    {
        let mut result = Vec::new();
        let mut current: Option<Polyline> = None;
        for element in elements {
            match element {
                PathElement::MoveTo { to } => {
                    result.extend(current.take());
                    current = Some(Polyline::new(vec![to], false));
                }
                PathElement::LineTo { from, to } => {
                    current
                        .get_or_insert_with(|| Polyline::new(vec![from], false))
                        .points
                        .push(to);
                }
                PathElement::Close { .. } => {
                    if let Some(mut polyline) = current.take() {
                        polyline.closed = true;
                        result.push(polyline);
                    }
                }
                PathElement::QuadTo { .. } | PathElement::CurveTo { .. } => {
                    return Err(PathError::UnsupportedElementType(element.element_type()));
                }
            }
        }
        result.extend(current);

        Ok(result)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The straight edges, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment<f64>> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 1 => Some(LineSegment {
                from: last,
                to: first,
            }),
            _ => None,
        };

        self.points
            .windows(2)
            .map(|pair| LineSegment {
                from: pair[0],
                to: pair[1],
            })
            .chain(closing)
    }

    pub fn length(&self) -> f64 {
        self.edges().map(|edge| edge.length()).sum()
    }

    /// Iterates over the polyline as path elements.
    pub fn iter(&self) -> FromPolyline<std::iter::Cloned<std::slice::Iter<Point>>> {
        FromPolyline::new(self.closed, self.points.iter().cloned())
    }
}
