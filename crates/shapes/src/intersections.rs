//! Pairwise intersection tests between shapes.
//!
//! Boxes are compared with open intervals, so boxes sharing a face do not intersect,
//! unless one of them is flat along that axis. The other pairs touch when their
//! boundaries meet.
//!
//! A path intersects another shape when:
//!
//! - its flattened outline meets the shape,
//! - or it has a closed subpath and a point of the other shape is inside it,
//! - or its first point is inside the other shape.

use crate::aligned_box::AlignedBox;
use crate::geom::LineSegment;
use crate::math::Point;
use crate::multi_shape::MultiShape;
use crate::segment::Segment;
use crate::shape::{Shape, ShapeKind};
use crate::sphere::Sphere;
use crate::{PathShape, QueryOptions};

/// Returns whether two shapes intersect.
pub fn intersects(a: ShapeKind, b: ShapeKind, options: &QueryOptions) -> bool {
    match (a, b) {
        (ShapeKind::Multi(m), other) | (other, ShapeKind::Multi(m)) => {
            multi_intersects(m, other, options)
        }
        (ShapeKind::Path(p), other) | (other, ShapeKind::Path(p)) => {
            path_intersects(p, other, options)
        }
        (ShapeKind::AlignedBox(a), ShapeKind::AlignedBox(b)) => box_intersects_box(a, b),
        (ShapeKind::AlignedBox(b), ShapeKind::Sphere(s))
        | (ShapeKind::Sphere(s), ShapeKind::AlignedBox(b)) => box_intersects_sphere(b, s),
        (ShapeKind::Sphere(a), ShapeKind::Sphere(b)) => sphere_intersects_sphere(a, b),
        (ShapeKind::Segment(s), ShapeKind::AlignedBox(b))
        | (ShapeKind::AlignedBox(b), ShapeKind::Segment(s)) => {
            !b.is_empty() && s.line().intersects_box(&b.to_box3d())
        }
        (ShapeKind::Segment(s), ShapeKind::Sphere(c))
        | (ShapeKind::Sphere(c), ShapeKind::Segment(s)) => {
            s.line().intersects_sphere(c.center(), c.radius())
        }
        (ShapeKind::Segment(a), ShapeKind::Segment(b)) => {
            a.line().intersects(&b.line(), options.epsilon)
        }
    }
}

pub fn box_intersects_box(a: &AlignedBox, b: &AlignedBox) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let axis = |amin: f64, amax: f64, bmin: f64, bmax: f64| {
        if amin == amax || bmin == bmax {
            amin <= bmax && bmin <= amax
        } else {
            amin < bmax && bmin < amax
        }
    };

    let (amin, amax, bmin, bmax) = (a.min(), a.max(), b.min(), b.max());
    axis(amin.x, amax.x, bmin.x, bmax.x)
        && axis(amin.y, amax.y, bmin.y, bmax.y)
        && axis(amin.z, amax.z, bmin.z, bmax.z)
}

pub fn box_intersects_sphere(b: &AlignedBox, s: &Sphere) -> bool {
    if b.is_empty() {
        return false;
    }

    let closest = s.center().clamp(b.min(), b.max());
    (closest - s.center()).square_length() <= s.radius() * s.radius()
}

pub fn sphere_intersects_sphere(a: &Sphere, b: &Sphere) -> bool {
    let r = a.radius() + b.radius();
    (a.center() - b.center()).square_length() <= r * r
}

fn multi_intersects(m: &MultiShape, other: ShapeKind, options: &QueryOptions) -> bool {
    m.children().iter().any(|child| {
        let child = child.read();
        intersects(child.kind(), other, options)
    })
}

/// A point of the shape, used to detect shapes lying entirely inside a path.
fn representative_point(shape: ShapeKind) -> Option<Point> {
    match shape {
        ShapeKind::Segment(s) => Some(s.p1()),
        ShapeKind::AlignedBox(b) if !b.is_empty() => Some(b.min()),
        ShapeKind::AlignedBox(_) => None,
        ShapeKind::Sphere(s) => Some(s.center()),
        ShapeKind::Path(p) => p.first_point(),
        ShapeKind::Multi(_) => None,
    }
}

fn path_intersects(path: &PathShape, other: ShapeKind, options: &QueryOptions) -> bool {
    let meets = |edge: LineSegment<f64>| {
        let edge = Segment::from(edge);
        match other {
            // Compare edges pairwise instead of recursing into the whole path test.
            ShapeKind::Path(p) => p
                .outline_edges()
                .any(|e| edge.line().intersects(&e, options.epsilon)),
            _ => intersects(ShapeKind::Segment(&edge), other, options),
        }
    };
    if path.outline_edges().any(meets) {
        return true;
    }

    if path.has_interior() {
        if let Some(p) = representative_point(other) {
            if path.contains_point(&p) {
                return true;
            }
        }
    }

    match path.first_point() {
        Some(p) => other.as_shape().contains_point(&p),
        None => false,
    }
}
