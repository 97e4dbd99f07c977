#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures and traits to work with 3D paths.
//!
//! A [`Path`] is a sequence of move-to, line-to, quadratic, cubic and close commands.
//! Paths are built in place, iterated lazily as [`PathElement`]s, and can be flattened
//! or transformed on the fly through the [iterator](iterator/index.html) adapters.
//!
//! This crate is reexported in [afp](../afp/index.html).
//!
//! # Examples
//!
//! ```
//! use afp_path::Path;
//! use afp_path::math::point;
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0, 0.0)).unwrap();
//! path.line_to(point(1.0, 2.0, 0.0)).unwrap();
//! path.line_to(point(2.0, 0.0, 0.0)).unwrap();
//! path.close();
//!
//! assert!(path.is_polygon());
//!
//! for element in path.iter() {
//!     println!("{:?}", element);
//! }
//! ```

pub use afp_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod events;
pub mod iterator;
pub mod path;
pub mod points;
pub mod polyline;

pub use crate::error::PathError;
pub use crate::events::*;
#[doc(inline)]
pub use crate::path::{Path, DEFAULT_TOLERANCE};
#[doc(inline)]
pub use crate::points::{Points, PointsMut};
#[doc(inline)]
pub use crate::polyline::Polyline;

pub mod traits {
    //! `afp_path` traits reexported here for convenience.

    pub use crate::geom::traits::Transformation;
    pub use crate::iterator::PathIterator;
}

pub mod math {
    //! f64 version of the afp_geom types used everywhere. Most other afp crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point3D<f64>```.
    pub type Point = euclid::default::Point3D<f64>;

    /// Alias for ```euclid::default::Vector3D<f64>```.
    pub type Vector = euclid::default::Vector3D<f64>;

    /// Alias for ```euclid::default::Size3D<f64>```.
    pub type Size = euclid::default::Size3D<f64>;

    /// Alias for ```euclid::default::Box3D<f64>```
    pub type Box3D = euclid::default::Box3D<f64>;

    /// Alias for ```euclid::default::Transform3D<f64>```
    pub type Transform = euclid::default::Transform3D<f64>;

    /// Alias for ```euclid::Translation3D<f64>```
    pub type Translation = euclid::Translation3D<f64, euclid::UnknownUnit, euclid::UnknownUnit>;

    /// Shorthand for `Vector::new(x, y, z)`.
    #[inline]
    pub fn vector(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z)
    }

    /// Shorthand for `Point::new(x, y, z)`.
    #[inline]
    pub fn point(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    /// Shorthand for `Size::new(w, h, d)`.
    #[inline]
    pub fn size(w: f64, h: f64, d: f64) -> Size {
        Size::new(w, h, d)
    }

    /// The zero box at the origin.
    #[inline]
    pub fn zero_box() -> Box3D {
        Box3D::new(Point::origin(), Point::origin())
    }
}

/// The winding rule defines how to determine what is inside and what is outside of a path.
///
/// Both rules count the signed crossings between the path and a ray cast from the
/// query point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindingRule {
    /// Inside iff the winding number is odd.
    EvenOdd,
    /// Inside iff the winding number is not zero.
    NonZero,
}

impl WindingRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            WindingRule::EvenOdd => winding_number % 2 != 0,
            WindingRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for WindingRule {
    fn default() -> Self {
        WindingRule::NonZero
    }
}

/// The kind of a path element, without its coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathElementType {
    MoveTo,
    LineTo,
    QuadTo,
    CurveTo,
    Close,
}

impl PathElementType {
    /// Whether elements of this type draw something (everything but move-to).
    #[inline]
    pub fn is_drawing(self) -> bool {
        self != PathElementType::MoveTo
    }

    #[inline]
    pub fn is_curve(self) -> bool {
        match self {
            PathElementType::QuadTo | PathElementType::CurveTo => true,
            _ => false,
        }
    }
}

#[test]
fn winding_rules() {
    assert!(WindingRule::EvenOdd.is_in(1));
    assert!(WindingRule::EvenOdd.is_in(-3));
    assert!(WindingRule::EvenOdd.is_out(2));
    assert!(WindingRule::NonZero.is_in(2));
    assert!(WindingRule::NonZero.is_in(-1));
    assert!(WindingRule::NonZero.is_out(0));
    assert_eq!(WindingRule::default(), WindingRule::NonZero);
}
