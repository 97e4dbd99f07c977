#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![allow(clippy::new_without_default)]

//! 3D shapes sharing one query contract.
//!
//! Segments, axis-aligned boxes, spheres, paths and composites of other shapes all
//! implement [`Shape`]: bounding box, point and box containment, intersection with another
//! shape, closest and farthest points, distances, and iteration over an outline made of
//! [`PathElement`](crate::path::PathElement)s.
//!
//! [`ShapeMut`] adds in-place translation, clearing and a revision counter. Composites hold
//! their children through [`SharedShape`] handles, so a child can keep being edited after
//! it was added and the composite sees the change.
//!
//! This crate is reexported in [afp](../afp/index.html).
//!
//! # Examples
//!
//! ```
//! use afp_shapes::{DefaultShapeFactory, Shape, ShapeFactory};
//! use afp_shapes::math::{point, size};
//!
//! let factory = DefaultShapeFactory;
//! let mut shapes = factory.new_multi_shape();
//! shapes.add_shape(factory.new_box(point(5.0, 8.0, 0.0), size(2.0, 1.0, 0.0)).unwrap());
//! shapes.add_shape(factory.new_sphere(point(-5.0, 18.0, 0.0), 2.0).unwrap());
//!
//! assert!(shapes.contains_point(&point(6.0, 8.25, 0.0)));
//! assert!(shapes.contains_point(&point(-4.0, 19.0, 0.0)));
//! assert_eq!(shapes.distance(&point(0.0, 8.5, 0.0)).unwrap(), 5.0);
//! ```

pub extern crate afp_algorithms as algorithms;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod shape;

mod aligned_box;
mod error;
pub mod factory;
pub mod intersections;
mod multi_shape;
mod options;
mod path_shape;
mod segment;
mod sphere;

pub use crate::algorithms::{geom, math, path};

pub use crate::aligned_box::AlignedBox;
pub use crate::error::ShapeError;
#[doc(inline)]
pub use crate::factory::{DefaultShapeFactory, ShapeFactory};
pub use crate::multi_shape::MultiShape;
pub use crate::options::QueryOptions;
pub use crate::path_shape::PathShape;
pub use crate::segment::Segment;
pub use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
pub use crate::sphere::Sphere;
