#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! 3D path algorithms.
//!
//! Point containment under a winding rule, bounding boxes, outline lengths and
//! distances between a point and the outline of a path.
//!
//! All of the algorithms take any iterator of [`PathElement`](crate::path::PathElement)s,
//! so they work on paths as well as on the elements produced by other shapes.
//!
//! This crate is reexported in [afp](../afp/index.html).

pub extern crate afp_path as path;

pub mod aabb;
pub mod distance;
pub mod hit_test;
pub mod length;

pub use crate::path::geom;
pub use crate::path::math;
