#![deny(bare_trait_objects)]

//! 3D affine geometry in Rust.
//!
//! # Crates
//!
//! This meta-crate (`afp`) reexports the following sub-crates for convenience:
//!
//! * **afp_geom** - 3D line segments, quadratic and cubic bézier curves.
//! * **afp_path** - Tools to build, iterate over and flatten 3D paths.
//! * **afp_algorithms** - Winding-rule hit testing, bounding boxes, lengths and
//!   distances to the outline of a path.
//! * **afp_shapes** - Segments, aligned boxes, spheres, paths and composites behind a
//!   single query contract.
//!
//! Each `afp_<name>` crate is reexported as a `<name>` module in `afp`. For example:
//!
//! ```ignore
//! extern crate afp_shapes;
//! use afp_shapes::MultiShape;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate afp;
//! use afp::shapes::MultiShape;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Testing points against a path
//!
//! ```
//! use afp::math::point;
//! use afp::path::{Path, WindingRule};
//! use afp::algorithms::hit_test::hit_test_path;
//!
//! // Two nested squares with the same orientation.
//! let mut path = Path::with_winding_rule(WindingRule::EvenOdd);
//! path.move_to(point(0.0, 0.0, 0.0)).unwrap();
//! path.line_to(point(4.0, 0.0, 0.0)).unwrap();
//! path.line_to(point(4.0, 4.0, 0.0)).unwrap();
//! path.line_to(point(0.0, 4.0, 0.0)).unwrap();
//! path.close();
//! path.move_to(point(1.0, 1.0, 0.0)).unwrap();
//! path.line_to(point(3.0, 1.0, 0.0)).unwrap();
//! path.line_to(point(3.0, 3.0, 0.0)).unwrap();
//! path.line_to(point(1.0, 3.0, 0.0)).unwrap();
//! path.close();
//!
//! let rule = path.winding_rule();
//! assert!(hit_test_path(&point(0.5, 0.5, 0.0), path.iter(), rule, 0.1, 1e-8));
//! assert!(!hit_test_path(&point(2.0, 2.0, 0.0), path.iter(), rule, 0.1, 1e-8));
//! ```
//!
//! ## Composite shapes
//!
//! ```
//! use afp::math::{point, size, vector};
//! use afp::shapes::{DefaultShapeFactory, Shape, ShapeFactory, ShapeMut};
//!
//! let factory = DefaultShapeFactory;
//! let mut shapes = factory.new_multi_shape();
//! let aabb = shapes.add_shape(factory.new_box(point(5.0, 8.0, 0.0), size(2.0, 1.0, 0.0)).unwrap());
//! shapes.add_shape(factory.new_sphere(point(-5.0, 18.0, 0.0), 2.0).unwrap());
//!
//! assert!(shapes.contains_point(&point(6.0, 8.25, 0.0)));
//!
//! // Children stay editable through their handle.
//! aabb.write().translate(vector(10.0, 0.0, 0.0));
//! assert!(!shapes.contains_point(&point(6.0, 8.25, 0.0)));
//! assert_eq!(shapes.bounding_box().max, point(17.0, 20.0, 2.0));
//! ```

pub extern crate afp_algorithms;
pub extern crate afp_shapes;

pub use afp_algorithms as algorithms;
pub use afp_shapes as shapes;
pub use algorithms::geom;
pub use algorithms::path;

pub use path::math;
