//! Core geometric types for the frep kernel.
//!
//! This crate provides the foundational types shared by the expression graph,
//! the evaluators, and the octree builder:
//!
//! - [`Interval`] - A closed `[lo, hi]` range with conservative arithmetic
//! - [`Region`] - An axis-aligned box plus a subdivision budget
//! - [`Subregion`] - One recursion level's view of a region, with octsection
//! - [`corner_point`] and the `AXIS_*` bits - The corner/octant convention
//!
//! It is a pure library crate with no engine, GUI, or I/O dependencies, so it
//! can be used from CLI tools, servers, WASM, or bindings unchanged.
//!
//! # Conventions
//!
//! All coordinates are `f64` in a right-handed coordinate system. Corner and
//! child-octant indices use one fixed 3-bit encoding (bit 4 = X-high, bit 2 =
//! Y-high, bit 1 = Z-high) defined once in this crate; splitting and corner
//! lookup elsewhere must route through it rather than re-deriving bits.
//!
//! # Example
//!
//! ```
//! use frep_types::{Interval, Region};
//!
//! let region = Region::cube(Interval::new(-2.0, 2.0), 2);
//! let root = region.view();
//! let children = root.octsect();
//!
//! // Child 7 occupies the all-high octant and shares corner 7 with its parent.
//! assert_eq!(children[7].corner(7), root.corner(7));
//! assert_eq!(children[7].level(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod corner;
mod interval;
mod region;

pub use corner::{corner_point, is_high, AXIS_X, AXIS_Y, AXIS_Z, CORNER_COUNT};
pub use interval::Interval;
pub use region::{Region, Subregion};

// Re-export nalgebra's point type for convenience
pub use nalgebra::Point3;
