//! Adaptive octree construction over frep expressions.
//!
//! Given a shape function and a region, the builder recursively octsects
//! space, using interval bounds to prove whole boxes inside or outside the
//! shape (pruning them as [`CellType::Full`] / [`CellType::Empty`] without
//! descending) and collapsing homogeneous subtrees after the fact. Only
//! cells that actually straddle the surface survive as leaves for downstream
//! surface extraction.
//!
//! - [`Octree`] - The immutable cell hierarchy and its query surface
//! - [`CellType`] - Leaf / Branch / Empty / Full
//! - [`render`] / [`render_with_config`] / [`render_with_evaluator`] -
//!   Entry points
//! - [`RenderConfig`] - Parallelism knobs
//!
//! # Example
//!
//! ```
//! use frep_graph::Token;
//! use frep_octree::{render, CellType};
//! use frep_types::{Interval, Region};
//!
//! // Unit sphere, rendered over [-2, 2]^3 with one subdivision allowed.
//! let (x, y, z) = Token::axes();
//! let sphere = &(&(&x.square() + &y.square()) + &z.square()) - &Token::constant(1.0);
//!
//! let region = Region::cube(Interval::new(-2.0, 2.0), 1);
//! let tree = render(&sphere, &region).unwrap();
//! assert_eq!(tree.cell_type(), CellType::Branch);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod cell;
mod config;
mod error;
mod render;

pub use cell::{CellType, Cells, Octree};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use render::{render, render_with_config, render_with_evaluator};
