//! F-Rep modeling kernel core.
//!
//! This umbrella crate re-exports the frep-* crates, providing a unified API
//! for implicit-surface modeling: build a shape as an expression of
//! `(x, y, z)`, then render it into an adaptively refined octree ready for
//! surface extraction. All crates are pure libraries (no engine, GUI, or
//! I/O dependencies) and can be used in CLI tools, WASM, servers, or
//! bindings unchanged.
//!
//! # Quick Start
//!
//! ```
//! use frep::prelude::*;
//!
//! // A unit sphere: x² + y² + z² - 1, negative inside.
//! let (x, y, z) = Token::axes();
//! let sphere = &(&(&x.square() + &y.square()) + &z.square()) - &Token::constant(1.0);
//!
//! // Render over [-2, 2]³ with up to 3 subdivisions.
//! let region = Region::cube(Interval::new(-2.0, 2.0), 3);
//! let tree = render(&sphere, &region).unwrap();
//!
//! assert_eq!(tree.cell_type(), CellType::Branch);
//! // Only cells straddling the surface survive as leaves.
//! let leaves = tree.iter().filter(|c| c.cell_type() == CellType::Leaf).count();
//! assert!(leaves > 0);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `Interval`, `Region`/`Subregion`, octant bit conventions
//! - [`graph`] - The shared expression DAG: `Tree`, `Token`, `Opcode`
//! - [`eval`] - The `Evaluator` contract and the reference `TapeEvaluator`
//! - [`octree`] - The adaptive builder: `render`, `Octree`, `RenderConfig`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use frep_eval as eval;
pub use frep_graph as graph;
pub use frep_octree as octree;
pub use frep_types as types;

/// Everything a typical caller needs, in one import.
pub mod prelude {
    pub use frep_eval::{EvalError, EvalResult, Evaluator, TapeEvaluator};
    pub use frep_graph::{AffineForm, GraphError, Opcode, Token, Tree};
    pub use frep_octree::{
        render, render_with_config, render_with_evaluator, CellType, Octree, RenderConfig,
        RenderError,
    };
    pub use frep_types::{Interval, Point3, Region, Subregion};
}
