//! Shared expression graph for the frep kernel.
//!
//! An implicit shape is a scalar function of `(x, y, z)`; this crate stores
//! that function as a deduplicated DAG of arithmetic nodes:
//!
//! - [`Opcode`] - The fixed instruction set (arithmetic + CSG min/max)
//! - [`Node`] / [`NodeId`] - Arena-resident graph nodes and their stable ids
//! - [`Tree`] - The arena itself: structural interning, cross-tree import,
//!   and local simplification (constant folding, affine algebra)
//! - [`Token`] - A cheap shared handle to `(Tree, NodeId)`; the public
//!   construction API, with operator overloads
//!
//! Structural interning is the load-bearing property: two requests for the
//! same node always return the same id, so CSG trees built from shared
//! primitives stay linear in unique subexpressions rather than exponential
//! in operator applications.
//!
//! Graph mutation (interning, importing, collapsing) happens while the
//! expression is being built. Evaluators snapshot the graph when bound, so
//! an octree render never observes a mutating tree.
//!
//! # Example
//!
//! ```
//! use frep_graph::Token;
//!
//! let (x, y, z) = Token::axes();
//! let sphere = &(&(&x.square() + &y.square()) + &z.square()) - &Token::constant(1.0);
//!
//! // x², y², z² intern three nodes; reusing one costs nothing.
//! let same = x.square();
//! assert_eq!(same.id(), x.square().id());
//! assert_eq!(sphere.rank(), 4);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod node;
mod opcode;
mod token;
mod tree;

pub use error::{GraphError, GraphResult};
pub use node::{AffineForm, Node, NodeId, Var};
pub use opcode::{Arity, Opcode};
pub use token::Token;
pub use tree::Tree;
