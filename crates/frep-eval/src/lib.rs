//! Expression evaluation for the frep kernel.
//!
//! The octree builder needs exactly two questions answered about a shape
//! function: a conservative [`Interval`](frep_types::Interval) enclosure
//! over a box, and an exact value at a point. The [`Evaluator`] trait is
//! that two-method contract; production evaluators may vectorize or cache
//! behind it without the builder knowing.
//!
//! [`TapeEvaluator`] is the reference implementation: it snapshots the
//! reachable subgraph of a [`Token`](frep_graph::Token) into a flat,
//! rank-ordered tape at bind time and interprets it per query. Snapshotting
//! means a bound evaluator is immune to later tree mutation and is
//! `Send + Sync`, so renders can fan out across threads freely.
//!
//! # Example
//!
//! ```
//! use frep_eval::{Evaluator, TapeEvaluator};
//! use frep_graph::Token;
//! use frep_types::{Interval, Point3};
//!
//! let (x, y, _z) = Token::axes();
//! let f = &x + &y;
//! let eval = TapeEvaluator::new(&f);
//!
//! assert_eq!(eval.value_at(Point3::new(1.0, 2.0, 0.0)).unwrap(), 3.0);
//! let unit = Interval::new(0.0, 1.0);
//! let bound = eval.bounds_over(unit, unit, unit).unwrap();
//! assert_eq!((bound.lower(), bound.upper()), (0.0, 2.0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod evaluator;
mod tape;

pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use tape::TapeEvaluator;
