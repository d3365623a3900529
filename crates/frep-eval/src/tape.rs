//! The reference evaluator: a flat, rank-ordered instruction tape.

use frep_graph::{Node, NodeId, Opcode, Token, Tree, Var};
use frep_types::Interval;
use nalgebra::Point3;
use tracing::debug;

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;

/// One tape slot; operands refer to earlier slots by index.
#[derive(Debug, Clone, Copy)]
enum TapeOp {
    Const(f64),
    Var(Var),
    Affine { a: f64, b: f64, c: f64, d: f64 },
    Op { op: Opcode, lhs: usize, rhs: Option<usize> },
}

/// A straight-line interpreter over a snapshot of one expression.
///
/// Binding flattens the subgraph reachable from the bound node into a tape
/// ordered by rank, so every operand sits at a lower slot than its user and
/// one forward pass evaluates the whole expression. The tape holds plain
/// values only - no handle back to the source tree - so the evaluator is
/// `Send + Sync` and unaffected by any graph mutation after binding.
///
/// Each query allocates its own slot buffer; there is no shared mutable
/// state between concurrent calls.
#[derive(Debug, Clone)]
pub struct TapeEvaluator {
    tape: Vec<TapeOp>,
}

impl TapeEvaluator {
    /// Binds an evaluator to the expression a token refers to.
    #[must_use]
    pub fn new(token: &Token) -> Self {
        Self::from_tree(&token.tree(), token.id())
    }

    /// Binds an evaluator to node `id` of `tree`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by `tree`.
    #[must_use]
    pub fn from_tree(tree: &Tree, id: NodeId) -> Self {
        // Reachable subgraph, then rank order so operands precede users.
        let mut visited = vec![false; tree.len()];
        let mut reachable = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = *tree.node(next);
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            reachable.push(next);
            if let Node::Op { lhs, rhs, .. } = node {
                stack.push(lhs);
                if let Some(r) = rhs {
                    stack.push(r);
                }
            }
        }
        reachable.sort_unstable_by_key(|&n| (tree.rank(n), n));

        let mut slot_of = vec![usize::MAX; tree.len()];
        let mut tape = Vec::with_capacity(reachable.len());
        for (slot, node_id) in reachable.iter().enumerate() {
            slot_of[node_id.index()] = slot;
            tape.push(match *tree.node(*node_id) {
                Node::Const(v) => TapeOp::Const(v),
                Node::Var(axis) => TapeOp::Var(axis),
                Node::Affine(f) => TapeOp::Affine {
                    a: f.a,
                    b: f.b,
                    c: f.c,
                    d: f.d,
                },
                Node::Op { op, lhs, rhs } => TapeOp::Op {
                    op,
                    lhs: slot_of[lhs.index()],
                    rhs: rhs.map(|r| slot_of[r.index()]),
                },
            });
        }

        debug!(tape_len = tape.len(), "bound tape evaluator");
        Self { tape }
    }

    /// Number of instructions in the tape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tape.len()
    }

    /// Whether the tape is empty (never true for a bound evaluator).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tape.is_empty()
    }
}

impl Evaluator for TapeEvaluator {
    fn bounds_over(&self, x: Interval, y: Interval, z: Interval) -> EvalResult<Interval> {
        let mut slots: Vec<Interval> = Vec::with_capacity(self.tape.len());
        for op in &self.tape {
            let v = match *op {
                TapeOp::Const(c) => {
                    // A NaN constant (e.g. a folded 0/0) has no interval
                    // representation; report it rather than assert in
                    // `Interval::point`.
                    if c.is_nan() {
                        return Err(EvalError::NanBounds { x, y, z });
                    }
                    Interval::point(c)
                }
                TapeOp::Var(Var::X) => x,
                TapeOp::Var(Var::Y) => y,
                TapeOp::Var(Var::Z) => z,
                TapeOp::Affine { a, b, c, d } => {
                    if a.is_nan() || b.is_nan() || c.is_nan() || d.is_nan() {
                        return Err(EvalError::NanBounds { x, y, z });
                    }
                    x * Interval::point(a)
                        + y * Interval::point(b)
                        + z * Interval::point(c)
                        + Interval::point(d)
                }
                TapeOp::Op { op, lhs, rhs } => {
                    interval_op(op, slots[lhs], rhs.map(|r| slots[r]))
                }
            };
            slots.push(v);
        }
        match slots.last() {
            Some(out) if !out.has_nan() => Ok(*out),
            _ => Err(EvalError::NanBounds { x, y, z }),
        }
    }

    fn value_at(&self, point: Point3<f64>) -> EvalResult<f64> {
        let mut slots: Vec<f64> = Vec::with_capacity(self.tape.len());
        for op in &self.tape {
            let v = match *op {
                TapeOp::Const(c) => c,
                TapeOp::Var(Var::X) => point.x,
                TapeOp::Var(Var::Y) => point.y,
                TapeOp::Var(Var::Z) => point.z,
                TapeOp::Affine { a, b, c, d } => a * point.x + b * point.y + c * point.z + d,
                TapeOp::Op { op, lhs, rhs } => op.apply(slots[lhs], rhs.map(|r| slots[r])),
            };
            slots.push(v);
        }
        match slots.last() {
            Some(out) if out.is_finite() => Ok(*out),
            Some(out) => Err(EvalError::NonFiniteValue {
                point,
                value: *out,
            }),
            None => Err(EvalError::NonFiniteValue {
                point,
                value: f64::NAN,
            }),
        }
    }
}

/// Interval counterpart of [`Opcode::apply`].
fn interval_op(op: Opcode, lhs: Interval, rhs: Option<Interval>) -> Interval {
    match (op, rhs) {
        (Opcode::Add, Some(r)) => lhs + r,
        (Opcode::Sub, Some(r)) => lhs - r,
        (Opcode::Mul, Some(r)) => lhs * r,
        (Opcode::Div, Some(r)) => lhs / r,
        (Opcode::Min, Some(r)) => lhs.min(r),
        (Opcode::Max, Some(r)) => lhs.max(r),
        (Opcode::Neg, None) => -lhs,
        (Opcode::Abs, None) => lhs.abs(),
        (Opcode::Sqrt, None) => lhs.sqrt(),
        (Opcode::Square, None) => lhs.square(),
        (op, rhs) => panic!("opcode {op:?} applied with mismatched arity (rhs: {rhs:?})"),
    }
}
