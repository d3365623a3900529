//! Graph nodes and their stable arena ids.

use std::num::NonZeroU32;

use crate::opcode::Opcode;

/// A stable identifier for a node inside one [`Tree`](crate::Tree).
///
/// Ids are dense and monotonically assigned starting from 1; the all-zeros
/// value is reserved for "no node" and is unrepresentable here, so
/// `Option<NodeId>` is the same size as `NodeId`. Ids are only meaningful
/// within the tree that issued them - importing a subgraph into another tree
/// remaps every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Builds the id for arena slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if the arena has grown past `u32::MAX - 1` nodes.
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1).unwrap_or_else(|_| panic!("node arena overflow"));
        // raw >= 1 always holds, but avoid unwrap in library code.
        match NonZeroU32::new(raw) {
            Some(nz) => Self(nz),
            None => panic!("node arena overflow"),
        }
    }

    /// The zero-based arena slot this id refers to.
    ///
    /// Useful for consumers that build dense side tables keyed by node
    /// (evaluator tapes, remap buffers).
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0.get() as usize - 1
    }

    /// The raw 1-based id value, for display and diagnostics.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// A coordinate terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    /// The x coordinate.
    X,
    /// The y coordinate.
    Y,
    /// The z coordinate.
    Z,
}

/// The payload of an affine node: `a*x + b*y + c*z + d`.
///
/// One node for the whole linear form, rather than seven primitive
/// add/multiply nodes, which keeps graphs built from translated and scaled
/// primitives shallow and lets affine algebra fold them during collapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineForm {
    /// Coefficient of x.
    pub a: f64,
    /// Coefficient of y.
    pub b: f64,
    /// Coefficient of z.
    pub c: f64,
    /// Constant offset.
    pub d: f64,
}

impl AffineForm {
    /// Creates the form `a*x + b*y + c*z + d`.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Whether every coordinate coefficient is zero, i.e. the form is the
    /// constant `d`.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.a == 0.0 && self.b == 0.0 && self.c == 0.0
    }
}

/// A node of the expression graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    /// A literal value.
    Const(f64),
    /// A coordinate terminal.
    Var(Var),
    /// A linear form `a*x + b*y + c*z + d` in one node.
    Affine(AffineForm),
    /// An operation over one or two earlier nodes.
    Op {
        /// The operation.
        op: Opcode,
        /// First operand; the only operand for unary opcodes.
        lhs: NodeId,
        /// Second operand; `None` for unary opcodes.
        rhs: Option<NodeId>,
    },
}

/// Interner key for a [`Node`].
///
/// Floats are compared bit-exactly (`to_bits`) so the key is `Eq + Hash`;
/// this also means `-0.0` and `0.0` intern separately and NaN payloads are
/// self-equal, both acceptable for deduplication purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeKey {
    Const(u64),
    Var(Var),
    Affine([u64; 4]),
    Op(Opcode, NodeId, Option<NodeId>),
}

impl From<&Node> for NodeKey {
    fn from(node: &Node) -> Self {
        match *node {
            Node::Const(v) => Self::Const(v.to_bits()),
            Node::Var(v) => Self::Var(v),
            Node::Affine(f) => Self::Affine([
                f.a.to_bits(),
                f.b.to_bits(),
                f.c.to_bits(),
                f.d.to_bits(),
            ]),
            Node::Op { op, lhs, rhs } => Self::Op(op, lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_node_id_is_pointer_free_niche() {
        assert_eq!(
            std::mem::size_of::<Option<NodeId>>(),
            std::mem::size_of::<NodeId>()
        );
    }

    #[test]
    fn ids_are_one_based() {
        let id = NodeId::from_index(0);
        assert_eq!(id.get(), 1);
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn affine_constant_detection() {
        assert!(AffineForm::new(0.0, 0.0, 0.0, 5.0).is_constant());
        assert!(!AffineForm::new(1.0, 0.0, 0.0, 5.0).is_constant());
    }

    #[test]
    fn keys_are_bit_exact() {
        let a = NodeKey::from(&Node::Const(1.0));
        let b = NodeKey::from(&Node::Const(1.0));
        let c = NodeKey::from(&Node::Const(-1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        // 0.0 and -0.0 are distinct keys on purpose.
        assert_ne!(
            NodeKey::from(&Node::Const(0.0)),
            NodeKey::from(&Node::Const(-0.0))
        );
    }
}
