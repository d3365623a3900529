//! The node arena: interning, import, collapse, and read accessors.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::node::{AffineForm, Node, NodeId, NodeKey, Var};
use crate::opcode::{Arity, Opcode};

/// An arena of expression nodes with structural deduplication.
///
/// Nodes are stored densely and referenced by [`NodeId`]; edges are ids, not
/// pointers, so merging two trees is index remapping rather than pointer
/// surgery. Every constructor goes through the interner: asking twice for
/// the same constant, terminal, affine form, or `(opcode, lhs, rhs)` always
/// yields the same id and never grows the arena.
///
/// Each node also carries its `rank` - the longest path from a terminal -
/// which orders topological walks (import, evaluator tapes).
///
/// # Example
///
/// ```
/// use frep_graph::{Opcode, Tree};
///
/// let mut tree = Tree::new();
/// let x = tree.var(frep_graph::Var::X);
/// let sq = tree.operation(Opcode::Square, Some(x), None);
/// assert_eq!(tree.operation(Opcode::Square, Some(x), None), sq);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.rank(sq), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    ranks: Vec<u32>,
    interner: HashMap<NodeKey, NodeId>,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every id the tree owns, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Interns a constant node.
    pub fn constant(&mut self, v: f64) -> NodeId {
        self.intern(Node::Const(v), 0)
    }

    /// Interns a coordinate terminal.
    pub fn var(&mut self, axis: Var) -> NodeId {
        self.intern(Node::Var(axis), 0)
    }

    /// Interns an affine node `a*x + b*y + c*z + d`.
    pub fn affine(&mut self, a: f64, b: f64, c: f64, d: f64) -> NodeId {
        self.intern(Node::Affine(AffineForm::new(a, b, c, d)), 0)
    }

    /// Interns an operation node over operands this tree owns.
    ///
    /// Unary opcodes take exactly one operand, in either slot; binary
    /// opcodes take both.
    ///
    /// # Panics
    ///
    /// Panics if the operand pattern does not match the opcode's arity, or
    /// if an operand id is not owned by this tree.
    pub fn operation(&mut self, op: Opcode, lhs: Option<NodeId>, rhs: Option<NodeId>) -> NodeId {
        let (lhs, rhs) = match (op.arity(), lhs, rhs) {
            (Arity::Binary, Some(l), Some(r)) => (l, Some(r)),
            (Arity::Unary, Some(l), None) | (Arity::Unary, None, Some(l)) => (l, None),
            (arity, lhs, rhs) => panic!(
                "opcode {op:?} ({arity:?}) applied to operand pattern ({lhs:?}, {rhs:?})"
            ),
        };
        let rank = match rhs {
            Some(r) => 1 + self.rank(lhs).max(self.rank(r)),
            None => 1 + self.rank(lhs),
        };
        self.intern(Node::Op { op, lhs, rhs }, rank)
    }

    /// Looks up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by this tree. Foreign ids are a
    /// programming error; returning a plausible-but-wrong node would corrupt
    /// every downstream consumer silently.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        let Some(node) = self.nodes.get(id.index()) else {
            panic!(
                "node id {} is not owned by this tree (len {})",
                id.get(),
                self.nodes.len()
            );
        };
        node
    }

    /// Longest path from a terminal to `id` (terminals have rank 0).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by this tree.
    #[must_use]
    pub fn rank(&self, id: NodeId) -> u32 {
        let Some(rank) = self.ranks.get(id.index()) else {
            panic!(
                "node id {} is not owned by this tree (len {})",
                id.get(),
                self.nodes.len()
            );
        };
        *rank
    }

    /// The opcode of an operation node, or `None` for terminals.
    #[must_use]
    pub fn opcode(&self, id: NodeId) -> Option<Opcode> {
        match self.node(id) {
            Node::Op { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// The first operand of an operation node, if any.
    #[must_use]
    pub fn lhs(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id) {
            Node::Op { lhs, .. } => Some(*lhs),
            _ => None,
        }
    }

    /// The second operand of a binary operation node, if any.
    #[must_use]
    pub fn rhs(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id) {
            Node::Op { rhs, .. } => *rhs,
            _ => None,
        }
    }

    /// The value of a constant node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotConstant`] if the node is any other variant.
    pub fn value(&self, id: NodeId) -> GraphResult<f64> {
        match self.node(id) {
            Node::Const(v) => Ok(*v),
            _ => Err(GraphError::NotConstant { id: id.get() }),
        }
    }

    /// The payload of an affine node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotAffine`] if the node is any other variant
    /// (including plain [`Var`] terminals, which are deliberately not
    /// promoted to `1*x + 0*y + 0*z + 0`).
    pub fn affine_form(&self, id: NodeId) -> GraphResult<AffineForm> {
        match self.node(id) {
            Node::Affine(f) => Ok(*f),
            _ => Err(GraphError::NotAffine { id: id.get() }),
        }
    }

    /// Merges the subgraph of `other` reachable from `id` into this tree.
    ///
    /// Reachable nodes are walked in rank order, so every operand is
    /// remapped before the operation that uses it; each remapped node goes
    /// through this tree's interner, so subexpressions already present here
    /// are reused rather than duplicated. Returns the id in this tree that
    /// corresponds to `id` in `other`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by `other`.
    pub fn import(&mut self, other: &Tree, id: NodeId) -> NodeId {
        // Collect the reachable subgraph.
        let mut visited = vec![false; other.len()];
        let mut reachable = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            // Also validates that `next` is owned by `other`.
            let node = *other.node(next);
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

        // Rank order guarantees operands are remapped before their users.
        reachable.sort_unstable_by_key(|&n| (other.rank(n), n));

        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(reachable.len());
        for foreign in &reachable {
            let local = match *other.node(*foreign) {
                Node::Const(v) => self.constant(v),
                Node::Var(axis) => self.var(axis),
                Node::Affine(f) => self.affine(f.a, f.b, f.c, f.d),
                Node::Op { op, lhs, rhs } => {
                    let lhs = remap[&lhs];
                    let rhs = rhs.map(|r| remap[&r]);
                    self.operation(op, Some(lhs), rhs)
                }
            };
            remap.insert(*foreign, local);
        }

        debug!(
            imported = reachable.len(),
            arena_len = self.len(),
            "imported foreign subgraph"
        );
        remap[&id]
    }

    /// Simplifies the subgraph rooted at `id`, returning the simplified id.
    ///
    /// Bottom-up and memoized: operations over constants fold to constants,
    /// linear combinations of affine nodes and constants fold to a single
    /// affine node, and an affine form with zero coordinate coefficients
    /// canonicalizes to a constant (which lets folding continue upward).
    /// Simplified forms are interned like any other node; the original nodes
    /// remain in the arena untouched.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by this tree.
    pub fn collapse(&mut self, id: NodeId) -> NodeId {
        let mut memo = HashMap::new();
        self.collapse_inner(id, &mut memo)
    }

    fn collapse_inner(&mut self, id: NodeId, memo: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if let Some(&done) = memo.get(&id) {
            return done;
        }
        let out = match *self.node(id) {
            Node::Const(_) | Node::Var(_) => id,
            Node::Affine(f) if f.is_constant() => self.constant(f.d),
            Node::Affine(_) => id,
            Node::Op { op, lhs, rhs } => {
                let lhs = self.collapse_inner(lhs, memo);
                let rhs = rhs.map(|r| self.collapse_inner(r, memo));
                self.fold(op, lhs, rhs)
            }
        };
        memo.insert(id, out);
        out
    }

    /// One local rewrite step over already-collapsed operands.
    fn fold(&mut self, op: Opcode, lhs: NodeId, rhs: Option<NodeId>) -> NodeId {
        // Constant folding first, so const + const never detours through an
        // affine node.
        if let Ok(a) = self.value(lhs) {
            match rhs {
                None => return self.constant(op.apply(a, None)),
                Some(r) => {
                    if let Ok(b) = self.value(r) {
                        return self.constant(op.apply(a, Some(b)));
                    }
                }
            }
        }

        // Affine algebra. Constants participate as pure-offset forms.
        let left = self.affine_view(lhs);
        let right = rhs.and_then(|r| self.affine_view(r));
        let folded = match (op, left, right) {
            (Opcode::Add, Some(p), Some(q)) => {
                Some(AffineForm::new(p.a + q.a, p.b + q.b, p.c + q.c, p.d + q.d))
            }
            (Opcode::Sub, Some(p), Some(q)) => {
                Some(AffineForm::new(p.a - q.a, p.b - q.b, p.c - q.c, p.d - q.d))
            }
            (Opcode::Mul, Some(p), Some(q)) if q.is_constant() => Some(scale(p, q.d)),
            (Opcode::Mul, Some(p), Some(q)) if p.is_constant() => Some(scale(q, p.d)),
            (Opcode::Div, Some(p), Some(q)) if q.is_constant() && q.d != 0.0 => {
                Some(scale(p, 1.0 / q.d))
            }
            (Opcode::Neg, Some(p), None) => Some(scale(p, -1.0)),
            _ => None,
        };
        if let Some(f) = folded {
            return if f.is_constant() {
                self.constant(f.d)
            } else {
                self.affine(f.a, f.b, f.c, f.d)
            };
        }

        self.operation(op, Some(lhs), rhs)
    }

    /// A node's reading as a linear form, if it has one.
    fn affine_view(&self, id: NodeId) -> Option<AffineForm> {
        match *self.node(id) {
            Node::Affine(f) => Some(f),
            Node::Const(v) => Some(AffineForm::new(0.0, 0.0, 0.0, v)),
            _ => None,
        }
    }

    fn intern(&mut self, node: Node, rank: u32) -> NodeId {
        let key = NodeKey::from(&node);
        if let Some(&existing) = self.interner.get(&key) {
            return existing;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        self.ranks.push(rank);
        self.interner.insert(key, id);
        id
    }
}

fn scale(f: AffineForm, k: f64) -> AffineForm {
    AffineForm::new(f.a * k, f.b * k, f.c * k, f.d * k)
}
