//! Shared handles into a tree: the public expression-building API.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::GraphResult;
use crate::node::{AffineForm, NodeId, Var};
use crate::opcode::Opcode;
use crate::tree::Tree;

/// A non-owning reference to one node of a shared [`Tree`].
///
/// Tokens are the construction surface of the graph: factory functions mint
/// fresh single-node trees, and [`Token::operation`] combines tokens,
/// merging their backing trees when they differ. The tree is held behind a
/// reference-counted cell, so cloning a token is cheap and the arena lives
/// exactly as long as something still points at it.
///
/// Merging flows *into* the left operand's tree; tokens still referencing
/// the donor tree stay valid against the donor, which is untouched.
///
/// # Example
///
/// ```
/// use frep_graph::Token;
///
/// let (x, y, _z) = Token::axes();
/// let sum = (&x + &y).collapse();
/// assert_eq!(sum.affine_form().unwrap(), frep_graph::AffineForm::new(1.0, 1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    tree: Rc<RefCell<Tree>>,
    id: NodeId,
}

impl Token {
    fn mint(build: impl FnOnce(&mut Tree) -> NodeId) -> Self {
        let mut tree = Tree::new();
        let id = build(&mut tree);
        Self {
            tree: Rc::new(RefCell::new(tree)),
            id,
        }
    }

    fn sibling(&self, id: NodeId) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    /// A constant expression, backed by a fresh tree.
    #[must_use]
    pub fn constant(v: f64) -> Self {
        Self::mint(|t| t.constant(v))
    }

    /// The x coordinate terminal, backed by a fresh tree.
    #[must_use]
    pub fn x() -> Self {
        Self::mint(|t| t.var(Var::X))
    }

    /// The y coordinate terminal, backed by a fresh tree.
    #[must_use]
    pub fn y() -> Self {
        Self::mint(|t| t.var(Var::Y))
    }

    /// The z coordinate terminal, backed by a fresh tree.
    #[must_use]
    pub fn z() -> Self {
        Self::mint(|t| t.var(Var::Z))
    }

    /// The affine expression `a*x + b*y + c*z + d`, backed by a fresh tree.
    #[must_use]
    pub fn affine(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::mint(|t| t.affine(a, b, c, d))
    }

    /// The three coordinates as affine forms sharing **one** tree.
    ///
    /// Expressions built from all three axes then never need a merge, and
    /// because the axes are affine forms (`1*x`, `1*y`, `1*z`) rather than
    /// bare terminals, linear combinations of them fold under
    /// [`Token::collapse`].
    #[must_use]
    pub fn axes() -> (Self, Self, Self) {
        let tree = Rc::new(RefCell::new(Tree::new()));
        let (x, y, z) = {
            let mut t = tree.borrow_mut();
            (
                t.affine(1.0, 0.0, 0.0, 0.0),
                t.affine(0.0, 1.0, 0.0, 0.0),
                t.affine(0.0, 0.0, 1.0, 0.0),
            )
        };
        (
            Self {
                tree: Rc::clone(&tree),
                id: x,
            },
            Self {
                tree: Rc::clone(&tree),
                id: y,
            },
            Self { tree, id: z },
        )
    }

    /// Combines tokens under an opcode, merging backing trees as needed.
    ///
    /// Tree selection: with two operands on different trees, the right
    /// operand's subgraph is imported into the left operand's tree; on the
    /// same tree the ids are used directly; with one operand its tree is
    /// used; with none a fresh tree is allocated. The resulting node is then
    /// interned in the selected tree.
    ///
    /// # Panics
    ///
    /// Panics if the operand pattern does not match the opcode's arity
    /// (which makes the no-operand form unreachable in practice, since no
    /// opcode in the set is nullary).
    #[must_use]
    pub fn operation(op: Opcode, a: Option<&Token>, b: Option<&Token>) -> Self {
        match (a, b) {
            (Some(a), Some(b)) => {
                let b_id = if Self::same_tree(a, b) {
                    b.id
                } else {
                    let donor = b.tree.borrow();
                    a.tree.borrow_mut().import(&donor, b.id)
                };
                let id = a.tree.borrow_mut().operation(op, Some(a.id), Some(b_id));
                a.sibling(id)
            }
            (Some(one), None) | (None, Some(one)) => {
                let id = one.tree.borrow_mut().operation(op, Some(one.id), None);
                one.sibling(id)
            }
            (None, None) => Self::mint(|t| t.operation(op, None, None)),
        }
    }

    /// Simplifies this token's subgraph, returning a token on the same tree.
    #[must_use]
    pub fn collapse(&self) -> Self {
        let id = self.tree.borrow_mut().collapse(self.id);
        self.sibling(id)
    }

    /// CSG union: `min(self, rhs)`.
    #[must_use]
    pub fn min(&self, rhs: &Token) -> Self {
        Self::operation(Opcode::Min, Some(self), Some(rhs))
    }

    /// CSG intersection: `max(self, rhs)`.
    #[must_use]
    pub fn max(&self, rhs: &Token) -> Self {
        Self::operation(Opcode::Max, Some(self), Some(rhs))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::operation(Opcode::Abs, Some(self), None)
    }

    /// Square root.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        Self::operation(Opcode::Sqrt, Some(self), None)
    }

    /// Square.
    #[must_use]
    pub fn square(&self) -> Self {
        Self::operation(Opcode::Square, Some(self), None)
    }

    /// The node id this token refers to, valid within [`Token::tree`].
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// A shared borrow of the backing tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree is currently mutably borrowed, which cannot happen
    /// through this API (mutation is always scoped inside a single call).
    #[must_use]
    pub fn tree(&self) -> Ref<'_, Tree> {
        self.tree.borrow()
    }

    /// Whether two tokens share one backing tree.
    #[must_use]
    pub fn same_tree(a: &Token, b: &Token) -> bool {
        Rc::ptr_eq(&a.tree, &b.tree)
    }

    /// The opcode of this token's node, or `None` for terminals.
    #[must_use]
    pub fn opcode(&self) -> Option<Opcode> {
        self.tree().opcode(self.id)
    }

    /// The first operand of this token's node, if any.
    #[must_use]
    pub fn lhs(&self) -> Option<NodeId> {
        self.tree().lhs(self.id)
    }

    /// The second operand of this token's node, if any.
    #[must_use]
    pub fn rhs(&self) -> Option<NodeId> {
        self.tree().rhs(self.id)
    }

    /// The rank of this token's node.
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.tree().rank(self.id)
    }

    /// The value of this token's node, if it is a constant.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotConstant`](crate::GraphError::NotConstant)
    /// otherwise.
    pub fn value(&self) -> GraphResult<f64> {
        self.tree().value(self.id)
    }

    /// The affine payload of this token's node, if it is an affine form.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotAffine`](crate::GraphError::NotAffine)
    /// otherwise.
    pub fn affine_form(&self) -> GraphResult<AffineForm> {
        self.tree().affine_form(self.id)
    }
}

impl std::ops::Add for &Token {
    type Output = Token;

    fn add(self, rhs: Self) -> Token {
        Token::operation(Opcode::Add, Some(self), Some(rhs))
    }
}

impl std::ops::Sub for &Token {
    type Output = Token;

    fn sub(self, rhs: Self) -> Token {
        Token::operation(Opcode::Sub, Some(self), Some(rhs))
    }
}

impl std::ops::Mul for &Token {
    type Output = Token;

    fn mul(self, rhs: Self) -> Token {
        Token::operation(Opcode::Mul, Some(self), Some(rhs))
    }
}

impl std::ops::Div for &Token {
    type Output = Token;

    fn div(self, rhs: Self) -> Token {
        Token::operation(Opcode::Div, Some(self), Some(rhs))
    }
}

impl std::ops::Neg for &Token {
    type Output = Token;

    fn neg(self) -> Token {
        Token::operation(Opcode::Neg, Some(self), None)
    }
}
