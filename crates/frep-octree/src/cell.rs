//! The immutable cell hierarchy and its query surface.

use frep_types::{corner_point, Interval, CORNER_COUNT};
use nalgebra::Point3;

/// What a cell concluded about its region of space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// The surface crosses this cell; corner signs differ. Survives at the
    /// resolution floor for surface extraction.
    Leaf,
    /// The cell is subdivided into 8 children with differing conclusions.
    Branch,
    /// The region is entirely outside the shape.
    Empty,
    /// The region is entirely inside the shape.
    Full,
}

/// Child storage, private so partial population is unrepresentable: a cell
/// either owns all 8 children or none.
#[derive(Debug)]
pub(crate) enum CellKind {
    Leaf,
    Empty,
    Full,
    Branch(Box<[Octree; 8]>),
}

/// One cell of a rendered octree; the root cell owns the whole hierarchy.
///
/// Cells are immutable once built. Bounds are fixed at construction;
/// `corners[i]` records whether corner `i` is inside the shape (negative
/// sign), always populated regardless of type so extraction can consult
/// corner signs across Empty/Full boundaries too.
///
/// Corner and child indices share the kernel's 3-bit octant convention
/// (`AXIS_X = 4`, `AXIS_Y = 2`, `AXIS_Z = 1`): child `i` occupies the octant
/// touching corner `i`, and [`Octree::pos`] resolves the same bits to a
/// point.
#[derive(Debug)]
pub struct Octree {
    x: Interval,
    y: Interval,
    z: Interval,
    corners: [bool; CORNER_COUNT],
    kind: CellKind,
}

impl Octree {
    pub(crate) fn new(
        x: Interval,
        y: Interval,
        z: Interval,
        corners: [bool; CORNER_COUNT],
        kind: CellKind,
    ) -> Self {
        Self {
            x,
            y,
            z,
            corners,
            kind,
        }
    }

    /// The cell's conclusion about its region.
    #[must_use]
    pub fn cell_type(&self) -> CellType {
        match self.kind {
            CellKind::Leaf => CellType::Leaf,
            CellKind::Empty => CellType::Empty,
            CellKind::Full => CellType::Full,
            CellKind::Branch(_) => CellType::Branch,
        }
    }

    /// Whether corner `i` is inside the shape.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `0..8`.
    #[must_use]
    pub fn corner(&self, i: u8) -> bool {
        self.corners[usize::from(i)]
    }

    /// The position of corner `i`, by the shared octant bit convention.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `0..8`.
    #[must_use]
    pub fn pos(&self, i: u8) -> Point3<f64> {
        corner_point(self.x, self.y, self.z, i)
    }

    /// The child occupying octant `i`, or `None` for undivided cells.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `0..8`.
    #[must_use]
    pub fn child(&self, i: u8) -> Option<&Octree> {
        match &self.kind {
            CellKind::Branch(children) => Some(&children[usize::from(i)]),
            _ => None,
        }
    }

    /// Extent along X.
    #[must_use]
    pub fn x(&self) -> Interval {
        self.x
    }

    /// Extent along Y.
    #[must_use]
    pub fn y(&self) -> Interval {
        self.y
    }

    /// Extent along Z.
    #[must_use]
    pub fn z(&self) -> Interval {
        self.z
    }

    /// Total number of cells in this subtree, this cell included.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        match &self.kind {
            CellKind::Branch(children) => {
                1 + children.iter().map(Octree::cell_count).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Longest chain of branches below this cell (0 for undivided cells).
    #[must_use]
    pub fn depth(&self) -> u32 {
        match &self.kind {
            CellKind::Branch(children) => {
                1 + children.iter().map(Octree::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Depth-first iteration over every cell in the subtree, parents before
    /// children.
    #[must_use]
    pub fn iter(&self) -> Cells<'_> {
        Cells { stack: vec![self] }
    }
}

impl<'a> IntoIterator for &'a Octree {
    type Item = &'a Octree;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

/// Depth-first cell iterator returned by [`Octree::iter`].
#[derive(Debug)]
pub struct Cells<'a> {
    stack: Vec<&'a Octree>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a Octree;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.stack.pop()?;
        if let CellKind::Branch(children) = &cell.kind {
            self.stack.extend(children.iter().rev());
        }
        Some(cell)
    }
}
