//! Axis-aligned render regions and the octsection used to refine them.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::corner::{corner_point, is_high, AXIS_X, AXIS_Y, AXIS_Z};
use crate::interval::Interval;

/// An axis-aligned box plus the number of octsections allowed inside it.
///
/// `level` is the subdivision budget: a region with `level = n` may be split
/// `n` times before the builder reaches the resolution floor and evaluates
/// corners directly. `level = 0` means the region itself is already at the
/// floor.
///
/// # Example
///
/// ```
/// use frep_types::{Interval, Region};
///
/// let region = Region::cube(Interval::new(-2.0, 2.0), 3);
/// assert_eq!(region.level, 3);
/// assert_eq!(region.x, region.z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Extent along X.
    pub x: Interval,
    /// Extent along Y.
    pub y: Interval,
    /// Extent along Z.
    pub z: Interval,
    /// Number of octsections allowed before the resolution floor.
    pub level: u32,
}

impl Region {
    /// Creates a region from per-axis extents and a subdivision budget.
    #[must_use]
    pub const fn new(x: Interval, y: Interval, z: Interval, level: u32) -> Self {
        Self { x, y, z, level }
    }

    /// A cube with the same extent on every axis.
    #[must_use]
    pub const fn cube(extent: Interval, level: u32) -> Self {
        Self::new(extent, extent, extent, level)
    }

    /// The stack-scoped view consumed by the octree builder.
    #[must_use]
    pub const fn view(&self) -> Subregion {
        Subregion {
            x: self.x,
            y: self.y,
            z: self.z,
            level: self.level,
        }
    }
}

/// One recursion level's slice of a [`Region`].
///
/// Subregions are created per recursion step and consumed immediately; they
/// are never retained by the finished octree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subregion {
    x: Interval,
    y: Interval,
    z: Interval,
    level: u32,
}

impl Subregion {
    /// Extent along X.
    #[inline]
    #[must_use]
    pub const fn x(self) -> Interval {
        self.x
    }

    /// Extent along Y.
    #[inline]
    #[must_use]
    pub const fn y(self) -> Interval {
        self.y
    }

    /// Extent along Z.
    #[inline]
    #[must_use]
    pub const fn z(self) -> Interval {
        self.z
    }

    /// Remaining subdivision budget.
    #[inline]
    #[must_use]
    pub const fn level(self) -> u32 {
        self.level
    }

    /// Whether the subregion is still above the resolution floor.
    #[inline]
    #[must_use]
    pub const fn can_split(self) -> bool {
        self.level > 0
    }

    /// Splits into 8 children that exactly partition the volume at the axis
    /// midpoints, ordered by the corner-bit convention (child `i` occupies
    /// the octant touching corner `i`). Children carry `level - 1`.
    ///
    /// # Panics
    ///
    /// Panics if called at the resolution floor (`level == 0`).
    #[must_use]
    pub fn octsect(self) -> [Self; 8] {
        assert!(self.can_split(), "octsect below the resolution floor");
        let half = |i: Interval, index: u8, axis: u8| {
            if is_high(index, axis) {
                i.upper_half()
            } else {
                i.lower_half()
            }
        };
        let child = |index: u8| Self {
            x: half(self.x, index, AXIS_X),
            y: half(self.y, index, AXIS_Y),
            z: half(self.z, index, AXIS_Z),
            level: self.level - 1,
        };
        [
            child(0),
            child(1),
            child(2),
            child(3),
            child(4),
            child(5),
            child(6),
            child(7),
        ]
    }

    /// The corner point selected by `index`, using the same bit convention
    /// as [`Subregion::octsect`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..8`.
    #[must_use]
    pub fn corner(self, index: u8) -> Point3<f64> {
        corner_point(self.x, self.y, self.z, index)
    }
}
