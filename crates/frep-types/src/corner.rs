//! The corner/octant bit convention shared by octsection and corner lookup.
//!
//! A corner (or child octant) of a box is indexed 0..8 by a 3-bit mask: bit
//! [`AXIS_X`] selects the X-high half, [`AXIS_Y`] the Y-high half, [`AXIS_Z`]
//! the Z-high half. Index 0 is the all-low corner, index 7 the all-high
//! corner. Splitting and corner-position logic both go through this module so
//! the two can never disagree.

use nalgebra::Point3;

use crate::interval::Interval;

/// Corner-index bit selecting the X-high half.
pub const AXIS_X: u8 = 4;

/// Corner-index bit selecting the Y-high half.
pub const AXIS_Y: u8 = 2;

/// Corner-index bit selecting the Z-high half.
pub const AXIS_Z: u8 = 1;

/// Corners of a box; children of an octree branch.
pub const CORNER_COUNT: usize = 8;

/// Whether corner `index` sits on the high side of the given axis bit.
#[inline]
#[must_use]
pub const fn is_high(index: u8, axis: u8) -> bool {
    index & axis != 0
}

/// The corner point of the box `(x, y, z)` selected by `index`.
///
/// # Panics
///
/// Panics if `index` is not in `0..8`.
///
/// # Example
///
/// ```
/// use frep_types::{corner_point, Interval};
///
/// let unit = Interval::new(0.0, 1.0);
/// let p = corner_point(unit, unit, unit, 0b101);
/// assert_eq!((p.x, p.y, p.z), (1.0, 0.0, 1.0));
/// ```
#[must_use]
pub fn corner_point(x: Interval, y: Interval, z: Interval, index: u8) -> Point3<f64> {
    assert!(
        usize::from(index) < CORNER_COUNT,
        "corner index out of range: {index}"
    );
    let pick = |i: Interval, axis: u8| {
        if is_high(index, axis) {
            i.upper()
        } else {
            i.lower()
        }
    };
    Point3::new(pick(x, AXIS_X), pick(y, AXIS_Y), pick(z, AXIS_Z))
}
