//! Closed floating-point intervals and conservative interval arithmetic.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed interval `[lo, hi]` over `f64`.
///
/// Intervals are the primitive for conservative range analysis: evaluating an
/// expression with intervals in place of coordinates yields an enclosure of
/// every value the expression can take over the corresponding box. The
/// enclosure may be wider than the true range (dependency problem), never
/// narrower.
///
/// The invariant `lo <= hi` is checked at construction and preserved by all
/// arithmetic. Infinite endpoints are legal (they arise from division by an
/// interval straddling zero); NaN endpoints can only arise from arithmetic on
/// already-degenerate operands and are the consumer's job to detect.
///
/// # Example
///
/// ```
/// use frep_types::Interval;
///
/// let a = Interval::new(-2.0, 3.0);
/// let b = Interval::new(1.0, 4.0);
///
/// assert_eq!((a + b).lower(), -1.0);
/// assert_eq!((a + b).upper(), 7.0);
/// assert_eq!(a.square(), Interval::new(0.0, 9.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates the interval `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo <= hi` does not hold (including when either bound is
    /// NaN). Malformed bounds are a programming error, not a recoverable
    /// condition.
    #[must_use]
    pub fn new(lo: f64, hi: f64) -> Self {
        assert!(lo <= hi, "malformed interval: [{lo}, {hi}]");
        Self { lo, hi }
    }

    /// The degenerate interval `[v, v]`.
    #[must_use]
    pub fn point(v: f64) -> Self {
        Self::new(v, v)
    }

    /// The lower bound.
    #[inline]
    #[must_use]
    pub const fn lower(self) -> f64 {
        self.lo
    }

    /// The upper bound.
    #[inline]
    #[must_use]
    pub const fn upper(self) -> f64 {
        self.hi
    }

    /// The midpoint `(lo + hi) / 2`.
    #[inline]
    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.lo + self.hi) * 0.5
    }

    /// The width `hi - lo`.
    #[inline]
    #[must_use]
    pub fn width(self) -> f64 {
        self.hi - self.lo
    }

    /// Whether `v` lies within the interval (bounds inclusive).
    #[inline]
    #[must_use]
    pub fn contains(self, v: f64) -> bool {
        v >= self.lo && v <= self.hi
    }

    /// Whether both endpoints are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// Whether either endpoint is NaN.
    #[inline]
    #[must_use]
    pub fn has_nan(self) -> bool {
        self.lo.is_nan() || self.hi.is_nan()
    }

    /// The lower half `[lo, mid]` of the interval.
    ///
    /// Together with [`Interval::upper_half`] this is the axis-splitting
    /// primitive used by octsection.
    #[must_use]
    pub fn lower_half(self) -> Self {
        Self {
            lo: self.lo,
            hi: self.midpoint(),
        }
    }

    /// The upper half `[mid, hi]` of the interval.
    #[must_use]
    pub fn upper_half(self) -> Self {
        Self {
            lo: self.midpoint(),
            hi: self.hi,
        }
    }

    /// Endpoint-wise minimum: an enclosure of `min(a, b)` over both ranges.
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self {
            lo: self.lo.min(rhs.lo),
            hi: self.hi.min(rhs.hi),
        }
    }

    /// Endpoint-wise maximum: an enclosure of `max(a, b)` over both ranges.
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        Self {
            lo: self.lo.max(rhs.lo),
            hi: self.hi.max(rhs.hi),
        }
    }

    /// Enclosure of `|v|` over the interval.
    ///
    /// # Example
    ///
    /// ```
    /// use frep_types::Interval;
    ///
    /// assert_eq!(Interval::new(-3.0, 2.0).abs(), Interval::new(0.0, 3.0));
    /// assert_eq!(Interval::new(-5.0, -1.0).abs(), Interval::new(1.0, 5.0));
    /// ```
    #[must_use]
    pub fn abs(self) -> Self {
        if self.lo >= 0.0 {
            self
        } else if self.hi <= 0.0 {
            -self
        } else {
            Self {
                lo: 0.0,
                hi: (-self.lo).max(self.hi),
            }
        }
    }

    /// Enclosure of `v * v` over the interval.
    ///
    /// Tighter than `self * self`: squaring is sign-aware, so
    /// `[-2, 3].square()` is `[0, 9]` while the naive product is `[-6, 9]`.
    #[must_use]
    pub fn square(self) -> Self {
        let (a, b) = (self.lo * self.lo, self.hi * self.hi);
        if self.contains(0.0) {
            Self {
                lo: 0.0,
                hi: a.max(b),
            }
        } else {
            Self {
                lo: a.min(b),
                hi: a.max(b),
            }
        }
    }

    /// Enclosure of `sqrt(v)` over the non-negative part of the interval.
    ///
    /// Negative inputs are clamped to zero; an interval that is entirely
    /// negative maps to `[0, 0]`. Point evaluation of the same expression
    /// yields NaN instead, which evaluators report as an error.
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self {
            lo: self.lo.max(0.0).sqrt(),
            hi: self.hi.max(0.0).sqrt(),
        }
    }
}

impl std::ops::Add for Interval {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            lo: self.lo + rhs.lo,
            hi: self.hi + rhs.hi,
        }
    }
}

impl std::ops::Sub for Interval {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            lo: self.lo - rhs.hi,
            hi: self.hi - rhs.lo,
        }
    }
}

impl std::ops::Neg for Interval {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl std::ops::Mul for Interval {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        // All four endpoint products; f64::min/max skip NaN candidates from
        // 0 * inf so a single stray product cannot poison the enclosure.
        let p = [
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ];
        Self {
            lo: p[0].min(p[1]).min(p[2]).min(p[3]),
            hi: p[0].max(p[1]).max(p[2]).max(p[3]),
        }
    }
}

impl std::ops::Div for Interval {
    type Output = Self;

    /// Conservative division: a divisor straddling zero widens the result to
    /// the whole real line.
    fn div(self, rhs: Self) -> Self {
        if rhs.contains(0.0) {
            Self {
                lo: f64::NEG_INFINITY,
                hi: f64::INFINITY,
            }
        } else {
            self * Self {
                lo: 1.0 / rhs.hi,
                hi: 1.0 / rhs.lo,
            }
        }
    }
}

impl From<f64> for Interval {
    fn from(v: f64) -> Self {
        Self::point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn construction_and_accessors() {
        let i = Interval::new(-1.5, 2.5);
        assert_relative_eq!(i.lower(), -1.5);
        assert_relative_eq!(i.upper(), 2.5);
        assert_relative_eq!(i.midpoint(), 0.5);
        assert_relative_eq!(i.width(), 4.0);
        assert!(i.contains(0.0));
        assert!(i.contains(-1.5));
        assert!(!i.contains(2.6));
    }

    #[test]
    #[should_panic(expected = "malformed interval")]
    fn reversed_bounds_panic() {
        let _ = Interval::new(1.0, 0.0);
    }

    #[test]
    fn halves_partition_exactly() {
        let i = Interval::new(-2.0, 6.0);
        assert_eq!(i.lower_half(), Interval::new(-2.0, 2.0));
        assert_eq!(i.upper_half(), Interval::new(2.0, 6.0));
        assert_relative_eq!(i.lower_half().upper(), i.upper_half().lower());
    }

    #[test]
    fn addition_and_subtraction() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(-3.0, 5.0);
        assert_eq!(a + b, Interval::new(-2.0, 7.0));
        assert_eq!(a - b, Interval::new(-4.0, 5.0));
        assert_eq!(-b, Interval::new(-5.0, 3.0));
    }

    #[test]
    fn multiplication_sign_cases() {
        let pos = Interval::new(1.0, 2.0);
        let neg = Interval::new(-3.0, -1.0);
        let mixed = Interval::new(-2.0, 4.0);

        assert_eq!(pos * pos, Interval::new(1.0, 4.0));
        assert_eq!(pos * neg, Interval::new(-6.0, -1.0));
        assert_eq!(neg * neg, Interval::new(1.0, 9.0));
        assert_eq!(mixed * pos, Interval::new(-4.0, 8.0));
        assert_eq!(mixed * mixed, Interval::new(-8.0, 16.0));
    }

    #[test]
    fn division_by_straddling_interval_is_whole_line() {
        let a = Interval::new(1.0, 2.0);
        let z = Interval::new(-1.0, 1.0);
        let whole = a / z;
        assert_eq!(whole.lower(), f64::NEG_INFINITY);
        assert_eq!(whole.upper(), f64::INFINITY);
    }

    #[test]
    fn division_by_nonzero_interval() {
        let a = Interval::new(1.0, 4.0);
        let b = Interval::new(2.0, 4.0);
        assert_eq!(a / b, Interval::new(0.25, 2.0));
    }

    #[test]
    fn square_is_sign_aware() {
        assert_eq!(Interval::new(-2.0, 3.0).square(), Interval::new(0.0, 9.0));
        assert_eq!(Interval::new(1.0, 3.0).square(), Interval::new(1.0, 9.0));
        assert_eq!(Interval::new(-3.0, -1.0).square(), Interval::new(1.0, 9.0));
        // Naive product on a mixed interval is strictly wider.
        let mixed = Interval::new(-2.0, 3.0);
        assert!((mixed * mixed).lower() < mixed.square().lower());
    }

    #[test]
    fn sqrt_clamps_negative_domain() {
        assert_eq!(Interval::new(4.0, 9.0).sqrt(), Interval::new(2.0, 3.0));
        assert_eq!(Interval::new(-4.0, 9.0).sqrt(), Interval::new(0.0, 3.0));
        assert_eq!(Interval::new(-9.0, -4.0).sqrt(), Interval::new(0.0, 0.0));
    }

    #[test]
    fn min_max_are_endpoint_wise() {
        let a = Interval::new(-1.0, 4.0);
        let b = Interval::new(0.0, 2.0);
        assert_eq!(a.min(b), Interval::new(-1.0, 2.0));
        assert_eq!(a.max(b), Interval::new(0.0, 4.0));
    }

    #[test]
    fn point_interval_roundtrip() {
        let p: Interval = 3.5.into();
        assert_eq!(p, Interval::new(3.5, 3.5));
        assert_relative_eq!(p.width(), 0.0);
    }
}
