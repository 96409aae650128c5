use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Per-lane predicate produced by lane comparisons.
///
/// Each lane is expanded to an all-ones or all-zeros word at blend time,
/// see [`Lanes::select`](super::Lanes::select).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mask<const W: usize>(pub [bool; W]);

impl<const W: usize> Mask<W> {
    #[inline(always)]
    pub fn splat(on: bool) -> Self {
        Mask([on; W])
    }

    /// True when at least one lane is set.
    #[inline(always)]
    pub fn any(self) -> bool {
        self.0.iter().any(|&m| m)
    }

    /// True when every lane is set.
    #[inline(always)]
    pub fn all(self) -> bool {
        self.0.iter().all(|&m| m)
    }

    #[inline(always)]
    pub fn lane(self, index: usize) -> bool {
        self.0[index]
    }

    /// Lanes set in `self` and clear in `other`.
    #[inline(always)]
    pub fn and_not(self, other: Self) -> Self {
        self & !other
    }
}

impl<const W: usize> BitAnd for Mask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Mask(std::array::from_fn(|i| self.0[i] & rhs.0[i]))
    }
}

impl<const W: usize> BitOr for Mask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Mask(std::array::from_fn(|i| self.0[i] | rhs.0[i]))
    }
}

impl<const W: usize> BitXor for Mask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Mask(std::array::from_fn(|i| self.0[i] ^ rhs.0[i]))
    }
}

impl<const W: usize> Not for Mask<W> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Mask(self.0.map(|m| !m))
    }
}
