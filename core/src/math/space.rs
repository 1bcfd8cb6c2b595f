//! Affine and linear spaces, and the tags naming them.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

/// Values that can be offset by a difference and subtracted from each
/// other, like points.
///
/// `a.add(&b.sub(&a))` equals `b` up to rounding.
pub trait Affine: Sized {
    /// The difference of two values, like a vector between two points.
    type Diff: Linear;

    fn add(&self, diff: &Self::Diff) -> Self;

    fn sub(&self, other: &Self) -> Self::Diff;
}

/// Values that are their own differences and can be scaled, like vectors.
pub trait Linear: Affine<Diff = Self> {
    type Scalar: Sized;

    fn neg(&self) -> Self;

    fn mul(&self, scalar: Self::Scalar) -> Self;
}

/// Tag of the real coordinate space of dimension `DIM` with basis `Basis`.
///
/// Model, view, and screen space are all `Real<3, _>` with different
/// bases, so their coordinates do not mix.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

/// Tag of homogeneous coordinates, the output of a projection.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj3;

impl Affine for f32 {
    type Diff = Self;

    fn add(&self, diff: &Self) -> Self {
        self + diff
    }
    fn sub(&self, other: &Self) -> Self {
        self - other
    }
}

impl Linear for f32 {
    type Scalar = Self;

    fn neg(&self) -> Self {
        -self
    }
    fn mul(&self, scalar: Self) -> Self {
        self * scalar
    }
}

impl<const DIM: usize, Basis: Debug + Default> Debug for Real<DIM, Basis> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let basis = Basis::default();
        match DIM {
            2 => write!(f, "ℝ²<{basis:?}>"),
            3 => write!(f, "ℝ³<{basis:?}>"),
            n => write!(f, "ℝ^{n}<{basis:?}>"),
        }
    }
}
