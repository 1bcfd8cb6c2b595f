//! Points in affine spaces.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Add, Index, Sub};

use crate::math::{
    approx::ApproxEq,
    space::{Affine, Real},
    vec::Vector,
};

/// A generic point type.
///
/// Unlike vectors, points cannot be added to each other; subtracting two
/// points yields the [`Vector`] between them.
#[repr(transparent)]
pub struct Point<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 3-point with `f32` components in basis `B`.
pub type Point3<B = ()> = Point<[f32; 3], Real<3, B>>;

/// A 2-point with `u32` components, such as a pixel position.
pub type Point2u<B = ()> = Point<[u32; 2], Real<2, B>>;

/// Returns a real 2-point with `x` and `y` components.
pub const fn pt2<Sc, B>(x: Sc, y: Sc) -> Point<[Sc; 2], Real<2, B>> {
    Point([x, y], Pd)
}

/// Returns a real 3-point with `x`, `y`, and `z` components.
pub const fn pt3<B>(x: f32, y: f32, z: f32) -> Point3<B> {
    Point([x, y, z], Pd)
}

impl<R, Sp> Point<R, Sp> {
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns `self` reinterpreted as a point in another space.
    #[inline]
    pub fn to<S>(self) -> Point<R, S> {
        Point(self.0, Pd)
    }

    /// Returns the vector from the origin to `self`.
    #[inline]
    pub fn to_vec(self) -> Vector<R, Sp> {
        Vector::new(self.0)
    }
}

impl<Sc: Copy, B> Point<[Sc; 2], Real<2, B>> {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
}

impl<B> Point3<B> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
}

impl<Sp, const N: usize> Affine for Point<[f32; N], Sp> {
    type Diff = Vector<[f32; N], Sp>;

    #[inline]
    fn add(&self, other: &Self::Diff) -> Self {
        Self(array::from_fn(|i| self.0[i] + other.0[i]), Pd)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self::Diff {
        Vector::new(array::from_fn(|i| self.0[i] - other.0[i]))
    }
}

impl<Sp, const N: usize> ApproxEq<Self, f32> for Point<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Foreign trait impls
//

impl<R: Copy, Sp> Copy for Point<R, Sp> {}

impl<R: Clone, Sp> Clone for Point<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, Sp> Default for Point<R, Sp> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: PartialEq, Sp> PartialEq for Point<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Point<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Point<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R, Sp> From<R> for Point<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<R: Index<usize>, Sp> Index<usize> for Point<R, Sp> {
    type Output = R::Output;

    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add<Vector<[f32; N], Sp>> for Point<[f32; N], Sp> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Vector<[f32; N], Sp>) -> Self {
        Affine::add(&self, &rhs)
    }
}

impl<Sp, const N: usize> Sub for Point<[f32; N], Sp> {
    type Output = Vector<[f32; N], Sp>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Affine::sub(&self, &rhs)
    }
}
