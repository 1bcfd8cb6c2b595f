//! Real and projective vectors.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Add, Index, Mul, Neg, Sub};

use crate::math::{
    approx::ApproxEq,
    point::Point3,
    space::{Affine, Linear, Proj3, Real},
};

/// A generic vector type.
///
/// # Type parameters
/// * `Repr`: the representation of the components of `Self`, typically an
///   array of scalars.
/// * `Space`: the space that `Self` is an element of, such as [`Real`].
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 3-vector with `f32` components in basis `B`.
pub type Vec3<B = ()> = Vector<[f32; 3], Real<3, B>>;

/// A 4-vector in projective space, such as a point in clip space.
pub type ProjVec3 = Vector<[f32; 4], Proj3>;

/// Returns a real 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3<B>(x: f32, y: f32, z: f32) -> Vec3<B> {
    Vector([x, y, z], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns `self` reinterpreted as a vector in another space.
    ///
    /// This is a type-level cast; the components are not changed.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector(self.0, Pd)
    }
}

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        (0..N).map(|i| self.0[i] * other.0[i]).sum()
    }

    /// Returns the squared Euclidean length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        use crate::math::float::f32;
        f32::sqrt(self.len_sqr())
    }

    /// Returns `self` scaled to unit length.
    ///
    /// The result is non-finite if `self` is the zero vector.
    #[inline]
    pub fn normalize(&self) -> Self {
        Linear::mul(self, self.len().recip())
    }
}

impl<B> Vec3<B> {
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

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both inputs, and its length equals
    /// the area of the parallelogram they span.
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }
}

impl ProjVec3 {
    /// Returns the w component of `self`.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Projects `self` to the real 3-space by dividing the x, y, and z
    /// components by w.
    ///
    /// The result is unspecified if w is zero.
    #[inline]
    pub fn project_to_real<B>(&self) -> Point3<B> {
        let [x, y, z, w] = self.0;
        let w = w.recip();
        Point3::new([x * w, y * w, z * w])
    }
}

//
// Local trait impls
//

impl<Sp, const N: usize> Affine for Vector<[f32; N], Sp> {
    type Diff = Self;

    #[inline]
    fn add(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + other.0[i]), Pd)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - other.0[i]), Pd)
    }
}

impl<Sp, const N: usize> Linear for Vector<[f32; N], Sp> {
    type Scalar = f32;

    #[inline]
    fn neg(&self) -> Self {
        Self(self.0.map(|c| -c), Pd)
    }
    #[inline]
    fn mul(&self, scalar: f32) -> Self {
        Self(self.0.map(|c| c * scalar), Pd)
    }
}

impl<Sp, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], Sp> {
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

// Manual impls of Copy, Clone, Default, and PartialEq to avoid
// superfluous where Sp: Trait bounds

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Affine::add(&self, &rhs)
    }
}

impl<Sp, const N: usize> Sub for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Affine::sub(&self, &rhs)
    }
}

impl<Sp, const N: usize> Mul<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Linear::mul(&self, rhs)
    }
}

impl<Sp, const N: usize> Neg for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Linear::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn vector_addition() {
        let v: Vec3 = vec3(1.0, 2.0, 0.0);
        assert_eq!(v + vec3(-2.0, 1.0, -1.0), vec3(-1.0, 3.0, -1.0));
        assert_eq!(v - vec3(-2.0, 1.0, -1.0), vec3(3.0, 1.0, 1.0));
    }

    #[test]
    fn scalar_multiplication() {
        let v: Vec3 = vec3(1.0, -2.0, 3.0);
        assert_eq!(v * 3.0, vec3(3.0, -6.0, 9.0));
        assert_eq!(-v, vec3(-1.0, 2.0, -3.0));
    }

    #[test]
    fn dot_product() {
        let v: Vec3 = vec3(0.5, 0.5, 0.0);
        assert_eq!(v.dot(&vec3(-2.0, 2.0, 7.0)), 0.0);
        assert_eq!(v.dot(&vec3(-4.0, -4.0, 1.0)), -4.0);
    }

    #[test]
    fn cross_product() {
        let x: Vec3 = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        let z = vec3(0.0, 0.0, 1.0);
        assert_eq!(x.cross(&y), z);
        assert_eq!(z.cross(&y), -x);
    }

    #[test]
    fn length_and_normalize() {
        let v: Vec3 = vec3(3.0, 0.0, 4.0);
        assert_eq!(v.len(), 5.0);
        assert_approx_eq!(v.normalize(), vec3(0.6, 0.0, 0.8));
        assert_approx_eq!(v.normalize().len(), 1.0);
    }

    #[test]
    fn projection_divides_by_w() {
        let v = ProjVec3::new([2.0, -4.0, 1.0, 2.0]);
        let p: Point3 = v.project_to_real();
        assert_eq!(p, Point3::new([1.0, -2.0, 0.5]));
    }

    #[test]
    fn debug() {
        let v: Vec3 = vec3(1.0, -2.0, 3.0);
        assert_eq!(format!("{v:?}"), "Vec<ℝ³<()>>[1.0, -2.0, 3.0]");
    }
}
