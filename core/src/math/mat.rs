//! Matrices and linear and affine transforms.
//!
//! Matrices act on column vectors, and are tagged with the spaces they map
//! from and to. [`Matrix::then`] composes two transforms such that the
//! result applies `self` first.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::Range;

use crate::math::{
    angle::Angle,
    approx::ApproxEq,
    point::{Point2u, Point3},
    space::{Proj3, Real},
    vec::{ProjVec3, Vec3},
};

/// A linear transform from one space (or basis) to another.
///
/// This is a tag trait with no functionality in itself. It is used to
/// statically ensure that only compatible maps can be composed, and that
/// only compatible vectors can be transformed.
pub trait LinearMap {
    /// The source space, or domain, of `Self`.
    type Source;
    /// The destination space, or codomain, of `Self`.
    type Dest;
}

/// Composition of two linear maps.
///
/// `Self` is applied after `Inner`, so the source space of `Self` must
/// equal the destination space of `Inner`.
pub trait Compose<Inner: LinearMap>: LinearMap<Source = Inner::Dest> {
    /// The result of composing `Self` with `Inner`.
    type Result: LinearMap<Source = Inner::Source, Dest = Self::Dest>;
}

/// Trait for applying a transform to a vector or a point.
pub trait Apply<T> {
    /// The transform codomain type.
    type Output;

    /// Applies this transform to `t`.
    fn apply(&self, t: &T) -> Self::Output;
}

/// A mapping from one basis to another in real 3-space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToReal<const DIM: usize, SrcBasis = (), DstBasis = ()>(
    Pd<(SrcBasis, DstBasis)>,
);

/// A mapping from real 3-space to projective space, such as a projection
/// into clip space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToProj<SrcBasis>(Pd<SrcBasis>);

/// A generic matrix type.
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, Pd<Map>);

/// A 3×3 linear transform from basis `Src` to basis `Dst`.
pub type Mat3<Src = (), Dst = Src> =
    Matrix<[[f32; 3]; 3], RealToReal<3, Src, Dst>>;

/// A 4×4 affine transform from basis `Src` to basis `Dst`.
pub type Mat4<Src = (), Dst = Src> =
    Matrix<[[f32; 4]; 4], RealToReal<3, Src, Dst>>;

/// A projective transform from basis `Src` to clip space.
pub type ProjMat3<Src = ()> = Matrix<[[f32; 4]; 4], RealToProj<Src>>;

//
// Inherent impls
//

impl<M, const N: usize> Matrix<[[f32; N]; N], M> {
    /// Returns a matrix with the given rows.
    #[inline]
    pub const fn new(rows: [[f32; N]; N]) -> Self {
        Self(rows, Pd)
    }

    /// Returns the N×N identity matrix.
    pub fn identity() -> Self {
        Self::new(array::from_fn(|i| {
            array::from_fn(|j| if i == j { 1.0 } else { 0.0 })
        }))
    }

    /// Returns the row at index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; N] {
        self.0[i]
    }

    /// Returns the column at index `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f32; N] {
        self.0.map(|row| row[i])
    }

    /// Returns the transpose of `self`.
    ///
    /// The transpose of a rotation matrix is its inverse.
    pub fn transpose(&self) -> Self {
        Self::new(array::from_fn(|i| self.col(i)))
    }

    /// Returns `self` with its mapping reinterpreted as `M2`.
    ///
    /// This is a type-level cast; the elements are not changed.
    #[inline]
    pub fn to<M2>(&self) -> Matrix<[[f32; N]; N], M2> {
        Matrix::new(self.0)
    }

    /// Returns the matrix product of `self` and `other`.
    fn mul<M2>(&self, other: &Matrix<[[f32; N]; N], M2>) -> [[f32; N]; N] {
        array::from_fn(|i| {
            array::from_fn(|j| {
                (0..N).map(|k| self.0[i][k] * other.0[k][j]).sum()
            })
        })
    }
}

impl<M: LinearMap> Matrix<[[f32; 4]; 4], M> {
    /// Returns the composite transform that applies `self` first and then
    /// `next`.
    ///
    /// # Examples
    /// ```
    /// use duoview_core::math::{Apply, Mat4, pt3, translate3};
    ///
    /// let t: Mat4 = translate3(1.0, 0.0, 0.0);
    /// let m = t.then(&translate3(0.0, 2.0, 0.0));
    /// assert_eq!(m.apply(&pt3(0.0, 0.0, 0.0)), pt3(1.0, 2.0, 0.0));
    /// ```
    pub fn then<N: Compose<M>>(
        &self,
        next: &Matrix<[[f32; 4]; 4], N>,
    ) -> Matrix<[[f32; 4]; 4], N::Result> {
        Matrix::new(next.mul(self))
    }
}

//
// Local trait impls
//

impl<const DIM: usize, S, D> LinearMap for RealToReal<DIM, S, D> {
    type Source = Real<DIM, S>;
    type Dest = Real<DIM, D>;
}

impl<S> LinearMap for RealToProj<S> {
    type Source = Real<3, S>;
    type Dest = Proj3;
}

impl<const DIM: usize, S, I, D> Compose<RealToReal<DIM, S, I>>
    for RealToReal<DIM, I, D>
{
    type Result = RealToReal<DIM, S, D>;
}

impl<S, I> Compose<RealToReal<3, S, I>> for RealToProj<I> {
    type Result = RealToProj<S>;
}

impl<S, D> Apply<Vec3<S>> for Mat3<S, D> {
    type Output = Vec3<D>;

    fn apply(&self, v: &Vec3<S>) -> Vec3<D> {
        Vec3::new(array::from_fn(|i| Vec3::<S>::new(self.0[i]).dot(v)))
    }
}

impl<S, D> Apply<Vec3<S>> for Mat4<S, D> {
    type Output = Vec3<D>;

    /// Transforms a vector. The translation part of `self` is ignored.
    fn apply(&self, v: &Vec3<S>) -> Vec3<D> {
        let [x, y, z] = v.0;
        let m = &self.0;
        Vec3::new(array::from_fn(|i| m[i][0] * x + m[i][1] * y + m[i][2] * z))
    }
}

impl<S, D> Apply<Point3<S>> for Mat4<S, D> {
    type Output = Point3<D>;

    fn apply(&self, p: &Point3<S>) -> Point3<D> {
        let [x, y, z] = p.0;
        let m = &self.0;
        Point3::new(array::from_fn(|i| {
            m[i][0] * x + m[i][1] * y + m[i][2] * z + m[i][3]
        }))
    }
}

impl<S> Apply<Point3<S>> for ProjMat3<S> {
    type Output = ProjVec3;

    fn apply(&self, p: &Point3<S>) -> ProjVec3 {
        let [x, y, z] = p.0;
        let m = &self.0;
        ProjVec3::new(array::from_fn(|i| {
            m[i][0] * x + m[i][1] * y + m[i][2] * z + m[i][3]
        }))
    }
}

impl<M, const N: usize> ApproxEq<Self, f32> for Matrix<[[f32; N]; N], M> {
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

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<M: Debug + Default, const N: usize> Debug for Matrix<[[f32; N]; N], M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}

impl<const DIM: usize, S, D> Debug for RealToReal<DIM, S, D>
where
    S: Debug + Default,
    D: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", S::default(), D::default())
    }
}

impl<S: Debug + Default> Debug for RealToProj<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→Proj", S::default())
    }
}

impl<M, const N: usize> From<[[f32; N]; N]> for Matrix<[[f32; N]; N], M> {
    fn from(rows: [[f32; N]; N]) -> Self {
        Self::new(rows)
    }
}

//
// Free functions
//

/// Returns a matrix translating by vector `t`.
pub fn translate<S>(t: Vec3<S>) -> Mat4<S> {
    let [x, y, z] = t.0;
    translate3(x, y, z)
}

/// Returns a matrix translating by `x`, `y`, and `z`.
#[rustfmt::skip]
pub fn translate3<S>(x: f32, y: f32, z: f32) -> Mat4<S> {
    Matrix::new([
        [1.0, 0.0, 0.0,  x ],
        [0.0, 1.0, 0.0,  y ],
        [0.0, 0.0, 1.0,  z ],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating counterclockwise by angle `a` about the x axis,
/// when viewed from the positive x axis towards the origin.
#[rustfmt::skip]
pub fn rotate_x<S>(a: Angle) -> Mat4<S> {
    let (s, c) = a.sin_cos();
    Matrix::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0,  c,  -s,  0.0],
        [0.0,  s,   c,  0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating by angle `a` about the unit vector `axis`,
/// using the Rodrigues rotation formula
/// ```text
/// R = cos(a) I + sin(a) [axis]ₓ + (1 - cos(a)) axis axisᵀ
/// ```
/// where [axis]ₓ is the cross-product matrix of `axis`.
///
/// The result is unspecified if `axis` is not of unit length.
///
/// # Examples
/// ```
/// use duoview_core::assert_approx_eq;
/// use duoview_core::math::{Apply, Mat3, Vec3, degs, rotate, vec3};
///
/// let m: Mat3 = rotate(vec3(0.0, 1.0, 0.0), degs(90.0));
/// let v: Vec3 = m.apply(&vec3(0.0, 0.0, 1.0));
/// assert_approx_eq!(v, vec3(1.0, 0.0, 0.0));
/// ```
pub fn rotate<S>(axis: Vec3<S>, a: Angle) -> Mat3<S> {
    let [x, y, z] = axis.0;
    let (s, c) = a.sin_cos();
    let t = 1.0 - c;
    Matrix::new([
        [c + t * x * x, t * x * y - s * z, t * x * z + s * y],
        [t * y * x + s * z, c + t * y * y, t * y * z - s * x],
        [t * z * x - s * y, t * z * y + s * x, c + t * z * z],
    ])
}

/// Creates an orthographic projection matrix.
///
/// The view volume is the axis-aligned box whose left, bottom, and near
/// corner is `lbn` and right, top, and far corner is `rtf`. The near and
/// far components are *distances* in front of the camera, which looks
/// down the negative z axis. The volume maps to the canonical clip-space
/// cube [-1, 1]³, with the near plane at z = -1.
///
/// # Examples
/// ```
/// use duoview_core::assert_approx_eq;
/// use duoview_core::math::{Apply, ProjMat3, orthographic, pt3};
/// use duoview_core::render::View;
///
/// let m: ProjMat3<View> =
///     orthographic(pt3(-2.0, -1.0, 1.0), pt3(2.0, 1.0, 11.0));
///
/// assert_approx_eq!(m.apply(&pt3(2.0, 1.0, -1.0)).0, [1.0, 1.0, -1.0, 1.0]);
/// assert_approx_eq!(m.apply(&pt3(-2.0, 0.0, -11.0)).0, [-1.0, 0.0, 1.0, 1.0]);
/// ```
pub fn orthographic<B>(lbn: Point3<B>, rtf: Point3<B>) -> ProjMat3<B> {
    let [l, b, n] = lbn.0;
    let [r, t, f] = rtf.0;
    let [dx, dy, dz] = [r - l, t - b, f - n];
    Matrix::new([
        [2.0 / dx, 0.0, 0.0, -(r + l) / dx],
        [0.0, 2.0 / dy, 0.0, -(t + b) / dy],
        [0.0, 0.0, -2.0 / dz, -(f + n) / dz],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Creates a viewport transform matrix.
///
/// A viewport matrix maps normalized device coordinates (NDC) to screen
/// space. Points with x and y in [-1, 1] are mapped to the rectangle
/// `bounds`, with y = -1 mapping to the *bottom* row `bounds.start.y()`.
/// Depth values in [-1, 1] are mapped to [0, 1].
pub fn viewport<S, D>(bounds: Range<Point2u>) -> Mat4<S, D> {
    let Range { start, end } = bounds;
    let h = (end.x() - start.x()) as f32 / 2.0;
    let v = (end.y() - start.y()) as f32 / 2.0;
    Matrix::new([
        [h, 0.0, 0.0, h + start.x() as f32],
        [0.0, v, 0.0, v + start.y() as f32],
        [0.0, 0.0, 0.5, 0.5],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;
    use crate::math::{angle::degs, point::pt2, point::pt3, vec::vec3};

    use super::*;

    #[derive(Debug, Default, Eq, PartialEq)]
    struct Basis1;
    #[derive(Debug, Default, Eq, PartialEq)]
    struct Basis2;

    #[test]
    fn matrix_debug() {
        let m: Mat4<Basis1, Basis2> = Matrix::new([
            [0.0, 1.0, 2.0, 3.0],
            [10.0, 11.0, 12.0, 13.0],
            [20.0, 21.0, 22.0, 23.0],
            [30.0, 31.0, 32.0, 33.0],
        ]);
        let expected = r#"Matrix<Basis1→Basis2>[
    [  0.00,   1.00,   2.00,   3.00]
    [ 10.00,  11.00,  12.00,  13.00]
    [ 20.00,  21.00,  22.00,  23.00]
    [ 30.00,  31.00,  32.00,  33.00]
]"#;
        assert_eq!(format!("{m:?}"), expected);
    }

    #[test]
    fn identity_and_transpose() {
        let m: Mat3 =
            Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.transpose().row(0), [1.0, 4.0, 7.0]);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(Mat3::<()>::identity().col(1), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn translation_moves_points_but_not_vectors() {
        let m: Mat4 = translate(vec3(1.0, 2.0, 3.0));
        assert_eq!(m.apply(&pt3(0.0, 5.0, -3.0)), pt3(1.0, 7.0, 0.0));
        assert_eq!(m.apply(&vec3(0.0, 5.0, -3.0)), vec3(0.0, 5.0, -3.0));
    }

    #[test]
    fn composition_applies_self_first() {
        let t: Mat4<Basis1, Basis2> = translate3::<Basis1>(0.0, 1.0, 0.0).to();
        let r: Mat4<Basis2, Basis2> = rotate_x(degs(90.0));
        let m = t.then(&r);
        assert_approx_eq!(m.apply(&pt3(0.0, 0.0, 0.0)), pt3(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_x_half_turn_flips_y_and_z() {
        let m: Mat4 = rotate_x(degs(180.0));
        assert_approx_eq!(
            m.apply(&pt3(1.0, 2.0, 3.0)),
            pt3(1.0, -2.0, -3.0),
            eps = 1e-6
        );
    }

    #[test]
    fn rodrigues_about_y() {
        let m: Mat3 = rotate(vec3(0.0, 1.0, 0.0), degs(90.0));
        let expected: Mat3 =
            Matrix::new([[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]]);
        assert_approx_eq!(m, expected, eps = 1e-6);
    }

    #[test]
    fn rodrigues_zero_angle_is_identity() {
        let m: Mat3 = rotate(vec3(0.6, 0.0, 0.8), degs(0.0));
        assert_approx_eq!(m, Mat3::identity());
    }

    #[test]
    fn orthographic_maps_volume_to_cube() {
        let m: ProjMat3 =
            orthographic(pt3(-4.0, -2.0, 1.0), pt3(4.0, 2.0, 1001.0));
        let to_clip = |x, y, z| m.apply(&pt3(x, y, z)).0;

        assert_approx_eq!(to_clip(0.0, 0.0, -1.0), [0.0, 0.0, -1.0, 1.0]);
        assert_approx_eq!(to_clip(4.0, -2.0, -1001.0), [1.0, -1.0, 1.0, 1.0]);
        assert_approx_eq!(to_clip(-2.0, 1.0, -501.0), [-0.5, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn viewport_maps_ndc_to_screen() {
        let m: Mat4 = viewport(pt2(0, 0)..pt2(640, 480));
        assert_eq!(m.apply(&pt3(-1.0, -1.0, -1.0)), pt3(0.0, 0.0, 0.0));
        assert_eq!(m.apply(&pt3(1.0, 1.0, 1.0)), pt3(640.0, 480.0, 1.0));
        assert_eq!(m.apply(&pt3(0.0, 0.5, 0.0)), pt3(320.0, 360.0, 0.5));
    }
}
