//! Vectors, points, matrices, colors, and angles.
//!
//! Points, vectors, and colors carry a phantom type naming the space they
//! live in, and matrices name both the space they map from and the one they
//! map to. Applying a view-space matrix to a model-space point is a type
//! error rather than a wrong picture.

pub use {
    angle::{Angle, degs, rads},
    approx::ApproxEq,
    color::{Color, Color3, Color3f, Color4, Hsvf, hsv, rgb, rgba},
    mat::{
        Apply, Mat3, Mat4, Matrix, ProjMat3, orthographic, rotate, rotate_x,
        translate, translate3, viewport,
    },
    point::{Point, Point2u, Point3, pt2, pt3},
    space::{Affine, Linear},
    vec::{ProjVec3, Vec3, Vector, vec3},
};

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod point;
pub mod space;
pub mod vec;

/// Linear interpolation.
pub trait Lerp: Sized {
    /// Returns the value a fraction `t` of the way from `self` to `other`.
    ///
    /// `t` = 0 gives `self` and `t` = 1 gives `other`; values outside
    /// [0, 1] extrapolate.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl<T> Lerp for T
where
    T: Affine<Diff: Linear<Scalar = f32>>,
{
    /// Returns `self + t * (other - self)`.
    ///
    /// # Examples
    /// ```
    /// use duoview_core::math::{Lerp, Point3, pt3};
    ///
    /// assert_eq!(2.0f32.lerp(&5.0, 0.25), 2.75);
    ///
    /// let p: Point3 = pt3(-10.0, 5.0, 0.0);
    /// assert_eq!(p.lerp(&pt3(-5.0, 0.0, 1.0), 0.4), pt3(-8.0, 3.0, 0.4));
    /// ```
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.add(&other.sub(self).mul(t))
    }
}
