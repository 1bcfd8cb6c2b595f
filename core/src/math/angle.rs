//! Angles.

use core::f32::consts::PI;

/// An angle, stored in radians.
///
/// Constructed with [`degs`] or [`rads`] so that the unit is always explicit
/// at the call site.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

/// Returns an angle of `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * (PI / 180.0))
}

impl Angle {
    /// Returns `self` in radians.
    ///
    /// # Examples
    /// ```
    /// use duoview_core::math::degs;
    ///
    /// assert_eq!(degs(180.0).to_rads(), core::f32::consts::PI);
    /// ```
    pub const fn to_rads(self) -> f32 {
        self.0
    }

    /// Returns the sine and the cosine of `self`.
    pub fn sin_cos(self) -> (f32, f32) {
        use super::float::f32;
        (f32::sin(self.0), f32::cos(self.0))
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;

    use crate::assert_approx_eq;
    use crate::math::float::f32;

    use super::*;

    #[test]
    fn degrees_to_radians() {
        assert_approx_eq!(degs(90.0).to_rads(), FRAC_PI_2);
        assert_approx_eq!(degs(-45.0).to_rads(), -FRAC_PI_2 / 2.0);
        assert_eq!(rads(1.5).to_rads(), 1.5);
    }

    #[test]
    fn sine_and_cosine() {
        let (s, c) = degs(30.0).sin_cos();
        assert_approx_eq!(s, 0.5);
        assert_approx_eq!(c, f32::sqrt(0.75));

        let (s, c) = degs(180.0).sin_cos();
        assert_approx_eq!(s, 0.0);
        assert_approx_eq!(c, -1.0);
    }
}
