//! Colors and color spaces.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::Index;

use crate::math::{
    approx::ApproxEq,
    space::{Affine, Linear},
};

//
// Types
//

/// A generic color type, similar to [`Vector`][super::Vector].
///
/// # Type parameters
/// * `Repr`: the representation of the components of `Self`.
///   Color components are also called *channels*.
/// * `Space`: the color space that `Self` is an element of.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Color<Repr, Space>(pub Repr, PhantomData<Space>);

/// The (s)RGB color space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgb;

/// The (s)RGBA color space (RGB plus alpha, or opacity).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgba;

/// The HSV color space (hue, saturation, value).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Hsv;

/// An RGB color with `u8` components.
pub type Color3<Space = Rgb> = Color<[u8; 3], Space>;

/// An RGBA color with `u8` components.
pub type Color4<Space = Rgba> = Color<[u8; 4], Space>;

/// An RGB color with `f32` components.
pub type Color3f<Space = Rgb> = Color<[f32; 3], Space>;

/// An HSV color with `f32` components, each in the range [0, 1].
pub type Hsvf = Color<[f32; 3], Hsv>;

/// Returns a new RGB color with `r`, `g`, and `b` components.
pub const fn rgb<Ch>(r: Ch, g: Ch, b: Ch) -> Color<[Ch; 3], Rgb> {
    Color([r, g, b], PhantomData)
}

/// Returns a new RGBA color with `r`, `g`, `b`, and `a` components.
pub const fn rgba<Ch>(r: Ch, g: Ch, b: Ch, a: Ch) -> Color<[Ch; 4], Rgba> {
    Color([r, g, b, a], PhantomData)
}

/// Returns a new HSV color with hue `h`, saturation `s`, and value `v`.
///
/// The hue is a fraction of a full turn, so 0.0 and 1.0 are both red.
pub const fn hsv(h: f32, s: f32, v: f32) -> Hsvf {
    Color([h, s, v], PhantomData)
}

//
// Inherent impls
//

impl Color3 {
    /// Returns a `u32` containing the component bytes of `self`
    /// in format `0x00_RR_GG_BB`.
    #[inline]
    pub const fn to_rgb_u32(self) -> u32 {
        let [r, g, b] = self.0;
        u32::from_be_bytes([0x00, r, g, b])
    }

    /// Returns `self` with each channel mapped to [0, 1].
    pub fn to_color3f(self) -> Color3f {
        self.0.map(|c| f32::from(c) / 255.0).into()
    }
}

impl Color4 {
    /// Returns the color channels of `self`, discarding alpha.
    #[inline]
    pub const fn to_color3(self) -> Color3 {
        let [r, g, b, _] = self.0;
        rgb(r, g, b)
    }
}

impl Color3f {
    /// Returns a `Color3` with the components of `self` mapped to `u8`
    /// with `(c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8`, that is, rounded
    /// to the nearest integer.
    #[inline]
    pub fn to_color3(self) -> Color3 {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8).into()
    }
}

impl<R, Sc> Color<R, Rgb>
where
    R: Index<usize, Output = Sc>,
    Sc: Copy,
{
    /// Returns the red component of `self`.
    pub fn r(&self) -> Sc {
        self.0[0]
    }
    /// Returns the green component of `self`.
    pub fn g(&self) -> Sc {
        self.0[1]
    }
    /// Returns the blue component of `self`.
    pub fn b(&self) -> Sc {
        self.0[2]
    }
}

impl<R, Sc> Color<R, Rgba>
where
    R: Index<usize, Output = Sc>,
    Sc: Copy,
{
    /// Returns the red component of `self`.
    pub fn r(&self) -> Sc {
        self.0[0]
    }
    /// Returns the green component of `self`.
    pub fn g(&self) -> Sc {
        self.0[1]
    }
    /// Returns the blue component of `self`.
    pub fn b(&self) -> Sc {
        self.0[2]
    }
    /// Returns the alpha component of `self`.
    pub fn a(&self) -> Sc {
        self.0[3]
    }
}

impl Hsvf {
    /// Returns the hue component of `self`.
    pub fn h(&self) -> f32 {
        self.0[0]
    }
    /// Returns the saturation component of `self`.
    pub fn s(&self) -> f32 {
        self.0[1]
    }
    /// Returns the value component of `self`.
    pub fn v(&self) -> f32 {
        self.0[2]
    }

    /// Converts `self` to RGB.
    ///
    /// The hue circle is split into six sectors, in each of which one
    /// channel is at the maximum `v`, one at the minimum `v * (1 - s)`,
    /// and one ramps linearly between them.
    ///
    /// # Examples
    /// ```
    /// use duoview_core::math::{hsv, rgb};
    ///
    /// assert_eq!(hsv(0.0, 1.0, 1.0).to_rgb(), rgb(1.0, 0.0, 0.0));
    /// assert_eq!(hsv(0.5, 1.0, 1.0).to_rgb(), rgb(0.0, 1.0, 1.0));
    /// assert_eq!(hsv(0.25, 0.0, 0.5).to_rgb(), rgb(0.5, 0.5, 0.5));
    /// ```
    pub fn to_rgb(&self) -> Color3f {
        let [h, s, v] = self.0;
        if s == 0.0 {
            return rgb(v, v, v);
        }
        // Truncates towards zero
        let i = (h * 6.0) as i32;
        let f = h * 6.0 - i as f32;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i.rem_euclid(6) {
            0 => rgb(v, t, p),
            1 => rgb(q, v, p),
            2 => rgb(p, v, t),
            3 => rgb(p, q, v),
            4 => rgb(t, p, v),
            _ => rgb(v, p, q),
        }
    }
}

//
// Local trait impls
//

// Float colors interpolate channel by channel, like vectors.

impl<Sp, const N: usize> Affine for Color<[f32; N], Sp> {
    type Diff = Self;

    fn add(&self, d: &Self) -> Self {
        let mut cs = self.0;
        cs.iter_mut().zip(d.0).for_each(|(c, d)| *c += d);
        cs.into()
    }
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }
}

impl<Sp, const N: usize> Linear for Color<[f32; N], Sp> {
    type Scalar = f32;

    fn neg(&self) -> Self {
        self.mul(-1.0)
    }
    fn mul(&self, s: f32) -> Self {
        self.0.map(|c| c * s).into()
    }
}

impl<Sp, const DIM: usize> ApproxEq<Self, f32> for Color<[f32; DIM], Sp> {
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

impl<R: Debug, Space: Debug + Default> Debug for Color<R, Space> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Color<{:?}>{:?}", Space::default(), self.0)
    }
}

impl<R, Sp> From<R> for Color<R, Sp> {
    #[inline]
    fn from(els: R) -> Self {
        Self(els, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn color_components() {
        assert_eq!(rgb(0xFF, 0, 0).r(), 0xFF);
        assert_eq!(rgb(0, 0xFF, 0).g(), 0xFF);
        assert_eq!(rgb(0, 0, 0xFF).b(), 0xFF);
        assert_eq!(rgba(0, 0, 0, 0xFF).a(), 0xFF);
        assert_eq!(hsv(0.1, 0.2, 0.3).s(), 0.2);
    }

    #[test]
    fn rgb_to_u32() {
        assert_eq!(rgb(0x11, 0x22, 0x33).to_rgb_u32(), 0x00_11_22_33);
    }

    #[test]
    fn float_to_u8_rounds_and_clamps() {
        assert_eq!(rgb(0.5, 1.0, 0.0).to_color3(), rgb(128, 255, 0));
        assert_eq!(rgb(-0.5, 1.5, 0.499).to_color3(), rgb(0, 255, 127));
        let c = rgb(128u8, 0, 255);
        assert_eq!(c.to_color3f().to_color3(), c);
    }

    #[test]
    fn rgba_drops_alpha() {
        assert_eq!(rgba(1u8, 2, 3, 4).to_color3(), rgb(1, 2, 3));
    }

    #[test]
    fn hsv_sector_boundaries() {
        let cases = [
            (0.0, rgb(1.0, 0.0, 0.0)),
            (1.0 / 6.0, rgb(1.0, 1.0, 0.0)),
            (2.0 / 6.0, rgb(0.0, 1.0, 0.0)),
            (3.0 / 6.0, rgb(0.0, 1.0, 1.0)),
            (4.0 / 6.0, rgb(0.0, 0.0, 1.0)),
            (5.0 / 6.0, rgb(1.0, 0.0, 1.0)),
            (1.0, rgb(1.0, 0.0, 0.0)),
        ];
        for (h, expected) in cases {
            assert_approx_eq!(hsv(h, 1.0, 1.0).to_rgb(), expected, eps = 1e-5);
        }
    }

    #[test]
    fn hsv_half_saturation_hues() {
        assert_approx_eq!(hsv(0.0, 0.5, 1.0).to_rgb(), rgb(1.0, 0.5, 0.5));
        assert_approx_eq!(
            hsv(1.0 / 3.0, 0.5, 1.0).to_rgb(),
            rgb(0.5, 1.0, 0.5),
            eps = 1e-5
        );
        assert_approx_eq!(
            hsv(2.0 / 3.0, 0.5, 1.0).to_rgb(),
            rgb(0.5, 0.5, 1.0),
            eps = 1e-5
        );
    }

    #[test]
    fn hsv_mid_sector() {
        // Halfway between red and yellow
        let c = hsv(1.0 / 12.0, 1.0, 1.0).to_rgb();
        assert_approx_eq!(c, rgb(1.0, 0.5, 0.0));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        assert_eq!(hsv(0.7, 0.0, 0.25).to_rgb(), rgb(0.25, 0.25, 0.25));
    }
}
