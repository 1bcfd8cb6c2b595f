//! Light sources and flat lighting.

use crate::math::{Color3f, Linear, Vec3, rgb, vec3};

use super::View;

/// A white light source "at infinity", such that the light rays arrive
/// parallel and the direction to the light is the same for every point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// The color of the light.
    pub color: Color3f,
    /// The unit vector pointing from the lit surface towards the light.
    pub dir: Vec3<View>,
    /// The fraction of the base color that is lit regardless of direction.
    pub ambient: f32,
    /// The fraction of the base color that is lit by direct light.
    pub diffuse: f32,
}

/// How faces are lit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Lighting {
    /// Every face is drawn with its base color.
    Unlit,
    /// Every face is lit by one directional light, with a single intensity
    /// computed per face.
    Flat(Light),
}

impl Light {
    /// Returns a light shining from direction `dir`.
    ///
    /// The light is white, with the ambient and diffuse contributions
    /// of a default fixed-function light: 0.2 and 0.8.
    pub fn new(dir: Vec3<View>) -> Self {
        Self {
            color: rgb(1.0, 1.0, 1.0),
            dir: dir.normalize(),
            ambient: 0.2,
            diffuse: 0.8,
        }
    }

    /// Returns `base` lit by `self` on a surface with normal `normal`.
    ///
    /// Surfaces are lit on both sides, so the sign of the normal does not
    /// matter. A zero normal only receives the ambient light.
    pub fn shade(&self, base: Color3f, normal: Vec3<View>) -> Color3f {
        let n = normal.normalize();
        let cos = n.dot(&self.dir);
        // Zero normal normalizes to NaN
        let cos = if cos.is_nan() { 0.0 } else { cos.abs() };
        let k = self.ambient + self.diffuse * cos;
        let [r, g, b] = base.0;
        let [lr, lg, lb] = self.color.0;
        rgb(r * lr, g * lg, b * lb).mul(k)
    }
}

impl Lighting {
    /// Returns the color of a face with base color `base` and normal
    /// `normal` under this lighting.
    pub fn shade(&self, base: Color3f, normal: Vec3<View>) -> Color3f {
        match self {
            Self::Unlit => base,
            Self::Flat(light) => light.shade(base, normal),
        }
    }
}

impl Default for Light {
    /// Returns a light shining from direction (1, 1, 1).
    fn default() -> Self {
        Self::new(vec3(1.0, 1.0, 1.0))
    }
}

impl Default for Lighting {
    /// Returns flat lighting with the default light.
    fn default() -> Self {
        Self::Flat(Light::default())
    }
}
