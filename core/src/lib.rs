//! Core functionality of the `duoview` project.
//!
//! Renders batches of triangle meshes that share one face topology, such as
//! fitted body meshes, into RGB images. Every batch can be viewed from the
//! front, or from the side after rotating it 90° about the vertical axis,
//! and the front view can be composited over a background image.
//!
//! Includes a small strongly typed math library with vectors, points,
//! matrices, angles, and colors; basic geometry primitives; and a software
//! rasterizer with clipping and depth testing.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring I/O or timekeeping, and uses the
//!   floating-point functions of `std`. Enabled by default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate, for `no_std` targets.
//!
//! One of the two must be enabled. Without `std`, the crate only depends
//! on `alloc`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod geom;
pub mod math;
pub mod render;
pub mod util;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::math::{
        Affine, Angle, ApproxEq, Color3, Color3f, Color4, Lerp, Linear, Mat3,
        Mat4, Point3, Vec3, degs, hsv, pt3, rads, rgb, rgba, vec3,
    };

    pub use crate::geom::{Tri, Vertex, tri, vertex};

    pub use crate::render::{
        Model, View,
        device::{Device, Headless},
        view::ViewRenderer,
    };

    pub use crate::util::{Dims, buf::Buf2};

    pub use crate::{Error, Result};
}
