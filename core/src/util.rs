//! Various utility types and functions.

pub mod buf;
#[cfg(feature = "std")]
pub mod ppm;

/// Width and height of an image or buffer, in pixels.
pub type Dims = (u32, u32);
