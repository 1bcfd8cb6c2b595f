//! The handful of `f32` functions the renderer needs, with or without `std`.
//!
//! Import [`f32`] from here inside a function body and call `f32::sqrt(x)`
//! and so on. With `std` that resolves to the inherent methods of the
//! primitive type; with only `libm` it resolves to the functions of the
//! [`fallback`] module.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("duoview-core needs either the `std` or the `libm` feature");

/// `libm` functions under the names of the matching `f32` methods.
#[cfg(feature = "libm")]
pub mod fallback {
    pub use libm::{
        cosf as cos, fabsf as abs, floorf as floor, sinf as sin, sqrtf as sqrt,
    };
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use fallback as f32;
