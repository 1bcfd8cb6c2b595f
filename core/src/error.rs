//! Errors reported by the renderer.

use alloc::string::String;

use crate::util::Dims;

/// Error returned by render calls and renderer construction.
///
/// Every error is detected before anything is drawn, and none is transient:
/// rendering is deterministic, so retrying without changing the input
/// yields the same error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A configuration parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input geometry or images do not fit the configuration.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(#[from] Mismatch),

    /// The device has no usable current framebuffer.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
}

/// The ways input can fail to fit the renderer configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Mismatch {
    /// A face refers to a vertex that does not exist in some mesh.
    #[error(
        "face {face} refers to vertex {index} but mesh {mesh} has only \
         {len} vertices"
    )]
    FaceIndex {
        mesh: usize,
        face: usize,
        index: usize,
        len: usize,
    },

    /// An image does not have the dimensions of the render output.
    #[error("{what} is {actual:?} but the output is {expected:?}")]
    Dims {
        what: &'static str,
        expected: Dims,
        actual: Dims,
    },
}

/// Result of a fallible render operation.
pub type Result<T> = core::result::Result<T, Error>;
