//! Render state shared by the calls drawing one view.

use core::{cell::RefCell, cmp::Ordering};

use crate::math::{Color4, rgba};

use super::Stats;

/// Clear values, depth test, and statistics of a render pass.
///
/// A fresh context is made for every view, so nothing leaks from one
/// image into the next.
#[derive(Clone, Debug)]
pub struct Context {
    /// Fill color for [`Framebuf::clear`][super::Framebuf::clear], or
    /// `None` to leave the color buffer as it is.
    pub color_clear: Option<Color4>,
    /// Fill depth for the depth buffer, or `None` to leave it as it is.
    pub depth_clear: Option<f32>,
    /// The ordering a new depth must have relative to the stored one for
    /// the fragment to be drawn. `None` draws every fragment.
    pub depth_test: Option<Ordering>,
    pub stats: RefCell<Stats>,
}

impl Context {
    /// Returns whether a fragment at depth `new` is drawn over one at
    /// depth `curr`. NaN depths never pass a depth test.
    #[inline]
    pub fn depth_test(&self, new: f32, curr: f32) -> bool {
        match self.depth_test {
            None => true,
            Some(ord) => new.partial_cmp(&curr) == Some(ord),
        }
    }
}

impl Default for Context {
    /// Clears to transparent black at the far plane (depth 1.0), and draws
    /// fragments strictly nearer than what is already there.
    fn default() -> Self {
        Self {
            color_clear: Some(rgba(0, 0, 0, 0)),
            depth_clear: Some(1.0),
            depth_test: Some(Ordering::Less),
            stats: RefCell::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_test_passes_if_closer() {
        let ctx = Context::default();
        assert!(ctx.depth_test(0.25, 0.5));
        assert!(!ctx.depth_test(0.5, 0.5));
        assert!(!ctx.depth_test(0.75, 0.5));
        assert!(!ctx.depth_test(f32::NAN, 0.5));
    }

    #[test]
    fn depth_test_can_be_disabled() {
        let ctx = Context { depth_test: None, ..Context::default() };
        assert!(ctx.depth_test(0.75, 0.5));
        assert!(ctx.depth_test(f32::NAN, 0.5));
    }

    #[test]
    fn depth_test_with_greater() {
        let ctx = Context {
            depth_test: Some(Ordering::Greater),
            ..Context::default()
        };
        assert!(ctx.depth_test(0.75, 0.5));
        assert!(!ctx.depth_test(0.25, 0.5));
    }
}
