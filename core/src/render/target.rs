//! Render targets.
//!
//! The typical render target is a framebuffer, comprising a color buffer
//! and a depth buffer. Its rows are stored bottom-up, as in the framebuffer
//! of a fixed-function graphics API; [`Framebuf::read_pixels`] returns them
//! top-down.

use crate::math::Color3;
use crate::util::{Dims, buf::Buf2};

use super::ctx::Context;
use super::raster::Scanline;
use super::stats::Throughput;

/// Trait for types that can be used as render targets.
pub trait Target {
    /// Writes a single flat-colored scanline into `self`.
    ///
    /// Returns count of fragments input and output.
    fn rasterize(
        &mut self,
        scanline: Scanline,
        color: Color3,
        ctx: &Context,
    ) -> Throughput;
}

/// Framebuffer, combining a color (pixel) buffer and a depth buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuf {
    pub color_buf: Buf2<Color3>,
    pub depth_buf: Buf2<f32>,
}

impl Framebuf {
    /// Returns a framebuffer of size `dims`, with zeroed color and depth.
    pub fn new(dims: Dims) -> Self {
        Self {
            color_buf: Buf2::new(dims),
            depth_buf: Buf2::new(dims),
        }
    }

    /// Returns the width and height of `self`.
    pub fn dims(&self) -> Dims {
        self.color_buf.dims()
    }

    /// Clears the buffers of `self` with the clear values in `ctx`.
    ///
    /// A buffer whose clear value is `None` is left untouched.
    pub fn clear(&mut self, ctx: &Context) {
        if let Some(c) = ctx.color_clear {
            self.color_buf.fill(c.to_color3());
        }
        if let Some(z) = ctx.depth_clear {
            self.depth_buf.fill(z);
        }
    }

    /// Returns a copy of the color buffer with row 0 at the top.
    pub fn read_pixels(&self) -> Buf2<Color3> {
        self.color_buf.flipped()
    }
}

impl Target for Framebuf {
    /// Rasterizes `scanline` into this framebuffer, depth testing each
    /// fragment against the depth buffer.
    ///
    /// Any part of the scanline outside the buffer bounds is discarded.
    fn rasterize(
        &mut self,
        sl: Scanline,
        color: Color3,
        ctx: &Context,
    ) -> Throughput {
        let mut io = Throughput { i: sl.len(), o: 0 };

        let (w, h) = self.dims();
        if sl.y >= h as usize {
            return io;
        }
        let x0 = sl.xs.start.min(w as usize);
        let x1 = sl.xs.end.min(w as usize);
        let cbuf_span = &mut self.color_buf[sl.y][x0..x1];
        let zbuf_span = &mut self.depth_buf[sl.y][x0..x1];

        sl.fragments()
            .zip(cbuf_span)
            .zip(zbuf_span)
            .for_each(|((frag, c), z)| {
                let new_z = frag.pos.z();
                if ctx.depth_test(new_z, *z) {
                    io.o += 1;
                    (*c, *z) = (color, new_z);
                }
            });
        io
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{rgb, rgba};

    use super::*;

    const RED: Color3 = rgb(0xFF, 0, 0);
    const BLUE: Color3 = rgb(0, 0, 0xFF);

    fn line(y: usize, xs: core::ops::Range<usize>, z: f32) -> Scanline {
        Scanline { y, xs, z0: z, dz_dx: 0.0 }
    }

    #[test]
    fn clear_fills_buffers() {
        let mut fb = Framebuf::new((3, 2));
        let ctx = Context {
            color_clear: Some(rgba(1, 2, 3, 4)),
            ..Context::default()
        };
        fb.clear(&ctx);
        assert!(fb.color_buf.iter().all(|&c| c == rgb(1, 2, 3)));
        assert!(fb.depth_buf.iter().all(|&z| z == 1.0));
    }

    #[test]
    fn nearer_fragments_win() {
        let ctx = Context::default();
        let mut fb = Framebuf::new((4, 1));
        fb.clear(&ctx);

        let io = fb.rasterize(line(0, 0..3, 0.5), RED, &ctx);
        assert_eq!(io, Throughput { i: 3, o: 3 });

        // Behind red in 0..3, in front of the cleared depth at 3
        let io = fb.rasterize(line(0, 1..4, 0.75), BLUE, &ctx);
        assert_eq!(io, Throughput { i: 3, o: 1 });

        assert_eq!(fb.color_buf.data(), [RED, RED, RED, BLUE]);
        assert_eq!(fb.depth_buf.data(), [0.5, 0.5, 0.5, 0.75]);
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let ctx = Context::default();
        let mut fb = Framebuf::new((2, 1));
        fb.clear(&ctx);

        fb.rasterize(line(0, 0..2, 0.5), RED, &ctx);
        fb.rasterize(line(0, 0..2, 0.5), BLUE, &ctx);
        assert_eq!(fb.color_buf.data(), [RED, RED]);
    }

    #[test]
    fn out_of_bounds_is_discarded() {
        let ctx = Context::default();
        let mut fb = Framebuf::new((2, 2));
        fb.clear(&ctx);

        fb.rasterize(line(2, 0..2, 0.0), RED, &ctx);
        fb.rasterize(line(1, 1..5, 0.0), RED, &ctx);

        let black = rgb(0, 0, 0);
        assert_eq!(fb.color_buf.data(), [black, black, black, RED]);
    }

    #[test]
    fn read_pixels_flips_rows() {
        let ctx = Context::default();
        let mut fb = Framebuf::new((1, 3));
        fb.clear(&ctx);
        fb.rasterize(line(0, 0..1, 0.0), RED, &ctx);

        let img = fb.read_pixels();
        assert_eq!(img[(0, 2)], RED);
        assert_eq!(img[(0, 0)], rgb(0, 0, 0));
    }
}
