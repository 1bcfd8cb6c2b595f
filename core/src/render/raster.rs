//! Translation of vector shapes into discrete pixels in the framebuffer.
//!
//! Rasterization proceeds by turning a triangle into a sequence of
//! *scanlines*, each corresponding to a horizontal span of pixels covered
//! by the triangle on a given line. The scanlines, in turn, are converted
//! into a series of *fragments* that represent potentially drawn pixels.
//!
//! Every triangle is flat shaded, so the only value interpolated across it
//! is depth. The fragments are tested against the current depth value in
//! their position; those that pass are written into the framebuffer, the
//! rest are discarded.

use core::fmt::{self, Debug, Formatter};
use core::ops::Range;

use crate::math::point::{Point3, pt3};
use crate::render::Screen;

/// Point in screen space.
/// `x` and `y` are viewport pixel coordinates, `z` is depth.
pub type ScreenPt = Point3<Screen>;

/// A fragment, or a single "pixel" in a rasterized primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frag {
    /// The pixel center and the depth at that point.
    pub pos: ScreenPt,
}

/// A horizontal, 1-pixel-thick "slice" of a primitive being rasterized.
#[derive(Clone, PartialEq)]
pub struct Scanline {
    /// The y coordinate of the line.
    pub y: usize,
    /// The range of x coordinates spanned by the line.
    pub xs: Range<usize>,
    /// Depth at the center of the first pixel.
    pub z0: f32,
    /// Change of depth per pixel.
    pub dz_dx: f32,
}

/// Iterator emitting scanlines between a left and a right edge.
#[derive(Clone, Debug)]
pub struct ScanlineIter {
    y: f32,
    left: Edge,
    right: Edge,
    depth: DepthPlane,
    n: u32,
}

/// A triangle edge as seen by the scan converter.
#[derive(Copy, Clone, Debug)]
struct Edge {
    top: ScreenPt,
    dx_dy: f32,
}

/// The plane of a triangle, solved for depth.
#[derive(Copy, Clone, Debug)]
pub struct DepthPlane {
    origin: ScreenPt,
    dz_dx: f32,
    dz_dy: f32,
}

impl Scanline {
    /// Returns an iterator over the fragments on this line, from left to
    /// right.
    pub fn fragments(&self) -> impl Iterator<Item = Frag> + '_ {
        let y = self.y as f32 + 0.5;
        self.xs.clone().zip(0..).map(move |(x, i)| Frag {
            pos: pt3(x as f32 + 0.5, y, self.z0 + i as f32 * self.dz_dx),
        })
    }

    /// Returns the number of pixels on this line.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns whether this line covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl Debug for Scanline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanline")
            .field("y", &self.y)
            .field("xs", &self.xs)
            .finish_non_exhaustive()
    }
}

impl Edge {
    fn new(Range { start, end }: Range<ScreenPt>) -> Self {
        let dx_dy = (end.x() - start.x()) / (end.y() - start.y());
        Self { top: start, dx_dy }
    }

    /// Returns the x coordinate of `self` at height `y`.
    ///
    /// Always computed from the same endpoint, so triangles sharing this
    /// edge agree exactly on where it crosses each line.
    fn x_at(&self, y: f32) -> f32 {
        self.top.x() + (y - self.top.y()) * self.dx_dy
    }
}

impl DepthPlane {
    /// Returns the plane of the triangle `vs`, or `None` if the triangle
    /// is degenerate when seen from the viewpoint.
    pub fn new([a, b, c]: &[ScreenPt; 3]) -> Option<Self> {
        let [ux, uy, uz] = (*b - *a).0;
        let [vx, vy, vz] = (*c - *a).0;
        // Twice the signed area of the triangle projected on the screen
        let area = ux * vy - vx * uy;
        (area.is_finite() && area != 0.0).then(|| Self {
            origin: *a,
            dz_dx: (uz * vy - vz * uy) / area,
            dz_dy: (ux * vz - vx * uz) / area,
        })
    }

    /// Returns the depth of the plane at (`x`, `y`).
    pub fn z_at(&self, x: f32, y: f32) -> f32 {
        let o = self.origin;
        o.z() + (x - o.x()) * self.dz_dx + (y - o.y()) * self.dz_dy
    }
}

impl Iterator for ScanlineIter {
    type Item = Scanline;

    #[inline]
    fn next(&mut self) -> Option<Scanline> {
        if self.n == 0 {
            return None;
        }
        let y = self.y;

        // Find the next pixel centers to the right
        //
        // If the left x.fract() <= 0.5, the pixel is covered and thus drawn;
        // otherwise it's not, and we skip to the next pixel.
        //
        // Similarly, if the right x.fract() <= 0.5 that's the "one-past-the-
        // end" pixel, otherwise it's the last covered pixel and the next one
        // is the actual one-past-the-end pixel.
        let x0 = round_up_to_half(self.left.x_at(y));
        let x1 = round_up_to_half(self.right.x_at(y));

        let z0 = self.depth.z_at(x0, y);
        let (x0, x1) = (x0 as usize, x1 as usize);

        self.y += 1.0;
        self.n -= 1;

        Some(Scanline {
            y: y as usize,
            xs: x0..x1.max(x0),
            z0,
            dz_dx: self.depth.dz_dx,
        })
    }
}

/// Rasterizes a filled triangle defined by three screen-space points.
///
/// Converts the triangle into [scanlines][Scanline] and invokes `scanline_fn`
/// for each scanline. The scanlines are guaranteed to cover exactly those
/// pixels whose center point lies inside the triangle. For more information
/// on the scanline conversion, see [`scan`].
///
/// Degenerate triangles, whose vertices are collinear, cover no pixels.
pub fn tri_fill<F>(mut verts: [ScreenPt; 3], mut scanline_fn: F)
where
    F: FnMut(Scanline),
{
    let Some(depth) = DepthPlane::new(&verts) else {
        return;
    };

    // Sort by y coordinate, start from the top
    verts.sort_by(|a, b| a.y().total_cmp(&b.y()));
    let [top, mid, bot] = verts;

    // The x coordinate on the "long" edge at the same y as `mid`
    let long_x = Edge::new(top..bot).x_at(mid.y());

    //                       X <--top
    //                     ***
    //                   ******
    //                 ********
    //               ** upper **
    //     mid-->   X***********  <--long edge
    //                ** lower **
    //                   ********
    //                      ******
    //                         ***
    //                            X <--bot

    let ys = top.y()..mid.y();
    let (upper_l, upper_r) = if mid.x() < long_x {
        (top..mid, top..bot)
    } else {
        (top..bot, top..mid)
    };
    // Rasterize the upper half triangle...
    scan(ys, upper_l, upper_r, depth).for_each(&mut scanline_fn);

    let ys = mid.y()..bot.y();
    let (lower_l, lower_r) = if mid.x() < long_x {
        (mid..bot, top..bot)
    } else {
        (top..bot, mid..bot)
    };
    // ...and the lower half triangle
    scan(ys, lower_l, lower_r, depth).for_each(&mut scanline_fn);
}

/// Returns an iterator that emits a scanline for each line from `y0` to `y1`
/// between the edge `l0..l1` on the left and the edge `r0..r1` on the
/// right.
///
/// The edges need not start or end at `y0` or `y1`; the lines between
/// them form a *trapezoid* with horizontal bases, or, in the special case
/// where the edges meet at `y0` or `y1`, a triangle:
/// ```text
///            l0___________ r0
/// y0        _|____________|     .next()
///         _|_______________|    .next()
///       _|__________________|     ...
///      |_____________________|    ...
/// y1   l1                     r1
/// ```
/// Any convex polygon can be converted into scanlines by dividing it into
/// trapezoidal segments and calling this function for each segment.
///
/// The exact pixels that are drawn are determined by whether the vector shape
/// *covers* a pixel or not. A pixel is covered, and drawn, if and only if its
/// center point lies inside the shape. This ensures that if two polygons
/// share an edge, or several share a vertex, each pixel at the boundary will
/// be drawn by exactly one of the polygons, with no gaps or overdrawn pixels.
pub fn scan(
    Range { start: y0, end: y1 }: Range<f32>,
    left: Range<ScreenPt>,
    right: Range<ScreenPt>,
    depth: DepthPlane,
) -> ScanlineIter {
    // Find the y value of the next pixel center (.5) vertically
    //
    // We want to draw exactly those pixels whose center is *covered* by this
    // polygon. Thus if y0.fract() > 0.5, we skip to the next line. On each
    // line, if the left x.fract() <= 0.5, the pixel is covered, otherwise
    // it is not.
    //
    //      COVERED               NOT COVERED             NOT COVERED
    //   +-----/-----+           +---------/-+           +-----------+
    //   |    /······|           |        /··|           |     ·     |
    //   |   p·+·····| p.y=0.5   |     + p···| p.y=0.5   |  ·  +  ·  |
    //   |  /········|           |      /····|           |   p-------- p.y>0.5
    //   +-/---------+           +-----/-----+           +--/--------+
    //    p.x<0.5                    p.x>0.5              p.x<0.5
    //
    let y0_rounded = round_up_to_half(y0);
    let y1_rounded = round_up_to_half(y1);

    ScanlineIter {
        y: y0_rounded,
        left: Edge::new(left),
        right: Edge::new(right),
        depth,
        n: (y1_rounded - y0_rounded) as u32, // saturates to 0
    }
}

#[inline]
fn round_up_to_half(x: f32) -> f32 {
    crate::math::float::f32::floor(x + 0.5) + 0.5
}
