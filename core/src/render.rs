//! Turning 3D geometry into raster images.
//!
//! This module constitutes the core 3D rendering pipeline of `duoview`.
//! It contains code for [clipping][clip], [transforming, shading][shader],
//! [lighting][light], [rasterizing][raster], and [outputting][target]
//! triangle meshes, as well as the [view renderer][view] built on top of
//! them.

use alloc::vec::Vec;

use crate::geom::{Tri, Vertex, vertex};
use crate::math::{Apply, Mat4, mat::RealToProj, mat::RealToReal};

use clip::ClipVec;
use raster::tri_fill;
use shader::{FaceShader, VertexShader};
use target::Target;

pub use {
    cam::Camera,
    ctx::Context,
    device::{Device, Headless},
    light::{Light, Lighting},
    stats::{Stats, Throughput},
    target::Framebuf,
    view::ViewRenderer,
};

pub mod cam;
pub mod clip;
pub mod composite;
pub mod ctx;
pub mod device;
pub mod light;
pub mod raster;
pub mod shader;
pub mod stats;
pub mod target;
pub mod view;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Mapping from model space to view space.
pub type ModelToView = RealToReal<3, Model, View>;

/// Mapping from model space to projective space.
pub type ModelToProj = RealToProj<Model>;

/// Mapping from view space to projective space.
pub type ViewToProj = RealToProj<View>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<3, Ndc, Screen>;

/// Renders the faces `faces`, indexing into the vertex buffer `verts`,
/// into `target`.
///
/// Each vertex is transformed into clip space by the vertex shader of
/// `shader`, and each face is given a single color by its face shader.
/// The vertices are then divided by w, and the faces clipped to the view
/// volume, mapped to screen space with `viewport`, and rasterized.
/// Statistics of the call are added to `ctx.stats`.
///
/// No face is culled based on its orientation.
///
/// # Panics
/// If a face refers to a vertex index out of bounds of `verts`.
pub fn render<Vtx, Attr, Uni, Shd>(
    faces: &[Tri<usize>],
    verts: &[Vtx],
    shader: &Shd,
    uniform: Uni,
    viewport: &Mat4<Ndc, Screen>,
    target: &mut impl Target,
    ctx: &Context,
) where
    Vtx: Clone,
    Attr: Clone,
    Uni: Copy,
    Shd: VertexShader<Vtx, Uni, Output = Vertex<ClipVec, Attr>>
        + FaceShader<Attr>,
{
    let mut stats = Stats::start();
    stats.calls = 1;
    stats.objs.i += 1;
    stats.prims.i += faces.len();
    stats.verts.i += verts.len();

    // Vertex shader
    let verts: Vec<_> = verts
        .iter()
        .cloned()
        .map(|v| shader.shade_vertex(v, uniform))
        .collect();
    stats.verts.o += verts.len();

    // Face shader. The face color is carried to the rasterizer as a vertex
    // attribute; it stays constant across clipping.
    let tris: Vec<_> = faces
        .iter()
        .filter_map(|Tri(ixs)| {
            let face = Tri(ixs.map(|i| verts[i].clone()));
            let color = shader.shade_face(&face)?;
            Some(face.map(|v| vertex(v.pos.project_to_real::<Ndc>(), color)))
        })
        .collect();

    let mut clipped = Vec::new();
    clip::clip(&tris, &mut clipped);
    stats.prims.o += clipped.len();

    for Tri(vs) in clipped {
        let color = vs[0].attrib.to_color3();
        let vs = vs.map(|v| viewport.apply(&v.pos));
        tri_fill(vs, |sl| stats.frags += target.rasterize(sl, color, ctx));
    }
    stats.objs.o += 1;

    *ctx.stats.borrow_mut() += stats.finish();
}

#[cfg(test)]
mod tests {
    use crate::math::{
        Color3, Color3f, Point3, ProjMat3, pt2, pt3, rgb, viewport,
    };
    use crate::util::buf::Buf2;

    use super::*;

    // A 4×4 viewport; clip space x and y in [-1, 1] map to pixels 0..4,
    // with y flipped so that row 0 is at the top of `read_pixels`.
    fn vport() -> Mat4<Ndc, Screen> {
        viewport(pt2(0, 0)..pt2(4, 4))
    }

    fn vs(p: Point3, _: ()) -> Vertex<ClipVec, ()> {
        vertex(ProjMat3::<()>::identity().apply(&p), ())
    }

    fn solid(
        c: Color3f,
    ) -> impl Fn(&Tri<Vertex<ClipVec, ()>>) -> Option<Color3f> {
        move |_: &Tri<Vertex<ClipVec, ()>>| Some(c)
    }

    fn bits(img: &Buf2<Color3>) -> Vec<u8> {
        img.iter().map(|c| (c.r() > 0) as u8).collect()
    }

    #[test]
    fn render_quad_covering_left_half() {
        let verts = [
            pt3(-1.0, -1.0, 0.0),
            pt3(0.0, -1.0, 0.0),
            pt3(0.0, 1.0, 0.0),
            pt3(-1.0, 1.0, 0.0),
        ];
        let faces = [Tri([0, 1, 2]), Tri([0, 2, 3])];
        let shader = shader::new(vs, solid(rgb(1.0, 0.0, 0.0)));

        let ctx = Context::default();
        let mut fb = Framebuf::new((4, 4));
        fb.clear(&ctx);
        render(&faces, &verts, &shader, (), &vport(), &mut fb, &ctx);

        #[rustfmt::skip]
        let expected: [u8; 16] = [
            1, 1, 0, 0,
            1, 1, 0, 0,
            1, 1, 0, 0,
            1, 1, 0, 0,
        ];
        assert_eq!(bits(&fb.read_pixels()), expected);

        let stats = ctx.stats.borrow();
        assert_eq!(stats.calls, 1);
        assert_eq!(stats.prims, Throughput { i: 2, o: 2 });
        assert_eq!(stats.verts, Throughput { i: 4, o: 4 });
        assert_eq!(stats.frags, Throughput { i: 8, o: 8 });
    }

    #[test]
    fn render_clips_to_viewport() {
        // Extends far outside the view volume on every side
        let verts =
            [pt3(-9.0, -9.0, 0.0), pt3(9.0, -9.0, 0.0), pt3(0.0, 9.0, 0.0)];
        let faces = [Tri([0, 1, 2])];
        let shader = shader::new(vs, solid(rgb(1.0, 1.0, 1.0)));

        let ctx = Context::default();
        let mut fb = Framebuf::new((4, 4));
        fb.clear(&ctx);
        render(&faces, &verts, &shader, (), &vport(), &mut fb, &ctx);

        assert!(bits(&fb.read_pixels()).iter().all(|&b| b == 1));
    }

    #[test]
    fn render_discards_faces_without_color() {
        let verts =
            [pt3(-1.0, -1.0, 0.0), pt3(1.0, -1.0, 0.0), pt3(0.0, 1.0, 0.0)];
        let faces = [Tri([0, 1, 2])];
        let discard = |_: &Tri<Vertex<ClipVec, ()>>| -> Option<Color3f> {
            None
        };
        let shader = shader::new(vs, discard);

        let ctx = Context::default();
        let mut fb = Framebuf::new((4, 4));
        fb.clear(&ctx);
        render(&faces, &verts, &shader, (), &vport(), &mut fb, &ctx);

        assert!(bits(&fb.read_pixels()).iter().all(|&b| b == 0));
        assert_eq!(ctx.stats.borrow().prims, Throughput { i: 1, o: 0 });
    }

    #[test]
    fn render_behind_near_plane_is_invisible() {
        let verts = [
            pt3(-1.0, -1.0, -2.0),
            pt3(1.0, -1.0, -2.0),
            pt3(0.0, 1.0, -2.0),
        ];
        let faces = [Tri([0, 1, 2])];
        let shader = shader::new(vs, solid(rgb(1.0, 1.0, 1.0)));

        let ctx = Context::default();
        let mut fb = Framebuf::new((4, 4));
        fb.clear(&ctx);
        render(&faces, &verts, &shader, (), &vport(), &mut fb, &ctx);

        assert_eq!(ctx.stats.borrow().frags, Throughput::default());
    }
}
