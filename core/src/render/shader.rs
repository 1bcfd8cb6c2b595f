//! Per-vertex and per-face programs run by [`render`][super::render].
//!
//! The vertex shader takes each input vertex to clip space and may attach
//! attributes for later stages. The face shader then sees each triangle of
//! shaded vertices and picks its single flat color, or drops it.

use crate::geom::{Tri, Vertex};
use crate::math::Color3f;

use super::clip::ClipVec;

/// Maps an input vertex of type `In` to an output vertex, given `Uni`, a
/// value shared by all vertices of a render call.
pub trait VertexShader<In, Uni> {
    type Output;

    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Self::Output;
}

/// Computes the color of a triangle of shaded vertices with attributes
/// of type `Attr`.
pub trait FaceShader<Attr> {
    /// Returns the color of `face`, or `None` to skip drawing it.
    fn shade_face(&self, face: &Tri<Vertex<ClipVec, Attr>>) -> Option<Color3f>;
}

impl<F, In, Out, Uni> VertexShader<In, Uni> for F
where
    F: Fn(In, Uni) -> Out,
{
    type Output = Out;

    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Out {
        self(vertex, uniform)
    }
}

impl<F, Attr, Out> FaceShader<Attr> for F
where
    F: Fn(&Tri<Vertex<ClipVec, Attr>>) -> Out,
    Out: Into<Option<Color3f>>,
{
    fn shade_face(&self, face: &Tri<Vertex<ClipVec, Attr>>) -> Option<Color3f> {
        self(face).into()
    }
}

/// Pairs the vertex shader `vs` with the face shader `fs`.
///
/// The bounds let closures passed here infer their argument types.
pub fn new<Vs, Fs, Vtx, Attr, Uni>(vs: Vs, fs: Fs) -> Shader<Vs, Fs>
where
    Vs: VertexShader<Vtx, Uni, Output = Vertex<ClipVec, Attr>>,
    Fs: FaceShader<Attr>,
{
    Shader { vs, fs }
}

/// A vertex shader and a face shader used together.
#[derive(Copy, Clone)]
pub struct Shader<Vs, Fs> {
    pub vs: Vs,
    pub fs: Fs,
}

impl<In, Vs, Fs, Uni> VertexShader<In, Uni> for Shader<Vs, Fs>
where
    Vs: VertexShader<In, Uni>,
{
    type Output = Vs::Output;

    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Self::Output {
        self.vs.shade_vertex(vertex, uniform)
    }
}

impl<Vs, Fs, Attr> FaceShader<Attr> for Shader<Vs, Fs>
where
    Fs: FaceShader<Attr>,
{
    fn shade_face(&self, face: &Tri<Vertex<ClipVec, Attr>>) -> Option<Color3f> {
        self.fs.shade_face(face)
    }
}
