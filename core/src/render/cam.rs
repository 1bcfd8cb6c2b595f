//! Cameras and camera transforms.

use core::ops::Range;

use crate::geom::{Tri, Vertex};
use crate::math::{
    Mat4, Matrix, Point3, ProjMat3, degs, orthographic, pt2, pt3, rotate_x,
    translate3, viewport,
};
use crate::util::Dims;

use super::{
    Context, Model, ModelToView, Ndc, Screen, View, clip::ClipVec,
    shader::FaceShader, shader::VertexShader, target::Target,
};

/// Distance of the near clipping plane from the camera.
pub const NEAR: f32 = 1.0;
/// Distance of the far clipping plane from the camera.
pub const FAR: f32 = 1000.0;

/// Type to manage the model-to-viewport transformation.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    /// Model-to-view transform.
    pub transform: Mat4<Model, View>,
    /// Viewport width and height.
    pub dims: Dims,
    /// Projection matrix.
    pub project: ProjMat3<View>,
    /// Viewport matrix.
    pub viewport: Mat4<Ndc, Screen>,
}

/// The matrices passed to vertex shaders by [`Camera::render`].
#[derive(Copy, Clone, Debug)]
pub struct Transforms {
    /// Model-to-view transform, for lighting computations.
    pub model_to_view: Mat4<Model, View>,
    /// Model-to-clip-space transform.
    pub model_to_project: ProjMat3<Model>,
}

impl Camera {
    /// Creates a camera with the given resolution.
    ///
    /// The camera is in the origin looking towards the negative z axis, and
    /// the projection maps view space to clip space unchanged.
    pub fn new(dims: Dims) -> Self {
        Self {
            transform: Matrix::identity(),
            dims,
            project: Matrix::identity(),
            viewport: viewport(pt2(0, 0)..pt2(dims.0, dims.1)),
        }
    }

    /// Creates the front view camera of an image of size `dims`.
    ///
    /// The camera sits at the origin, looking down the negative z axis with
    /// positive y up. Models are moved in front of it by the focal length,
    /// turned upside down, and centered so that model x and y are pixel
    /// coordinates of the output image, counted from the top left. Of two
    /// points, the one with the smaller model z is nearer to the camera.
    ///
    /// The projection is orthographic, so the focal length only affects
    /// which depths fall between the [near][NEAR] and [far][FAR] planes.
    pub fn front(dims: Dims, focal_length: f32) -> Self {
        let (w, h) = (dims.0 as f32 / 2.0, dims.1 as f32 / 2.0);

        let transform = translate3::<Model>(-w, -h, 0.0)
            .then(&rotate_x::<Model>(degs(180.0)))
            .then(
                &translate3::<View>(0.0, 0.0, -focal_length)
                    .to::<ModelToView>(),
            );

        Self::new(dims)
            .transform(transform)
            .orthographic(pt3(-w, -h, NEAR)..pt3(w, h, FAR))
    }

    /// Sets the model-to-view transform of this camera.
    pub fn transform(self, tf: Mat4<Model, View>) -> Self {
        Self { transform: tf, ..self }
    }

    /// Sets up orthographic projection.
    ///
    /// The z components of the bounds are the distances of the near and far
    /// clipping planes.
    pub fn orthographic(mut self, bounds: Range<Point3<View>>) -> Self {
        self.project = orthographic(bounds.start, bounds.end);
        self
    }

    /// Returns the composed camera and projection matrices.
    pub fn transforms(&self) -> Transforms {
        Transforms {
            model_to_view: self.transform,
            model_to_project: self.transform.then(&self.project),
        }
    }

    /// Renders the given geometry from the viewpoint of this camera.
    ///
    /// The vertex shader receives the camera [`Transforms`] along with
    /// `uniform`.
    pub fn render<Vtx, Attr, Uni, Shd>(
        &self,
        faces: &[Tri<usize>],
        verts: &[Vtx],
        shader: &Shd,
        uniform: Uni,
        target: &mut impl Target,
        ctx: &Context,
    ) where
        Vtx: Clone,
        Attr: Clone,
        Uni: Copy,
        Shd: VertexShader<
                Vtx,
                (Transforms, Uni),
                Output = Vertex<ClipVec, Attr>,
            > + FaceShader<Attr>,
    {
        super::render(
            faces,
            verts,
            shader,
            (self.transforms(), uniform),
            &self.viewport,
            target,
            ctx,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::Apply;

    use super::*;

    fn to_screen(cam: &Camera, p: Point3<Model>) -> Point3<Screen> {
        let clip = cam.transforms().model_to_project.apply(&p);
        cam.viewport.apply(&clip.project_to_real::<Ndc>())
    }

    #[test]
    fn front_camera_maps_model_xy_to_pixels() {
        let cam = Camera::front((64, 32), 600.0);

        // Screen y grows upwards from the bottom row
        let s = to_screen(&cam, pt3(10.0, 20.0, 0.0));
        assert_approx_eq!(s.x(), 10.0, eps = 1e-5);
        assert_approx_eq!(s.y(), 12.0, eps = 1e-5);

        let s = to_screen(&cam, pt3(0.0, 0.0, 0.0));
        assert_approx_eq!(s.x(), 0.0, eps = 1e-5);
        assert_approx_eq!(s.y(), 32.0, eps = 1e-5);
    }

    #[test]
    fn front_camera_depth() {
        let cam = Camera::front((64, 64), 600.0);

        // Depth is (z + f - near) / (far - near)
        let s = to_screen(&cam, pt3(32.0, 32.0, 0.0));
        assert_approx_eq!(s.z(), 599.0 / 999.0, eps = 1e-5);

        let near = to_screen(&cam, pt3(32.0, 32.0, -599.0));
        assert_approx_eq!(near.z(), 0.0, eps = 1e-5);
        let far = to_screen(&cam, pt3(32.0, 32.0, 400.0));
        assert_approx_eq!(far.z(), 1.0, eps = 1e-5);
    }

    #[test]
    fn model_to_view_is_upside_down() {
        let cam = Camera::front((64, 64), 100.0);
        let v = cam.transforms().model_to_view.apply(&pt3(42.0, 12.0, 5.0));
        assert_approx_eq!(v, pt3(10.0, 20.0, -105.0), eps = 1e-5);
    }
}
