//! Front and side views of mesh batches.
//!
//! A [`ViewRenderer`] draws any number of meshes that share one face
//! topology into a single image. Each mesh is a vertex buffer in model
//! space, where x and y are pixel coordinates of the output image counted
//! from the top left corner, and z is depth: smaller z is nearer to the
//! viewer.
//!
//! # Examples
//! ```
//! use duoview_core::prelude::*;
//!
//! let square = [
//!     pt3(8.0, 8.0, 0.0),
//!     pt3(24.0, 8.0, 0.0),
//!     pt3(24.0, 24.0, 0.0),
//!     pt3(8.0, 24.0, 0.0),
//! ];
//! let faces: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
//! let renderer = ViewRenderer::new(600.0, (32, 32), faces, false)?;
//!
//! let mut device = Headless::new((32, 32));
//! let img = renderer.render_front_view(
//!     &mut device,
//!     &[square],
//!     None,
//!     rgba(0, 0, 0, 0),
//! )?;
//! assert_ne!(img[(16, 16)], rgb(0, 0, 0));
//! assert_eq!(img[(2, 2)], rgb(0, 0, 0));
//! # Ok::<(), duoview_core::Error>(())
//! ```

use alloc::{format, vec::Vec};

use log::{debug, trace, warn};

use crate::error::{Error, Mismatch, Result};
use crate::geom::{Tri, Vertex, vertex};
use crate::math::{
    Apply, Color3, Color3f, Color4, Mat3, Point3, degs, hsv, pt3, rgb, rgba,
    rotate, vec3,
};
use crate::util::{Dims, buf::Buf2};

use super::{
    Camera, Context, Device, Lighting, Model, View,
    cam::Transforms,
    clip::ClipVec,
    composite::chroma_key,
    shader,
};

/// Renders front and side views of meshes with a fixed face topology.
///
/// The renderer holds no graphics resources of its own; each render call
/// draws into the current framebuffer of the [`Device`] passed to it. All
/// input is validated before anything is drawn, so a failed call leaves
/// the framebuffer untouched.
///
/// Dropping the renderer releases everything it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRenderer {
    focal_length: f32,
    dims: Dims,
    faces: Vec<Tri<usize>>,
    same_color: bool,
    lighting: Lighting,
}

/// Builder for a [`ViewRenderer`].
#[derive(Clone, Debug)]
pub struct Builder {
    focal_length: f32,
    dims: Dims,
    faces: Vec<Tri<usize>>,
    same_color: bool,
    lighting: Lighting,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            focal_length: 600.0,
            dims: (512, 512),
            faces: Vec::new(),
            same_color: false,
            lighting: Lighting::default(),
        }
    }
}

impl Builder {
    /// Sets the focal length, the distance of the model origin from the
    /// camera.
    pub fn focal_length(mut self, f: f32) -> Self {
        self.focal_length = f;
        self
    }
    /// Sets the width and height of the output images.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the face topology shared by all rendered meshes.
    pub fn faces<F>(mut self, faces: impl IntoIterator<Item = F>) -> Self
    where
        F: Into<Tri<usize>>,
    {
        self.faces = faces.into_iter().map(Into::into).collect();
        self
    }
    /// Sets whether all meshes are drawn white instead of in distinct
    /// hues.
    pub fn same_color(mut self, same: bool) -> Self {
        self.same_color = same;
        self
    }
    /// Sets how faces are lit.
    pub fn lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Validates the settings and returns the renderer.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] if the focal length is not a
    /// positive finite number, or if either dimension is zero.
    pub fn build(self) -> Result<ViewRenderer> {
        let Self {
            focal_length,
            dims,
            faces,
            same_color,
            lighting,
        } = self;

        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "focal length must be positive and finite, was {focal_length}"
            )));
        }
        if dims.0 == 0 || dims.1 == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "image dimensions must be nonzero, were {dims:?}"
            )));
        }
        debug!(
            "view renderer: f={focal_length} dims={dims:?} faces={} \
             same_color={same_color}",
            faces.len()
        );
        Ok(ViewRenderer {
            focal_length,
            dims,
            faces,
            same_color,
            lighting,
        })
    }
}

impl ViewRenderer {
    /// Creates a renderer with the given settings and default lighting.
    ///
    /// Shorthand for the equivalent [`builder`][Self::builder] calls.
    ///
    /// # Errors
    /// See [`Builder::build`].
    pub fn new<F>(
        focal_length: f32,
        dims: Dims,
        faces: impl IntoIterator<Item = F>,
        same_color: bool,
    ) -> Result<Self>
    where
        F: Into<Tri<usize>>,
    {
        Self::builder()
            .focal_length(focal_length)
            .dims(dims)
            .faces(faces)
            .same_color(same_color)
            .build()
    }

    /// Returns a builder with default settings: focal length 600,
    /// 512×512 images, no faces, distinct colors, and flat lighting.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the focal length of `self`.
    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }
    /// Returns the dimensions of the images rendered by `self`.
    pub fn dims(&self) -> Dims {
        self.dims
    }
    /// Returns the face topology of `self`.
    pub fn faces(&self) -> &[Tri<usize>] {
        &self.faces
    }
    /// Returns whether `self` draws all meshes in the same color.
    pub fn same_color(&self) -> bool {
        self.same_color
    }
    /// Returns the lighting used by `self`.
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Returns the camera used for front views.
    pub fn camera(&self) -> Camera {
        Camera::front(self.dims, self.focal_length)
    }

    /// Returns the base color of mesh `n` out of `count` meshes.
    ///
    /// Meshes are given evenly spaced hues at half saturation, starting
    /// from red, unless `self` uses the same color for all, in which case
    /// every mesh is white.
    pub fn mesh_color(&self, n: usize, count: usize) -> Color3f {
        if self.same_color {
            rgb(1.0, 1.0, 1.0)
        } else {
            hsv(n as f32 / count as f32, 0.5, 1.0).to_rgb()
        }
    }

    /// Renders `meshes` as seen from the front.
    ///
    /// The framebuffer of `device` is first cleared to `clear`, then each
    /// mesh is drawn with the faces of `self`, depth tested against all
    /// meshes drawn before it. If `background` is given, every pixel still
    /// exactly equal to the RGB channels of `clear` is then replaced by the
    /// background pixel at the same position.
    ///
    /// Returns the image in row-major order, top row first.
    ///
    /// # Errors
    /// Checked in this order, before anything is drawn:
    /// * [`Error::ContextUnavailable`] if `device` has no current
    ///   framebuffer, or if it is not of the size of `self`.
    /// * [`Error::InvalidConfiguration`] if there are meshes but no faces.
    /// * [`Error::ShapeMismatch`] if a face refers to a vertex beyond the
    ///   end of a mesh, or if `background` is not of the size of `self`.
    pub fn render_front_view<M>(
        &self,
        device: &mut impl Device,
        meshes: &[M],
        background: Option<&Buf2<Color3>>,
        clear: Color4,
    ) -> Result<Buf2<Color3>>
    where
        M: AsRef<[Point3<Model>]>,
    {
        debug!(
            "front view: {} meshes, background: {}",
            meshes.len(),
            background.is_some()
        );
        let fb = device.current().ok_or_else(|| {
            Error::ContextUnavailable("no current framebuffer".into())
        })?;
        if fb.dims() != self.dims {
            return Err(Error::ContextUnavailable(format!(
                "framebuffer is {:?} but the view is {:?}",
                fb.dims(),
                self.dims
            )));
        }
        self.validate(meshes)?;
        if let Some(bg) = background
            && bg.dims() != self.dims
        {
            return Err(Mismatch::Dims {
                what: "background",
                expected: self.dims,
                actual: bg.dims(),
            }
            .into());
        }
        if meshes.is_empty() {
            warn!("no meshes to render");
        }

        let ctx = Context {
            color_clear: Some(clear),
            ..Context::default()
        };
        fb.clear(&ctx);

        let lighting = self.lighting;
        let shader = shader::new(
            |p: Point3<Model>, (tf, color): (Transforms, Color3f)| {
                let view_pos = tf.model_to_view.apply(&p);
                vertex(tf.model_to_project.apply(&p), (view_pos, color))
            },
            move |face: &Tri<Vertex<ClipVec, (Point3<View>, Color3f)>>| {
                let Tri([a, b, c]) = face;
                let normal = Tri([a.attrib.0, b.attrib.0, c.attrib.0]).normal();
                Some(lighting.shade(a.attrib.1, normal))
            },
        );

        let cam = self.camera();
        for (n, mesh) in meshes.iter().enumerate() {
            let color = self.mesh_color(n, meshes.len());
            cam.render(&self.faces, mesh.as_ref(), &shader, color, fb, &ctx);
        }

        let mut stats = ctx.stats.borrow_mut();
        stats.views += 1;
        trace!("front view: {stats}");

        let mut img = fb.read_pixels();
        if let Some(bg) = background {
            let n = chroma_key(&mut img, bg, clear.to_color3())?;
            trace!("{n} background pixels composited");
        }
        Ok(img)
    }

    /// Renders `meshes` as seen from the side.
    ///
    /// The meshes are turned by [`side_view_vertices`] and drawn as by
    /// [`render_front_view`][Self::render_front_view], on a transparent
    /// black background.
    ///
    /// # Errors
    /// As `render_front_view`.
    pub fn render_side_view<M>(
        &self,
        device: &mut impl Device,
        meshes: &[M],
    ) -> Result<Buf2<Color3>>
    where
        M: AsRef<[Point3<Model>]>,
    {
        debug!("side view: {} meshes", meshes.len());
        let turned = side_view_vertices(meshes);
        self.render_front_view(device, &turned, None, rgba(0, 0, 0, 0))
    }

    fn validate<M: AsRef<[Point3<Model>]>>(&self, meshes: &[M]) -> Result<()> {
        if self.faces.is_empty() && !meshes.is_empty() {
            return Err(Error::InvalidConfiguration(
                "meshes given but no faces to draw".into(),
            ));
        }
        let Some(max) = self.faces.iter().map(Tri::max_index).max() else {
            return Ok(());
        };
        for (mesh, verts) in meshes.iter().enumerate() {
            let len = verts.as_ref().len();
            if max < len {
                continue;
            }
            // Report the first offending face
            let (face, index) = self
                .faces
                .iter()
                .map(Tri::max_index)
                .enumerate()
                .find(|&(_, i)| i >= len)
                .unwrap_or((0, max));
            return Err(Mismatch::FaceIndex { mesh, face, index, len }.into());
        }
        Ok(())
    }
}

/// Returns `meshes` turned 90° about a vertical axis, for a side view.
///
/// The axis passes through the point whose x and y are zero and whose z is
/// the mean z of all the vertices of all meshes. A vertex (x, y, z) maps to
/// (c − z, y, x + c), where c is that mean, so model x becomes depth and
/// depth becomes x. The relative positions of the meshes are preserved.
pub fn side_view_vertices<M>(meshes: &[M]) -> Vec<Vec<Point3<Model>>>
where
    M: AsRef<[Point3<Model>]>,
{
    let all = || meshes.iter().flat_map(|m| m.as_ref());
    let count = all().count();
    let depth = if count == 0 {
        0.0
    } else {
        all().map(|p| p.z()).sum::<f32>() / count as f32
    };
    let center = pt3(0.0, 0.0, depth);

    let rot: Mat3<Model> = rotate(vec3(0.0, 1.0, 0.0), degs(90.0)).transpose();

    meshes
        .iter()
        .map(|m| {
            m.as_ref()
                .iter()
                .map(|&p| center + rot.apply(&(p - center)))
                .collect()
        })
        .collect()
}
