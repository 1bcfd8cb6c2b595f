//! Clipping triangles to the view volume.
//!
//! Every camera in this crate is orthographic, so the projection leaves w
//! at 1 and the view volume is the axis-aligned cube [-1, 1]³ in normalized
//! device coordinates. Triangles are clipped against the six faces of that
//! box one at a time and the remaining convex polygon is split back into
//! triangles. Everything the rasterizer receives thus maps into the
//! viewport and between the near and far planes.

use alloc::vec::Vec;
use core::mem::swap;

use crate::geom::{Tri, Vertex, vertex};
use crate::math::{Lerp, Point3, vec::ProjVec3};

use super::Ndc;

/// A vector in clip space, as output by vertex shaders.
pub type ClipVec = ProjVec3;

/// A vertex in normalized device coordinates.
pub type NdcVert<A> = Vertex<Point3<Ndc>, A>;

/// Where a primitive lies relative to the view volume.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// No point outside the volume.
    Inside,
    /// Crosses at least one face of the volume.
    Partial,
    /// No point inside the volume.
    Outside,
}

/// Returns where the convex hull of `verts` lies relative to the view volume.
///
/// A hull that only touches a face of the box from the outside counts as
/// partial; clipping it leaves at most a degenerate polygon.
pub fn status<A>(verts: &[NdcVert<A>]) -> Status {
    let mut res = Status::Inside;
    for axis in 0..3 {
        let (lo, hi) = verts.iter().map(|v| v.pos[axis]).fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), c| (lo.min(c), hi.max(c)),
        );
        if lo > 1.0 || hi < -1.0 {
            return Status::Outside;
        }
        if lo < -1.0 || hi > 1.0 {
            res = Status::Partial;
        }
    }
    res
}

/// Clips each of `tris` to the view volume, appending the results to `out`.
///
/// Triangles inside the volume are appended unchanged and triangles outside
/// it are dropped. The rest are cut along the faces of the volume, possibly
/// into several triangles sharing their first vertex. Attributes of new
/// vertices are interpolated linearly along the cut edges.
pub fn clip<A: Lerp + Clone>(
    tris: &[Tri<NdcVert<A>>],
    out: &mut Vec<Tri<NdcVert<A>>>,
) {
    let mut poly = Vec::with_capacity(9);
    let mut tmp = Vec::with_capacity(9);

    for tri in tris {
        match status(&tri.0) {
            Status::Inside => out.push(tri.clone()),
            Status::Outside => {}
            Status::Partial => {
                poly.clear();
                poly.extend_from_slice(&tri.0);
                for axis in 0..3 {
                    for sign in [-1.0, 1.0] {
                        tmp.clear();
                        clip_to_face(axis, sign, &poly, &mut tmp);
                        swap(&mut poly, &mut tmp);
                    }
                }
                if let [first, rest @ ..] = &poly[..] {
                    out.extend(rest.windows(2).map(|e| {
                        Tri([first.clone(), e[0].clone(), e[1].clone()])
                    }));
                }
            }
        }
    }
}

/// Sutherland–Hodgman step: clips the closed polygon `poly` to the half-space
/// `sign * pos[axis] <= 1`.
fn clip_to_face<A: Lerp + Clone>(
    axis: usize,
    sign: f32,
    poly: &[NdcVert<A>],
    out: &mut Vec<NdcVert<A>>,
) {
    // Positive inside, negative outside
    let dist = |v: &NdcVert<A>| 1.0 - sign * v.pos[axis];

    let Some(mut prev) = poly.last() else {
        return;
    };
    let mut d0 = dist(prev);
    for cur in poly {
        let d1 = dist(cur);
        if (d0 < 0.0 && d1 > 0.0) || (d0 > 0.0 && d1 < 0.0) {
            let t = d0 / (d0 - d1);
            out.push(vertex(
                prev.pos.lerp(&cur.pos, t),
                prev.attrib.lerp(&cur.attrib, t),
            ));
        }
        if d1 >= 0.0 {
            out.push(cur.clone());
        }
        (prev, d0) = (cur, d1);
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::pt3;

    use super::*;

    fn v(x: f32, y: f32, z: f32) -> NdcVert<f32> {
        // The attribute follows x so interpolation is easy to check
        vertex(pt3(x, y, z), x)
    }

    fn clipped(tri: Tri<NdcVert<f32>>) -> Vec<Tri<NdcVert<f32>>> {
        let mut out = Vec::new();
        clip(&[tri], &mut out);
        out
    }

    fn in_box(v: &NdcVert<f32>) -> bool {
        (0..3).all(|i| v.pos[i].abs() <= 1.0 + 1e-6)
    }

    #[test]
    fn status_of_corners() {
        let on_faces = [v(-1.0, -1.0, -1.0), v(1.0, 1.0, 1.0)];
        assert_eq!(status(&on_faces), Status::Inside);

        let beyond_far = [v(0.0, 0.0, 1.5), v(0.5, 0.0, 2.0)];
        assert_eq!(status(&beyond_far), Status::Outside);

        let across_left = [v(-3.0, 0.0, 0.0), v(0.0, 0.0, 0.0)];
        assert_eq!(status(&across_left), Status::Partial);
    }

    #[test]
    fn status_of_straddling_corner() {
        // Outside the left and the top faces, but neither entirely
        let vs = [v(-2.0, 0.0, 0.0), v(0.0, 2.0, 0.0)];
        assert_eq!(status(&vs), Status::Partial);
    }

    #[test]
    fn inside_triangle_is_kept_as_is() {
        let tri = Tri([v(0.0, -1.0, 0.0), v(1.0, 0.0, 0.5), v(-1.0, 1.0, 0.0)]);
        assert_eq!(clipped(tri), [tri]);
    }

    #[test]
    fn outside_triangle_is_dropped() {
        let tri = Tri([v(2.0, 2.0, 0.0), v(3.0, 2.0, 0.0), v(2.0, 5.0, 0.0)]);
        assert!(clipped(tri).is_empty());
    }

    #[test]
    fn one_vertex_beyond_right_gives_quad() {
        //  y
        //  1  2
        //     | \
        //     |  +
        //     |  | \
        //  0  0--+--1
        //    -1  1  3  x
        let tri = Tri([v(-1.0, 0.0, 0.0), v(3.0, 0.0, 0.0), v(-1.0, 1.0, 0.0)]);
        let res = clipped(tri);
        assert_eq!(
            res,
            [
                Tri([v(-1.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 0.5, 0.0)]),
                Tri([v(-1.0, 0.0, 0.0), v(1.0, 0.5, 0.0), v(-1.0, 1.0, 0.0)]),
            ]
        );
    }

    #[test]
    fn two_vertices_beyond_near_gives_triangle() {
        let tri =
            Tri([v(0.0, 0.0, 0.0), v(0.0, 0.5, -3.0), v(0.5, 0.0, -3.0)]);
        let res = clipped(tri);
        assert_eq!(res.len(), 1);
        // The polygon now starts where the edge from the last vertex
        // enters the box
        let [a, b, c] = res[0].0;
        assert_approx_eq!(a.pos, pt3(0.5 / 3.0, 0.0, -1.0));
        assert_approx_eq!(a.attrib, 0.5 / 3.0);
        assert_eq!(b, v(0.0, 0.0, 0.0));
        assert_approx_eq!(c.pos, pt3(0.0, 0.5 / 3.0, -1.0));
        assert_approx_eq!(c.attrib, 0.0);
    }

    #[test]
    fn vertex_on_face_adds_no_cut() {
        let tri = Tri([v(1.0, 0.0, 0.0), v(2.0, 1.0, 0.0), v(0.0, 1.0, 0.0)]);
        let res = clipped(tri);
        assert_eq!(
            res,
            [Tri([v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)])]
        );
    }

    #[test]
    fn triangle_over_whole_box_covers_its_slice() {
        let tri =
            Tri([v(-9.0, -9.0, 0.0), v(9.0, -9.0, 0.0), v(0.0, 9.0, 0.0)]);
        let res = clipped(tri);

        assert!(res.iter().flat_map(|t| &t.0).all(in_box));
        let area: f32 = res
            .iter()
            .map(|t| Tri(t.0.map(|v| v.pos)).area())
            .sum();
        assert!((area - 4.0).abs() < 1e-4, "area was {area}");
    }

    #[test]
    fn triangle_across_corner_stays_in_box() {
        let tri =
            Tri([v(0.5, 0.5, 0.5), v(2.0, 0.5, 0.5), v(0.5, 2.0, 1.5)]);
        let res = clipped(tri);

        assert!(!res.is_empty());
        for Tri(vs) in &res {
            assert!(vs.iter().all(in_box), "{vs:?}");
            for v in vs {
                assert_approx_eq!(v.attrib, v.pos[0]);
            }
        }
    }
}
