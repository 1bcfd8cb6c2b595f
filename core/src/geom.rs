//! Basic geometric primitives.

use crate::math::{Point3, Vec3};

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Three-dimensional vertex type.
pub type Vertex3<A, B = ()> = Vertex<Point3<B>, A>;

/// Triangle, defined by three vertices.
///
/// The vertices may be actual vertex values, or indices into a vertex
/// buffer. A `Tri<usize>` is one face of an indexed mesh.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// A surface normal in 3D.
pub type Normal3<B = ()> = Vec3<B>;

/// Returns a new vertex with the given position and attribute values.
#[inline]
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Returns a new triangle with the given vertices.
#[inline]
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

impl<V> Tri<V> {
    /// Returns a triangle with `f` applied to each vertex of `self`.
    pub fn map<U>(self, f: impl FnMut(V) -> U) -> Tri<U> {
        Tri(self.0.map(f))
    }
}

impl<V> From<[V; 3]> for Tri<V> {
    fn from(vs: [V; 3]) -> Self {
        Self(vs)
    }
}

impl Tri<usize> {
    /// Returns the largest vertex index referred to by `self`.
    pub fn max_index(&self) -> usize {
        let [a, b, c] = self.0;
        a.max(b).max(c)
    }
}

impl<B> Tri<Point3<B>> {
    /// Returns the vectors from the first vertex to the other two.
    pub fn tangents(&self) -> [Vec3<B>; 2] {
        let [a, b, c] = self.0;
        [b - a, c - a]
    }

    /// Returns the normal vector of `self`, not normalized.
    ///
    /// The length of the result is twice the area of `self`, so the
    /// normal of a degenerate triangle is the zero vector. The direction
    /// is given by the right-hand rule: counterclockwise vertices, when
    /// seen from the front, yield a normal pointing towards the viewer.
    ///
    /// # Examples
    /// ```
    /// use duoview_core::geom::{Tri, tri};
    /// use duoview_core::math::{Point3, pt3, vec3};
    ///
    /// let t: Tri<Point3> =
    ///     tri(pt3(0.0, 0.0, 0.0), pt3(2.0, 0.0, 0.0), pt3(0.0, 1.0, 0.0));
    /// assert_eq!(t.normal(), vec3(0.0, 0.0, 2.0));
    /// ```
    pub fn normal(&self) -> Normal3<B> {
        let [t, u] = self.tangents();
        t.cross(&u)
    }

    /// Returns the area of `self`.
    pub fn area(&self) -> f32 {
        0.5 * self.normal().len()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{pt3, vec3};

    use super::*;

    #[test]
    fn normal_follows_winding() {
        let ccw: Tri<Point3> =
            tri(pt3(0.0, 0.0, 0.0), pt3(1.0, 0.0, 0.0), pt3(0.0, 1.0, 0.0));
        let cw = tri(ccw.0[0], ccw.0[2], ccw.0[1]);
        assert_eq!(ccw.normal(), vec3(0.0, 0.0, 1.0));
        assert_eq!(cw.normal(), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn degenerate_normal_is_zero() {
        let t: Tri<Point3> =
            tri(pt3(0.0, 0.0, 0.0), pt3(1.0, 1.0, 1.0), pt3(2.0, 2.0, 2.0));
        assert_eq!(t.normal().len_sqr(), 0.0);
        assert_eq!(t.area(), 0.0);
    }

    #[test]
    fn area() {
        let t: Tri<Point3> =
            tri(pt3(1.0, 0.0, 0.0), pt3(1.0, 3.0, 0.0), pt3(1.0, 0.0, 4.0));
        assert_approx_eq!(t.area(), 6.0);
    }

    #[test]
    fn max_index() {
        assert_eq!(tri(3usize, 7, 1).max_index(), 7);
    }

    #[test]
    fn map_vertices() {
        assert_eq!(tri(1, 2, 3).map(|i| i * 10), tri(10, 20, 30));
    }
}
