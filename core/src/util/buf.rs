//! Two-dimensional buffers, such as images and depth buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::iter::repeat_n;
use core::ops::{Index, IndexMut};

use crate::util::Dims;

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use duoview_core::util::buf::*;
/// // Elements initialized with `Default::default()`
/// let mut buf = Buf2::new((4, 4));
/// // Indexing with an (x, y) pair yields element at row y, column x:
/// buf[(2, 1)] = 123;
/// // Indexing with an usize i yields row with index i as a slice:
/// assert_eq!(&buf[1], &[0, 0, 123, 0]);
/// // Thus you can also do this, row first, column second:
/// assert_eq!(buf[1][2], 123)
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Buf2<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer of size `dims`, with elements initialized with
    /// values from `init` in row-major order.
    ///
    /// # Panics
    /// If there are fewer than `w * h` elements in `init`.
    pub fn new_from<I>((w, h): Dims, init: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let len = w as usize * h as usize;
        let data: Vec<_> = init.into_iter().take(len).collect();
        assert_eq!(data.len(), len, "too few elements for a {w}×{h} buffer");
        Self { dims: (w, h), data }
    }

    /// Returns a buffer of size `dims`, with every element initialized by
    /// calling `T::default()`.
    pub fn new(dims: Dims) -> Self
    where
        T: Clone + Default,
    {
        let len = dims.0 as usize * dims.1 as usize;
        Self::new_from(dims, repeat_n(T::default(), len))
    }

    /// Returns a buffer of size `dims`, with every element initialized by
    /// calling `init_fn(x, y)` where x is the column index and y the row
    /// index of the element being initialized.
    pub fn new_with<F>((w, h): Dims, mut init_fn: F) -> Self
    where
        F: FnMut(u32, u32) -> T,
    {
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            data.extend((0..w).map(|x| init_fn(x, y)));
        }
        Self { dims: (w, h), data }
    }

    /// Returns the width of `self`.
    #[inline]
    pub fn width(&self) -> u32 {
        self.dims.0
    }
    /// Returns the height of `self`.
    #[inline]
    pub fn height(&self) -> u32 {
        self.dims.1
    }
    /// Returns the width and height of `self`.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }
    /// Returns whether `self` has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Returns the backing data of `self` mutably.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns a reference to the element at column `x`, row `y`,
    /// or `None` if the position is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        self.to_index(x, y).map(|i| &self.data[i])
    }
    /// Returns a mutable reference to the element at column `x`, row `y`,
    /// or `None` if the position is out of bounds.
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        self.to_index(x, y).map(|i| &mut self.data[i])
    }

    /// Returns an iterator over the rows of `self`, from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.dims.0.max(1) as usize)
    }
    /// Returns an iterator over the rows of `self` as mutable slices.
    pub fn rows_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut [T]> {
        self.data.chunks_exact_mut(self.dims.0.max(1) as usize)
    }
    /// Returns an iterator over the elements of `self` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns a copy of `self` with the order of the rows reversed.
    pub fn flipped(&self) -> Self
    where
        T: Copy,
    {
        Self::new_from(self.dims, self.rows().rev().flatten().copied())
    }

    /// Sets every element of `self` to `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }

    fn to_index(&self, x: u32, y: u32) -> Option<usize> {
        let (w, h) = self.dims;
        (x < w && y < h).then(|| y as usize * w as usize + x as usize)
    }
}

impl<T> Index<usize> for Buf2<T> {
    type Output = [T];

    /// Returns a reference to the row at index `row`.
    ///
    /// # Panics
    /// If `row` is out of bounds.
    fn index(&self, row: usize) -> &[T] {
        let w = self.dims.0 as usize;
        &self.data[row * w..][..w]
    }
}

impl<T> IndexMut<usize> for Buf2<T> {
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        let w = self.dims.0 as usize;
        &mut self.data[row * w..][..w]
    }
}

impl<T> Index<(u32, u32)> for Buf2<T> {
    type Output = T;

    /// Returns a reference to the element at column `x`, row `y`.
    ///
    /// # Panics
    /// If the position is out of bounds.
    fn index(&self, (x, y): (u32, u32)) -> &T {
        match self.to_index(x, y) {
            Some(i) => &self.data[i],
            None => self.out_of_bounds(x, y),
        }
    }
}

impl<T> IndexMut<(u32, u32)> for Buf2<T> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        match self.to_index(x, y) {
            Some(i) => &mut self.data[i],
            None => self.out_of_bounds(x, y),
        }
    }
}

impl<T> Buf2<T> {
    #[cold]
    fn out_of_bounds(&self, x: u32, y: u32) -> ! {
        let (w, h) = self.dims;
        panic!("position (x={x}, y={y}) out of bounds (0..{w}, 0..{h})")
    }
}

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buf2")
            .field("width", &self.dims.0)
            .field("height", &self.dims.1)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;

    #[test]
    fn buf_new_from() {
        let buf = Buf2::new_from((3, 2), 0..);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.data(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic]
    fn buf_new_from_too_few_elements() {
        let _ = Buf2::new_from((3, 2), 0..5);
    }

    #[test]
    fn buf_new_default() {
        let buf: Buf2<i32> = Buf2::new((3, 2));
        assert_eq!(buf.data(), &[0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn buf_new_with() {
        let buf = Buf2::new_with((3, 2), |x, y| x + y);
        assert_eq!(buf.data(), &[0, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn buf_zero_width() {
        let buf: Buf2<u8> = Buf2::new((0, 3));
        assert!(buf.is_empty());
        assert_eq!(buf.rows().count(), 0);
    }

    #[test]
    fn buf_indexing() {
        let mut buf = Buf2::new_with((4, 5), |x, y| x * 10 + y);
        assert_eq!(buf[2], [2, 12, 22, 32]);
        assert_eq!(buf[(1, 4)], 14);
        buf[(3, 0)] = 99;
        buf[4][0] = 77;
        assert_eq!(buf.get(3, 0), Some(&99));
        assert_eq!(buf.get(0, 4), Some(&77));
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.get(0, 5), None);
    }

    #[test]
    #[should_panic]
    fn buf_index_past_end_should_panic() {
        let buf: Buf2<u8> = Buf2::new((4, 5));
        let _ = buf[(4, 0)];
    }

    #[test]
    fn buf_rows_and_flip() {
        let buf = Buf2::new_from((2, 3), 0..);
        let rows: Vec<_> = buf.rows().collect();
        assert_eq!(rows, vec![&[0, 1][..], &[2, 3], &[4, 5]]);

        let flipped = buf.flipped();
        assert_eq!(flipped.data(), &[4, 5, 2, 3, 0, 1]);
        assert_eq!(flipped.flipped(), buf);
    }

    #[test]
    fn buf_fill() {
        let mut buf = Buf2::new((2, 2));
        buf.fill(7u8);
        assert!(buf.iter().all(|&b| b == 7));
    }

    #[test]
    fn buf_debug() {
        let buf: Buf2<u8> = Buf2::new((2, 3));
        assert_eq!(format!("{buf:?}"), "Buf2 { width: 2, height: 3, .. }");
    }
}
