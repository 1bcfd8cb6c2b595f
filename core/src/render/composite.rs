//! Compositing rendered images over backgrounds.

use crate::error::{Mismatch, Result};
use crate::math::Color3;
use crate::util::buf::Buf2;

/// Replaces every pixel of `image` that equals `key` with the pixel at the
/// same position in `background`.
///
/// The comparison is exact, so only pixels left untouched since clearing to
/// `key` are replaced, unless some face happens to be shaded to exactly the
/// key color. Returns the number of pixels replaced.
///
/// # Errors
/// [`ShapeMismatch`][crate::Error::ShapeMismatch] if the images differ in
/// size. `image` is left unchanged.
///
/// # Examples
/// ```
/// use duoview_core::math::rgb;
/// use duoview_core::render::composite::chroma_key;
/// use duoview_core::util::buf::Buf2;
///
/// let key = rgb(0, 0, 0);
/// let mut img = Buf2::new_from((2, 1), [key, rgb(9, 9, 9)]);
/// let bg = Buf2::new_from((2, 1), [rgb(1, 2, 3); 2]);
///
/// assert_eq!(chroma_key(&mut img, &bg, key), Ok(1));
/// assert_eq!(img.data(), [rgb(1, 2, 3), rgb(9, 9, 9)]);
/// ```
pub fn chroma_key(
    image: &mut Buf2<Color3>,
    background: &Buf2<Color3>,
    key: Color3,
) -> Result<usize> {
    if image.dims() != background.dims() {
        return Err(Mismatch::Dims {
            what: "background",
            expected: image.dims(),
            actual: background.dims(),
        }
        .into());
    }
    let mut n = 0;
    for (px, bg) in image.data_mut().iter_mut().zip(background.data()) {
        if *px == key {
            *px = *bg;
            n += 1;
        }
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use crate::Error;
    use crate::math::rgb;

    use super::*;

    #[test]
    fn only_key_colored_pixels_are_replaced() {
        let key = rgb(0, 0, 0);
        let fg = rgb(10, 20, 30);
        let near = rgb(0, 0, 1);
        let mut img = Buf2::new_from((3, 1), [key, fg, near]);
        let bg = Buf2::new_with((3, 1), |x, _| rgb(x as u8, 0xFF, 0xFF));

        assert_eq!(chroma_key(&mut img, &bg, key), Ok(1));
        assert_eq!(img.data(), [rgb(0, 0xFF, 0xFF), fg, near]);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let mut img = Buf2::new((4, 2));
        let before = img.clone();
        let bg = Buf2::new((2, 4));

        let res = chroma_key(&mut img, &bg, rgb(0, 0, 0));
        assert_eq!(
            res,
            Err(Error::ShapeMismatch(Mismatch::Dims {
                what: "background",
                expected: (4, 2),
                actual: (2, 4),
            }))
        );
        assert_eq!(img, before);
    }
}
