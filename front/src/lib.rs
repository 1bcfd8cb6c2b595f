//! Frontends for displaying images rendered with `duoview`.

use duoview_core::math::Color3;
use duoview_core::util::buf::Buf2;

#[cfg(feature = "minifb")]
pub mod minifb;

/// Returns `images` placed side by side, left to right, as pixels in
/// `0x00_RR_GG_BB` format.
///
/// The result is as wide as all the images together and as tall as the
/// tallest of them. Pixels not covered by any image are black.
pub fn tile(images: &[Buf2<Color3>]) -> Buf2<u32> {
    let w = images.iter().map(Buf2::width).sum();
    let h = images.iter().map(Buf2::height).max().unwrap_or(0);

    let mut out = Buf2::new((w, h));
    let mut x0 = 0;
    for img in images {
        for (y, row) in img.rows().enumerate() {
            for (x, c) in row.iter().enumerate() {
                out[(x0 + x as u32, y as u32)] = c.to_rgb_u32();
            }
        }
        x0 += img.width();
    }
    out
}
