//! Reading and writing PPM images.
//!
//! Views are saved as binary PPM (`P6`). Both that and the plain text
//! variant (`P3`) can be read back, for example to serve as the background
//! of a front view. Channel values wider than a byte are not supported.

use alloc::{string::String, vec::Vec};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::math::color::{Color3, rgb};
use crate::util::buf::Buf2;

/// Error while reading or writing a PPM image.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(io::ErrorKind),
    #[error("not a PPM image: magic {:?}", String::from_utf8_lossy(.0))]
    NotPpm([u8; 2]),
    #[error("unsupported max channel value {0}")]
    UnsupportedMax(u32),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("invalid number")]
    InvalidNumber,
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.kind())
    }
}

/// Position in the bytes of an image being decoded.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn byte(&mut self) -> Result<u8> {
        let b = self.peek().ok_or(Error::UnexpectedEnd)?;
        self.pos += 1;
        Ok(b)
    }

    /// Skips whitespace and comments, which run from `#` to end of line.
    fn skip_blank(&mut self) {
        let mut comment = false;
        while let Some(b) = self.peek() {
            match b {
                b'#' => comment = true,
                b'\n' | b'\r' => comment = false,
                _ if comment || b.is_ascii_whitespace() => {}
                _ => break,
            }
            self.pos += 1;
        }
    }

    /// Reads an unsigned decimal number after optional blanks.
    fn number(&mut self) -> Result<u32> {
        self.skip_blank();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = &self.bytes[start..self.pos];
        if digits.is_empty() {
            return Err(match self.peek() {
                None => Error::UnexpectedEnd,
                Some(_) => Error::InvalidNumber,
            });
        }
        digits
            .iter()
            .try_fold(0u32, |n, &d| {
                n.checked_mul(10)?.checked_add(u32::from(d - b'0'))
            })
            .ok_or(Error::InvalidNumber)
    }
}

/// Decodes a `P3` or `P6` image.
///
/// Channels are rescaled from the range given in the header to 0..=255.
pub fn read_ppm(bytes: &[u8]) -> Result<Buf2<Color3>> {
    let mut rd = Reader { bytes, pos: 0 };

    let magic = [rd.byte()?, rd.byte()?];
    let binary = match &magic {
        b"P6" => true,
        b"P3" => false,
        _ => return Err(Error::NotPpm(magic)),
    };
    let (w, h) = (rd.number()?, rd.number()?);
    let max = rd.number()?;
    if !(1..=255).contains(&max) {
        return Err(Error::UnsupportedMax(max));
    }
    let ch = |c: u32| (c.min(max) * 255 / max) as u8;

    let count = w as usize * h as usize;
    let data: Vec<Color3> = if binary {
        // Exactly one whitespace byte ends the header
        rd.byte()?;
        let len = count.checked_mul(3).ok_or(Error::InvalidNumber)?;
        let px = bytes.get(rd.pos..).and_then(|b| b.get(..len));
        px.ok_or(Error::UnexpectedEnd)?
            .chunks_exact(3)
            .map(|c| rgb(ch(c[0].into()), ch(c[1].into()), ch(c[2].into())))
            .collect()
    } else {
        (0..count)
            .map(|_| -> Result<Color3> {
                let [r, g, b] = [rd.number()?, rd.number()?, rd.number()?];
                Ok(rgb(ch(r), ch(g), ch(b)))
            })
            .collect::<Result<_>>()?
    };
    Ok(Buf2::new_from((w, h), data))
}

/// Reads the image in the file at `path`, as by [`read_ppm`].
pub fn load_ppm(path: impl AsRef<Path>) -> Result<Buf2<Color3>> {
    read_ppm(&fs::read(path)?)
}

/// Encodes `image` as a binary `P6` image into `out`.
pub fn write_ppm(mut out: impl Write, image: &Buf2<Color3>) -> io::Result<()> {
    let (w, h) = image.dims();
    writeln!(out, "P6 {w} {h} 255")?;
    let px: Vec<u8> = image.iter().flat_map(|c| c.0).collect();
    out.write_all(&px)
}

/// Writes `image` to the file at `path` as by [`write_ppm`], replacing any
/// existing file.
pub fn save_ppm(path: impl AsRef<Path>, image: &Buf2<Color3>) -> Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    write_ppm(&mut out, image)?;
    out.flush()?;
    Ok(())
}
