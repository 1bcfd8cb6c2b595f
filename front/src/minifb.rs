//! Showing rendered views in a `minifb` window.

use log::{debug, info};
use minifb::{Key, ScaleMode, WindowOptions};

use duoview_core::math::Color3;
use duoview_core::render::{Device, Framebuf};
use duoview_core::util::{Dims, buf::Buf2};

use crate::tile;

/// A window that views can be rendered for and shown in.
///
/// As a [`Device`], the window offers a framebuffer of its own size for as
/// long as it stays open.
pub struct Window {
    inner: minifb::Window,
    fb: Framebuf,
}

/// Settings for opening a [`Window`].
#[derive(Clone, Debug)]
pub struct Builder<'a> {
    dims: Dims,
    title: &'a str,
    fps: usize,
    resizable: bool,
}

impl<'a> Builder<'a> {
    /// Sets the size of the window's framebuffer. The default is 512×512.
    pub fn dims(self, dims: Dims) -> Self {
        Self { dims, ..self }
    }

    pub fn title(self, title: &'a str) -> Self {
        Self { title, ..self }
    }

    /// Caps the rate at which the window is redrawn. The default is 60.
    pub fn fps(self, fps: usize) -> Self {
        Self { fps, ..self }
    }

    /// Lets the user resize the window, stretching its contents to fit.
    pub fn resizable(self, resizable: bool) -> Self {
        Self { resizable, ..self }
    }

    /// Opens the window.
    pub fn build(self) -> minifb::Result<Window> {
        let (w, h) = self.dims;
        let opts = WindowOptions {
            resize: self.resizable,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        };
        let mut inner =
            minifb::Window::new(self.title, w as usize, h as usize, opts)?;
        inner.set_target_fps(self.fps);
        debug!("opened {w}×{h} window {:?}", self.title);

        Ok(Window { inner, fb: Framebuf::new(self.dims) })
    }
}

impl Window {
    pub fn builder() -> Builder<'static> {
        Builder {
            dims: (512, 512),
            title: "duoview",
            fps: 60,
            resizable: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Draws `img` once, scaled to the window if its size differs.
    pub fn present(&mut self, img: &Buf2<Color3>) -> minifb::Result<()> {
        self.blit(&tile(std::slice::from_ref(img)))
    }

    /// Shows `images` next to each other, left to right, until the window
    /// is closed or Esc is pressed.
    pub fn show(&mut self, images: &[Buf2<Color3>]) -> minifb::Result<()> {
        let pixels = tile(images);
        info!("showing {} views; close the window or press Esc", images.len());
        while self.inner.is_open() && !self.inner.is_key_down(Key::Escape) {
            self.blit(&pixels)?;
        }
        Ok(())
    }

    fn blit(&mut self, pixels: &Buf2<u32>) -> minifb::Result<()> {
        let (w, h) = pixels.dims();
        self.inner
            .update_with_buffer(pixels.data(), w as usize, h as usize)
    }
}

impl Device for Window {
    fn current(&mut self) -> Option<&mut Framebuf> {
        self.inner.is_open().then_some(&mut self.fb)
    }
}
