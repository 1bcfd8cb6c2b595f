//! Graphics context providers.
//!
//! A [`Device`] owns the framebuffer that rendering draws into. The
//! renderer never creates one itself; the caller passes a device to every
//! render call, and the device decides whether it currently has a usable
//! framebuffer. A window, for instance, only has one while it is open.

use crate::util::Dims;

use super::target::Framebuf;

/// Trait for providers of a current framebuffer to render into.
pub trait Device {
    /// Returns the current framebuffer of `self`, or `None` if there is no
    /// usable one.
    fn current(&mut self) -> Option<&mut Framebuf>;
}

/// A device with no display, rendering into memory only.
#[derive(Clone, Debug, Default)]
pub struct Headless {
    fb: Option<Framebuf>,
}

impl Headless {
    /// Returns a device with a framebuffer of size `dims` bound.
    pub fn new(dims: Dims) -> Self {
        Self { fb: Some(Framebuf::new(dims)) }
    }

    /// Returns a device with no framebuffer bound.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Binds a new framebuffer of size `dims`, replacing any previous one.
    pub fn bind(&mut self, dims: Dims) {
        self.fb = Some(Framebuf::new(dims));
    }

    /// Unbinds and returns the current framebuffer, if any.
    pub fn unbind(&mut self) -> Option<Framebuf> {
        self.fb.take()
    }
}

impl Device for Headless {
    fn current(&mut self) -> Option<&mut Framebuf> {
        self.fb.as_mut()
    }
}

impl<D: Device + ?Sized> Device for &mut D {
    fn current(&mut self) -> Option<&mut Framebuf> {
        (**self).current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_bind_unbind() {
        let mut dev = Headless::unbound();
        assert!(dev.current().is_none());

        dev.bind((8, 4));
        assert_eq!(dev.current().map(|fb| fb.dims()), Some((8, 4)));

        let fb = dev.unbind();
        assert_eq!(fb.map(|fb| fb.dims()), Some((8, 4)));
        assert!(dev.current().is_none());
    }

    #[test]
    fn device_by_mut_ref() {
        fn dims(mut d: impl Device) -> Option<Dims> {
            d.current().map(|fb| fb.dims())
        }
        let mut dev = Headless::new((3, 2));
        assert_eq!(dims(&mut dev), Some((3, 2)));
    }
}
