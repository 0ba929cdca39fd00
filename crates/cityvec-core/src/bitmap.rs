//! Bitmap - the image container shared by every pipeline stage.
//!
//! Unlike the packed-word image storage this is descended from, a `Bitmap`
//! is a flat row-major byte buffer: one byte per pixel for `Gray` images,
//! three (B, G, R) for `Bgr`. That matches the pipeline's working data
//! directly at each stage (8-bit black layer, 8-bit thinned skeleton,
//! 24-bit source raster) without a bit-packing layer earning its keep.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Pixel layout of a `Bitmap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// One byte per pixel. Used for the binary black layer and the
    /// thinned skeleton (0 = background/white, 255 = foreground/black).
    Gray,
    /// Three bytes per pixel, in B, G, R order, matching the source
    /// raster's channel order and the original threshold convention.
    Bgr,
}

impl Channels {
    pub const fn count(self) -> u8 {
        match self {
            Channels::Gray => 1,
            Channels::Bgr => 3,
        }
    }
}

#[derive(Debug)]
struct BitmapData {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

/// An immutable, cheaply-cloneable bitmap.
///
/// Clone is `O(1)` (an `Arc` bump) so that a `Bitmap` can be threaded
/// through several read-only pipeline stages without a deep copy; stages
/// that need to mutate in place build a `BitmapMut` instead.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Arc<BitmapData>,
}

/// A mutable bitmap, produced when a stage needs to write pixels.
#[derive(Debug)]
pub struct BitmapMut {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Build a bitmap from a pre-filled pixel buffer.
    ///
    /// `pixels.len()` must equal `width * height * channels.count()`.
    pub fn from_pixels(width: u32, height: u32, channels: Channels, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * channels.count() as usize;
        if pixels.len() != expected {
            return Err(Error::BufferLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            data: Arc::new(BitmapData {
                width,
                height,
                channels,
                pixels,
            }),
        })
    }

    /// An all-background (zeroed) bitmap of the given size.
    pub fn blank(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * channels.count() as usize;
        Self::from_pixels(width, height, channels, vec![0u8; len])
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn channels(&self) -> Channels {
        self.data.channels
    }

    pub fn in_bounds(&self, p: Pixel) -> bool {
        p.row < self.data.height && p.col < self.data.width
    }

    fn offset(&self, p: Pixel) -> usize {
        (p.row as usize * self.data.width as usize + p.col as usize)
            * self.data.channels.count() as usize
    }

    /// Raw channel bytes at `p`. Panics if `p` is out of bounds -- callers
    /// iterate within `width()`/`height()` bounds by construction.
    pub fn pixel(&self, p: Pixel) -> &[u8] {
        let off = self.offset(p);
        &self.data.pixels[off..off + self.data.channels.count() as usize]
    }

    /// Convenience accessor for `Gray` bitmaps: true if the pixel is
    /// foreground (non-zero).
    pub fn is_foreground(&self, p: Pixel) -> bool {
        self.pixel(p).iter().any(|&b| b != 0)
    }

    pub fn raw(&self) -> &[u8] {
        &self.data.pixels
    }

    /// Take ownership of the underlying buffer without copying, if this
    /// is the only reference; otherwise falls back to a deep copy.
    pub fn into_mut(self) -> BitmapMut {
        let width = self.data.width;
        let height = self.data.height;
        let channels = self.data.channels;
        let pixels = match Arc::try_unwrap(self.data) {
            Ok(data) => data.pixels,
            Err(shared) => shared.pixels.clone(),
        };
        BitmapMut {
            width,
            height,
            channels,
            pixels,
        }
    }
}

impl BitmapMut {
    pub fn blank(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * channels.count() as usize;
        Ok(Self {
            width,
            height,
            channels,
            pixels: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn in_bounds(&self, p: Pixel) -> bool {
        p.row < self.height && p.col < self.width
    }

    fn offset(&self, p: Pixel) -> usize {
        (p.row as usize * self.width as usize + p.col as usize) * self.channels.count() as usize
    }

    pub fn pixel(&self, p: Pixel) -> &[u8] {
        let off = self.offset(p);
        &self.pixels[off..off + self.channels.count() as usize]
    }

    pub fn pixel_mut(&mut self, p: Pixel) -> &mut [u8] {
        let off = self.offset(p);
        let n = self.channels.count() as usize;
        &mut self.pixels[off..off + n]
    }

    pub fn is_foreground(&self, p: Pixel) -> bool {
        self.pixel(p).iter().any(|&b| b != 0)
    }

    /// Set a `Gray` pixel to foreground (255) or background (0).
    pub fn set_gray(&mut self, p: Pixel, foreground: bool) {
        debug_assert_eq!(self.channels, Channels::Gray);
        self.pixel_mut(p)[0] = if foreground { 255 } else { 0 };
    }

    pub fn raw(&self) -> &[u8] {
        &self.pixels
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(m: BitmapMut) -> Self {
        Self {
            data: Arc::new(BitmapData {
                width: m.width,
                height: m.height,
                channels: m.channels,
                pixels: m.pixels,
            }),
        }
    }
}
