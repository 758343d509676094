//! Floating point RGB canvas.

use image::{Rgb, RgbImage};

/// Channels per pixel.
pub const CHANNELS: usize = 3;

/// A row-major RGB buffer of `f32` samples in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl Canvas {
    /// Allocate a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0.0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel values at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let i = self.offset(x, y);
        [self.samples[i], self.samples[i + 1], self.samples[i + 2]]
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Sample count of one full pixel row.
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Sample count of a band of `rows` full pixel rows.
    pub fn band_len(&self, rows: u32) -> usize {
        (self.row_len() * rows as usize).max(1)
    }

    /// Quantize to 8 bits. Values are clipped to `[0, 255]` and truncated.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b] = self.pixel(x, y);
            Rgb([quantize(r), quantize(g), quantize(b)])
        })
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

fn quantize(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
