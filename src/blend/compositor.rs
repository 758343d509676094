//! Block compositing.
//!
//! Every interior grid intersection owns one block of the canvas. A block
//! mixes the inner quadrants of its four surrounding fragments with the
//! shared blend matrices. Blocks never overlap, so each row of blocks is
//! composited as an independent band in parallel.

use image::{GenericImageView, RgbImage};
use rayon::prelude::*;

use crate::config::GridSpec;
use crate::error::Result;
use crate::fragments::FragmentSet;
use crate::plan::Plan;
use crate::progress::Progress;

use super::canvas::{Canvas, CHANNELS};
use super::fragment::{load_fragment, quadrant};
use super::weights::{BlendMatrices, Corner};

/// Blocks between progress log lines.
pub const LOG_EVERY: usize = 180;

/// Composites fragments into the canvas according to a plan.
pub struct Compositor<'a> {
    grid: GridSpec,
    plan: &'a Plan,
    fragments: &'a FragmentSet,
    matrices: &'a BlendMatrices,
}

impl<'a> Compositor<'a> {
    pub fn new(
        grid: GridSpec,
        plan: &'a Plan,
        fragments: &'a FragmentSet,
        matrices: &'a BlendMatrices,
    ) -> Self {
        Self {
            grid,
            plan,
            fragments,
            matrices,
        }
    }

    /// Fill `canvas` block by block.
    ///
    /// The first failing fragment aborts the whole pass.
    pub fn composite(&self, canvas: &mut Canvas) -> Result<()> {
        let progress = Progress::new("Blended block", self.grid.block_count(), LOG_EVERY);
        let row_len = canvas.row_len();
        let band_len = canvas.band_len(self.grid.block_height());

        tracing::info!("Started blending blocks");
        canvas
            .samples_mut()
            .par_chunks_mut(band_len)
            .enumerate()
            .try_for_each(|(block_y, band)| self.composite_band(block_y, band, row_len, &progress))?;
        tracing::info!("Completed blending blocks");

        Ok(())
    }

    /// Composite one row of blocks. Fragments on the shared column between
    /// two neighbouring blocks are loaded once.
    fn composite_band(
        &self,
        block_y: usize,
        band: &mut [f32],
        row_len: usize,
        progress: &Progress,
    ) -> Result<()> {
        let block_width = self.grid.block_width();
        let mut left = (self.load_cell(0, block_y)?, self.load_cell(0, block_y + 1)?);

        for block_x in 0..self.grid.x_count - 1 {
            let right = (
                self.load_cell(block_x + 1, block_y)?,
                self.load_cell(block_x + 1, block_y + 1)?,
            );

            let corners = [&left.0, &right.0, &left.1, &right.1];
            blend_block(
                self.matrices,
                corners,
                band,
                row_len,
                block_x as u32 * block_width,
            );
            tracing::trace!(block_x, block_y, "blended block");
            progress.tick();

            left = right;
        }

        Ok(())
    }

    fn load_cell(&self, x: usize, y: usize) -> Result<RgbImage> {
        let (index, flip, rotation) = self.plan.cell(x, y);
        let path = &self.fragments.paths()[index];
        load_fragment(
            path,
            self.grid.frag_width,
            self.grid.frag_height,
            flip,
            rotation,
        )
    }
}

/// Mix the four oriented fragments of one block into `band`.
///
/// `corners` follows [`Corner::ALL`] order. The block lands at column
/// `x_offset` of the band; `row_len` is the band's sample stride.
pub fn blend_block(
    matrices: &BlendMatrices,
    corners: [&RgbImage; 4],
    band: &mut [f32],
    row_len: usize,
    x_offset: u32,
) {
    let quadrants = [
        quadrant(corners[0], Corner::UpperLeft),
        quadrant(corners[1], Corner::UpperRight),
        quadrant(corners[2], Corner::LowerLeft),
        quadrant(corners[3], Corner::LowerRight),
    ];

    for y in 0..matrices.height() {
        let row = y as usize * row_len;
        for x in 0..matrices.width() {
            let weights = matrices.at(x, y);
            let mut mixed = [0.0f32; CHANNELS];

            for (weight, quad) in weights.iter().zip(&quadrants) {
                let pixel = quad.get_pixel(x, y);
                for (acc, &channel) in mixed.iter_mut().zip(pixel.0.iter()) {
                    *acc += weight * channel as f32;
                }
            }

            let i = row + (x_offset + x) as usize * CHANNELS;
            for (dst, value) in band[i..i + CHANNELS].iter_mut().zip(mixed) {
                *dst = value.clamp(0.0, 255.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RandomPolicy;
    use crate::gradient::Gradient;
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::Path;
    use tempfile::tempdir;

    fn solid(colour: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(8, 8, Rgb(colour))
    }

    #[test]
    fn test_blend_block_single_colour() {
        let matrices = BlendMatrices::new(4, 4, &Gradient::LinearUnity);
        let grey = solid([100, 100, 100]);
        let mut band = vec![0.0f32; 4 * 4 * CHANNELS];

        blend_block(&matrices, [&grey, &grey, &grey, &grey], &mut band, 4 * CHANNELS, 0);

        for value in band {
            assert!((value - 100.0).abs() < 1e-3, "{}", value);
        }
    }

    #[test]
    fn test_blend_block_weighted_mix() {
        let matrices = BlendMatrices::new(4, 4, &Gradient::LinearUnity);
        let corners = [
            solid([255, 0, 0]),
            solid([0, 255, 0]),
            solid([0, 0, 255]),
            solid([255, 255, 255]),
        ];
        let row_len = 4 * CHANNELS;
        let mut band = vec![0.0f32; 4 * row_len];

        blend_block(
            &matrices,
            [&corners[0], &corners[1], &corners[2], &corners[3]],
            &mut band,
            row_len,
            0,
        );

        for y in 0..4u32 {
            for x in 0..4u32 {
                let [ul, ur, ll, lr] = matrices.at(x, y);
                let i = y as usize * row_len + x as usize * CHANNELS;
                let expected = [
                    255.0 * (ul + lr),
                    255.0 * (ur + lr),
                    255.0 * (ll + lr),
                ];
                for c in 0..CHANNELS {
                    assert!((band[i + c] - expected[c]).abs() < 1e-2);
                }
            }
        }
    }

    #[test]
    fn test_blend_block_offset() {
        let matrices = BlendMatrices::new(2, 2, &Gradient::LinearUnity);
        let white = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let row_len = 6 * CHANNELS;
        let mut band = vec![0.0f32; 2 * row_len];

        blend_block(&matrices, [&white, &white, &white, &white], &mut band, row_len, 4);

        // Columns 0..4 untouched, columns 4..6 written.
        assert!(band[..4 * CHANNELS].iter().all(|&v| v == 0.0));
        assert!(band[4 * CHANNELS..6 * CHANNELS].iter().all(|&v| (v - 255.0).abs() < 1e-3));
    }

    fn write_fragments(dir: &Path, colours: &[[u8; 3]]) -> FragmentSet {
        for (i, colour) in colours.iter().enumerate() {
            RgbImage::from_pixel(16, 16, Rgb(*colour))
                .save(dir.join(format!("frag-{}.png", i)))
                .unwrap();
        }
        FragmentSet::scan(dir).unwrap()
    }

    #[test]
    fn test_composite_fills_canvas() {
        let dir = tempdir().unwrap();
        let fragments = write_fragments(dir.path(), &[[200, 10, 10], [10, 200, 10]]);

        let grid = GridSpec {
            x_count: 4,
            y_count: 3,
            frag_width: 8,
            frag_height: 8,
        };
        let plan = Plan::build(4, 3, fragments.len(), &RandomPolicy::default(), &mut StdRng::seed_from_u64(0));
        let matrices = BlendMatrices::new(4, 4, &Gradient::LinearUnity);
        let (w, h) = grid.canvas_size();
        let mut canvas = Canvas::new(w, h);

        Compositor::new(grid, &plan, &fragments, &matrices)
            .composite(&mut canvas)
            .unwrap();

        assert_eq!((canvas.width(), canvas.height()), (12, 8));
        // Every pixel is a mix of the two colours, so red + green stays ~210.
        for y in 0..h {
            for x in 0..w {
                let [r, g, b] = canvas.pixel(x, y);
                assert!((r + g - 210.0).abs() < 1.0, "({}, {}) = {:?}", x, y, [r, g, b]);
                assert!((b - 10.0).abs() < 1.0);
            }
        }
    }

    #[test]
    fn test_composite_propagates_bad_fragment() {
        let dir = tempdir().unwrap();
        let fragments = write_fragments(dir.path(), &[[1, 2, 3], [4, 5, 6]]);
        std::fs::write(&fragments.paths()[1], b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let grid = GridSpec {
            x_count: 2,
            y_count: 2,
            frag_width: 4,
            frag_height: 4,
        };
        let plan = Plan::build(2, 2, 2, &RandomPolicy::default(), &mut StdRng::seed_from_u64(0));
        let matrices = BlendMatrices::new(2, 2, &Gradient::LinearUnity);
        let mut canvas = Canvas::new(2, 2);

        let result = Compositor::new(grid, &plan, &fragments, &matrices).composite(&mut canvas);
        assert!(result.is_err());
    }
}
