//! Fragments grid preview.
//!
//! Lays every planned fragment out unblended, in its grid cell, separated by
//! solid padding.

use image::imageops;
use image::{Rgb, RgbImage};

use crate::blend::load_fragment;
use crate::config::{FragsGridConfig, GridSpec};
use crate::error::Result;
use crate::fragments::FragmentSet;
use crate::plan::Plan;
use crate::progress::Progress;

/// Cells between progress log lines.
pub const LOG_EVERY: usize = 360;

/// Pixel size of the preview for a grid.
pub fn frags_grid_size(grid: &GridSpec, padding: u32) -> (u32, u32) {
    let width = padding + grid.x_count as u32 * (grid.frag_width + padding);
    let height = padding + grid.y_count as u32 * (grid.frag_height + padding);
    (width, height)
}

/// Top-left pixel of cell `(x, y)` in the preview.
pub fn cell_origin(grid: &GridSpec, padding: u32, x: usize, y: usize) -> (u32, u32) {
    (
        padding + x as u32 * (grid.frag_width + padding),
        padding + y as u32 * (grid.frag_height + padding),
    )
}

/// Render the fragments grid preview.
pub fn render_frags_grid(
    grid: &GridSpec,
    plan: &Plan,
    fragments: &FragmentSet,
    config: &FragsGridConfig,
) -> Result<RgbImage> {
    let (width, height) = frags_grid_size(grid, config.padding);
    tracing::info!("Prepared the fragments grid:  Width: {}  Height: {}", width, height);

    let mut preview = RgbImage::from_pixel(width, height, Rgb(config.padding_color));
    let progress = Progress::new("Rendered fragments grid block", grid.cell_count(), LOG_EVERY);

    tracing::info!("Started rendering fragments grid");
    for y in 0..grid.y_count {
        for x in 0..grid.x_count {
            let (index, flip, rotation) = plan.cell(x, y);
            let fragment = load_fragment(
                &fragments.paths()[index],
                grid.frag_width,
                grid.frag_height,
                flip,
                rotation,
            )?;

            let (ox, oy) = cell_origin(grid, config.padding, x, y);
            imageops::replace(&mut preview, &fragment, ox as i64, oy as i64);
            progress.tick();
        }
    }
    tracing::info!("Completed rendering fragments grid");

    Ok(preview)
}
