//! Blend configuration.
//!
//! [`ConfigFile`] is the serde view of `blenders_config.json`. Verification
//! turns it into a [`BlendConfig`], an immutable, fully typed record that the
//! rest of the pipeline reads.

mod file;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::gradient::Gradient;

pub use file::{
    ColorOverrides, ConfigFile, CustomGradientSection, FragsGridSection, ResolutionOverrides,
    CONFIG_FILENAME,
};

/// Seeds are reduced modulo this value, and auto seeds are drawn up to it.
pub const SEED_MODULUS: i64 = (1 << 32) - 1;

/// Directory bundled with the crate holding the default project and fragments.
pub fn default_configs_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("default_configs")
}

/// The default blend project template.
pub fn default_project_path() -> PathBuf {
    default_configs_path().join("blend_project")
}

/// The fallback fragment set.
pub fn default_frags_path() -> PathBuf {
    default_configs_path().join("default_frags")
}

/// Grid and fragment geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub x_count: usize,
    pub y_count: usize,
    pub frag_width: u32,
    pub frag_height: u32,
}

impl GridSpec {
    /// Width of one blend block (half a fragment).
    pub fn block_width(&self) -> u32 {
        self.frag_width / 2
    }

    /// Height of one blend block (half a fragment).
    pub fn block_height(&self) -> u32 {
        self.frag_height / 2
    }

    /// Canvas size in pixels: one block per interior grid intersection.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.block_width() * (self.x_count as u32 - 1),
            self.block_height() * (self.y_count as u32 - 1),
        )
    }

    /// Number of blend blocks.
    pub fn block_count(&self) -> usize {
        (self.x_count - 1) * (self.y_count - 1)
    }

    /// Number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.x_count * self.y_count
    }
}

/// Which fragment selection and orientation policies are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomPolicy {
    pub random_frags: bool,
    pub avoid_duplicates: bool,
    pub random_flipping: bool,
    pub random_rotating: bool,
}

/// Fragments grid preview settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragsGridConfig {
    pub padding: u32,
    pub padding_color: [u8; 3],
}

/// Verified, immutable configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendConfig {
    pub manual_seed: Option<u32>,
    pub policy: RandomPolicy,
    pub grid: GridSpec,
    pub save_frag_locations: bool,
    /// `Some` when a fragments grid preview should be saved.
    pub frags_grid: Option<FragsGridConfig>,
    pub gradient: Gradient,
}

impl BlendConfig {
    /// Load and verify the config of a project directory.
    pub fn load_from_project(project: &Path) -> Result<Self> {
        Self::verify(&ConfigFile::load_from_project(project)?)
    }

    /// Normalize raw values into a verified config.
    pub fn verify(file: &ConfigFile) -> Result<Self> {
        let manual_seed = file
            .manual_seed
            .map(|seed| seed.rem_euclid(SEED_MODULUS) as u32);

        let (frag_width, frag_height) = if file.frag_resolution_overrides.apply {
            (
                even_at_least_2(file.frag_resolution_overrides.x_resolution),
                even_at_least_2(file.frag_resolution_overrides.y_resolution),
            )
        } else {
            let res = even_at_least_2(file.frag_resolution);
            (res, res)
        };

        let grid = GridSpec {
            x_count: at_least_2(file.x_frag_count) as usize,
            y_count: at_least_2(file.y_frag_count) as usize,
            frag_width,
            frag_height,
        };

        let frags_grid = file.frags_grid.save.then(|| {
            let overrides = &file.frags_grid.padding_color_overrides;
            let padding_color = if overrides.apply {
                [
                    channel(overrides.red),
                    channel(overrides.green),
                    channel(overrides.blue),
                ]
            } else {
                [channel(file.frags_grid.padding_brightness); 3]
            };

            FragsGridConfig {
                padding: non_negative(file.frags_grid.padding),
                padding_color,
            }
        });

        let gradient = if file.custom_gradient.enabled {
            Gradient::custom(
                &file.custom_gradient.coefficients,
                &file.custom_gradient.exponents,
            )?
        } else {
            Gradient::LinearUnity
        };

        Ok(Self {
            manual_seed,
            policy: RandomPolicy {
                random_frags: file.random_frags,
                avoid_duplicates: file.avoid_random_duplicates,
                random_flipping: file.random_flipping,
                random_rotating: file.random_rotating,
            },
            grid,
            save_frag_locations: file.save_frag_locations,
            frags_grid,
            gradient,
        })
    }
}

fn non_negative(value: i64) -> u32 {
    value.unsigned_abs().min(u32::MAX as u64) as u32
}

fn at_least_2(value: i64) -> u32 {
    non_negative(value).max(2)
}

fn even_at_least_2(value: i64) -> u32 {
    let value = at_least_2(value);
    if value % 2 == 0 {
        value
    } else {
        value.saturating_add(1) & !1
    }
}

fn channel(value: i64) -> u8 {
    non_negative(value).min(255) as u8
}
