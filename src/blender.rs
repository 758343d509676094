//! Blend orchestration.
//!
//! [`Blender::prepare`] reads the project config, finds the fragments, plans
//! the grid and allocates the canvas. [`Blender::blend`] composites the canvas
//! and saves every requested output. Any failure aborts the run.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::blend::{BlendMatrices, Canvas, Compositor, Corner};
use crate::config::{BlendConfig, ConfigFile, CONFIG_FILENAME, SEED_MODULUS};
use crate::error::Result;
use crate::fragments::FragmentSet;
use crate::plan::Plan;
use crate::render::{
    frag_locations_text, render_frags_grid, write_frag_locations, write_jpeg, OutputNames,
    JPEG_QUALITY,
};

/// Where the run's seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    Manual,
    Auto,
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedMode::Manual => f.write_str("Manual"),
            SeedMode::Auto => f.write_str("Auto"),
        }
    }
}

/// Pick the run seed: the configured one, or a fresh draw in
/// `[0, SEED_MODULUS]`.
pub fn resolve_seed(manual_seed: Option<u32>) -> (SeedMode, u32) {
    match manual_seed {
        Some(seed) => (SeedMode::Manual, seed),
        None => (
            SeedMode::Auto,
            rand::thread_rng().gen_range(0..=SEED_MODULUS as u32),
        ),
    }
}

/// Files written by one blend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendOutputs {
    pub blended: PathBuf,
    pub frags_grid: Option<PathBuf>,
    pub frag_locations: Option<PathBuf>,
}

/// A prepared blend, ready to composite.
pub struct Blender {
    project: PathBuf,
    config: BlendConfig,
    seed_mode: SeedMode,
    seed: u32,
    fragments: FragmentSet,
    plan: Plan,
    matrices: BlendMatrices,
    canvas: Canvas,
}

impl Blender {
    /// Prepare a blend from the config in `project`.
    pub fn prepare(frags: &Path, project: &Path) -> Result<Self> {
        let location = project.join(CONFIG_FILENAME);
        tracing::info!("Blenders config location: {}", location.display());
        let file = ConfigFile::load(&location)?;
        log_raw_config(&file);

        let config = BlendConfig::verify(&file)?;
        let fragments = FragmentSet::discover(frags)?;
        Self::with_config(config, fragments, project)
    }

    /// Prepare a blend from an already verified config and fragment set.
    pub fn with_config(config: BlendConfig, fragments: FragmentSet, project: &Path) -> Result<Self> {
        let (seed_mode, seed) = resolve_seed(config.manual_seed);
        log_config(&config, seed_mode, seed);

        tracing::info!("Fragments path: {}", fragments.root().display());
        tracing::info!("Fragments name: {}", fragments.name());
        tracing::info!("Fragment count: {}", fragments.len());

        let grid = config.grid;
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let plan = Plan::build(
            grid.x_count,
            grid.y_count,
            fragments.len(),
            &config.policy,
            &mut rng,
        );
        tracing::debug!("Index matrix: {:?}", plan.indices);
        tracing::debug!("Flip matrix: {:?}", plan.flips);
        tracing::debug!("Rotation matrix: {:?}", plan.rotations);

        let matrices = BlendMatrices::new(grid.block_width(), grid.block_height(), &config.gradient);
        tracing::info!(
            "Blend matrices:  Width: {}  Height: {}",
            matrices.width(),
            matrices.height()
        );
        for corner in Corner::ALL {
            tracing::debug!("Blend matrix {:?}: {:?}", corner, matrices.corner(corner).weights());
        }

        let (width, height) = grid.canvas_size();
        let canvas = Canvas::new(width, height);
        tracing::info!("Prepared the canvas:  Width: {}  Height: {}", width, height);

        Ok(Self {
            project: project.to_path_buf(),
            config,
            seed_mode,
            seed,
            fragments,
            plan,
            matrices,
            canvas,
        })
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    pub fn seed(&self) -> (SeedMode, u32) {
        (self.seed_mode, self.seed)
    }

    pub fn fragments(&self) -> &FragmentSet {
        &self.fragments
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Composite and save, naming outputs with the current time.
    pub fn blend(self) -> Result<BlendOutputs> {
        let names = OutputNames::now(self.fragments.name());
        self.blend_as(&names)
    }

    /// Composite and save under the given names.
    pub fn blend_as(mut self, names: &OutputNames) -> Result<BlendOutputs> {
        Compositor::new(self.config.grid, &self.plan, &self.fragments, &self.matrices)
            .composite(&mut self.canvas)?;

        let blended = self.project.join(names.blended());
        write_jpeg(&self.canvas.to_image(), &blended, JPEG_QUALITY)?;
        tracing::info!("Saved blended blocks at: {}", blended.display());

        let frags_grid = match &self.config.frags_grid {
            Some(grid_config) => {
                let preview =
                    render_frags_grid(&self.config.grid, &self.plan, &self.fragments, grid_config)?;
                let path = self.project.join(names.frags_grid());
                write_jpeg(&preview, &path, JPEG_QUALITY)?;
                tracing::info!("Saved fragments grid at: {}", path.display());
                Some(path)
            }
            None => None,
        };

        let frag_locations = if self.config.save_frag_locations {
            let text = frag_locations_text(&self.plan, &self.fragments);
            let path = self.project.join(names.frag_locations());
            write_frag_locations(&text, &path)?;
            tracing::info!("Saved fragment locations at {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(BlendOutputs {
            blended,
            frags_grid,
            frag_locations,
        })
    }
}

/// Values as read, before normalization.
fn log_raw_config(file: &ConfigFile) {
    tracing::debug!("manual_seed: {:?}", file.manual_seed);
    tracing::debug!("random_frags: {}", file.random_frags);
    tracing::debug!("avoid_random_duplicates: {}", file.avoid_random_duplicates);
    tracing::debug!("random_flipping: {}", file.random_flipping);
    tracing::debug!("random_rotating: {}", file.random_rotating);
    tracing::debug!("frag_resolution: {}", file.frag_resolution);
    tracing::debug!("frag_resolution_overrides: {:?}", file.frag_resolution_overrides);
    tracing::debug!("x_frag_count: {}", file.x_frag_count);
    tracing::debug!("y_frag_count: {}", file.y_frag_count);
    tracing::debug!("save_frag_locations: {}", file.save_frag_locations);
    tracing::debug!("frags_grid: {:?}", file.frags_grid);
    tracing::debug!("custom_gradient: {:?}", file.custom_gradient);
}

fn log_config(config: &BlendConfig, seed_mode: SeedMode, seed: u32) {
    let grid = &config.grid;
    let policy = &config.policy;

    tracing::info!("Random:  Mode: {}  Seed: {}", seed_mode, seed);
    tracing::info!("Random fragments: {}", policy.random_frags);
    tracing::info!("Avoid random fragment duplicates: {}", policy.avoid_duplicates);
    tracing::info!("Random flipping: {}", policy.random_flipping);
    tracing::info!("Random rotating: {}", policy.random_rotating);
    tracing::info!(
        "Fragment:  Width: {}  Height: {}",
        grid.frag_width,
        grid.frag_height
    );
    tracing::info!(
        "Fragment count:  X: {}  Y: {}  Total: {}",
        grid.x_count,
        grid.y_count,
        grid.cell_count()
    );
    tracing::info!("Save fragment locations: {}", config.save_frag_locations);
    tracing::info!("Save fragments grid: {}", config.frags_grid.is_some());
    if let Some(frags_grid) = &config.frags_grid {
        tracing::info!(
            "Fragments grid:  Padding: {}  Padding color: {:?}",
            frags_grid.padding,
            frags_grid.padding_color
        );
    }
    tracing::info!("Prepared gradient function: {}", config.gradient.name());
    tracing::info!("Gradient function: \" {} \"", config.gradient);
}
