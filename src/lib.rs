//! fragblend - Seamless fragment mosaics
//!
//! A library for arranging fragment images on a grid and blending the seams
//! between neighbours into one continuous image.

pub mod blend;
pub mod blender;
pub mod cli;
pub mod config;
pub mod error;
pub mod fragments;
pub mod gradient;
pub mod logging;
pub mod output;
pub mod plan;
pub mod progress;
pub mod render;

pub use blend::{blend_block, BlendMatrices, BlendMatrix, Canvas, Compositor, Corner};
pub use blender::{resolve_seed, BlendOutputs, Blender, SeedMode};
pub use config::{BlendConfig, ConfigFile, FragsGridConfig, GridSpec, RandomPolicy};
pub use error::{BlendError, Result};
pub use fragments::FragmentSet;
pub use gradient::{Gradient, Polynomial};
pub use plan::{Flip, Grid, Plan, Rotation};
pub use render::{
    frag_locations_text, render_frags_grid, write_frag_locations, write_jpeg, OutputNames,
    JPEG_QUALITY,
};
