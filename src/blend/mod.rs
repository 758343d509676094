//! Blending module.
//!
//! Computes the shared blend weights and composites fragment quadrants into
//! a floating point canvas.

mod canvas;
mod compositor;
mod fragment;
mod weights;

pub use canvas::{Canvas, CHANNELS};
pub use compositor::{blend_block, Compositor};
pub use fragment::{load_fragment, orient, quadrant};
pub use weights::{BlendMatrices, BlendMatrix, Corner};
