//! Output assembly.
//!
//! Turns the finished canvas, the plan and the fragment set into the files
//! saved in the project directory.

mod frags_grid;
mod jpeg;
mod locations;

use chrono::{DateTime, Local};

pub use frags_grid::{cell_origin, frags_grid_size, render_frags_grid};
pub use jpeg::{write_jpeg, JPEG_QUALITY};
pub use locations::{frag_locations_text, write_frag_locations};

/// Timestamp layout embedded in output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%6f";

/// File names for one run's outputs.
///
/// All outputs of a run share one timestamp so they sort together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    frags_name: String,
    timestamp: String,
}

impl OutputNames {
    /// Names stamped with the current local time.
    pub fn now(frags_name: &str) -> Self {
        Self::at(frags_name, Local::now())
    }

    pub fn at(frags_name: &str, time: DateTime<Local>) -> Self {
        Self {
            frags_name: frags_name.to_string(),
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn blended(&self) -> String {
        format!("Blended-From-{}-Time-{}.jpg", self.frags_name, self.timestamp)
    }

    pub fn frags_grid(&self) -> String {
        format!("Frags-From-{}-Time-{}.jpg", self.frags_name, self.timestamp)
    }

    pub fn frag_locations(&self) -> String {
        format!(
            "Frag-Locations-From-{}-Time-{}.txt",
            self.frags_name, self.timestamp
        )
    }
}
