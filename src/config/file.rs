//! Project config file (`blenders_config.json`) parsing.
//!
//! Mirrors the JSON layout one to one. Values here are unverified; see
//! [`BlendConfig::verify`](super::BlendConfig::verify) for normalization.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BlendError, Result};

/// The config file name inside a project directory.
pub const CONFIG_FILENAME: &str = "blenders_config.json";

/// Raw blenders config as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub manual_seed: Option<i64>,

    pub random_frags: bool,

    #[serde(default)]
    pub avoid_random_duplicates: bool,

    pub random_flipping: bool,

    #[serde(default)]
    pub random_rotating: bool,

    pub frag_resolution: i64,

    #[serde(default)]
    pub frag_resolution_overrides: ResolutionOverrides,

    pub x_frag_count: i64,

    pub y_frag_count: i64,

    #[serde(default)]
    pub save_frag_locations: bool,

    #[serde(default)]
    pub frags_grid: FragsGridSection,

    #[serde(default)]
    pub custom_gradient: CustomGradientSection,
}

/// `frag_resolution_overrides` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOverrides {
    pub apply: bool,
    pub x_resolution: i64,
    pub y_resolution: i64,
}

impl Default for ResolutionOverrides {
    fn default() -> Self {
        Self {
            apply: false,
            x_resolution: 64,
            y_resolution: 64,
        }
    }
}

/// `frags_grid` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragsGridSection {
    pub save: bool,

    #[serde(default = "default_padding")]
    pub padding: i64,

    #[serde(default = "default_padding_brightness")]
    pub padding_brightness: i64,

    #[serde(default)]
    pub padding_color_overrides: ColorOverrides,
}

fn default_padding() -> i64 {
    2
}

fn default_padding_brightness() -> i64 {
    16
}

impl Default for FragsGridSection {
    fn default() -> Self {
        Self {
            save: false,
            padding: default_padding(),
            padding_brightness: default_padding_brightness(),
            padding_color_overrides: ColorOverrides::default(),
        }
    }
}

/// `frags_grid.padding_color_overrides` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorOverrides {
    pub apply: bool,
    #[serde(default)]
    pub red: i64,
    #[serde(default)]
    pub green: i64,
    #[serde(default)]
    pub blue: i64,
}

/// `custom_gradient` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGradientSection {
    pub enabled: bool,
    #[serde(default)]
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub exponents: Vec<f64>,
}

impl Default for CustomGradientSection {
    fn default() -> Self {
        Self {
            enabled: false,
            coefficients: vec![1.0],
            exponents: vec![1.0],
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            manual_seed: None,
            random_frags: true,
            avoid_random_duplicates: true,
            random_flipping: true,
            random_rotating: true,
            frag_resolution: 64,
            frag_resolution_overrides: ResolutionOverrides::default(),
            x_frag_count: 40,
            y_frag_count: 24,
            save_frag_locations: true,
            frags_grid: FragsGridSection {
                save: true,
                ..FragsGridSection::default()
            },
            custom_gradient: CustomGradientSection::default(),
        }
    }
}

impl ConfigFile {
    /// Load the config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BlendError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `blenders_config.json` from a project directory.
    pub fn load_from_project(project: &Path) -> Result<Self> {
        Self::load(&project.join(CONFIG_FILENAME))
    }

    /// Parse the config from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| BlendError::Config {
            message: format!("Invalid blenders config: {}", e),
            help: Some(format!("Check {} syntax and required keys", CONFIG_FILENAME)),
        })
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BlendError::Config {
            message: format!("Failed to serialize blenders config: {}", e),
            help: None,
        })
    }

    /// Save the config to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json + "\n").map_err(|e| BlendError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write config: {}", e),
        })
    }
}
