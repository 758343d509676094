//! Create command implementation.
//!
//! Scaffolds a blend project directory holding the default config.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{default_project_path, ConfigFile, CONFIG_FILENAME};
use crate::error::{BlendError, Result};
use crate::output::{display_path, Printer};

/// Create a blend project with the default config
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Directory to create
    pub path: PathBuf,
}

pub fn run(args: CreateArgs, printer: &Printer) -> Result<()> {
    create_project(&args.path)?;
    printer.success("Created", &format!("blend project at {}", display_path(&args.path)));
    Ok(())
}

/// Create `path` and write the default config into it.
///
/// Fails when anything already exists at `path`.
pub fn create_project(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(BlendError::Project {
            path: path.to_path_buf(),
            message: "Project already exists".to_string(),
            help: Some("Pick a new directory name".to_string()),
        });
    }
    if path.exists() {
        return Err(BlendError::Project {
            path: path.to_path_buf(),
            message: "Path exists but is not a directory".to_string(),
            help: None,
        });
    }

    fs::create_dir_all(path).map_err(|e| BlendError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create project directory: {}", e),
    })?;

    ConfigFile::load_from_project(&default_project_path())?.save(&path.join(CONFIG_FILENAME))
}
