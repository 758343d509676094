//! Start command implementation.
//!
//! Confirms the session setup, then prepares and runs one blend, logging to
//! stdout and the project's `log.txt`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use clap::Args;

use crate::blender::{BlendOutputs, Blender};
use crate::config::CONFIG_FILENAME;
use crate::error::{BlendError, Result};
use crate::logging;
use crate::output::{display_path, Printer};

use super::prompt;

/// Blend a fragments directory with a project's config
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Directory of fragment images
    #[arg(long)]
    pub frags: PathBuf,

    /// Project directory holding blenders_config.json
    #[arg(long)]
    pub project: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,

    /// Seconds to wait for confirmation before continuing
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

pub fn run(args: StartArgs, verbose: u8, printer: &Printer) -> Result<()> {
    check_project(&args.project)?;

    printer.info("Project", &display_path(&args.project));
    printer.info("Fragments", &display_path(&args.frags));

    if !args.yes {
        let answer = prompt::confirm(
            "Please confirm the above session setup\nDo you want to continue?",
            Duration::from_secs(args.timeout),
        );
        if !answer.proceeds() {
            printer.warning("Aborted", "the session");
            return Ok(());
        }
    }

    let log_path = logging::log_path(&args.project);
    logging::init(verbose, Some(&log_path))?;
    printer.status("Logging", &format!("to {}", display_path(&log_path)));

    match run_session(&args.frags, &args.project) {
        Ok(outputs) => {
            printer.success("Blended", &display_path(&outputs.blended));
            if let Some(path) = &outputs.frags_grid {
                printer.success("Saved", &display_path(path));
            }
            if let Some(path) = &outputs.frag_locations {
                printer.success("Saved", &display_path(path));
            }
            printer.success("Completed", "the session");
            Ok(())
        }
        Err(e) => {
            printer.error("Stopped", "the session");
            Err(e)
        }
    }
}

/// Prepare and blend, bracketed by session header and footer log lines.
pub fn run_session(frags: &Path, project: &Path) -> Result<BlendOutputs> {
    let started = Local::now();
    tracing::info!("Blend session");
    tracing::info!("Project path: {}", project.display());
    tracing::info!("Frags path: {}", frags.display());

    let result = Blender::prepare(frags, project).and_then(Blender::blend);
    let elapsed = format_elapsed(Local::now() - started);

    match &result {
        Ok(_) => {
            tracing::info!("Execution time: {} (hours:minutes:seconds)", elapsed);
            tracing::info!("End of blend session");
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::info!("Execution stopped after: {} (hours:minutes:seconds)", elapsed);
            tracing::info!("End of blend session (stopped)");
        }
    }

    result
}

fn check_project(project: &Path) -> Result<()> {
    if !project.join(CONFIG_FILENAME).is_file() {
        return Err(BlendError::Project {
            path: project.to_path_buf(),
            message: format!("No {} found", CONFIG_FILENAME),
            help: Some("Create a project with `blend create <path>`".to_string()),
        });
    }
    Ok(())
}

/// Format a duration as `H:MM:SS.ffffff`.
pub fn format_elapsed(elapsed: chrono::Duration) -> String {
    let micros = elapsed.num_microseconds().unwrap_or(i64::MAX).max(0);
    let seconds = micros / 1_000_000;
    format!(
        "{}:{:02}:{:02}.{:06}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60,
        micros % 1_000_000
    )
}
