pub mod completions;
pub mod create;
pub mod prompt;
pub mod start;

use clap::{Parser, Subcommand};

/// blend - Blend image fragments into seamless mosaics
#[derive(Parser, Debug)]
#[command(name = "blend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Raise log detail (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a blend project with the default config
    Create(create::CreateArgs),

    /// Blend a fragments directory with a project's config
    Start(start::StartArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
