use clap::Parser;
use fragblend::cli::{Cli, Commands};
use fragblend::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Create(args) => fragblend::cli::create::run(args, &printer)?,
        Commands::Start(args) => fragblend::cli::start::run(args, cli.verbose, &printer)?,
        Commands::Completions(args) => fragblend::cli::completions::run(args)?,
    }

    Ok(())
}
