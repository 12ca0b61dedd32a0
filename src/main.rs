use anyhow::Result;
use clap::Parser;

use watermap::cli::{Cli, Commands};
use watermap::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(filter).parse_default_env().init();

    match &cli.command {
        Commands::Render(args) => commands::render(args),
        Commands::Detail(args) => commands::detail(args),
    }
}
