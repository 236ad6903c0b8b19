use anyhow::Result;
use clap::Parser;

use quotemap::cli::{Cli, Commands};
use quotemap::commands::{group, replay};
use quotemap::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Replay(args) => replay::run(&cli, args),
        Commands::Group(args) => group::run(&cli, args),
    }
}
