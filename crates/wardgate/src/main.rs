//! wardgate - zero-trust access policy control plane

use clap::Parser;
use color_eyre::eyre::Result;
use wardgate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(cmd) => cmd.run().await,
        Command::Policy(cmd) => cmd.run().await,
    }
}
