//! cli subcommands for wardgate.
//!
//! - `wardgate serve` - run the control plane server
//! - `wardgate policy compile <connector-id>` - one-shot policy compile

mod policy;
mod serve;

pub use policy::PolicyCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand};

/// wardgate - zero-trust access policy control plane
#[derive(Parser, Debug)]
#[command(name = "wardgate")]
#[command(about = "Zero-trust access policy control plane", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// run the control plane server
    Serve(ServeCommand),

    /// manage compiled policy
    #[command(subcommand)]
    Policy(PolicyCommand),
}
