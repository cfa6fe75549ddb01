//! the `policy` subcommand - one-shot policy operations

use std::path::PathBuf;

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result};
use wardgate_db::WardgateDb;
use wardgate_policy::PolicyCompiler;
use wardgate_types::{Config, ConnectorId};

use super::serve::{init_logging, load_config_file, parse_database_url};

/// manage compiled policy
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// compile a connector's policy and print the snapshot
    Compile(CompileArgs),
}

/// compile a connector's policy and print the snapshot
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// connector id to compile for
    connector_id: String,

    /// path to config file (toml format)
    #[arg(short, long, env = "WARDGATE_CONFIG")]
    config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "WARDGATE_DATABASE_URL")]
    database_url: Option<String>,

    /// log level
    #[arg(long, env = "WARDGATE_LOG_LEVEL")]
    log_level: Option<String>,
}

impl PolicyCommand {
    /// run the policy command
    pub async fn run(self) -> Result<()> {
        match self {
            PolicyCommand::Compile(args) => compile(args).await,
        }
    }
}

async fn compile(args: CompileArgs) -> Result<()> {
    init_logging(args.log_level.as_deref().or(Some("warn")))?;

    let mut config = load_config_file(args.config.as_ref())?.unwrap_or_else(Config::default);
    if let Some(db_url) = args.database_url {
        config.database = parse_database_url(&db_url)?;
    }

    let db = WardgateDb::new(&config)
        .await
        .context("failed to open database")?;
    db.migrate()
        .await
        .context("failed to run database migrations")?;

    let compiler = PolicyCompiler::new(db);
    let snapshot = compiler
        .compile(&ConnectorId(args.connector_id))
        .await
        .context("compile failed")?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
