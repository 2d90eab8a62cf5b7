//! config - SONiC configuration CLI with the exporter commands
//!
//! Usage: `config sonic_exporter {port <PORT> | vrf <VRF> | show}`

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use sonic_exporter_cfg::cli::{self, SonicExporterCommand};
use sonic_exporter_cfg::config::DEFAULT_DB_CONFIG_PATH;
use sonic_exporter_cfg::{
    load_database_config, DbConnectionConfig, ExporterCfgResult, RedisConfigDb,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// SONiC command line - 'config' command
#[derive(Parser, Debug)]
#[command(name = "config")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct HostArgs {
    /// SONiC database config locating CONFIG_DB
    #[arg(long, global = true, default_value = DEFAULT_DB_CONFIG_PATH)]
    db_config: PathBuf,

    /// Redis URL for CONFIG_DB, overrides the database config
    #[arg(long, global = true)]
    redis_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

fn build_cli() -> clap::Command {
    cli::register(HostArgs::command())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves the CONFIG_DB URL. An explicit `--redis-url` wins and the
/// database config is not read at all.
fn connection_target(args: &HostArgs) -> ExporterCfgResult<(String, DbConnectionConfig)> {
    match &args.redis_url {
        Some(url) => Ok((url.clone(), DbConnectionConfig::default())),
        None => {
            let config = load_database_config(&args.db_config)?;
            Ok((config.redis_url(), config))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut host = build_cli();
    let matches = host.clone().get_matches();
    let args = HostArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(args.verbose);

    let Some(command) = SonicExporterCommand::from_host_matches(&matches) else {
        host.print_help()?;
        return Ok(());
    };
    let command = command.unwrap_or_else(|e| e.exit());

    let (url, config) = connection_target(&args)?;
    let db = RedisConfigDb::connect_url(url, config)
        .await
        .context("Failed to connect to CONFIG_DB")?;
    debug!(?db, "Using CONFIG_DB");

    match cli::run(&db, &command).await {
        Ok(Some(config)) => println!("{}", cli::render_config(&config)),
        Ok(None) => {}
        Err(e) if e.is_validation() => cli::validation_error(&mut host, &command, &e).exit(),
        Err(e) => {
            return Err(e).with_context(|| format!("sonic_exporter {} failed", command.name()))
        }
    }

    Ok(())
}
