//! `sonic_exporter` command group
//!
//! The group is attached to a host CLI with [`register`]. Once the host has
//! parsed its arguments, [`SonicExporterCommand::from_host_matches`] picks
//! out the selected command and [`run`] executes it against CONFIG_DB.
//!
//! ```ignore
//! let cli = sonic_exporter_cfg::cli::register(clap::Command::new("config"));
//! let matches = cli.get_matches();
//! if let Some(command) = SonicExporterCommand::from_host_matches(&matches) {
//!     cli::run(&db, &command?).await?;
//! }
//! ```

use clap::error::ErrorKind;
use clap::{ArgMatches, Command, FromArgMatches, Subcommand};

use crate::commands;
use crate::db::ConfigDb;
use crate::error::{ExporterCfgError, ExporterCfgResult};
use crate::types::ExporterConfig;

/// Name of the command group on the host CLI
pub const GROUP_NAME: &str = "sonic_exporter";

/// Commands of the `sonic_exporter` group
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SonicExporterCommand {
    /// Set the port that the exporter is listening to.
    Port {
        #[arg(allow_negative_numbers = true)]
        port: i64,
    },

    /// Set the VRF that the exporter is listening inside.
    ///
    /// If VRF is set to 'none' the default VRF is used.
    Vrf { vrf: String },

    /// Show the exporter configuration.
    Show,
}

impl SonicExporterCommand {
    /// Subcommand name as typed by the operator
    pub fn name(&self) -> &'static str {
        match self {
            SonicExporterCommand::Port { .. } => "port",
            SonicExporterCommand::Vrf { .. } => "vrf",
            SonicExporterCommand::Show => "show",
        }
    }

    /// Extracts the selected command from the host's matches.
    ///
    /// Returns `None` when the host matched some other group.
    pub fn from_host_matches(matches: &ArgMatches) -> Option<clap::error::Result<Self>> {
        match matches.subcommand() {
            Some((GROUP_NAME, group)) => Some(Self::from_arg_matches(group)),
            _ => None,
        }
    }
}

/// Builds the `sonic_exporter` command group.
pub fn command() -> Command {
    let group = Command::new(GROUP_NAME)
        .about("Configure Prometheus exporter for SONiC")
        .subcommand_required(true)
        .arg_required_else_help(true);
    SonicExporterCommand::augment_subcommands(group)
}

/// Attaches the `sonic_exporter` group to a host CLI.
pub fn register(cli: Command) -> Command {
    cli.subcommand(command())
}

/// Executes a command, returning the configuration for `show`.
pub async fn run<D>(
    db: &D,
    command: &SonicExporterCommand,
) -> ExporterCfgResult<Option<ExporterConfig>>
where
    D: ConfigDb + ?Sized,
{
    match command {
        SonicExporterCommand::Port { port } => commands::set_port(db, *port).await.map(|_| None),
        SonicExporterCommand::Vrf { vrf } => commands::set_vrf(db, vrf).await.map(|_| None),
        SonicExporterCommand::Show => commands::show_config(db).await.map(Some),
    }
}

/// Renders the output of `show`
pub fn render_config(config: &ExporterConfig) -> String {
    format!("port: {}\nvrf: {}", config.port, config.vrf)
}

/// Reports a rejected command the way the host reports usage errors,
/// with the command's usage line attached.
pub fn validation_error(
    host: &mut Command,
    command: &SonicExporterCommand,
    err: &ExporterCfgError,
) -> clap::Error {
    host.build();
    let target = host
        .find_subcommand_mut(GROUP_NAME)
        .and_then(|group| group.find_subcommand_mut(command.name()));
    match target {
        Some(cmd) => cmd.error(ErrorKind::ValueValidation, err.to_string()),
        None => host.error(ErrorKind::ValueValidation, err.to_string()),
    }
}
