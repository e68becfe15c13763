//! CLI command definitions and execution
//!
//! Each subcommand maps onto one transfer operation (or the pure bech32
//! transform) and returns a non-zero exit code on any propagated error.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sigstash_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod bech32;
mod cat;
mod delete;
mod down;
mod mkdir;
mod up;

/// sigstash - signed-transaction artifact storage
///
/// Pushes and pulls signing artifacts to an S3-compatible bucket laid out
/// as `<chain>/<key>/<file>`.
#[derive(Parser, Debug)]
#[command(name = "sigstash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-encode a bech32 address under a different prefix
    Bech32(bech32::Bech32Args),

    /// Copy a local file to the bucket
    Up(up::UpArgs),

    /// Copy a file or directory from the bucket
    Down(down::DownArgs),

    /// Print all files under a chain/key, removing the local copies
    Cat(cat::CatArgs),

    /// Delete one object from the bucket
    Delete(delete::DeleteArgs),

    /// Create an empty directory marker in the bucket
    Mkdir(mkdir::MkdirArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };
    let config_path = cli.config;

    match cli.command {
        Commands::Bech32(args) => bech32::execute(args, output_config),
        Commands::Up(args) => up::execute(args, config_path.as_deref(), output_config).await,
        Commands::Down(args) => down::execute(args, config_path.as_deref(), output_config).await,
        Commands::Cat(args) => cat::execute(args, config_path.as_deref(), output_config).await,
        Commands::Delete(args) => {
            delete::execute(args, config_path.as_deref(), output_config).await
        }
        Commands::Mkdir(args) => mkdir::execute(args, config_path.as_deref(), output_config).await,
    }
}

/// Load the config and build an S3 client, reporting failures through the
/// formatter.
pub(crate) async fn client_from_config(
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<S3Client, ExitCode> {
    let config = match sigstash_core::config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load config: {e}"));
            return Err(ExitCode::from_error(&e));
        }
    };

    match S3Client::new(&config.storage).await {
        Ok(client) => Ok(client),
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}
