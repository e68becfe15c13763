//! cat command - Print all files under a chain/key
//!
//! Downloads everything under `<chain>/<key>/` into the current directory,
//! prints each file framed by a header, and removes the local copy after
//! printing. Remote objects are left untouched.

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use sigstash_core::Transfer;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Print all files under a chain/key
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Chain name
    pub chain: String,

    /// Key name
    pub key: String,
}

/// Execute the cat command
pub async fn execute(
    args: CatArgs,
    config_path: Option<&Path>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match super::client_from_config(config_path, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let workdir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            formatter.error(&format!("Failed to resolve working directory: {e}"));
            return ExitCode::GeneralError;
        }
    };

    // Content goes straight to stdout, bypassing the formatter, so binary
    // payloads survive untouched.
    let mut stdout = io::stdout().lock();

    match Transfer::new(&client)
        .dump_and_purge(&args.chain, &args.key, &workdir, &mut stdout)
        .await
    {
        Ok(()) => {
            let _ = stdout.flush();
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!(
                "Failed to cat {}/{}: {e}",
                args.chain, args.key
            ));
            ExitCode::from_error(&e)
        }
    }
}
