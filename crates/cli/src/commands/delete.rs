//! delete command - Delete one object from the bucket
//!
//! Deleting an object that does not exist is not an error.

use std::path::Path;

use clap::Args;
use serde::Serialize;
use sigstash_core::{RemotePath, Transfer};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete one object from the bucket
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Remote path of the object to delete
    pub path: String,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    status: &'static str,
    path: String,
}

/// Execute the delete command
pub async fn execute(
    args: DeleteArgs,
    config_path: Option<&Path>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match super::client_from_config(config_path, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let path = RemotePath::new(args.path.as_str());

    match Transfer::new(&client).delete_remote(&path).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&DeleteOutput {
                    status: "success",
                    path: path.to_string(),
                });
            } else {
                formatter.success(&format!("Removed {path}."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to delete {path}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
