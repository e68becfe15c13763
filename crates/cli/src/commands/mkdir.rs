//! mkdir command - Create an empty directory marker in the bucket
//!
//! The bucket has no native directories; this writes a zero-byte marker
//! object at the given path, which must end with '/'.

use std::path::Path;

use clap::Args;
use serde::Serialize;
use sigstash_core::{RemotePath, Transfer};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create an empty directory marker in the bucket
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Remote directory path (must end with '/')
    pub dir: String,
}

#[derive(Debug, Serialize)]
struct MkdirOutput {
    status: &'static str,
    dir: String,
}

/// Execute the mkdir command
pub async fn execute(
    args: MkdirArgs,
    config_path: Option<&Path>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match super::client_from_config(config_path, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let dir = RemotePath::new(args.dir.as_str());

    match Transfer::new(&client).make_remote_directory(&dir).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&MkdirOutput {
                    status: "success",
                    dir: dir.to_string(),
                });
            } else {
                formatter.success(&format!("Created {dir}."));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to create {dir}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
