//! up command - Copy a local file to the bucket

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sigstash_core::{RemotePath, Transfer};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Copy a local file to the bucket
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Local file to upload
    pub local: PathBuf,

    /// Remote destination (chain/key/file)
    pub remote: String,
}

#[derive(Debug, Serialize)]
struct UpOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
}

/// Execute the up command
pub async fn execute(
    args: UpArgs,
    config_path: Option<&Path>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match super::client_from_config(config_path, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let remote = RemotePath::new(args.remote.as_str());

    match Transfer::new(&client).upload(&args.local, &remote).await {
        Ok(size) => {
            if formatter.is_json() {
                formatter.json(&UpOutput {
                    status: "success",
                    source: args.local.display().to_string(),
                    target: remote.to_string(),
                    size_bytes: size,
                });
            } else {
                formatter.println(&format!(
                    "{} -> {remote} ({})",
                    args.local.display(),
                    humansize::format_size(size, humansize::BINARY)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to upload {}: {e}", args.local.display()));
            ExitCode::from_error(&e)
        }
    }
}
