//! down command - Copy a file or directory from the bucket
//!
//! A remote path ending in '/' fetches everything under the prefix into a
//! newly created local directory; anything else fetches one object.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sigstash_core::{RemotePath, Transfer};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Copy a file or directory from the bucket
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Remote source (chain/key/file, or a prefix ending in '/')
    pub remote: String,

    /// Local destination file or directory
    pub local: PathBuf,
}

#[derive(Debug, Serialize)]
struct DownOutput {
    status: &'static str,
    source: String,
    target: String,
    files: usize,
}

/// Execute the down command
pub async fn execute(
    args: DownArgs,
    config_path: Option<&Path>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match super::client_from_config(config_path, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let remote = RemotePath::new(args.remote.as_str());

    match Transfer::new(&client).download(&remote, &args.local).await {
        Ok(artifacts) => {
            if formatter.is_json() {
                formatter.json(&DownOutput {
                    status: "success",
                    source: remote.to_string(),
                    target: args.local.display().to_string(),
                    files: artifacts.len(),
                });
            } else if remote.is_directory() {
                formatter.success(&format!(
                    "Downloaded {} file(s) into {}.",
                    artifacts.len(),
                    args.local.display()
                ));
            } else {
                formatter.println(&format!("{remote} -> {}", args.local.display()));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to download {remote}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
