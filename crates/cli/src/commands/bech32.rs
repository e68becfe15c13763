//! bech32 command - Re-encode an address under a different prefix

use clap::Args;
use sigstash_core::addr;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Re-encode a bech32 address under a different prefix
#[derive(Args, Debug)]
pub struct Bech32Args {
    /// Address to re-encode
    pub address: String,

    /// New bech32 prefix
    pub prefix: String,
}

/// Execute the bech32 command
pub fn execute(args: Bech32Args, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match addr::with_prefix(&args.address, &args.prefix) {
        Ok(address) => {
            if formatter.is_json() {
                formatter.json(&serde_json::json!({ "address": address }));
            } else {
                formatter.println(&address);
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}
