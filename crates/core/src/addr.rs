//! Bech32 address prefix conversion
//!
//! The same key has a different textual address on every chain; only the
//! human-readable prefix differs. This re-encodes an address under a new
//! prefix, leaving the data payload unchanged.

use bech32::{Bech32, Hrp};

use crate::error::{Error, Result};

/// Re-encode a bech32 address under `prefix`.
pub fn with_prefix(addr: &str, prefix: &str) -> Result<String> {
    let (_, payload) =
        bech32::decode(addr).map_err(|err| Error::InvalidAddress(format!("{addr}: {err}")))?;
    let hrp = Hrp::parse(prefix)
        .map_err(|err| Error::InvalidAddress(format!("bad prefix '{prefix}': {err}")))?;
    bech32::encode::<Bech32>(hrp, &payload).map_err(|err| Error::InvalidAddress(err.to_string()))
}
