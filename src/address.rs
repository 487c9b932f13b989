// SPDX-License-Identifier: CC0-1.0
//
//! Address inspection.
//!
//! Classifies a textual address as Shelley (bech32) or Byron (base58 CBOR) and reports the
//! network it belongs to.

use std::fmt;

use bitcoin::{base58, bech32};
use ciborium::value::Value as Cbor;
use tracing::warn;

use crate::error::{Error, Result};

const SHELLEY_HRPS: [&str; 4] = ["addr", "addr_test", "stake", "stake_test"];

// Byron attribute key holding the protocol magic of non-mainnet networks.
const PROTOCOL_MAGIC_KEY: u64 = 2;
const MAINNET_PROTOCOL_MAGIC: u64 = 764_824_073;
const ENCODED_CBOR_TAG: u64 = 24;

/// Network ids carried by addresses.
pub const MAINNET_ID: u8 = 1;
pub const TESTNET_ID: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressEra {
    Shelley,
    Byron,
}

impl fmt::Display for AddressEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressEra::Shelley => f.write_str("Shelley"),
            AddressEra::Byron => f.write_str("Byron"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressInfo {
    pub era: AddressEra,
    pub network_id: u8,
}

/// Inspects `address`, trying Shelley first and Byron second.
pub fn inspect_address(address: &str) -> Result<AddressInfo> {
    if let Some(info) = inspect_shelley(address) {
        return Ok(info);
    }
    if let Some(info) = inspect_byron(address) {
        return Ok(info);
    }
    warn!(address, "unrecognized address");
    Err(Error::UnrecognizedAddress(address.to_string()))
}

fn inspect_shelley(address: &str) -> Option<AddressInfo> {
    let (hrp, data) = bech32::decode(address).ok()?;
    if !SHELLEY_HRPS.contains(&hrp.as_str()) {
        return None;
    }
    let header = data.first()?;
    Some(AddressInfo { era: AddressEra::Shelley, network_id: header & 0x0f })
}

// base58(cbor([tag 24(cbor([root, attributes, type])), crc32])), the crc is not checked
fn inspect_byron(address: &str) -> Option<AddressInfo> {
    let bytes = base58::decode(address).ok()?;
    let outer: Cbor = ciborium::de::from_reader(bytes.as_slice()).ok()?;

    let payload = match outer.as_array()?.as_slice() {
        [Cbor::Tag(ENCODED_CBOR_TAG, inner), Cbor::Integer(_)] => inner.as_bytes()?.clone(),
        _ => return None,
    };
    let payload: Cbor = ciborium::de::from_reader(payload.as_slice()).ok()?;
    let attributes = match payload.as_array()?.as_slice() {
        [Cbor::Bytes(_), Cbor::Map(attributes), Cbor::Integer(_)] => attributes.clone(),
        _ => return None,
    };

    let magic = attributes.iter().find_map(|(key, value)| {
        let key = u64::try_from(key.as_integer()?).ok()?;
        (key == PROTOCOL_MAGIC_KEY).then_some(value)
    });
    let network_id = match magic {
        None => MAINNET_ID,
        Some(encoded) => {
            let magic: Cbor = ciborium::de::from_reader(encoded.as_bytes()?.as_slice()).ok()?;
            match u64::try_from(magic.as_integer()?).ok()? {
                MAINNET_PROTOCOL_MAGIC => MAINNET_ID,
                _ => TESTNET_ID,
            }
        }
    };
    Some(AddressInfo { era: AddressEra::Byron, network_id })
}
