// SPDX-License-Identifier: CC0-1.0
//
//! Bridging value from Cardano to the EVM sidechain.
//!
//! A bridge transfer is an ordinary payment to the bridge's script address, tagged with
//! transaction metadata naming the sidechain and the EVM recipient.

use std::collections::BTreeMap;
use std::fmt;

use crate::address::{MAINNET_ID, TESTNET_ID};
use crate::error::{Error, Result};
use crate::outputs::Recipient;
use crate::value::{AssetClass, Quantity};

/// Metadata label carrying the sidechain tag.
pub const CHAIN_TAG_LABEL: u64 = 87;
/// Metadata label carrying the EVM recipient.
pub const EVM_ADDRESS_LABEL: u64 = 88;

/// Fee charged on the sidechain for an incoming transfer, in wei of the wrapped base currency.
pub const SIDECHAIN_FEE: &str = "100000000000000000";
/// Fee charged on the sidechain to send value back to Cardano.
pub const RETURN_FEE: &str = "1000000000000000000";
/// Decimals of the sidechain's wrapped base currency.
pub const SIDECHAIN_DECIMALS: u8 = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_id(network_id: u8) -> Result<Network> {
        match network_id {
            MAINNET_ID => Ok(Network::Mainnet),
            TESTNET_ID => Ok(Network::Testnet),
            id => Err(Error::InvalidParameters(format!("unknown network id {}", id))),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_ID,
            Network::Testnet => TESTNET_ID,
        }
    }

    /// Bridge route from this network to its sidechain.
    pub fn bridge(self) -> BridgeDestination {
        match self {
            Network::Mainnet => BridgeDestination {
                address: "addr1w8pydstdswmdqmg2rdt59dzql3zgfp9pt8sulnjgalycwdsj9js7w",
                chain_tag: "mainnet.cardano-evm.c1",
                return_address: "0xD0Fab4aE1ff28825aabD2A16566f89EB8948F9aB",
            },
            Network::Testnet => BridgeDestination {
                address: "addr_test1wz6lvjg3anml96vl22mls5vae3x2cgaqwy2ewp5gj3fcxdcw652wz",
                chain_tag: "devnet.cardano-evm.c1",
                return_address: "0x319f10d19e21188ecF58b9a146Ab0b2bfC894648",
            },
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeDestination {
    /// Cardano script address receiving bridged value.
    pub address: &'static str,
    pub chain_tag: &'static str,
    /// Sidechain contract receiving value sent back to Cardano.
    pub return_address: &'static str,
}

/// Transaction metadata routing a transfer to `evm_address` on the sidechain.
pub fn bridge_metadata(network: Network, evm_address: &str) -> BTreeMap<u64, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert(CHAIN_TAG_LABEL, network.bridge().chain_tag.to_string());
    metadata.insert(EVM_ADDRESS_LABEL, evm_address.to_string());
    metadata
}

/// Payment of `quantity` of `class` to the bridge.  Lovelace goes in the coin; a token is sent
/// with the default coin, topped up when the outputs are prepared.
pub fn bridge_request(class: &AssetClass, quantity: Quantity, network: Network) -> Recipient {
    let recipient = Recipient::new(network.bridge().address);
    match class {
        AssetClass::Lovelace => recipient.with_lovelace(quantity),
        AssetClass::Native(asset) => recipient.with_asset(asset.clone(), quantity),
    }
}
