// SPDX-License-Identifier: CC0-1.0
//
//! # cardano-coin-selection
//! Helper functions to select a set of UTXOs carrying lovelace and native tokens from a given
//! UTXO pool to fund a set of outputs, leaving enough behind for a valid change output.
//!

pub mod address;
pub mod bridge;
pub mod confirmation;
pub mod error;
pub mod min_coin;
pub mod outputs;
pub mod params;
pub mod ranking;
pub mod selection;
pub mod value;

use std::fmt;
use std::str::FromStr;

pub use crate::address::{inspect_address, AddressEra, AddressInfo};
pub use crate::bridge::{bridge_metadata, bridge_request, BridgeDestination, Network};
pub use crate::confirmation::{
    wait_for_block_hash, wait_for_bridge_tx, wait_for_confirmations, BlockchainProvider,
    BridgeProvider, PollPolicy,
};
pub use crate::error::{Error, Result};
pub use crate::min_coin::{minimum_coin_for_output, LedgerMinimumCoin, MinimumCoin};
pub use crate::outputs::{prepare_outputs, Recipient};
pub use crate::params::ProtocolParameters;
pub use crate::ranking::{
    sort_by_asset_descending, sort_by_class_descending, sort_by_coin_descending,
};
pub use crate::selection::{CoinSelection, PossibleMax, SelectionResult, DEFAULT_INPUT_LIMIT};
pub use crate::value::{
    compare_coin, compare_multiasset, AssetClass, AssetId, AssetName, MultiAsset, PolicyId,
    Quantity, Value,
};

/// Anything that can be spent and carries a [`Value`].
pub trait Utxo: Clone {
    fn amount(&self) -> &Value;
}

/// Location of an output on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputReference {
    pub tx_hash: [u8; 32],
    pub output_index: u32,
}

impl fmt::Display for OutputReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", hex::encode(self.tx_hash), self.output_index)
    }
}

/// Parses `<tx hash hex>#<output index>`.
impl FromStr for OutputReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Serialization(format!("invalid output reference: {}", s));
        let (hash, index) = s.split_once('#').ok_or_else(invalid)?;
        let hash = hex::decode(hash).map_err(|_| invalid())?;
        Ok(OutputReference {
            tx_hash: hash.try_into().map_err(|_| invalid())?,
            output_index: index.parse().map_err(|_| invalid())?,
        })
    }
}

/// An unspent output as reported by the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnspentOutput {
    pub reference: OutputReference,
    pub address: String,
    pub amount: Value,
}

impl Utxo for UnspentOutput {
    fn amount(&self) -> &Value { &self.amount }
}

/// Funding requested for one transaction output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRequest {
    pub address: String,
    pub amount: Option<Value>,
}

impl OutputRequest {
    pub fn new(address: impl Into<String>, amount: Value) -> Self {
        OutputRequest { address: address.into(), amount: Some(amount) }
    }
}

/// Order in which candidates are considered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Take candidates in the order given.  The coin pass walks them in reverse.
    BruteForce,
    /// Rank candidates by the quantity being funded, largest first.
    #[default]
    BiggerFirst,
}
