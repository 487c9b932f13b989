// SPDX-License-Identifier: CC0-1.0
//
//! Protocol parameters used by coin selection.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Quantity;

/// Default lovelace that must remain for a plain change output, one minimum UTXO unit.
pub const DEFAULT_MIN_CHANGE_COIN: u64 = 1_000_000;

// Pre-Babbage parameters are expressed per 8 byte word.
const WORD_SIZE: u64 = 8;

fn default_min_change_coin() -> u64 { DEFAULT_MIN_CHANGE_COIN }

/// Fee and output-size parameters of the ledger, refreshed by the caller every epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameters {
    /// Lovelace charged per byte of transaction (`a` in `a * size + b`).
    pub min_fee_coefficient: u64,
    /// Constant lovelace charged per transaction (`b` in `a * size + b`).
    pub min_fee_constant: u64,
    pub max_tx_size: u64,
    pub coins_per_utxo_byte: u64,
    /// Floor on the change left after selection, regardless of the ledger minimum.
    #[serde(default = "default_min_change_coin")]
    pub min_change_coin: u64,
}

impl ProtocolParameters {
    pub fn new(
        min_fee_coefficient: u64,
        min_fee_constant: u64,
        max_tx_size: u64,
        coins_per_utxo_byte: u64,
    ) -> Self {
        ProtocolParameters {
            min_fee_coefficient,
            min_fee_constant,
            max_tx_size,
            coins_per_utxo_byte,
            min_change_coin: DEFAULT_MIN_CHANGE_COIN,
        }
    }

    pub fn with_min_change_coin(mut self, min_change_coin: u64) -> Self {
        self.min_change_coin = min_change_coin;
        self
    }

    /// Fee of a transaction of maximum size.  An upper bound used to reserve coin during
    /// selection, not the fee of the final transaction.
    pub fn max_fee(&self) -> Quantity {
        Quantity::from(self.min_fee_coefficient) * self.max_tx_size + self.min_fee_constant
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tx_size == 0 {
            return Err(Error::InvalidParameters("max_tx_size is zero".to_string()));
        }
        if self.coins_per_utxo_byte == 0 {
            return Err(Error::InvalidParameters("coins_per_utxo_byte is zero".to_string()));
        }
        Ok(())
    }

    /// Reads the epoch parameters document served by block explorers, e.g.
    /// `GET /epochs/{epoch}/parameters`.
    pub fn from_json(json: &str) -> Result<Self> {
        let epoch: EpochParameters = serde_json::from_str(json)?;

        let coins_per_utxo_byte = match (epoch.coins_per_utxo_size, epoch.coins_per_utxo_word) {
            (Some(per_byte), _) => per_byte.parse()?,
            (None, Some(per_word)) => per_word.parse()? / WORD_SIZE,
            (None, None) => {
                return Err(Error::InvalidParameters(
                    "missing coins_per_utxo_size and coins_per_utxo_word".to_string(),
                ))
            }
        };

        let params = ProtocolParameters::new(
            epoch.min_fee_a,
            epoch.min_fee_b,
            epoch.max_tx_size,
            coins_per_utxo_byte,
        );
        params.validate()?;
        Ok(params)
    }
}

#[derive(Deserialize)]
struct EpochParameters {
    min_fee_a: u64,
    min_fee_b: u64,
    max_tx_size: u64,
    #[serde(default)]
    coins_per_utxo_size: Option<NumberOrString>,
    #[serde(default)]
    coins_per_utxo_word: Option<NumberOrString>,
}

// Explorers serialize lovelace amounts as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn parse(&self) -> Result<u64> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::String(s) => s.parse().map_err(|_| Error::InvalidQuantity(s.clone())),
        }
    }
}
