// SPDX-License-Identifier: CC0-1.0
//
//! Preparation of payment outputs.
//!
//! Turns what a user asked to pay into [`OutputRequest`]s that a ledger would accept: every
//! output carries some lovelace, and outputs carrying native tokens carry at least the minimum
//! coin for their size.

use tracing::debug;

use crate::error::Result;
use crate::min_coin::MinimumCoin;
use crate::params::ProtocolParameters;
use crate::value::{AssetId, Quantity, Value};
use crate::OutputRequest;

/// Lovelace sent to a recipient that did not ask for any.
pub const DEFAULT_OUTPUT_COIN: u64 = 1_000_000;

/// A payment as requested by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub address: String,
    /// Lovelace to send, [`DEFAULT_OUTPUT_COIN`] when `None`.
    pub lovelace: Option<Quantity>,
    pub assets: Vec<(AssetId, Quantity)>,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Recipient { address: address.into(), lovelace: None, assets: Vec::new() }
    }

    pub fn with_lovelace(mut self, lovelace: impl Into<Quantity>) -> Self {
        self.lovelace = Some(lovelace.into());
        self
    }

    pub fn with_asset(mut self, asset: AssetId, quantity: impl Into<Quantity>) -> Self {
        self.assets.push((asset, quantity.into()));
        self
    }

    fn value(&self) -> Value {
        let coin = self.lovelace.clone().unwrap_or_else(|| Quantity::from(DEFAULT_OUTPUT_COIN));
        self.assets.iter().fold(Value::from_coin(coin), |v, (asset, quantity)| {
            v.with_asset(asset.clone(), quantity.clone())
        })
    }
}

/// Builds one output request per recipient.
///
/// Outputs holding native tokens get their coin raised to the minimum reported by `oracle`.
/// Outputs left with no lovelace at all are dropped.
pub fn prepare_outputs<M: MinimumCoin + ?Sized>(
    recipients: &[Recipient],
    params: &ProtocolParameters,
    oracle: &M,
) -> Result<Vec<OutputRequest>> {
    let mut outputs = Vec::with_capacity(recipients.len());
    for recipient in recipients {
        let mut value = recipient.value();

        if value.has_assets() {
            let minimum = oracle.minimum_coin(&value, params.coins_per_utxo_byte)?;
            if value.coin() < &minimum {
                debug!(
                    address = %recipient.address,
                    from = %value.coin(),
                    to = %minimum,
                    "raising output coin"
                );
                value.set_coin(minimum);
            }
        }

        if value.coin() == &Quantity::default() {
            debug!(address = %recipient.address, "dropping output without lovelace");
            continue;
        }
        outputs.push(OutputRequest::new(recipient.address.clone(), value));
    }
    Ok(outputs)
}
