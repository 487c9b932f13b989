// SPDX-License-Identifier: CC0-1.0
//
//! Minimum coin per output.
//!
//! Every output must carry a minimum amount of lovelace that grows with the serialized size of
//! the output.  Selection asks a [`MinimumCoin`] oracle for this figure whenever the composition
//! of the change output changes.  [`LedgerMinimumCoin`] implements the post-Babbage rule
//! `(160 + |serialized output|) * coins_per_utxo_byte`.

use ciborium::value::Value as Cbor;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::value::{Quantity, Value};

/// Constant overhead, in bytes, charged per output on top of its serialized size.
pub const OUTPUT_OVERHEAD_BYTES: u64 = 160;

/// Serialized length of a base address (header, payment and stake credential).
pub const BASE_ADDRESS_LEN: usize = 57;

// CBOR tag for a positive bignum.
const POSITIVE_BIGNUM_TAG: u64 = 2;

// The coin's encoded width can only step up a handful of times.
const MAX_ROUNDS: usize = 8;

/// Source of the minimum lovelace an output carrying a given value must hold.
pub trait MinimumCoin {
    fn minimum_coin(&self, value: &Value, coins_per_utxo_byte: u64) -> Result<Quantity>;
}

/// Computes the minimum from the CBOR size of an output paying `value` to an address of
/// `address_len` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerMinimumCoin {
    address_len: usize,
}

impl LedgerMinimumCoin {
    pub fn new(address_len: usize) -> Self { LedgerMinimumCoin { address_len } }

    /// Size in bytes of the encoded output `[address, value]`.
    pub fn output_size(&self, value: &Value) -> Result<usize> {
        let output = Cbor::Array(vec![Cbor::Bytes(vec![0; self.address_len]), encode_value(value)]);
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&output, &mut buf)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(buf.len())
    }

    fn required_for(&self, value: &Value, coins_per_utxo_byte: u64) -> Result<Quantity> {
        let size = self.output_size(value)? as u64;
        Ok(Quantity::from(OUTPUT_OVERHEAD_BYTES + size) * coins_per_utxo_byte)
    }
}

impl Default for LedgerMinimumCoin {
    fn default() -> Self { LedgerMinimumCoin::new(BASE_ADDRESS_LEN) }
}

impl MinimumCoin for LedgerMinimumCoin {
    fn minimum_coin(&self, value: &Value, coins_per_utxo_byte: u64) -> Result<Quantity> {
        // The coin is part of the output, so a larger coin may need a wider encoding.
        let mut candidate = value.clone();
        let mut required = self.required_for(&candidate, coins_per_utxo_byte)?;
        for _ in 0..MAX_ROUNDS {
            if &required <= candidate.coin() {
                break;
            }
            candidate.set_coin(required.clone());
            required = self.required_for(&candidate, coins_per_utxo_byte)?;
        }
        Ok(required)
    }
}

/// Minimum lovelace for an output of `value` sent to a base address.
pub fn minimum_coin_for_output(value: &Value, coins_per_utxo_byte: u64) -> Result<Quantity> {
    LedgerMinimumCoin::default().minimum_coin(value, coins_per_utxo_byte)
}

fn encode_quantity(quantity: &Quantity) -> Cbor {
    match quantity.to_u64() {
        Some(q) => Cbor::Integer(q.into()),
        None => Cbor::Tag(POSITIVE_BIGNUM_TAG, Box::new(Cbor::Bytes(quantity.to_bytes_be()))),
    }
}

// `coin` or `[coin, {policy: {name: quantity}}]`
fn encode_value(value: &Value) -> Cbor {
    let coin = encode_quantity(value.coin());
    if !value.has_assets() {
        return coin;
    }

    let policies = value
        .multiasset()
        .policies()
        .map(|(policy, assets)| {
            let assets = assets
                .iter()
                .map(|(name, quantity)| {
                    (Cbor::Bytes(name.as_bytes().to_vec()), encode_quantity(quantity))
                })
                .collect();
            (Cbor::Bytes(policy.as_bytes().to_vec()), Cbor::Map(assets))
        })
        .collect();
    Cbor::Array(vec![coin, Cbor::Map(policies)])
}
