// SPDX-License-Identifier: CC0-1.0
//
//! Multi-asset coin selection.
//!
//! This module introduces a largest-first selection over UTXOs carrying native tokens.  The
//! requested value (outputs plus a fee reserve) is split into one target per native token and a
//! final lovelace target.  Each token target is funded first, greedily, from the candidates that
//! hold the token; the lovelace target is funded last so that whatever lovelace the token passes
//! already pulled in counts toward it.  Finally the change is topped up until it can stand as an
//! output of its own.
//!
//! Given a target of `3 ada + 5 X` and candidates `[1 ada + 10 X, 3 ada]`:
//!
//! * the `X` pass takes `1 ada + 10 X`, 10 X covers 5 X;
//! * the lovelace pass has nothing to do, 1 ada covers the fee reserve;
//! * the change `0.8 ada + 5 X` is below the minimum for an output holding a token, so `3 ada` is
//!   pulled in and the change becomes `3.8 ada + 5 X`.

use std::cmp::Ordering;
use std::mem;

use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::min_coin::{LedgerMinimumCoin, MinimumCoin};
use crate::params::ProtocolParameters;
use crate::ranking::{sort_by_asset_descending, sort_by_class_descending, sort_by_coin_descending};
use crate::value::{compare_coin, compare_multiasset, AssetClass, Quantity, Value};
use crate::{OutputRequest, SelectionMode, Utxo};

/// Inputs allowed in one transaction unless the caller says otherwise.
pub const DEFAULT_INPUT_LIMIT: usize = 20;

/// Outcome of [`CoinSelection::select`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionResult<U> {
    /// Inputs to spend, in the order they were selected.
    pub chosen_inputs: Vec<U>,
    /// Candidates left unused.
    pub remaining_candidates: Vec<U>,
    /// Inputs minus outputs and fee reserve, the value of the change output.
    pub leftover: Value,
}

/// Outcome of [`CoinSelection::find_possible_max`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibleMax<U> {
    pub amount: Quantity,
    pub selection: Vec<U>,
}

// Running state shared by the passes of one selection.
struct Accumulator<U> {
    selection: Vec<U>,
    remaining: Vec<U>,
    amount: Value,
}

impl<U: Utxo> Accumulator<U> {
    fn new(candidates: &[U]) -> Self {
        Accumulator { selection: Vec::new(), remaining: candidates.to_vec(), amount: Value::zero() }
    }

    fn accept(&mut self, utxo: U) {
        self.amount += utxo.amount();
        self.selection.push(utxo);
    }
}

/// Coin selection engine.
///
/// Protocol parameters must be set with [`CoinSelection::configure`] before use.  The minimum
/// coin oracle defaults to [`LedgerMinimumCoin`] and can be replaced with
/// [`CoinSelection::with_oracle`].
#[derive(Clone, Debug)]
pub struct CoinSelection<M = LedgerMinimumCoin> {
    params: Option<ProtocolParameters>,
    oracle: M,
}

impl CoinSelection<LedgerMinimumCoin> {
    pub fn new() -> Self { CoinSelection::with_oracle(LedgerMinimumCoin::default()) }
}

impl Default for CoinSelection<LedgerMinimumCoin> {
    fn default() -> Self { CoinSelection::new() }
}

impl<M: MinimumCoin> CoinSelection<M> {
    pub fn with_oracle(oracle: M) -> Self { CoinSelection { params: None, oracle } }

    /// Sets the protocol parameters used by every following call.
    pub fn configure(&mut self, params: ProtocolParameters) -> Result<()> {
        params.validate()?;
        debug!(
            min_fee_coefficient = params.min_fee_coefficient,
            min_fee_constant = params.min_fee_constant,
            max_tx_size = params.max_tx_size,
            coins_per_utxo_byte = params.coins_per_utxo_byte,
            "configured protocol parameters"
        );
        self.params = Some(params);
        Ok(())
    }

    pub fn params(&self) -> Result<&ProtocolParameters> {
        self.params.as_ref().ok_or(Error::NotConfigured)
    }

    /// Selects inputs from `candidates` to pay `outputs` plus a fee reserve.
    ///
    /// The fee reserve is `explicit_fee` when given, otherwise the fee of a transaction of maximum
    /// size.  It only sizes the selection; the final fee is computed by the transaction builder.
    ///
    /// # Errors
    ///
    /// * [`Error::NotConfigured`] if [`CoinSelection::configure`] was never called.
    /// * [`Error::BalanceExhausted`] if the candidates cannot cover a token, the lovelace or the
    ///   change minimum.
    /// * [`Error::InputLimitExceeded`] if more than `input_limit` inputs are needed.
    /// * [`Error::UnknownAsset`] if the target could not be decomposed per token.
    pub fn select<U: Utxo>(
        &self,
        candidates: &[U],
        outputs: &[OutputRequest],
        explicit_fee: Option<Quantity>,
        input_limit: usize,
        mode: SelectionMode,
    ) -> Result<SelectionResult<U>> {
        let params = self.params()?;

        let requested: Value = outputs.iter().filter_map(|o| o.amount.as_ref()).sum();
        let fee = explicit_fee.unwrap_or_else(|| params.max_fee());
        let target = requested + Value::from_coin(fee);

        debug!(candidates = candidates.len(), outputs = outputs.len(), %target, ?mode, "selecting");

        let parts = target.split();
        let (coin_target, asset_targets) = parts.split_last().ok_or(Error::UnknownAsset)?;

        let mut acc = Accumulator::new(candidates);
        for asset_target in asset_targets {
            select_asset(&mut acc, asset_target, mode)?;
        }
        select_coin(&mut acc, coin_target, mode)?;

        let leftover = self.top_up_change(&mut acc, &target, params)?;

        if acc.selection.len() > input_limit {
            debug!(required = acc.selection.len(), limit = input_limit, "input limit exceeded");
            return Err(Error::InputLimitExceeded {
                required: acc.selection.len(),
                limit: input_limit,
            });
        }

        debug!(inputs = acc.selection.len(), %leftover, "selection complete");
        Ok(SelectionResult {
            chosen_inputs: acc.selection,
            remaining_candidates: acc.remaining,
            leftover,
        })
    }

    /// Largest amount of `class` spendable with at most `cap` inputs from `candidates`.
    pub fn find_possible_max<U: Utxo>(
        &self,
        class: &AssetClass,
        candidates: &[U],
        cap: usize,
    ) -> Result<PossibleMax<U>> {
        self.params()?;

        let selection: Vec<U> = sort_by_class_descending(candidates, class)
            .into_iter()
            .take_while(|u| u.amount().quantity_of(class).is_some())
            .take(cap)
            .collect();
        let amount: Quantity = selection.iter().filter_map(|u| u.amount().quantity_of(class)).sum();

        debug!(%class, inputs = selection.len(), %amount, "possible max");
        Ok(PossibleMax { amount, selection })
    }

    // Pulls candidates, head first, until the change covers its own minimum coin and the
    // configured floor.
    //
    // TODO the floor stands in for the marginal fee of each extra input; replace it with a
    // per-input fee estimate once the builder exposes input sizes.
    fn top_up_change<U: Utxo>(
        &self,
        acc: &mut Accumulator<U>,
        target: &Value,
        params: &ProtocolParameters,
    ) -> Result<Value> {
        let floor = Quantity::from(params.min_change_coin);
        loop {
            let leftover = acc.amount.checked_sub(target).ok_or(Error::BalanceExhausted)?;
            let minimum = self.oracle.minimum_coin(&leftover, params.coins_per_utxo_byte)?;
            let required = minimum.max(floor.clone());

            if leftover.coin() >= &required {
                return Ok(leftover);
            }
            if acc.remaining.is_empty() {
                debug!(%leftover, %required, "no candidates left for change");
                return Err(Error::BalanceExhausted);
            }

            let next = acc.remaining.remove(0);
            trace!(%leftover, %required, input = %next.amount(), "topping up change");
            acc.accept(next);
        }
    }
}

// A token target is short while the accumulated amount is incomparable or smaller.
fn asset_short(target: &Value, amount: &Value) -> bool {
    matches!(compare_multiasset(target, amount), None | Some(Ordering::Greater))
}

fn select_asset<U: Utxo>(
    acc: &mut Accumulator<U>,
    target: &Value,
    mode: SelectionMode,
) -> Result<()> {
    let asset = match target.single_asset() {
        Some(asset) => asset,
        None => {
            error!(%target, "token target does not hold exactly one asset");
            return Err(Error::UnknownAsset);
        }
    };

    let ranked = match mode {
        SelectionMode::BruteForce => mem::take(&mut acc.remaining),
        SelectionMode::BiggerFirst => sort_by_asset_descending(&acc.remaining, &asset),
    };
    acc.remaining = Vec::with_capacity(ranked.len());

    let mut ranked = ranked.into_iter();
    while let Some(utxo) = ranked.next() {
        if !asset_short(target, &acc.amount) {
            acc.remaining.push(utxo);
            acc.remaining.extend(ranked.by_ref());
            break;
        }
        // only candidates holding the token move the comparison
        if compare_multiasset(target, utxo.amount()).is_some() {
            trace!(%asset, input = %utxo.amount(), "selected for token");
            acc.accept(utxo);
        } else {
            acc.remaining.push(utxo);
        }
    }

    if asset_short(target, &acc.amount) {
        debug!(%asset, %target, "token balance exhausted");
        return Err(Error::BalanceExhausted);
    }
    Ok(())
}

fn select_coin<U: Utxo>(
    acc: &mut Accumulator<U>,
    target: &Value,
    mode: SelectionMode,
) -> Result<()> {
    let ranked = match mode {
        SelectionMode::BruteForce => {
            let mut ranked = mem::take(&mut acc.remaining);
            ranked.reverse();
            ranked
        }
        SelectionMode::BiggerFirst => sort_by_coin_descending(&acc.remaining),
    };
    acc.remaining = Vec::with_capacity(ranked.len());

    let mut ranked = ranked.into_iter();
    while let Some(utxo) = ranked.next() {
        if compare_coin(target, &acc.amount) != Ordering::Greater {
            acc.remaining.push(utxo);
            acc.remaining.extend(ranked.by_ref());
            break;
        }
        trace!(input = %utxo.amount(), "selected for lovelace");
        acc.accept(utxo);
    }

    if compare_coin(target, &acc.amount) == Ordering::Greater {
        debug!(%target, available = %acc.amount.coin(), "lovelace balance exhausted");
        return Err(Error::BalanceExhausted);
    }
    Ok(())
}
