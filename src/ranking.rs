// SPDX-License-Identifier: CC0-1.0
//
//! UTXO ranking.
//!
//! Deterministic orderings of a candidate pool, largest first.  Both orderings are stable
//! insertion sorts: candidates holding equal quantities keep the order in which they were given,
//! so a selection is reproducible from its inputs and sorting twice changes nothing.

use crate::value::{AssetClass, AssetId};
use crate::Utxo;

/// Orders `utxos` by lovelace, descending.
pub fn sort_by_coin_descending<U: Utxo>(utxos: &[U]) -> Vec<U> {
    let mut sorted: Vec<U> = Vec::with_capacity(utxos.len());
    for utxo in utxos {
        let coin = utxo.amount().coin();
        // after every element at least as large, so ties keep input order
        let at = sorted.partition_point(|o| o.amount().coin() >= coin);
        sorted.insert(at, utxo.clone());
    }
    sorted
}

/// Orders `utxos` by their quantity of `asset`, descending.  UTXOs without the asset follow all
/// UTXOs holding it, in input order.
pub fn sort_by_asset_descending<U: Utxo>(utxos: &[U], asset: &AssetId) -> Vec<U> {
    let mut holders: Vec<U> = Vec::with_capacity(utxos.len());
    let mut others: Vec<U> = Vec::new();
    for utxo in utxos {
        match utxo.amount().asset_quantity(asset) {
            Some(quantity) => {
                let at = holders.partition_point(|o| {
                    o.amount().asset_quantity(asset).map_or(false, |q| q >= quantity)
                });
                holders.insert(at, utxo.clone());
            }
            None => others.push(utxo.clone()),
        }
    }
    holders.extend(others);
    holders
}

/// Orders `utxos` by their quantity of `class`, descending.
pub fn sort_by_class_descending<U: Utxo>(utxos: &[U], class: &AssetClass) -> Vec<U> {
    match class {
        AssetClass::Lovelace => sort_by_coin_descending(utxos),
        AssetClass::Native(asset) => sort_by_asset_descending(utxos, asset),
    }
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    use super::*;
    use crate::tests::{indexes, parse_value, token, UtxoPool};
    use crate::{OutputReference, UnspentOutput};

    fn pool_of_coins(coins: &[u64]) -> Vec<UnspentOutput> {
        coins
            .iter()
            .enumerate()
            .map(|(i, c)| UnspentOutput {
                reference: OutputReference { tx_hash: [0; 32], output_index: i as u32 },
                address: String::new(),
                amount: parse_value(&format!("{} lovelace", c)),
            })
            .collect()
    }

    #[test]
    fn coin_descending() {
        let pool = UtxoPool::new(&["1 ada", "4 ada", "2 ada", "3 ada"]);
        let sorted = sort_by_coin_descending(&pool.utxos);
        assert_eq!(indexes(&sorted), vec![1, 3, 2, 0]);
    }

    #[test]
    fn coin_ties_keep_input_order() {
        let pool =
            UtxoPool::new(&["2 ada", "5 ada", "2 ada + 1 TOKEN", "5 ada + 3 TOKEN", "2 ada"]);
        let sorted = sort_by_coin_descending(&pool.utxos);
        assert_eq!(indexes(&sorted), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn empty_pool() {
        let empty: Vec<UnspentOutput> = vec![];
        assert!(sort_by_coin_descending(&empty).is_empty());
        assert!(sort_by_asset_descending(&empty, &token("TOKEN")).is_empty());
    }

    #[test]
    fn asset_descending_holders_first() {
        let pool = UtxoPool::new(&[
            "9 ada",
            "1 ada + 5 TOKEN",
            "1 ada + 20 OTHER",
            "1 ada + 7 TOKEN",
            "3 ada",
            "1 ada + 5 TOKEN + 1 OTHER",
        ]);
        let sorted = sort_by_asset_descending(&pool.utxos, &token("TOKEN"));
        assert_eq!(indexes(&sorted), vec![3, 1, 5, 0, 2, 4]);
    }

    #[test]
    fn class_dispatch() {
        let pool = UtxoPool::new(&["1 ada + 5 TOKEN", "3 ada", "2 ada + 9 TOKEN"]);
        assert_eq!(
            indexes(&sort_by_class_descending(&pool.utxos, &AssetClass::Lovelace)),
            vec![1, 2, 0]
        );
        assert_eq!(
            indexes(&sort_by_class_descending(&pool.utxos, &AssetClass::Native(token("TOKEN")))),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn sorting_is_idempotent_and_stable() {
        // every pool of up to 5 utxos with coins in 0..=3
        let mut g = exhaustigen::Gen::new();
        while !g.done() {
            let len = g.gen(5) as usize;
            let coins: Vec<u64> = (0..len).map(|_| g.gen(3) as u64).collect();
            let pool = pool_of_coins(&coins);

            let once = sort_by_coin_descending(&pool);
            let twice = sort_by_coin_descending(&once);
            assert_eq!(once, twice);

            for pair in once.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(a.amount.coin() >= b.amount.coin());
                if a.amount.coin() == b.amount.coin() {
                    assert!(a.reference.output_index < b.reference.output_index);
                }
            }
        }
    }

    #[test]
    fn sorting_is_a_permutation() {
        let mut coins: Vec<u64> = (0..200).map(|i| (i % 17) * 1_000).collect();
        coins.shuffle(&mut thread_rng());
        let pool = pool_of_coins(&coins);

        let sorted = sort_by_coin_descending(&pool);
        let mut got = indexes(&sorted);
        got.sort_unstable();
        assert_eq!(got, (0..200).collect::<Vec<u32>>());
        assert!(sorted.windows(2).all(|w| w[0].amount.coin() >= w[1].amount.coin()));
    }
}
