#![no_main]

use arbitrary::Arbitrary;
use cardano_coin_selection::{
    AssetClass, AssetId, CoinSelection, OutputReference, ProtocolParameters, Quantity,
    UnspentOutput, Value,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
pub struct Params {
    pool: Vec<Value>,
    asset: Option<AssetId>,
    cap: u8,
}

fuzz_target!(|params: Params| {
    let Params { pool, asset, cap } = params;

    let utxos: Vec<UnspentOutput> = pool
        .into_iter()
        .enumerate()
        .map(|(i, amount)| UnspentOutput {
            reference: OutputReference { tx_hash: [0; 32], output_index: i as u32 },
            address: String::new(),
            amount,
        })
        .collect();
    let class = asset.map_or(AssetClass::Lovelace, AssetClass::Native);

    let mut selection = CoinSelection::new();
    selection.configure(ProtocolParameters::new(44, 155_381, 16_384, 4_310)).unwrap();

    let max = selection.find_possible_max(&class, &utxos, cap.into()).unwrap();
    assert!(max.selection.len() <= usize::from(cap));

    let total: Quantity = utxos.iter().filter_map(|u| u.amount.quantity_of(&class)).sum();
    assert!(max.amount <= total);
});
