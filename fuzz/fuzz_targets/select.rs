#![no_main]

use arbitrary::Arbitrary;
use cardano_coin_selection::{
    CoinSelection, Error, OutputReference, OutputRequest, ProtocolParameters, Quantity,
    SelectionMode, UnspentOutput, Utxo, Value,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
pub struct Params {
    pool: Vec<Value>,
    request: Value,
    fee: u32,
    input_limit: u8,
    brute_force: bool,
}

fuzz_target!(|params: Params| {
    let Params { pool, request, fee, input_limit, brute_force } = params;

    let utxos: Vec<UnspentOutput> = pool
        .into_iter()
        .enumerate()
        .map(|(i, amount)| UnspentOutput {
            reference: OutputReference { tx_hash: [0; 32], output_index: i as u32 },
            address: String::new(),
            amount,
        })
        .collect();
    let outputs = vec![OutputRequest::new("addr_test1fuzz", request.clone())];
    let mode = if brute_force { SelectionMode::BruteForce } else { SelectionMode::BiggerFirst };

    let mut selection = CoinSelection::new();
    selection.configure(ProtocolParameters::new(44, 155_381, 16_384, 4_310)).unwrap();

    let fee = Quantity::from(fee);
    let target = &request + &Value::from_coin(fee.clone());
    match selection.select(&utxos, &outputs, Some(fee), input_limit.into(), mode) {
        Ok(result) => {
            let spent: Value = result.chosen_inputs.iter().map(Utxo::amount).sum();
            assert_eq!(spent.checked_sub(&target), Some(result.leftover));
            assert!(result.chosen_inputs.len() <= usize::from(input_limit));
            assert_eq!(result.chosen_inputs.len() + result.remaining_candidates.len(), utxos.len());
        }
        Err(Error::BalanceExhausted) | Err(Error::InputLimitExceeded { .. }) => {}
        Err(e) => panic!("unexpected error {}", e),
    }
});
