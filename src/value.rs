// SPDX-License-Identifier: CC0-1.0
//
//! Value model.
//!
//! A [`Value`] is an amount of the base currency (lovelace) together with a bundle of native
//! tokens keyed by minting policy and asset name.  All quantities are arbitrary precision and
//! never negative; entries with a zero quantity are dropped as soon as they appear so two equal
//! bundles always compare equal structurally.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::{self, Sum};
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Non-negative quantity of lovelace or of a native token.
pub type Quantity = BigUint;

/// Length in bytes of a minting policy hash.
pub const POLICY_ID_LEN: usize = 28;

/// Maximum length in bytes of an asset name.
pub const ASSET_NAME_MAX_LEN: usize = 32;

const LOVELACE_UNIT: &str = "lovelace";

/// Hash of the minting policy of a native token.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolicyId([u8; POLICY_ID_LEN]);

impl PolicyId {
    pub const fn from_bytes(bytes: [u8; POLICY_ID_LEN]) -> Self { PolicyId(bytes) }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; POLICY_ID_LEN] =
            bytes.try_into().map_err(|_| Error::InvalidPolicyId(hex::encode(bytes)))?;
        Ok(PolicyId(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; POLICY_ID_LEN] { &self.0 }
}

impl FromStr for PolicyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidPolicyId(s.to_string()))?;
        PolicyId::from_slice(&bytes).map_err(|_| Error::InvalidPolicyId(s.to_string()))
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&hex::encode(self.0)) }
}

impl fmt::Debug for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "PolicyId({})", self) }
}

/// Name of a native token under its policy, 0 to 32 raw bytes.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetName(Vec<u8>);

impl AssetName {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > ASSET_NAME_MAX_LEN {
            return Err(Error::InvalidAssetName(hex::encode(&bytes)));
        }
        Ok(AssetName(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidAssetName(s.to_string()))?;
        AssetName::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    fn is_printable(&self) -> bool { self.0.iter().all(|b| b.is_ascii_graphic()) }
}

/// Parses the human readable form, i.e. the raw bytes of `s`.
impl FromStr for AssetName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> { AssetName::new(s.as_bytes().to_vec()) }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_printable() {
            // is_printable guarantees ASCII
            f.write_str(&String::from_utf8_lossy(&self.0))
        } else {
            f.write_str(&hex::encode(&self.0))
        }
    }
}

impl fmt::Debug for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AssetName({})", self) }
}

/// Two-part identifier of a native token.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId {
    pub policy: PolicyId,
    pub name: AssetName,
}

impl AssetId {
    pub fn new(policy: PolicyId, name: AssetName) -> Self { AssetId { policy, name } }
}

/// `<policy>.<name>` for printable names, `<policy><name hex>` otherwise, so the text always
/// parses back as the same [`AssetClass`].
impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_printable() {
            write!(f, "{}.{}", self.policy, self.name)
        } else {
            write!(f, "{}{}", self.policy, hex::encode(self.name.as_bytes()))
        }
    }
}

/// Either the base currency or one native token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Lovelace,
    Native(AssetId),
}

/// Parses a unit as used by wallets and block explorers:
///
/// * `lovelace`
/// * `<policy hex>.<ascii name>`
/// * `<policy hex><name hex>`
impl FromStr for AssetClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == LOVELACE_UNIT {
            return Ok(AssetClass::Lovelace);
        }

        let invalid = |_: Error| Error::InvalidAssetUnit(s.to_string());
        let (policy, name) = match s.split_once('.') {
            Some((policy, name)) => (
                policy.parse::<PolicyId>().map_err(invalid)?,
                name.parse::<AssetName>().map_err(invalid)?,
            ),
            None => {
                let split = POLICY_ID_LEN * 2;
                if !s.is_char_boundary(split) || s.len() < split {
                    return Err(Error::InvalidAssetUnit(s.to_string()));
                }
                let (policy, name) = s.split_at(split);
                (
                    policy.parse::<PolicyId>().map_err(invalid)?,
                    AssetName::from_hex(name).map_err(invalid)?,
                )
            }
        };
        Ok(AssetClass::Native(AssetId::new(policy, name)))
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Lovelace => f.write_str(LOVELACE_UNIT),
            AssetClass::Native(id) => id.fmt(f),
        }
    }
}

/// Native tokens grouped by policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiAsset(BTreeMap<PolicyId, BTreeMap<AssetName, Quantity>>);

impl MultiAsset {
    pub fn new() -> Self { MultiAsset::default() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Number of distinct (policy, asset name) entries.
    pub fn len(&self) -> usize { self.0.values().map(BTreeMap::len).sum() }

    pub fn get(&self, policy: &PolicyId, name: &AssetName) -> Option<&Quantity> {
        self.0.get(policy)?.get(name)
    }

    /// Sets the quantity of an asset, returning the previous one.  A zero quantity removes the
    /// entry.
    pub fn insert(
        &mut self,
        policy: PolicyId,
        name: AssetName,
        quantity: Quantity,
    ) -> Option<Quantity> {
        if quantity.is_zero() {
            let assets = self.0.get_mut(&policy)?;
            let previous = assets.remove(&name);
            if assets.is_empty() {
                self.0.remove(&policy);
            }
            return previous;
        }
        self.0.entry(policy).or_default().insert(name, quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PolicyId, &AssetName, &Quantity)> + '_ {
        self.0.iter().flat_map(|(policy, assets)| {
            assets.iter().map(move |(name, quantity)| (policy, name, quantity))
        })
    }

    /// Policies with their assets, in canonical order.
    pub fn policies(
        &self,
    ) -> impl Iterator<Item = (&PolicyId, &BTreeMap<AssetName, Quantity>)> + '_ {
        self.0.iter()
    }

    fn add_quantity(&mut self, policy: &PolicyId, name: &AssetName, quantity: &Quantity) {
        if quantity.is_zero() {
            return;
        }
        *self.0.entry(*policy).or_default().entry(name.clone()).or_default() += quantity;
    }

    fn checked_sub(&self, rhs: &MultiAsset) -> Option<MultiAsset> {
        let mut out = self.clone();
        for (policy, name, quantity) in rhs.iter() {
            let available = out.get(policy, name)?;
            if available < quantity {
                return None;
            }
            let rest = available - quantity;
            out.insert(*policy, name.clone(), rest);
        }
        Some(out)
    }
}

/// An amount of lovelace plus native tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value {
    coin: Quantity,
    multiasset: MultiAsset,
}

impl Value {
    pub fn zero() -> Self { Value::default() }

    pub fn from_coin(coin: impl Into<Quantity>) -> Self {
        Value { coin: coin.into(), multiasset: MultiAsset::new() }
    }

    pub fn new(coin: impl Into<Quantity>, multiasset: MultiAsset) -> Self {
        Value { coin: coin.into(), multiasset }
    }

    /// Adds `quantity` of `asset` to this value.
    pub fn with_asset(mut self, asset: AssetId, quantity: impl Into<Quantity>) -> Self {
        self.multiasset.add_quantity(&asset.policy, &asset.name, &quantity.into());
        self
    }

    pub fn coin(&self) -> &Quantity { &self.coin }

    pub fn set_coin(&mut self, coin: impl Into<Quantity>) { self.coin = coin.into(); }

    pub fn multiasset(&self) -> &MultiAsset { &self.multiasset }

    pub fn has_assets(&self) -> bool { !self.multiasset.is_empty() }

    pub fn is_zero(&self) -> bool { self.coin.is_zero() && self.multiasset.is_empty() }

    pub fn asset_quantity(&self, asset: &AssetId) -> Option<&Quantity> {
        self.multiasset.get(&asset.policy, &asset.name)
    }

    /// Quantity held of `class`.  Lovelace is always present, possibly zero.
    pub fn quantity_of(&self, class: &AssetClass) -> Option<&Quantity> {
        match class {
            AssetClass::Lovelace => Some(&self.coin),
            AssetClass::Native(asset) => self.asset_quantity(asset),
        }
    }

    /// Every asset held with its quantity, lovelace first, then tokens in policy and name order.
    pub fn assets(&self) -> impl Iterator<Item = (AssetClass, &Quantity)> + '_ {
        let tokens = self.multiasset.iter().map(|(policy, name, quantity)| {
            (AssetClass::Native(AssetId::new(*policy, name.clone())), quantity)
        });
        iter::once((AssetClass::Lovelace, &self.coin)).chain(tokens)
    }

    /// Quantity held of `class`, zero when absent.
    pub fn balance_of(&self, class: &AssetClass) -> Quantity {
        self.quantity_of(class).cloned().unwrap_or_default()
    }

    /// Component-wise difference, or `None` when any component of `rhs` exceeds `self`.
    pub fn checked_sub(&self, rhs: &Value) -> Option<Value> {
        if self.coin < rhs.coin {
            return None;
        }
        let multiasset = self.multiasset.checked_sub(&rhs.multiasset)?;
        Some(Value { coin: &self.coin - &rhs.coin, multiasset })
    }

    /// Decomposes the value into one value per native token followed by a final value holding
    /// only the coin.
    pub fn split(&self) -> Vec<Value> {
        let mut parts: Vec<Value> = self
            .multiasset
            .iter()
            .map(|(policy, name, quantity)| {
                Value::zero().with_asset(AssetId::new(*policy, name.clone()), quantity.clone())
            })
            .collect();
        parts.push(Value::from_coin(self.coin.clone()));
        parts
    }

    /// The asset of a value holding exactly one native token type.
    pub fn single_asset(&self) -> Option<AssetId> {
        let mut assets = self.multiasset.iter();
        match (assets.next(), assets.next()) {
            (Some((policy, name, _)), None) => Some(AssetId::new(*policy, name.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coin, LOVELACE_UNIT)?;
        for (policy, name, quantity) in self.multiasset.iter() {
            write!(f, " + {} {}", quantity, AssetId::new(*policy, name.clone()))?;
        }
        Ok(())
    }
}

impl Add<&Value> for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Add for Value {
    type Output = Value;

    fn add(mut self, rhs: Value) -> Value {
        self += &rhs;
        self
    }
}

impl AddAssign<&Value> for Value {
    fn add_assign(&mut self, rhs: &Value) {
        self.coin += &rhs.coin;
        for (policy, name, quantity) in rhs.multiasset.iter() {
            self.multiasset.add_quantity(policy, name, quantity);
        }
    }
}

/// Panics when any component of `rhs` exceeds `self`; see [`Value::checked_sub`].
impl Sub<&Value> for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        match self.checked_sub(rhs) {
            Some(value) => value,
            None => panic!("value subtraction underflow: {} - {}", self, rhs),
        }
    }
}

impl<'a> Sum<&'a Value> for Value {
    fn sum<I: Iterator<Item = &'a Value>>(iter: I) -> Value {
        iter.fold(Value::zero(), |mut acc, v| {
            acc += v;
            acc
        })
    }
}

impl Sum for Value {
    fn sum<I: Iterator<Item = Value>>(iter: I) -> Value {
        iter.fold(Value::zero(), |mut acc, v| {
            acc += &v;
            acc
        })
    }
}

/// Total order on the coin component alone.
pub fn compare_coin(a: &Value, b: &Value) -> Ordering { a.coin.cmp(&b.coin) }

/// Partial order over the native tokens of `a` as seen from `b`.
///
/// Returns `None` (incomparable) when either side has no tokens, when a token held by `a` is
/// missing from `b`, or when the shared tokens disagree in direction.  Tokens only held by `b`
/// are not considered.  `None` means "cannot yet satisfy", never equality.
pub fn compare_multiasset(a: &Value, b: &Value) -> Option<Ordering> {
    if !a.has_assets() || !b.has_assets() {
        return None;
    }

    let mut result = Ordering::Equal;
    for (policy, name, lhs) in a.multiasset.iter() {
        let rhs = b.multiasset.get(policy, name)?;
        match (result, lhs.cmp(rhs)) {
            (_, Ordering::Equal) => {}
            (Ordering::Equal, ord) => result = ord,
            (current, ord) if current == ord => {}
            _ => return None,
        }
    }
    Some(result)
}

#[cfg(feature = "arbitrary")]
mod arbitrary_impls {
    use arbitrary::{Arbitrary, Unstructured};

    use super::*;

    // Small domains so independently generated values share tokens often.
    impl<'a> Arbitrary<'a> for PolicyId {
        fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
            Ok(PolicyId([u.int_in_range(0u8..=3)?; POLICY_ID_LEN]))
        }
    }

    impl<'a> Arbitrary<'a> for AssetName {
        fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
            let len = u.int_in_range(0usize..=2)?;
            let mut name = Vec::with_capacity(len);
            for _ in 0..len {
                name.push(u.int_in_range(b'A'..=b'C')?);
            }
            Ok(AssetName(name))
        }
    }

    impl<'a> Arbitrary<'a> for AssetId {
        fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
            Ok(AssetId::new(u.arbitrary()?, u.arbitrary()?))
        }
    }

    impl<'a> Arbitrary<'a> for Value {
        fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
            let mut value = Value::from_coin(u.arbitrary::<u64>()?);
            for _ in 0..u.int_in_range(0usize..=4)? {
                let asset: AssetId = u.arbitrary()?;
                value = value.with_asset(asset, u.int_in_range(0u64..=1_000)?);
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(policy: u8, name: &str) -> AssetId {
        AssetId::new(PolicyId::from_bytes([policy; POLICY_ID_LEN]), name.parse().unwrap())
    }

    fn tokens(entries: &[(u8, &str, u64)]) -> Value {
        entries.iter().fold(Value::zero(), |v, (p, n, q)| v.with_asset(asset(*p, n), *q))
    }

    #[test]
    fn add_merges_components() {
        let a = Value::from_coin(5u64).with_asset(asset(1, "A"), 3u64);
        let b =
            Value::from_coin(2u64).with_asset(asset(1, "A"), 4u64).with_asset(asset(2, "B"), 1u64);
        let sum = &a + &b;

        assert_eq!(sum.coin(), &Quantity::from(7u64));
        assert_eq!(sum.asset_quantity(&asset(1, "A")), Some(&Quantity::from(7u64)));
        assert_eq!(sum.asset_quantity(&asset(2, "B")), Some(&Quantity::from(1u64)));
        assert_eq!(sum.multiasset().len(), 2);
    }

    #[test]
    fn add_past_u64() {
        let a = Value::from_coin(u64::MAX);
        let sum = &a + &a;
        assert_eq!(sum.coin(), &(Quantity::from(u64::MAX) * 2u32));
    }

    #[test]
    fn zero_quantities_do_not_persist() {
        let v = Value::from_coin(1u64).with_asset(asset(1, "A"), 0u64);
        assert!(!v.has_assets());

        let a = Value::from_coin(10u64).with_asset(asset(1, "A"), 3u64);
        let b = Value::from_coin(4u64).with_asset(asset(1, "A"), 3u64);
        let rest = a.checked_sub(&b).unwrap();
        assert_eq!(rest, Value::from_coin(6u64));
        assert!(rest.multiasset().policies().next().is_none());
    }

    #[test]
    fn checked_sub_underflow() {
        let a = Value::from_coin(10u64).with_asset(asset(1, "A"), 3u64);
        assert!(a.checked_sub(&Value::from_coin(11u64)).is_none());
        assert!(a.checked_sub(&tokens(&[(1, "A", 4)])).is_none());
        assert!(a.checked_sub(&tokens(&[(2, "A", 1)])).is_none());
    }

    #[test]
    #[should_panic(expected = "value subtraction underflow")]
    fn sub_operator_fails_loudly() { let _ = &Value::from_coin(1u64) - &Value::from_coin(2u64); }

    #[test]
    fn sum_of_values() {
        let values = vec![Value::from_coin(1u64), Value::from_coin(2u64), tokens(&[(1, "A", 5)])];
        let total: Value = values.iter().sum();
        assert_eq!(total, Value::from_coin(3u64).with_asset(asset(1, "A"), 5u64));
    }

    #[test]
    fn compare_coin_ignores_assets() {
        let a = Value::from_coin(3u64).with_asset(asset(1, "A"), 100u64);
        let b = Value::from_coin(4u64);
        assert_eq!(compare_coin(&a, &b), Ordering::Less);
        assert_eq!(compare_coin(&b, &a), Ordering::Greater);
        assert_eq!(compare_coin(&a, &a), Ordering::Equal);
    }

    #[test]
    fn compare_multiasset_partial_order() {
        let a = tokens(&[(1, "A", 5)]);

        assert_eq!(compare_multiasset(&a, &tokens(&[(1, "A", 3)])), Some(Ordering::Greater));
        assert_eq!(compare_multiasset(&a, &tokens(&[(1, "A", 5)])), Some(Ordering::Equal));
        assert_eq!(compare_multiasset(&a, &tokens(&[(1, "A", 9)])), Some(Ordering::Less));

        // extra tokens on the right are not considered
        assert_eq!(
            compare_multiasset(&a, &tokens(&[(1, "A", 3), (2, "B", 100)])),
            Some(Ordering::Greater)
        );

        // missing on the right
        assert_eq!(compare_multiasset(&a, &tokens(&[(2, "B", 3)])), None);
        assert_eq!(compare_multiasset(&a, &Value::from_coin(1_000u64)), None);
        assert_eq!(compare_multiasset(&Value::from_coin(1u64), &a), None);

        // directions disagree
        let ab = tokens(&[(1, "A", 5), (2, "B", 1)]);
        assert_eq!(compare_multiasset(&ab, &tokens(&[(1, "A", 3), (2, "B", 2)])), None);
        assert_eq!(
            compare_multiasset(&ab, &tokens(&[(1, "A", 5), (2, "B", 0), (2, "B", 2)])),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn compare_multiasset_property() {
        arbtest::arbtest(|u| {
            let a: Value = u.arbitrary()?;
            let b: Value = u.arbitrary()?;

            let missing = a.multiasset().iter().any(|(p, n, _)| b.multiasset().get(p, n).is_none());
            let result = compare_multiasset(&a, &b);

            if missing || !a.has_assets() || !b.has_assets() {
                assert_eq!(result, None);
                return Ok(());
            }

            let orders: Vec<Ordering> = a
                .multiasset()
                .iter()
                .map(|(p, n, q)| q.cmp(b.multiasset().get(p, n).unwrap()))
                .collect();
            let greater = orders.contains(&Ordering::Greater);
            let less = orders.contains(&Ordering::Less);
            let expected = match (greater, less) {
                (true, true) => None,
                (true, false) => Some(Ordering::Greater),
                (false, true) => Some(Ordering::Less),
                (false, false) => Some(Ordering::Equal),
            };
            assert_eq!(result, expected);

            // antisymmetric whenever both directions are defined
            if let (Some(ab), Some(ba)) = (result, compare_multiasset(&b, &a)) {
                if a.multiasset().len() == b.multiasset().len() {
                    assert_eq!(ab, ba.reverse());
                }
            }
            Ok(())
        });
    }

    #[test]
    fn split_puts_coin_last() {
        let v =
            Value::from_coin(7u64).with_asset(asset(2, "B"), 1u64).with_asset(asset(1, "A"), 2u64);
        let parts = v.split();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], tokens(&[(1, "A", 2)]));
        assert_eq!(parts[1], tokens(&[(2, "B", 1)]));
        assert_eq!(parts[2], Value::from_coin(7u64));
        assert_eq!(parts.iter().sum::<Value>(), v);

        assert_eq!(parts[0].single_asset(), Some(asset(1, "A")));
        assert_eq!(parts[2].single_asset(), None);
        assert_eq!(v.single_asset(), None);
    }

    #[test]
    fn parse_asset_units() {
        let policy = "fda1b6b487bee2e7f64ecf24d24b1224342484c0195ee1b7b943db50";

        assert_eq!("lovelace".parse::<AssetClass>().unwrap(), AssetClass::Lovelace);

        let dotted: AssetClass = format!("{}.tBLUES", policy).parse().unwrap();
        let concatenated: AssetClass =
            format!("{}{}", policy, hex::encode("tBLUES")).parse().unwrap();
        assert_eq!(dotted, concatenated);
        assert_eq!(dotted.to_string(), format!("{}.tBLUES", policy));

        let policy_only: AssetClass = policy.parse().unwrap();
        assert_eq!(
            policy_only,
            AssetClass::Native(AssetId::new(policy.parse().unwrap(), AssetName::default()))
        );

        assert!("ada".parse::<AssetClass>().is_err());
        assert!("abcd.TOKEN".parse::<AssetClass>().is_err());
        assert!(format!("{}.{}", policy, "x".repeat(33)).parse::<AssetClass>().is_err());
    }

    #[test]
    fn asset_name_display() {
        assert_eq!("TOKEN".parse::<AssetName>().unwrap().to_string(), "TOKEN");
        assert_eq!(AssetName::new(vec![0, 255]).unwrap().to_string(), "00ff");
    }

    #[test]
    fn binary_names_display_concatenated() {
        let policy = PolicyId::from_bytes([0xfd; POLICY_ID_LEN]);
        let id = AssetId::new(policy, AssetName::new(vec![0x00, 0xff]).unwrap());
        assert_eq!(id.to_string(), format!("{}00ff", policy));

        let class = AssetClass::Native(id);
        assert_eq!(class.to_string().parse::<AssetClass>().unwrap(), class);

        let ascii_lookalike = AssetClass::Native(AssetId::new(policy, "00ff".parse().unwrap()));
        assert_ne!(ascii_lookalike.to_string(), class.to_string());
    }

    #[test]
    fn unit_display_parses_back() {
        arbtest::arbtest(|u| {
            let policy = PolicyId::from_bytes(u.arbitrary()?);
            let mut bytes: Vec<u8> = u.arbitrary()?;
            bytes.truncate(ASSET_NAME_MAX_LEN);
            let class = AssetClass::Native(AssetId::new(policy, AssetName::new(bytes).unwrap()));

            assert_eq!(class.to_string().parse::<AssetClass>().unwrap(), class);
            Ok(())
        });
        let lovelace: AssetClass = AssetClass::Lovelace.to_string().parse().unwrap();
        assert_eq!(lovelace, AssetClass::Lovelace);
    }

    #[test]
    fn assets_list_lovelace_first() {
        let v = Value::from_coin(3_000_000u64)
            .with_asset(asset(2, "B"), 5u64)
            .with_asset(asset(1, "A"), 7u64);
        let listed: Vec<(String, Quantity)> =
            v.assets().map(|(class, q)| (class.to_string(), q.clone())).collect();

        assert_eq!(
            listed,
            vec![
                ("lovelace".to_string(), Quantity::from(3_000_000u64)),
                (asset(1, "A").to_string(), Quantity::from(7u64)),
                (asset(2, "B").to_string(), Quantity::from(5u64)),
            ]
        );
        for (unit, quantity) in &listed {
            assert_eq!(&v.balance_of(&unit.parse().unwrap()), quantity);
        }

        assert_eq!(Value::zero().assets().count(), 1);
    }

    #[test]
    fn balance_of_absent_asset_is_zero() {
        let v = Value::from_coin(2u64).with_asset(asset(1, "A"), 7u64);
        assert_eq!(v.balance_of(&AssetClass::Native(asset(1, "A"))), Quantity::from(7u64));
        assert_eq!(v.balance_of(&AssetClass::Native(asset(1, "B"))), Quantity::default());
        assert_eq!(v.balance_of(&AssetClass::Lovelace), Quantity::from(2u64));
        assert_eq!(Value::zero().balance_of(&AssetClass::Lovelace), Quantity::default());
    }
}
