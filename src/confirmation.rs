// SPDX-License-Identifier: CC0-1.0
//
//! Waiting for submitted transactions.
//!
//! Chain queries are delegated to provider traits; this module only decides how often to ask and
//! when to give up.  A provider answering "not yet" is asked again after a fixed interval, a
//! provider failing aborts the wait.

use std::time::Duration;

use backon::{BlockingRetryable, ConstantBuilder};
use tracing::warn;

use crate::error::{Error, Result};

/// Interval between two queries by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);
/// Queries made before giving up by default.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Source of on-chain transaction status.
pub trait BlockchainProvider {
    /// Hash of the block including `tx_hash`, `None` while it is unconfirmed.
    fn tx_block_hash(&self, tx_hash: &str) -> Result<Option<String>>;

    /// Blocks built on top of `block_hash`, counting the block itself.
    fn block_confirmations(&self, block_hash: &str) -> Result<u64>;
}

/// Source of bridge transfer status.
pub trait BridgeProvider {
    /// Hash of the sidechain transaction minting the transfer made in `tx_hash`, `None` while the
    /// bridge has not processed it.
    fn bridge_tx_for(&self, tx_hash: &str) -> Result<Option<String>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: usize,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: usize) -> Self {
        PollPolicy { interval, max_attempts }
    }

    /// Queries made before giving up.  The provider is always asked at least once.
    pub fn attempts(&self) -> usize { self.max_attempts.max(1) }

    fn backoff(&self) -> ConstantBuilder {
        // the first query is not a retry
        ConstantBuilder::default().with_delay(self.interval).with_max_times(self.attempts() - 1)
    }
}

impl Default for PollPolicy {
    fn default() -> Self { PollPolicy::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_ATTEMPTS) }
}

enum Attempt {
    Pending,
    Failed(Error),
}

fn poll<T>(
    policy: &PollPolicy,
    what: &str,
    mut query: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
    let result = (|| match query() {
        Ok(Some(found)) => Ok(found),
        Ok(None) => Err(Attempt::Pending),
        Err(e) => Err(Attempt::Failed(e)),
    })
    .retry(policy.backoff())
    .sleep(std::thread::sleep)
    .when(|attempt| matches!(attempt, Attempt::Pending))
    .notify(|_, delay| warn!(what, ?delay, "not observed yet, retrying"))
    .call();

    match result {
        Ok(found) => Ok(found),
        Err(Attempt::Pending) => {
            warn!(what, attempts = policy.attempts(), "gave up waiting");
            Err(Error::ConfirmationTimeout { attempts: policy.attempts() })
        }
        Err(Attempt::Failed(e)) => {
            warn!(what, error = %e, "provider failed");
            Err(e)
        }
    }
}

/// Waits until `tx_hash` is included in a block and returns the block hash.
pub fn wait_for_block_hash<P: BlockchainProvider + ?Sized>(
    provider: &P,
    tx_hash: &str,
    policy: &PollPolicy,
) -> Result<String> {
    poll(policy, "block hash", || provider.tx_block_hash(tx_hash))
}

/// Waits until the block including `tx_hash` has at least `depth` confirmations and returns its
/// hash.  Both waits share `policy`, each with its own attempt budget.
pub fn wait_for_confirmations<P: BlockchainProvider + ?Sized>(
    provider: &P,
    tx_hash: &str,
    depth: u64,
    policy: &PollPolicy,
) -> Result<String> {
    let block_hash = wait_for_block_hash(provider, tx_hash, policy)?;
    poll(policy, "confirmations", || {
        let confirmations = provider.block_confirmations(&block_hash)?;
        Ok((confirmations >= depth).then_some(()))
    })?;
    Ok(block_hash)
}

/// Waits until the bridge has processed `tx_hash` and returns the sidechain transaction hash.
pub fn wait_for_bridge_tx<P: BridgeProvider + ?Sized>(
    provider: &P,
    tx_hash: &str,
    policy: &PollPolicy,
) -> Result<String> {
    poll(policy, "bridge transaction", || provider.bridge_tx_for(tx_hash))
}
