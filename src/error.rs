// SPDX-License-Identifier: CC0-1.0
//
//! Errors returned by coin selection and its helpers.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Selection attempted before protocol parameters were configured.
    #[error("protocol parameters not set, call configure() first")]
    NotConfigured,
    /// The candidate pool cannot cover the requested target.
    #[error("balance exhausted")]
    BalanceExhausted,
    /// A selection exists but needs more inputs than allowed.
    #[error("input limit exceeded: {required} inputs required, limit is {limit}")]
    InputLimitExceeded { required: usize, limit: usize },
    /// A target decomposition did not yield exactly one asset type.
    #[error("unknown asset in target decomposition")]
    UnknownAsset,
    #[error("invalid policy id: {0}")]
    InvalidPolicyId(String),
    #[error("invalid asset name: {0}")]
    InvalidAssetName(String),
    #[error("invalid asset unit: {0}")]
    InvalidAssetUnit(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("invalid protocol parameters: {0}")]
    InvalidParameters(String),
    #[error("unrecognized address: {0}")]
    UnrecognizedAddress(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("confirmation not observed after {attempts} attempts")]
    ConfirmationTimeout { attempts: usize },
    #[error("provider error: {0}")]
    Provider(String),
}

impl Error {
    /// Errors a caller can act on by changing the request, as opposed to defects.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BalanceExhausted | Error::InputLimitExceeded { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidParameters(e.to_string())
    }
}
