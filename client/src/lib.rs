//! Client SDK for the royale lobby.
//!
//! The lobby core is a session/wallet state machine: a [`SessionStore`]
//! owns the balance, the in-flight-operation gate and the last wager
//! result; the [`WalletController`] and [`WagerController`] validate
//! intents, speak to the ledger authority through the [`LedgerClient`]
//! and reconcile authoritative responses back into the store. The UI
//! renders purely from store snapshots.

pub mod ledger;
pub mod session;
pub mod wager;
pub mod wallet;

pub use ledger::LedgerClient;
pub use session::{Operation, OperationGuard, SessionSnapshot, SessionStore};
pub use wager::WagerController;
pub use wallet::WalletController;

use thiserror::Error;

/// Error type for lobby operations.
///
/// `Network` and `Rejected` come back from the transport and the
/// authority respectively; every other variant is a local precondition
/// failure that never issued a request.
#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("ledger rejected request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("recipient must not be empty")]
    MissingRecipient,
    #[error("a color choice is required for roulette")]
    MissingChoice,
    #[error("insufficient funds: {requested} requested with balance {balance}")]
    InsufficientFunds { requested: u64, balance: u64 },
    #[error("balance is not yet known")]
    BalanceUnknown,
    #[error("another operation is already in flight")]
    OperationPending,
}

impl Error {
    /// Whether this is a local precondition failure (reported
    /// immediately, no request was sent).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount
                | Error::MissingRecipient
                | Error::MissingChoice
                | Error::InsufficientFunds { .. }
                | Error::BalanceUnknown
                | Error::OperationPending
        )
    }
}

/// Result type for lobby operations.
pub type Result<T> = std::result::Result<T, Error>;
