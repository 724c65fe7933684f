//! Wire types for the ledger authority's HTTP API.
//!
//! The authority exposes a single endpoint dispatched on an `action`
//! query parameter:
//!
//! - `GET ?action=balance` -> [`BalanceResponse`]
//! - `POST ?action=transfer` with [`TransferRequest`] -> [`BalanceResponse`]
//! - `POST ?action=play` with [`WagerRequest`] -> [`WagerResult`]
//! - `GET ?action=history` -> [`HistoryResponse`]
//!
//! Rejections carry a non-success status and an [`ErrorResponse`] body.
//! All amounts are whole currency units; the client never does balance
//! arithmetic on them, it only overwrites its local copy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a wallet transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Deposit,
    Withdraw,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferKind::Deposit => write!(f, "deposit"),
            TransferKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// A deposit or withdrawal submitted to the ledger authority.
///
/// `recipient` is required for withdrawals and absent for deposits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Wager games offered by the authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Slots,
    Roulette,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Game::Slots => write!(f, "slots"),
            Game::Roulette => write!(f, "roulette"),
        }
    }
}

/// Roulette wheel colors (also the only side bets the lobby offers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
        }
    }
}

/// A single bet submitted for settlement.
///
/// `choice` is required for roulette and ignored for slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerRequest {
    pub game: Game,
    pub bet: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice: Option<Color>,
}

/// Game-specific outcome detail inside a [`WagerResult`].
///
/// Serialized untagged: the field sets of the two variants are
/// disjoint, so the JSON shape (`{"reels": [...]}` vs
/// `{"number": .., "color": ..}`) identifies the variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Reels { reels: Vec<String> },
    Spin { number: u8, color: Color },
}

/// Settled wager: the new authoritative balance, the gross win amount
/// (zero on a loss) and the game outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerResult {
    pub balance: u64,
    pub win: u64,
    pub result: Outcome,
}

impl WagerResult {
    /// Whether this result should be presented as a win.
    pub fn is_win(&self) -> bool {
        self.win > 0
    }
}

/// Response to balance queries and successful transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

/// Rejection body returned by the authority alongside a non-success
/// HTTP status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// One ledger entry from the transaction history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub amount: u64,
    pub description: String,
    /// Unix timestamp (seconds) assigned by the authority.
    pub created_at: u64,
}

/// Response to `?action=history`: most recent transactions first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub transactions: Vec<TransactionRecord>,
}
