//! Local ledger authority for the royale lobby.
//!
//! Holds a single account's balance, settles transfers and wagers, and
//! serves the authority's HTTP contract via [`Api`]. The client SDK's
//! integration tests run this in-process on an ephemeral port; the
//! binary in `main.rs` serves it as a dev backend.

pub mod api;
pub use api::Api;
mod games;

use rand::{rngs::StdRng, SeedableRng};
use royale_types::{
    Game, Outcome, TransactionRecord, TransferKind, TransferRequest, WagerRequest, WagerResult,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;

/// Number of transactions returned by the history endpoint.
const HISTORY_DEPTH: usize = 10;

/// Reasons the authority rejects a request. Serialized to the wire as
/// `{ "error": <message> }` with a 400 status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("bet must be greater than zero")]
    NonPositiveBet,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("recipient is required")]
    MissingRecipient,
    #[error("a color choice is required for roulette")]
    MissingChoice,
    #[error("amount too large")]
    AmountTooLarge,
}

#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Balance of the account when the simulator starts.
    pub initial_balance: u64,
    /// Seed for the settlement RNG. When set, outcomes are reproducible.
    pub seed: Option<u64>,
    /// Artificial latency applied to every state-changing request,
    /// useful for exercising the client's in-flight gate.
    pub settle_delay: Option<Duration>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1_000,
            seed: None,
            settle_delay: None,
        }
    }
}

/// A settled wager kept for inspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub game: Game,
    pub bet: u64,
    pub win: u64,
    pub result: Outcome,
}

struct Ledger {
    balance: u64,
    rng: StdRng,
    transactions: Vec<TransactionRecord>,
    games: Vec<GameRecord>,
}

pub struct Simulator {
    config: SimulatorConfig,
    ledger: Mutex<Ledger>,
    transfer_requests: AtomicU64,
    play_requests: AtomicU64,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ledger = Ledger {
            balance: config.initial_balance,
            rng,
            transactions: Vec::new(),
            games: Vec::new(),
        };
        Self {
            config,
            ledger: Mutex::new(ledger),
            transfer_requests: AtomicU64::new(0),
            play_requests: AtomicU64::new(0),
        }
    }

    pub fn settle_delay(&self) -> Option<Duration> {
        self.config.settle_delay
    }

    /// Current authoritative balance.
    pub fn balance(&self) -> u64 {
        self.ledger.lock().unwrap().balance
    }

    /// Number of transfer requests that reached settlement (accepted or
    /// rejected). Lets tests prove a client never sent a duplicate.
    pub fn transfer_requests(&self) -> u64 {
        self.transfer_requests.load(Ordering::Relaxed)
    }

    /// Number of play requests that reached settlement.
    pub fn play_requests(&self) -> u64 {
        self.play_requests.load(Ordering::Relaxed)
    }

    /// Wagers settled so far, oldest first.
    pub fn games(&self) -> Vec<GameRecord> {
        self.ledger.lock().unwrap().games.clone()
    }

    /// Most recent transactions, newest first.
    pub fn history(&self) -> Vec<TransactionRecord> {
        let ledger = self.ledger.lock().unwrap();
        ledger
            .transactions
            .iter()
            .rev()
            .take(HISTORY_DEPTH)
            .cloned()
            .collect()
    }

    /// Apply a deposit or withdrawal and return the new balance.
    pub fn apply_transfer(&self, request: &TransferRequest) -> Result<u64, Rejection> {
        self.transfer_requests.fetch_add(1, Ordering::Relaxed);
        if request.amount == 0 {
            return Err(Rejection::NonPositiveAmount);
        }

        let mut ledger = self.ledger.lock().unwrap();
        let description = match request.kind {
            TransferKind::Deposit => {
                // Wire-supplied amounts must never panic the handler.
                ledger.balance = ledger
                    .balance
                    .checked_add(request.amount)
                    .ok_or(Rejection::AmountTooLarge)?;
                format!("deposit of {}", request.amount)
            }
            TransferKind::Withdraw => {
                let recipient = request
                    .recipient
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(Rejection::MissingRecipient)?;
                if ledger.balance < request.amount {
                    return Err(Rejection::InsufficientFunds);
                }
                ledger.balance -= request.amount;
                format!("withdrawal of {} to {}", request.amount, recipient)
            }
        };

        let record = TransactionRecord {
            kind: request.kind,
            amount: request.amount,
            description,
            created_at: unix_now(),
        };
        info!(
            kind = %record.kind,
            amount = record.amount,
            balance = ledger.balance,
            "transfer settled"
        );
        ledger.transactions.push(record);
        Ok(ledger.balance)
    }

    /// Settle a wager and return the outcome with the new balance.
    pub fn apply_wager(&self, request: &WagerRequest) -> Result<WagerResult, Rejection> {
        self.play_requests.fetch_add(1, Ordering::Relaxed);
        if request.bet == 0 {
            return Err(Rejection::NonPositiveBet);
        }

        let mut ledger = self.ledger.lock().unwrap();
        if ledger.balance < request.bet {
            return Err(Rejection::InsufficientFunds);
        }

        let (win, outcome) = match request.game {
            Game::Slots => {
                let reels = games::spin_reels(&mut ledger.rng);
                let win = games::slots_win(&reels, request.bet).ok_or(Rejection::AmountTooLarge)?;
                let outcome = Outcome::Reels {
                    reels: reels.iter().map(|s| s.to_string()).collect(),
                };
                (win, outcome)
            }
            Game::Roulette => {
                let choice = request.choice.ok_or(Rejection::MissingChoice)?;
                let number = games::spin_wheel(&mut ledger.rng);
                let color = games::wheel_color(number);
                let win =
                    games::roulette_win(choice, number, request.bet).ok_or(Rejection::AmountTooLarge)?;
                (win, Outcome::Spin { number, color })
            }
        };

        // The bet leaves the balance and the gross win (if any) comes back.
        ledger.balance = (ledger.balance - request.bet)
            .checked_add(win)
            .ok_or(Rejection::AmountTooLarge)?;
        ledger.games.push(GameRecord {
            game: request.game,
            bet: request.bet,
            win,
            result: outcome.clone(),
        });
        info!(
            game = %request.game,
            bet = request.bet,
            win,
            balance = ledger.balance,
            "wager settled"
        );

        Ok(WagerResult {
            balance: ledger.balance,
            win,
            result: outcome,
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
