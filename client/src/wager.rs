//! Wager orchestration: precondition checks, the in-flight gate, and
//! reconciliation of the settled result into the session store.

use crate::{
    session::{Operation, SessionStore},
    Error, LedgerClient, Result,
};
use royale_types::{Color, Game, WagerRequest, WagerResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, warn};

/// Minimum time the "playing" state stays visible, however fast the
/// authority answers. Purely cosmetic; it joins with the network
/// completion rather than delaying it.
pub const MIN_SPIN_HOLD: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct WagerController {
    session: Arc<SessionStore>,
    ledger: LedgerClient,
    spin_hold: Duration,
}

impl WagerController {
    pub fn new(session: Arc<SessionStore>, ledger: LedgerClient) -> Self {
        Self {
            session,
            ledger,
            spin_hold: MIN_SPIN_HOLD,
        }
    }

    /// Override the minimum spin hold (tests shorten it).
    pub fn with_spin_hold(mut self, spin_hold: Duration) -> Self {
        self.spin_hold = spin_hold;
        self
    }

    /// Place a bet on `game` and reconcile the settled result.
    ///
    /// Local precondition failures never issue a request: the bet must
    /// be positive and within the known balance (betting the whole
    /// balance is allowed), roulette requires a color `choice` (slots
    /// ignores one), and no other operation may be in flight. The
    /// authority re-checks funds server-side; the local check is only
    /// a fast reject.
    pub async fn place_wager(
        &self,
        game: Game,
        bet: u64,
        choice: Option<Color>,
    ) -> Result<WagerResult> {
        if bet == 0 {
            return Err(Error::InvalidAmount);
        }
        if game == Game::Roulette && choice.is_none() {
            return Err(Error::MissingChoice);
        }
        let balance = self.session.balance().ok_or(Error::BalanceUnknown)?;
        if bet > balance {
            return Err(Error::InsufficientFunds {
                requested: bet,
                balance,
            });
        }
        let Some(_guard) = self.session.begin_operation(Operation::Wager) else {
            return Err(Error::OperationPending);
        };

        // Never show a stale result while the new spin is in flight.
        self.session.clear_last_result();

        let request = WagerRequest {
            game,
            bet,
            choice: match game {
                Game::Slots => None,
                Game::Roulette => choice,
            },
        };

        // Start the cosmetic hold before the request so it runs
        // alongside the network exchange, not after it.
        let hold = time::sleep(self.spin_hold);
        tokio::pin!(hold);

        let settled = match self.ledger.play(&request).await {
            Ok(result) => {
                // Authoritative overwrite; no client-side arithmetic.
                // Applied as soon as the response lands; only the gate
                // release waits out the hold.
                self.session.set_balance(result.balance);
                self.session.set_last_result(result.clone());
                debug!(
                    game = %game,
                    bet,
                    win = result.win,
                    balance = result.balance,
                    "wager settled"
                );
                Ok(result)
            }
            Err(err) => {
                // Balance stays at its last known-good value.
                warn!(game = %game, bet, error = %err, "wager failed");
                Err(err)
            }
        };

        // The remaining hold delays only the guard drop (gate release).
        hold.await;
        settled
    }
}
