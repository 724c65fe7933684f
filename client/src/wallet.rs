//! Wallet orchestration: deposits, withdrawals, and balance refresh.

use crate::{
    session::{Operation, SessionStore},
    Error, LedgerClient, Result,
};
use royale_types::{TransferKind, TransferRequest};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct WalletController {
    session: Arc<SessionStore>,
    ledger: LedgerClient,
}

impl WalletController {
    pub fn new(session: Arc<SessionStore>, ledger: LedgerClient) -> Self {
        Self { session, ledger }
    }

    /// Fetch the authoritative balance into the store.
    ///
    /// On failure the store keeps its previous value; if no balance
    /// was ever fetched it stays unknown rather than presenting zero
    /// as truth. Read-only, so it does not take the in-flight gate.
    pub async fn refresh_balance(&self) -> Result<u64> {
        match self.ledger.balance().await {
            Ok(balance) => {
                self.session.set_balance(balance);
                Ok(balance)
            }
            Err(err) => {
                warn!(error = %err, "balance refresh failed");
                Err(err)
            }
        }
    }

    /// Deposit `amount`; on success the store holds the new
    /// authoritative balance, which is also returned.
    pub async fn deposit(&self, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let Some(_guard) = self.session.begin_operation(Operation::Deposit) else {
            return Err(Error::OperationPending);
        };

        let request = TransferRequest {
            kind: TransferKind::Deposit,
            amount,
            recipient: None,
        };
        self.settle(request).await
    }

    /// Withdraw `amount` to `recipient`.
    ///
    /// The amount-versus-balance check is a fast reject for UX only
    /// (skipped while the balance is unknown); the authority remains
    /// the one that actually enforces funds.
    pub async fn withdraw(&self, amount: u64, recipient: &str) -> Result<u64> {
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(Error::MissingRecipient);
        }
        if let Some(balance) = self.session.balance() {
            if amount > balance {
                return Err(Error::InsufficientFunds {
                    requested: amount,
                    balance,
                });
            }
        }
        let Some(_guard) = self.session.begin_operation(Operation::Withdraw) else {
            return Err(Error::OperationPending);
        };

        let request = TransferRequest {
            kind: TransferKind::Withdraw,
            amount,
            recipient: Some(recipient.to_string()),
        };
        self.settle(request).await
    }

    async fn settle(&self, request: TransferRequest) -> Result<u64> {
        match self.ledger.transfer(&request).await {
            Ok(balance) => {
                // Authoritative overwrite; no client-side arithmetic.
                self.session.set_balance(balance);
                info!(kind = %request.kind, amount = request.amount, balance, "transfer settled");
                Ok(balance)
            }
            Err(err) => {
                // Balance stays at its last known-good value.
                warn!(kind = %request.kind, amount = request.amount, error = %err, "transfer failed");
                Err(err)
            }
        }
    }
}
