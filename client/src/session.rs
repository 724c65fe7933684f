//! Session state store: the single source of truth the lobby UI renders
//! from.
//!
//! All session state lives inside one [`watch`] channel, so every
//! mutation publishes a fresh [`SessionSnapshot`] to subscribers and
//! presentation stays a pure reaction to store changes. The balance is
//! never computed locally; it is only overwritten with what the ledger
//! authority returned.

use royale_types::WagerResult;
use std::fmt;
use tokio::sync::watch;

/// The three state-changing operations that share the in-flight gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
    Wager,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit => write!(f, "deposit"),
            Operation::Withdraw => write!(f, "withdraw"),
            Operation::Wager => write!(f, "wager"),
        }
    }
}

/// Everything the UI needs to render, published on every change.
///
/// `balance` is `None` until the first authoritative balance arrives;
/// a failed initial fetch is therefore distinguishable from a genuine
/// zero balance and is never presented as one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub balance: Option<u64>,
    pub pending: Option<Operation>,
    pub last_result: Option<WagerResult>,
}

pub struct SessionStore {
    state: watch::Sender<SessionSnapshot>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(SessionSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn balance(&self) -> Option<u64> {
        self.state.borrow().balance
    }

    pub fn pending(&self) -> Option<Operation> {
        self.state.borrow().pending
    }

    pub fn last_result(&self) -> Option<WagerResult> {
        self.state.borrow().last_result.clone()
    }

    /// Observe snapshot changes. The receiver starts with the current
    /// snapshot already marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Overwrite the balance with an authoritative value. Always safe.
    pub fn set_balance(&self, balance: u64) {
        self.state.send_modify(|state| state.balance = Some(balance));
    }

    pub fn set_last_result(&self, result: WagerResult) {
        self.state
            .send_modify(|state| state.last_result = Some(result));
    }

    pub fn clear_last_result(&self) {
        self.state.send_modify(|state| state.last_result = None);
    }

    /// Claim the in-flight gate for `operation`.
    ///
    /// Returns `None` (and changes nothing) while another operation is
    /// pending. On success the returned guard holds the gate and
    /// releases it on drop, so every controller exit path, including
    /// errors, clears the flag.
    pub fn begin_operation(&self, operation: Operation) -> Option<OperationGuard<'_>> {
        let mut claimed = false;
        self.state.send_if_modified(|state| {
            if state.pending.is_none() {
                state.pending = Some(operation);
                claimed = true;
                true
            } else {
                false
            }
        });
        claimed.then_some(OperationGuard { store: self })
    }

    fn end_operation(&self) {
        self.state.send_modify(|state| state.pending = None);
    }
}

/// Holds the pending-operation gate; dropping it releases the gate.
pub struct OperationGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.store.end_operation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_types::{Color, Outcome};

    fn sample_result() -> WagerResult {
        WagerResult {
            balance: 900,
            win: 0,
            result: Outcome::Spin {
                number: 4,
                color: Color::Black,
            },
        }
    }

    #[test]
    fn gate_admits_one_operation_at_a_time() {
        let store = SessionStore::new();
        let guard = store.begin_operation(Operation::Deposit);
        assert!(guard.is_some());
        assert_eq!(store.pending(), Some(Operation::Deposit));

        // Every kind is blocked while the gate is held.
        assert!(store.begin_operation(Operation::Deposit).is_none());
        assert!(store.begin_operation(Operation::Withdraw).is_none());
        assert!(store.begin_operation(Operation::Wager).is_none());
        assert_eq!(store.pending(), Some(Operation::Deposit));

        drop(guard);
        assert_eq!(store.pending(), None);
        assert!(store.begin_operation(Operation::Wager).is_some());
    }

    #[test]
    fn guard_releases_on_early_exit() {
        let store = SessionStore::new();
        fn fallible(store: &SessionStore) -> Result<(), ()> {
            let _guard = store.begin_operation(Operation::Withdraw).ok_or(())?;
            Err(())
        }
        assert!(fallible(&store).is_err());
        assert_eq!(store.pending(), None);
    }

    #[test]
    fn balance_starts_unknown_and_is_overwritten() {
        let store = SessionStore::new();
        assert_eq!(store.balance(), None);
        store.set_balance(1_000);
        assert_eq!(store.balance(), Some(1_000));
        store.set_balance(700);
        assert_eq!(store.balance(), Some(700));
    }

    #[test]
    fn last_result_set_and_cleared() {
        let store = SessionStore::new();
        store.set_last_result(sample_result());
        assert_eq!(store.last_result(), Some(sample_result()));
        store.clear_last_result();
        assert_eq!(store.last_result(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = SessionStore::new();
        let mut updates = store.subscribe();

        store.set_balance(500);
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().balance, Some(500));

        let guard = store.begin_operation(Operation::Wager).unwrap();
        updates.changed().await.unwrap();
        assert_eq!(
            updates.borrow_and_update().pending,
            Some(Operation::Wager)
        );

        drop(guard);
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().pending, None);
    }
}
