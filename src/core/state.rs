use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, Transaction, User};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Upper bound on the global transaction log; oldest entries are evicted
/// first once exceeded. A storage-growth bound inherited from the source
/// design, not a performance optimization.
pub const TRANSACTION_RETENTION: usize = 1000;

/// The full persisted snapshot: users, accounts, the transaction log, and the
/// active-session pointer. Mirrors the four top-level collections of the
/// storage layout.
///
/// Transactions are kept newest first. `active_session` holds a user id, not
/// a user snapshot, so stale copies of identity data cannot survive a reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub active_session: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BankState::schema_version_default")]
    pub schema_version: u8,
}

impl BankState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            users: Vec::new(),
            accounts: Vec::new(),
            transactions: Vec::new(),
            active_session: None,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_user(&mut self, user: User) -> Uuid {
        let id = user.id;
        self.users.push(user);
        self.touch();
        id
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    /// Appends a transaction record at the head of the log and enforces the
    /// retention bound.
    pub fn record_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        self.transactions.truncate(TRANSACTION_RETENTION);
        self.touch();
        id
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    /// Accounts owned by `user_id`, in insertion order.
    pub fn accounts_for(&self, user_id: Uuid) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|account| account.user_id == user_id)
            .collect()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for BankState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountType, TransactionKind};

    fn sample_transaction(account_id: Uuid, amount: f64) -> Transaction {
        Transaction::new(
            account_id,
            TransactionKind::Deposit,
            amount,
            "Deposit transaction",
            amount,
        )
    }

    #[test]
    fn record_transaction_keeps_newest_first() {
        let mut state = BankState::new();
        let account_id = Uuid::new_v4();
        state.record_transaction(sample_transaction(account_id, 1.0));
        state.record_transaction(sample_transaction(account_id, 2.0));
        assert_eq!(state.transactions[0].amount, 2.0);
        assert_eq!(state.transactions[1].amount, 1.0);
    }

    #[test]
    fn retention_evicts_oldest_entries() {
        let mut state = BankState::new();
        let account_id = Uuid::new_v4();
        for i in 0..(TRANSACTION_RETENTION + 25) {
            state.record_transaction(sample_transaction(account_id, i as f64));
        }
        assert_eq!(state.transaction_count(), TRANSACTION_RETENTION);
        // Newest entry survives at the head; the 25 oldest are gone.
        assert_eq!(
            state.transactions[0].amount,
            (TRANSACTION_RETENTION + 24) as f64
        );
        assert_eq!(
            state.transactions.last().unwrap().amount,
            25.0
        );
    }

    #[test]
    fn accounts_for_preserves_insertion_order() {
        let mut state = BankState::new();
        let user_id = Uuid::new_v4();
        let first = state.add_account(Account::new(user_id, AccountType::Savings));
        let second = state.add_account(Account::new(user_id, AccountType::Checking));
        state.add_account(Account::new(Uuid::new_v4(), AccountType::Business));

        let owned = state.accounts_for(user_id);
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].id, first);
        assert_eq!(owned[1].id, second);
    }
}
