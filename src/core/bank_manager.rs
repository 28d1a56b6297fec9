use uuid::Uuid;

use crate::core::services::{IdentityService, LedgerService};
use crate::core::session::Session;
use crate::core::state::BankState;
use crate::domain::{Account, AccountType, Transaction, User};
use crate::errors::{BankError, Result};
use crate::storage::StorageBackend;

/// Facade that coordinates bank state, the active session, and persistence.
///
/// Every mutating operation applies to the in-memory snapshot and then
/// rewrites the persisted blob in full, mirroring the read-modify-write
/// cycle of the storage layout. Methods take `&mut self`, so a single
/// manager instance serializes all writers; wrap it in a `Mutex` to share
/// it across threads.
pub struct BankManager {
    state: BankState,
    session: Session,
    storage: Box<dyn StorageBackend>,
}

impl BankManager {
    /// Loads the persisted snapshot (or starts empty) and resumes the
    /// previously adopted identity when its pointer still resolves.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        let state = storage.load_or_default()?;
        let mut session = Session::new();
        if let Some(user_id) = state.active_session {
            match state.user(user_id) {
                Some(user) => session.adopt(user.clone()),
                None => tracing::warn!(%user_id, "persisted session points at unknown user"),
            }
        }
        Ok(Self {
            state,
            session,
            storage,
        })
    }

    /// Registers a new user (with their default savings account) and
    /// persists the snapshot. Does not adopt the identity; callers log in
    /// explicitly afterwards.
    pub fn register(
        &mut self,
        full_name: &str,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        let user = IdentityService::register(
            &mut self.state,
            full_name,
            username,
            email,
            password,
            confirm_password,
        )?;
        self.persist()?;
        Ok(user)
    }

    /// Verifies credentials, adopts the identity, and persists the session
    /// pointer.
    pub fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let user = IdentityService::login(&self.state, username, password)?;
        self.session.adopt(user.clone());
        self.state.active_session = Some(user.id);
        self.state.touch();
        self.persist()?;
        Ok(user)
    }

    /// Terminates the session and clears the persisted pointer.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.session.current() {
            tracing::info!(user_id = %user.id, "logout");
        }
        self.session.terminate();
        self.state.active_session = None;
        self.state.touch();
        self.persist()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    /// Opens an additional account for the active user.
    pub fn create_account(&mut self, kind: AccountType) -> Result<Account> {
        let user_id = self.require_session()?;
        let account = LedgerService::create_account(&mut self.state, user_id, kind);
        self.persist()?;
        Ok(account)
    }

    pub fn deposit(
        &mut self,
        account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        let record = LedgerService::deposit(&mut self.state, account_id, amount, description)?;
        self.persist()?;
        Ok(record)
    }

    pub fn withdraw(
        &mut self,
        account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        let record = LedgerService::withdraw(&mut self.state, account_id, amount, description)?;
        self.persist()?;
        Ok(record)
    }

    pub fn transfer(
        &mut self,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<(Transaction, Transaction)> {
        let records = LedgerService::transfer(
            &mut self.state,
            from_account_id,
            to_account_id,
            amount,
            description,
        )?;
        self.persist()?;
        Ok(records)
    }

    /// Accounts owned by the active user, in insertion order.
    pub fn accounts(&self) -> Result<Vec<&Account>> {
        let user_id = self.require_session()?;
        Ok(LedgerService::accounts_for(&self.state, user_id))
    }

    /// The active user's transaction history, newest first, truncated to
    /// `limit` entries when given.
    pub fn recent_transactions(&self, limit: Option<usize>) -> Result<Vec<&Transaction>> {
        let user_id = self.require_session()?;
        let mut records = LedgerService::transactions_for_user(&self.state, user_id);
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    /// One account's transaction history, newest first.
    pub fn account_transactions(&self, account_id: Uuid) -> Vec<&Transaction> {
        LedgerService::transactions_for_account(&self.state, account_id)
    }

    pub fn state(&self) -> &BankState {
        &self.state
    }

    fn require_session(&self) -> Result<Uuid> {
        self.session
            .current()
            .map(|user| user.id)
            .ok_or(BankError::NoActiveSession)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.state)
    }
}
