use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for identity, ledger, session, and storage layers.
///
/// Every variant below `NoActiveSession` is a recoverable validation failure;
/// callers are expected to surface it and carry on. Nothing in the core
/// panics past its own boundary.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {minimum} characters")]
    WeakPassword { minimum: usize },
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(f64),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },
    #[error("Source and destination accounts must differ")]
    SameAccount,
    #[error("No active session")]
    NoActiveSession,
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Credential error: {0}")]
    Credential(String),
}

pub type Result<T> = StdResult<T, BankError>;

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        BankError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        BankError::Storage(err.to_string())
    }
}
