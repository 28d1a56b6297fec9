use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

const ACCOUNT_NUMBER_LEN: usize = 10;

/// A single balance-bearing account owned by one user.
///
/// `number` is a random digit string used for display and transfer
/// counterparty references only; it is not validated for global uniqueness.
/// Internal references always use `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub number: String,
    pub kind: AccountType,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a zero-balance account with a freshly generated number.
    pub fn new(user_id: Uuid, kind: AccountType) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            number: generate_account_number(),
            kind,
            balance: 0.0,
            created_at: Utc::now(),
        }
    }

    /// Display form of the account number with all but the last four digits
    /// masked, e.g. `**** **** 1234`.
    pub fn masked_number(&self) -> String {
        let tail: String = self
            .number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("**** **** {}", tail)
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Checking,
    Business,
}

impl AccountType {
    /// Fixed display interest rate, in percent.
    pub fn interest_rate(&self) -> f64 {
        match self {
            AccountType::Savings => 2.5,
            AccountType::Checking => 1.0,
            AccountType::Business => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings Account",
            AccountType::Checking => "Checking Account",
            AccountType::Business => "Business Account",
        }
    }
}

fn generate_account_number() -> String {
    let mut rng = rand::thread_rng();
    (0..ACCOUNT_NUMBER_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
