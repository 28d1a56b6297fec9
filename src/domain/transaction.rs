use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// An immutable record of one balance change on one account.
///
/// Transfers produce two linked records, one per side, each carrying the
/// counterparty's account number and its own post-operation balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub balance_after: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        account_id: Uuid,
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        balance_after: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            description: description.into(),
            balance_after,
            counterparty: None,
            timestamp: Utc::now(),
        }
    }

    /// Attaches the other side's account number (transfer records only).
    pub fn with_counterparty(mut self, number: impl Into<String>) -> Self {
        self.counterparty = Some(number.into());
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Enumerates the balance-changing operation kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind increases the account balance.
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}
