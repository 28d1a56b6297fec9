//! Balance-changing operations and ledger queries.
//!
//! Every mutation validates fully before touching state, so a returned error
//! always leaves accounts and the transaction log exactly as they were.

use uuid::Uuid;

use crate::core::state::BankState;
use crate::domain::{Account, AccountType, Transaction, TransactionKind};
use crate::errors::{BankError, Result};

const DEFAULT_DEPOSIT_DESCRIPTION: &str = "Deposit transaction";
const DEFAULT_WITHDRAWAL_DESCRIPTION: &str = "Withdrawal transaction";
const DEFAULT_TRANSFER_DESCRIPTION: &str = "Account transfer";

/// Validated operations over accounts and the transaction log.
pub struct LedgerService;

impl LedgerService {
    /// Opens a new zero-balance account of the given type for `user_id`.
    pub fn create_account(state: &mut BankState, user_id: Uuid, kind: AccountType) -> Account {
        let account = Account::new(user_id, kind);
        state.add_account(account.clone());
        tracing::info!(account_id = %account.id, %user_id, kind = account.kind.label(), "account created");
        account
    }

    /// Credits `amount` to the account and records one deposit transaction.
    pub fn deposit(
        state: &mut BankState,
        account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        validate_amount(amount)?;
        let account = state
            .account_mut(account_id)
            .ok_or_else(|| BankError::AccountNotFound(account_id.to_string()))?;
        account.balance += amount;
        let balance_after = account.balance;

        let record = Transaction::new(
            account_id,
            TransactionKind::Deposit,
            amount,
            description.unwrap_or(DEFAULT_DEPOSIT_DESCRIPTION),
            balance_after,
        );
        state.record_transaction(record.clone());
        tracing::info!(%account_id, amount, balance_after, "deposit applied");
        Ok(record)
    }

    /// Debits `amount` from the account and records one withdrawal
    /// transaction. The balance can never go negative.
    pub fn withdraw(
        state: &mut BankState,
        account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        validate_amount(amount)?;
        let account = state
            .account_mut(account_id)
            .ok_or_else(|| BankError::AccountNotFound(account_id.to_string()))?;
        if account.balance < amount {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        let balance_after = account.balance;

        let record = Transaction::new(
            account_id,
            TransactionKind::Withdrawal,
            amount,
            description.unwrap_or(DEFAULT_WITHDRAWAL_DESCRIPTION),
            balance_after,
        );
        state.record_transaction(record.clone());
        tracing::info!(%account_id, amount, balance_after, "withdrawal applied");
        Ok(record)
    }

    /// Moves `amount` between two distinct accounts, recording a debit on the
    /// source and a credit on the destination. Returns `(debit, credit)`.
    pub fn transfer(
        state: &mut BankState,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: f64,
        description: Option<&str>,
    ) -> Result<(Transaction, Transaction)> {
        if from_account_id == to_account_id {
            return Err(BankError::SameAccount);
        }
        validate_amount(amount)?;

        let from = state
            .account(from_account_id)
            .ok_or_else(|| BankError::AccountNotFound(from_account_id.to_string()))?;
        let from_number = from.number.clone();
        let available = from.balance;
        let to = state
            .account(to_account_id)
            .ok_or_else(|| BankError::AccountNotFound(to_account_id.to_string()))?;
        let to_number = to.number.clone();

        if available < amount {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        // All validation passed; both mutations happen before any record is
        // appended so the two sides always move together.
        let source_balance = {
            let source = state.account_mut(from_account_id).expect("source exists");
            source.balance -= amount;
            source.balance
        };
        let dest_balance = {
            let dest = state.account_mut(to_account_id).expect("destination exists");
            dest.balance += amount;
            dest.balance
        };

        let description = description.unwrap_or(DEFAULT_TRANSFER_DESCRIPTION);
        let debit = Transaction::new(
            from_account_id,
            TransactionKind::TransferOut,
            amount,
            description,
            source_balance,
        )
        .with_counterparty(to_number);
        let credit = Transaction::new(
            to_account_id,
            TransactionKind::TransferIn,
            amount,
            description,
            dest_balance,
        )
        .with_counterparty(from_number);

        state.record_transaction(debit.clone());
        state.record_transaction(credit.clone());
        tracing::info!(
            from = %from_account_id,
            to = %to_account_id,
            amount,
            "transfer applied"
        );
        Ok((debit, credit))
    }

    /// Accounts owned by `user_id`, in insertion order.
    pub fn accounts_for(state: &BankState, user_id: Uuid) -> Vec<&Account> {
        state.accounts_for(user_id)
    }

    /// Transactions on one account, newest first.
    pub fn transactions_for_account(state: &BankState, account_id: Uuid) -> Vec<&Transaction> {
        let mut records: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|txn| txn.account_id == account_id)
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Transactions across all of a user's accounts, newest first.
    pub fn transactions_for_user(state: &BankState, user_id: Uuid) -> Vec<&Transaction> {
        let account_ids: Vec<Uuid> = state
            .accounts_for(user_id)
            .iter()
            .map(|account| account.id)
            .collect();
        let mut records: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|txn| account_ids.contains(&txn.account_id))
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(BankError::InvalidAmount(amount))
    }
}
