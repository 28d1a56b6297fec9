pub mod account;
pub mod common;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountType};
pub use common::Identifiable;
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
