pub mod bank_manager;
pub mod password;
pub mod services;
pub mod session;
pub mod state;

pub use bank_manager::BankManager;
pub use session::Session;
pub use state::{BankState, CURRENT_SCHEMA_VERSION, TRANSACTION_RETENTION};
