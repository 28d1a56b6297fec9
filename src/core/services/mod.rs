pub mod identity_service;
pub mod ledger_service;

pub use identity_service::IdentityService;
pub use ledger_service::LedgerService;
