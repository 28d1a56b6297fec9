#![doc(test(attr(deny(warnings))))]

//! Bank Core provides the identity, ledger, and session primitives behind a
//! local-first demo banking application. All state lives in one JSON snapshot
//! on disk; every mutating operation rewrites the snapshot in full.

pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bank Core tracing initialized.");
    });
}
