use std::sync::Mutex;

use bank_core::{core::bank_manager::BankManager, storage::json_backend::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated manager backed by a unique directory for each test.
pub fn setup_test_env() -> BankManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base)).expect("create json storage backend");
    BankManager::open(Box::new(storage)).expect("open bank manager")
}

/// Registers and logs in a ready-to-use test user.
pub fn setup_logged_in_user(manager: &mut BankManager, username: &str) -> bank_core::domain::User {
    let email = format!("{username}@example.com");
    manager
        .register("Test User", username, &email, "secret1", "secret1")
        .expect("register test user");
    manager.login(username, "secret1").expect("login test user")
}
