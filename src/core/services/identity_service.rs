//! Registration, login, and identity lookups.

use crate::core::password;
use crate::core::services::LedgerService;
use crate::core::state::BankState;
use crate::domain::{AccountType, User};
use crate::errors::{BankError, Result};

const MIN_PASSWORD_LEN: usize = 6;

/// Validated operations over the registered-user collection.
pub struct IdentityService;

impl IdentityService {
    /// Registers a new user and opens their default savings account.
    ///
    /// Uniqueness checks are case-sensitive exact matches on the trimmed
    /// username and email.
    pub fn register(
        state: &mut BankState,
        full_name: &str,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        let username = username.trim();
        let email = email.trim();

        if password != confirm_password {
            return Err(BankError::PasswordMismatch);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(BankError::WeakPassword {
                minimum: MIN_PASSWORD_LEN,
            });
        }
        if state.user_by_username(username).is_some() {
            return Err(BankError::DuplicateUsername(username.to_string()));
        }
        if state.user_by_email(email).is_some() {
            return Err(BankError::DuplicateEmail(email.to_string()));
        }

        let password_hash = password::hash(password)?;
        let user = User::new(full_name.trim(), username, email, password_hash);
        let user_id = state.add_user(user.clone());
        LedgerService::create_account(state, user_id, AccountType::Savings);
        tracing::info!(%user_id, username, "registered new user");
        Ok(user)
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// Unknown usernames and wrong passwords both map to
    /// `InvalidCredentials`; the two cases are indistinguishable on purpose.
    pub fn login(state: &BankState, username: &str, password: &str) -> Result<User> {
        let user = state
            .user_by_username(username.trim())
            .ok_or(BankError::InvalidCredentials)?;
        if password::verify(password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, username = %user.username, "login succeeded");
            Ok(user.clone())
        } else {
            Err(BankError::InvalidCredentials)
        }
    }

    /// Exact-match lookup by username.
    pub fn find_by_username<'a>(state: &'a BankState, username: &str) -> Option<&'a User> {
        state.user_by_username(username)
    }

    /// Exact-match lookup by email.
    pub fn find_by_email<'a>(state: &'a BankState, email: &str) -> Option<&'a User> {
        state.user_by_email(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountType;

    fn register_alice(state: &mut BankState) -> User {
        IdentityService::register(
            state,
            "Alice Example",
            "alice",
            "alice@example.com",
            "secret1",
            "secret1",
        )
        .expect("registration should succeed")
    }

    #[test]
    fn register_creates_user_and_default_savings_account() {
        let mut state = BankState::new();
        let user = register_alice(&mut state);

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "secret1");

        let accounts = state.accounts_for(user.id);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].kind, AccountType::Savings);
        assert_eq!(accounts[0].balance, 0.0);
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let mut state = BankState::new();
        let err = IdentityService::register(
            &mut state,
            "Bob",
            "bob",
            "bob@example.com",
            "secret1",
            "secret2",
        )
        .unwrap_err();
        assert!(matches!(err, BankError::PasswordMismatch));
        assert!(state.users.is_empty());
    }

    #[test]
    fn register_rejects_short_password() {
        let mut state = BankState::new();
        let err = IdentityService::register(
            &mut state,
            "Bob",
            "bob",
            "bob@example.com",
            "abc",
            "abc",
        )
        .unwrap_err();
        assert!(matches!(err, BankError::WeakPassword { minimum: 6 }));
    }

    #[test]
    fn register_rejects_duplicate_username_and_email() {
        let mut state = BankState::new();
        register_alice(&mut state);

        let err = IdentityService::register(
            &mut state,
            "Alice Two",
            "alice",
            "other@example.com",
            "secret1",
            "secret1",
        )
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateUsername(ref name) if name == "alice"));

        let err = IdentityService::register(
            &mut state,
            "Alice Two",
            "alice2",
            "alice@example.com",
            "secret1",
            "secret1",
        )
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateEmail(ref email) if email == "alice@example.com"));

        assert_eq!(state.users.len(), 1);
    }

    #[test]
    fn username_uniqueness_is_case_sensitive() {
        let mut state = BankState::new();
        register_alice(&mut state);
        let second = IdentityService::register(
            &mut state,
            "Alice Upper",
            "Alice",
            "upper@example.com",
            "secret1",
            "secret1",
        );
        assert!(second.is_ok(), "`Alice` and `alice` are distinct usernames");
    }

    #[test]
    fn login_accepts_valid_credentials_only() {
        let mut state = BankState::new();
        let user = register_alice(&mut state);

        let logged_in = IdentityService::login(&state, "alice", "secret1").unwrap();
        assert_eq!(logged_in.id, user.id);

        let err = IdentityService::login(&state, "alice", "wrong-password").unwrap_err();
        assert!(matches!(err, BankError::InvalidCredentials));
        let err = IdentityService::login(&state, "nobody", "secret1").unwrap_err();
        assert!(matches!(err, BankError::InvalidCredentials));
    }

    #[test]
    fn lookups_match_exactly() {
        let mut state = BankState::new();
        let user = register_alice(&mut state);
        assert_eq!(
            IdentityService::find_by_username(&state, "alice").map(|u| u.id),
            Some(user.id)
        );
        assert!(IdentityService::find_by_username(&state, "ali").is_none());
        assert_eq!(
            IdentityService::find_by_email(&state, "alice@example.com").map(|u| u.id),
            Some(user.id)
        );
    }
}
