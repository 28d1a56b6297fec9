use crate::domain::User;

/// Tracks the currently authenticated identity for the life of the process.
///
/// The session itself has no durability contract; `BankManager` persists a
/// pointer (the user id) so that reopening the store resumes the same
/// identity without re-authenticating. That trade-off favors convenience
/// over security and is inherited from the source design.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the active identity.
    pub fn adopt(&mut self, user: User) {
        self.current = Some(user);
    }

    /// Clears the active identity.
    pub fn terminate(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
