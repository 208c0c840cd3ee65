//! Session state store
//!
//! Process-wide holder of the authenticated user. The session guard is the
//! only writer; everything else reads.

use rbdash_core::User;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    user: Option<User>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Store `user`, returning the previous one
    pub fn commit(&mut self, user: User) -> Option<User> {
        self.user.replace(user)
    }

    pub fn clear(&mut self) -> Option<User> {
        self.user.take()
    }
}
