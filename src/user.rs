//! The identity of the owner of expense rows.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// Users are owned by the external auth platform, this crate only ever sees
/// their IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Something that knows who is signed in.
///
/// `None` means nobody is signed in. Callers treat that as a reason to do
/// nothing, never as an error.
pub trait CurrentUser {
    /// The signed in user, if any.
    fn current_user(&self) -> Option<UserID>;
}

impl CurrentUser for Option<UserID> {
    fn current_user(&self) -> Option<UserID> {
        *self
    }
}

impl CurrentUser for UserID {
    fn current_user(&self) -> Option<UserID> {
        Some(*self)
    }
}
