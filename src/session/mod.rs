//! Works out who is signed in from the session cookie.
//!
//! Signing in happens elsewhere: the auth platform encrypts a [Token] into a
//! private cookie with the same secret this app is configured with. This
//! module only reads that cookie.

mod cookie;
mod token;

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::OffsetDateTime;

pub use token::Token;

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_session_cookie};

use crate::user::{CurrentUser, UserID};

/// Reasons a request has no signed in user.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    /// The token cookie is missing, or could not be decrypted with the app's key.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// The token cookie did not contain a valid token.
    #[error("the session token is invalid")]
    InvalidToken,

    /// The token has expired.
    #[error("the session has expired")]
    Expired,
}

/// The user signed in for a request, if any.
///
/// Extracting this never fails: a missing, invalid or expired session is
/// simply no user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionUser(Option<UserID>);

impl SessionUser {
    /// A session with no signed in user.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Read the signed in user from the cookies in `jar` as of `now`.
    pub fn from_cookies(jar: &PrivateCookieJar, now: OffsetDateTime) -> Self {
        match get_user_id(jar, now) {
            Ok(user_id) => Self(Some(user_id)),
            Err(error) => {
                tracing::debug!("No signed in user: {error}");
                Self::anonymous()
            }
        }
    }
}

impl CurrentUser for SessionUser {
    fn current_user(&self) -> Option<UserID> {
        self.0
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        Ok(Self::from_cookies(&jar, OffsetDateTime::now_utc()))
    }
}

fn get_user_id(jar: &PrivateCookieJar, now: OffsetDateTime) -> Result<UserID, SessionError> {
    let token = cookie::get_token_from_cookies(jar)?;

    if token.is_live_at(now) {
        Ok(token.user_id)
    } else {
        Err(SessionError::Expired)
    }
}
