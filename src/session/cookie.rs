//! Reading the session cookie set by the auth platform.

use axum_extra::extract::PrivateCookieJar;

use crate::session::{SessionError, Token};

/// The name of the encrypted cookie holding the JSON encoded [Token].
pub(crate) const COOKIE_TOKEN: &str = "token";

/// Decrypt and decode the session token in `jar`.
///
/// # Errors
///
/// Returns:
/// - [SessionError::CookieMissing] if there is no token cookie, or it could not be decrypted.
/// - [SessionError::InvalidToken] if the cookie does not hold a valid token.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, SessionError> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(SessionError::CookieMissing)?;

    serde_json::from_str(cookie.value_trimmed()).map_err(|error| {
        tracing::warn!("Could not decode session token: {error}");
        SessionError::InvalidToken
    })
}

/// Add a session cookie for `token` to the jar, the way the auth platform does.
#[cfg(test)]
pub(crate) fn set_session_cookie(jar: PrivateCookieJar, token: &Token) -> PrivateCookieJar {
    use axum_extra::extract::cookie::{Cookie, SameSite};

    let token_string = serde_json::to_string(token).expect("Could not serialize token");

    jar.add(
        Cookie::build((COOKIE_TOKEN, token_string))
            .expires(token.expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}
