use axum::{http::header::SET_COOKIE, response::IntoResponse};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key},
};
use time::{Duration, OffsetDateTime};

use crate::{
    session::{COOKIE_TOKEN, Token, set_session_cookie},
    user::UserID,
};

/// An encrypted session cookie for `user_id` that expires in five minutes.
#[track_caller]
pub(crate) fn session_cookie(key: &Key, user_id: UserID) -> Cookie<'static> {
    let token = Token {
        user_id,
        expires_at: OffsetDateTime::now_utc() + Duration::minutes(5),
    };
    let response = set_session_cookie(PrivateCookieJar::new(key.clone()), &token).into_response();

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .expect("Could not convert to str")
        .to_owned();
    let encrypted = Cookie::parse(set_cookie).expect("Could not parse Set-Cookie header");

    Cookie::new(COOKIE_TOKEN, encrypted.value().to_owned())
}
