//! Session cookies (accessToken / refreshToken) の発行とクリア
//!
//! - Web クライアントは httpOnly cookie でトークンを保持する
//! - logout は値を空にして Max-Age=0 で上書きするだけ (server 側の状態は無い)
//!
//! Cookie attributes:
//! - HttpOnly, SameSite=Strict, Path=/
//! - Secure は production のみ (ローカル開発は http)

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::services::auth::token_issuer::IssuedTokenPair;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Cookie attributes decided once at startup from Config.
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    pub secure: bool,
    pub access_max_age_seconds: u64,
    pub refresh_max_age_seconds: u64,
}

fn session_cookie(
    name: &'static str,
    value: String,
    policy: &CookiePolicy,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(SameSite::Strict)
        .max_age(max_age)
        .build()
}

/// Set both session cookies from a freshly issued pair.
pub fn issue(jar: CookieJar, policy: &CookiePolicy, pair: &IssuedTokenPair) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE,
        pair.access_token.clone(),
        policy,
        Duration::seconds(policy.access_max_age_seconds as i64),
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        pair.refresh_token.clone(),
        policy,
        Duration::seconds(policy.refresh_max_age_seconds as i64),
    ))
}

/// Clear both session cookies: empty value, Max-Age=0.
pub fn clear(jar: CookieJar, policy: &CookiePolicy) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE,
        String::new(),
        policy,
        Duration::ZERO,
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        String::new(),
        policy,
        Duration::ZERO,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CookiePolicy {
        CookiePolicy {
            secure: false,
            access_max_age_seconds: 900,
            refresh_max_age_seconds: 3600,
        }
    }

    fn pair() -> IssuedTokenPair {
        IssuedTokenPair {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "Bearer",
            expires_in: 900,
        }
    }

    #[test]
    fn issue_sets_both_cookies_with_session_attributes() {
        let jar = issue(CookieJar::new(), &policy(), &pair());

        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "access");
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Strict));
        assert_eq!(access.max_age(), Some(Duration::seconds(900)));
        assert_eq!(access.secure(), Some(false));

        let refresh = jar.get(REFRESH_COOKIE).unwrap();
        assert_eq!(refresh.value(), "refresh");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn clear_overwrites_with_empty_value_and_zero_max_age() {
        let jar = clear(CookieJar::new(), &policy());

        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.http_only(), Some(true));
        }
    }

    #[test]
    fn secure_flag_follows_the_policy() {
        let mut p = policy();
        p.secure = true;
        let jar = issue(CookieJar::new(), &p, &pair());
        assert_eq!(jar.get(ACCESS_COOKIE).unwrap().secure(), Some(true));
    }
}
