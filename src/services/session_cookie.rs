use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use time::Duration;

pub const SESSION_COOKIE_NAME: &str = "auth_token";

/// Stores the bearer token issued by the auth service in a signed,
/// HTTP-only cookie. The token itself is never inspected.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    secure: bool,
    max_age: Duration,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            max_age: Duration::weeks(1),
        }
    }

    /// Cookie carrying `token` with the session attributes applied.
    pub fn build(&self, token: impl Into<String>) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, token.into()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.max_age)
            .build()
    }

    /// Empty value with `Max-Age=0` so the browser discards the session.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.build("");
        cookie.make_removal();
        cookie
    }

    pub fn store(&self, jar: SignedCookieJar, token: impl Into<String>) -> SignedCookieJar {
        jar.add(self.build(token))
    }

    /// Always emits the clearing cookie, whether or not a session was sent.
    pub fn clear(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.add(self.removal())
    }

    /// The token from a correctly signed, non-empty session cookie.
    pub fn token(&self, jar: &SignedCookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.trim().is_empty())
    }
}

/// Signing key from the configured secret, or a throwaway one.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret.map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            tracing::warn!(
                "SESSION_SECRET must be at least 64 bytes; using a random key, sessions will not survive a restart"
            );
            Key::generate()
        }
        None => {
            tracing::warn!("SESSION_SECRET not set; using a random key, sessions will not survive a restart");
            Key::generate()
        }
    }
}
