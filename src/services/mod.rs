// Remote API clients, session cookie codec and HTML rendering

pub mod auth_client;
pub mod password_strength;
pub mod quote_client;
pub mod session_cookie;
pub mod views;
