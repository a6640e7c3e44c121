use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the remote quote service, without a trailing slash
    pub api_base_url: String,
    /// Base URL of the remote auth service, without a trailing slash
    pub auth_api_base_url: String,
    /// Marks the session cookie `Secure` when running in production
    pub secure_cookies: bool,
    pub session_secret: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_base_url: "http://localhost:3000".to_string(),
            auth_api_base_url: "http://localhost:3000".to_string(),
            secure_cookies: false,
            session_secret: None,
            request_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                config.port = port_num;
            }
        }

        if let Ok(base_url) = env::var("API_BASE_URL") {
            config.api_base_url = normalize_base_url(&base_url);
        }

        // The auth endpoints live on the quote service unless pointed elsewhere
        config.auth_api_base_url = match env::var("AUTH_API_BASE_URL") {
            Ok(base_url) => normalize_base_url(&base_url),
            Err(_) => config.api_base_url.clone(),
        };

        if let Ok(app_env) = env::var("APP_ENV") {
            config.secure_cookies = app_env.eq_ignore_ascii_case("production");
        }

        if let Ok(secret) = env::var("SESSION_SECRET") {
            if !secret.is_empty() {
                config.session_secret = Some(secret);
            }
        }

        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECONDS") {
            if let Ok(timeout_num) = timeout.parse::<u64>() {
                config.request_timeout_seconds = timeout_num;
            }
        }

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
