use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A[a-z0-9_+\-.]+@[a-z0-9\-]+(\.[a-z0-9\-]+)*\.[a-z]+\z")
        .expect("email pattern is a valid regex")
});

pub struct Env {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
    pub refresh_token_expiration: u64,
    pub user_cache_ttl: u64,
    pub database_url: String,
    pub redis_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

fn required(key: &str) -> String {
    std::env::var(key)
        .unwrap_or_else(|_| panic!("{key} must be set in .env file or environment variable"))
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| panic!("{key} has an invalid value: {raw}")),
        Err(_) => default,
    }
}

impl Env {
    fn new() -> Self {
        Env {
            jwt_secret: required("SECRET_KEY"),
            access_token_expiration: parsed_or("ACCESS_TOKEN_EXPIRATION", 900),
            refresh_token_expiration: parsed_or("REFRESH_TOKEN_EXPIRATION", 604_800),
            user_cache_ttl: parsed_or("USER_CACHE_TTL", 3600),
            database_url: required("DATABASE_URL"),
            redis_url: required("REDIS_URL"),
            frontend_url: parsed_or("FRONTEND_URL", "http://localhost:5173".to_string()),
            ip: parsed_or("IP", "127.0.0.1".to_string()),
            port: parsed_or("PORT", 8080),
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// Token and cache settings handed to `UserService`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
    pub refresh_token_expiration: u64,
    pub user_cache_ttl: u64,
}

impl From<&Env> for AuthConfig {
    fn from(env: &Env) -> Self {
        AuthConfig {
            jwt_secret: env.jwt_secret.clone(),
            access_token_expiration: env.access_token_expiration,
            refresh_token_expiration: env.refresh_token_expiration,
            user_cache_ttl: env.user_cache_ttl,
        }
    }
}
