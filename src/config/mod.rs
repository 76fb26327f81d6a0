use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_url: String,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u32,
    pub auth_window_secs: u64,
    pub auth_max_requests: u32,
}

const DEFAULT_JWT_SECRET: &str = "your_super_secret_jwt_key_here_change_in_production";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("NODE_ENV").or_else(|_| env::var("APP_ENV")).as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        Self {
            environment,
            server: ServerConfig {
                port: env_parse("PORT", 7000),
                frontend_url: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:4200".to_string()),
                max_body_bytes: 10 * 1024 * 1024, // 10MB
            },
            database: DatabaseConfig {
                host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env_parse("DB_PORT", 5432),
                user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
                password: env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string()),
                name: env::var("DB_NAME").unwrap_or_else(|_| "calendar".to_string()),
                max_connections: env_parse("DB_MAX_CONNECTIONS", 20),
                connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", 2),
            },
            security: SecurityConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
                jwt_expires_in_secs: env_parse("JWT_EXPIRES_IN_SECS", 3600),
                bcrypt_cost: env_parse("BCRYPT_COST", 10),
            },
            rate_limit: RateLimitConfig {
                window_secs: env_parse("RATE_LIMIT_WINDOW_SECS", 900),
                max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS", 100),
                auth_window_secs: env_parse("AUTH_RATE_LIMIT_WINDOW_SECS", 900),
                auth_max_requests: env_parse("AUTH_RATE_LIMIT_MAX_REQUESTS", 15),
            },
        }
    }

    /// Production refuses to start on placeholder credentials.
    pub fn validate(&self) -> Result<(), String> {
        if !self.is_production() {
            return Ok(());
        }

        let mut missing = Vec::new();
        if env::var("JWT_SECRET").is_err() {
            missing.push("JWT_SECRET");
        }
        if env::var("DB_PASSWORD").is_err() {
            missing.push("DB_PASSWORD");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ))
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn env_parse<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
