pub mod auth;
pub mod rate_limit;
pub mod security;

pub use auth::{require_auth, AuthUser};
pub use rate_limit::{rate_limit, FixedWindowLimiter};
pub use security::security_headers;
