//! Authentication: password hashing, JWT, login.

mod handlers;
mod jwt;
mod service;

pub use handlers::login;
pub use jwt::{Claims, JwtSecret, TokenPurpose, CONFIRMATION_TTL_HOURS, SESSION_TTL_HOURS};
pub use service::AuthAppService;
