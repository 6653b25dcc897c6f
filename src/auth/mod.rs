// Public API - what other modules can use
pub use middleware::jwt_auth;
pub use password::{
    hash_password, hash_password_off_runtime, verify_password, verify_password_off_runtime,
};
pub use token::{TokenConfig, TOKEN_ISSUER};
pub use types::Claims;

// Internal modules
mod middleware;
mod password;
mod token;
mod types;
