use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::models::Role;
use crate::shared::AppError;

/// JWT claims identifying the player behind a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub iss: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

impl Claims {
    /// Fails with 403 unless the token carries the given role
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "Forbidden: This action requires {} privileges",
            role
        )))
    }
}
