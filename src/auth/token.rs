use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument, warn};

use super::types::Claims;
use crate::player::models::PlayerModel;
use crate::shared::AppError;

pub const TOKEN_ISSUER: &str = "game-scores-api";

// JWT timestamps are unsigned; anything before the epoch cannot be encoded
fn unix_timestamp(at: DateTime<Utc>) -> Result<usize, AppError> {
    usize::try_from(at.timestamp())
        .map_err(|_| AppError::JwtError(format!("Timestamp {} is out of range", at)))
}

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_hours: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Creates a signed HS256 token for the given player
    #[instrument(skip(self, player), fields(player_id = %player.id))]
    pub fn create_token(&self, player: &PlayerModel) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = TimeDelta::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                warn!(
                    expiration_hours = self.expiration_hours,
                    "Token expiration is out of range"
                );
                AppError::JwtError("Token expiration is out of range".to_string())
            })?;
        let exp = unix_timestamp(expires_at)?;

        debug!(
            expiration_hours = self.expiration_hours,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = Claims {
            user_id: player.id,
            username: player.username.clone(),
            role: player.role,
            iss: TOKEN_ISSUER.to_string(),
            exp,
            iat: unix_timestamp(now)?,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Validates signature, expiry and issuer, returning the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        debug!("Decoding and validating JWT token");

        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| {
            debug!(
                username = %data.claims.username,
                user_id = %data.claims.user_id,
                role = %data.claims.role,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::Unauthorized("Invalid token".to_string())
        })
    }
}
