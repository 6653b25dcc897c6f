use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{PlayerModel, Role},
    repository::PlayerRepository,
    types::{
        LoginRequest, LoginResponse, RegisterRequest, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
        MIN_USERNAME_LENGTH,
    },
};
use crate::{
    auth::{hash_password_off_runtime, verify_password_off_runtime, TokenConfig},
    shared::AppError,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Service for player registration and authentication
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
    token_config: TokenConfig,
}

impl PlayerService {
    pub fn new(
        repository: Arc<dyn PlayerRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            repository,
            token_config,
        }
    }

    /// Validates the request and stores a new player with role `player`
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<PlayerModel, AppError> {
        validate_registration(&request)?;

        let password_hash = hash_password_off_runtime(request.password).await?;
        let player = PlayerModel::new(
            request.username,
            request.email,
            password_hash,
            Role::Player,
        );
        self.repository.create_player(&player).await?;

        info!(player_id = %player.id, "Player registered successfully");
        Ok(player)
    }

    /// Checks credentials and issues a bearer token
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let player = self
            .repository
            .find_player_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login attempt for unknown username");
                AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        if !verify_password_off_runtime(request.password, player.password_hash.clone()).await? {
            warn!(player_id = %player.id, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.token_config.create_token(&player)?;
        info!(player_id = %player.id, role = %player.role, "Player logged in");

        Ok(LoginResponse { token })
    }

    /// Creates the admin account unless one with this username already exists.
    /// Returns whether an account was created.
    #[instrument(skip(self, email, password))]
    pub async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if self
            .repository
            .find_player_by_username(username)
            .await?
            .is_some()
        {
            info!("Admin account already exists");
            return Ok(false);
        }

        let admin = PlayerModel::new(
            username.to_string(),
            email.to_string(),
            hash_password_off_runtime(password.to_string()).await?,
            Role::Admin,
        );
        self.repository.create_player(&admin).await?;

        info!(player_id = %admin.id, "Admin account created");
        Ok(true)
    }
}

fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    let username_length = request.username.chars().count();
    if username_length < MIN_USERNAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LENGTH
        )));
    }
    if username_length > MAX_USERNAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Username must not exceed {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::repository::InMemoryPlayerRepository;
    use rstest::rstest;

    fn service() -> (PlayerService, Arc<InMemoryPlayerRepository>) {
        let repository = Arc::new(InMemoryPlayerRepository::new());
        let service = PlayerService::new(repository.clone(), TokenConfig::new("secret", 24));
        (service, repository)
    }

    fn register_request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, repository) = service();

        let player = service
            .register(register_request("alice", "password123"))
            .await
            .unwrap();
        assert_eq!(player.role, Role::Player);
        assert_ne!(player.password_hash, "password123");
        assert_eq!(repository.player_count(), 1);

        let response = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert!(!response.token.is_empty());
    }

    #[rstest]
    #[case("ab".to_string(), "password123")] // username too short
    #[case("x".repeat(65), "password123")] // username too long
    #[case("alice".to_string(), "short")] // password too short
    #[tokio::test]
    async fn test_register_rejects_invalid_input(
        #[case] username: String,
        #[case] password: &str,
    ) {
        let (service, repository) = service();

        let result = service
            .register(register_request(&username, password))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(repository.player_count(), 0);
    }

    #[tokio::test]
    async fn test_register_accepts_boundary_lengths() {
        let (service, _) = service();

        assert!(service
            .register(register_request("abc", "12345678"))
            .await
            .is_ok());
        assert!(service
            .register(register_request(&"y".repeat(64), "12345678"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_requires_email() {
        let (service, _) = service();
        let mut request = register_request("alice", "password123");
        request.email = String::new();

        let result = service.register(request).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (service, _) = service();
        service
            .register(register_request("alice", "password123"))
            .await
            .unwrap();

        let result = service
            .register(register_request("alice", "password123"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_logins_all_succeed() {
        let (service, _) = service();
        service
            .register(register_request("alice", "password123"))
            .await
            .unwrap();
        let service = Arc::new(service);

        let logins: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .login(LoginRequest {
                            username: "alice".to_string(),
                            password: "password123".to_string(),
                        })
                        .await
                })
            })
            .collect();

        for login in logins {
            assert!(!login.await.unwrap().unwrap().token.is_empty());
        }
    }

    #[tokio::test]
    async fn test_login_failures_share_message() {
        let (service, _) = service();
        service
            .register(register_request("alice", "password123"))
            .await
            .unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "nope-nope".to_string(),
            })
            .await;
        let unknown_user = service
            .login(LoginRequest {
                username: "mallory".to_string(),
                password: "password123".to_string(),
            })
            .await;

        for result in [wrong_password, unknown_user] {
            match result {
                Err(AppError::Unauthorized(msg)) => assert_eq!(msg, INVALID_CREDENTIALS),
                other => panic!("expected unauthorized, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let (service, repository) = service();

        assert!(service
            .ensure_admin("admin", "admin@example.com", "admin123!")
            .await
            .unwrap());
        assert!(!service
            .ensure_admin("admin", "admin@example.com", "admin123!")
            .await
            .unwrap());
        assert_eq!(repository.player_count(), 1);

        let admin = repository
            .find_player_by_username("admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
