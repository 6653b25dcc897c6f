use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_scores::{
    auth::TokenConfig,
    player::service::PlayerService,
    AppConfig, AppState, InMemoryGameRepository, InMemoryPlayerRepository,
    InMemoryScoreRepository, PostgresGameRepository, PostgresPlayerRepository,
    PostgresScoreRepository,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "game_scores=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting game scores server");

    let config = AppConfig::from_env().expect("Invalid configuration");
    let token_config = TokenConfig::new(config.jwt_secret.clone(), config.token_expiration_hours);

    // Postgres when DATABASE_URL is set, in-memory otherwise
    let app_state = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url)
                .await
                .expect("Failed to connect to database");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            info!("Connected to database, migrations applied");

            AppState::new(
                Arc::new(PostgresPlayerRepository::new(pool.clone())),
                Arc::new(PostgresGameRepository::new(pool.clone())),
                Arc::new(PostgresScoreRepository::new(pool)),
                token_config,
            )
        }
        None => {
            warn!("DATABASE_URL not set, data will not survive a restart");
            let players = Arc::new(InMemoryPlayerRepository::new());

            AppState::new(
                players.clone(),
                Arc::new(InMemoryGameRepository::new()),
                Arc::new(InMemoryScoreRepository::new(players)),
                token_config,
            )
        }
    };

    if let Some(admin) = &config.admin {
        let service = PlayerService::new(
            Arc::clone(&app_state.player_repository),
            app_state.token_config.clone(),
        );
        service
            .ensure_admin(&admin.username, &admin.email, &admin.password)
            .await
            .expect("Failed to seed admin account");
    }

    let app = game_scores::app(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind server address");
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
