//! Maintenance command: wipes all scores and games and every non-admin player.
//!
//! Usage: DATABASE_URL=postgres://... cargo run --bin reset

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_scores::{player::models::Role, AppConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reset=info,game_scores=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    let Some(database_url) = config.database_url else {
        error!("DATABASE_URL must be set, in-memory data has nothing to reset");
        std::process::exit(1);
    };

    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    if let Err(e) = reset(&pool).await {
        error!(error = %e, "Reset failed, nothing was deleted");
        std::process::exit(1);
    }
}

async fn reset(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let scores = sqlx::query("DELETE FROM scores").execute(&mut *tx).await?;
    let games = sqlx::query("DELETE FROM games").execute(&mut *tx).await?;
    let players = sqlx::query("DELETE FROM players WHERE role <> $1")
        .bind(Role::Admin.as_ref())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        scores = scores.rows_affected(),
        games = games.rows_affected(),
        players = players.rows_affected(),
        "Database reset complete"
    );
    Ok(())
}
