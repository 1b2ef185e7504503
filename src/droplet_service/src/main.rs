use droplet_adapters::{
    Argon2PasswordHasher, DropletConfig, JwtTokenAuthority, PostgresAccountStore,
    PostgresUserStore,
};
use droplet_axum::AppState;
use droplet_service::{DropletService, tracing::init_tracing};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    dotenvy::dotenv().ok();
    let config = DropletConfig::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url.expose_secret())
        .await?;
    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    let users = PostgresUserStore::new(pg_pool.clone());
    let accounts = PostgresAccountStore::new(pg_pool);
    let hasher = Argon2PasswordHasher;
    let tokens = JwtTokenAuthority::new(&config.jwt_secret)?;

    let state = AppState::new(users, accounts, hasher, tokens);
    let service = DropletService::new(state);

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    service.run_standalone(listener).await?;

    Ok(())
}
