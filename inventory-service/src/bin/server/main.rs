use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use inventory_service::config::Config;
use inventory_service::domain::auth::service::AuthService;
use inventory_service::domain::user::service::UserService;
use inventory_service::inbound::http::router::create_router;
use inventory_service::inbound::http::router::AppState;
use inventory_service::outbound::notifications::TracingNotificationSender;
use inventory_service::outbound::repositories::PostgresResetTokenRepository;
use inventory_service::outbound::repositories::PostgresUserRepository;

const TOKEN_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "inventory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = Arc::new(TokenCodec::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let reset_token_repository = Arc::new(PostgresResetTokenRepository::new(pg_pool));
    let notification_sender = Arc::new(TracingNotificationSender::new());

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        reset_token_repository,
        notification_sender,
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&token_codec),
        config.jwt.expiration_seconds,
    ));

    let sweep_service = Arc::clone(&user_service);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(TOKEN_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_service.sweep_expired_tokens().await {
                tracing::error!(error = %e, "Reset token sweep failed");
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(AppState {
        user_service,
        auth_service,
        token_codec,
    });
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
