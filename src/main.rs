use classhub::classhub_config::ServerConfig;
use classhub::classhub_db::{MIGRATOR, Store, init_db_pool};
use classhub::logging::init_tracing;
use classhub::router::init_router;
use classhub::state::init_app_state;
use dotenvy::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        error!("DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = MIGRATOR.run(&pool).await {
        error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let state = init_app_state(pool);
    if let Err(e) = state.store.ping().await {
        error!(error = %e, "Database ping failed");
        std::process::exit(1);
    }
    info!("Connected to database");

    if !state.payment_config.is_configured() {
        warn!("STRIPE_SECRET_KEY is not set, payment intents will fail");
    }

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let app = init_router(state);

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %address, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }

    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
