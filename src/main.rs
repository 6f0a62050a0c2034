use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_api::api::handlers::AppState;
use booking_api::kafka::{create_producer, EventPublisher};
use booking_api::repositories::BookingRepository;
use booking_api::services::BookingService;
use booking_api::users::UsersGateway;
use booking_api::{api, create_pool, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,booking_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booking-api");

    // Load configuration
    let config = Config::from_env()?;

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    tracing::info!("Database connection established");

    // Create the Kafka producer once; it is shared by every handler
    let producer = create_producer(&config.kafka)?;
    let publisher = EventPublisher::new(producer, &config.kafka);
    tracing::info!(brokers = %config.kafka.brokers, "Kafka producer created");

    // Users gateway carries the circuit breaker; the service shares it
    let users = UsersGateway::new(&config.users)?;
    let bookings = BookingService::new(BookingRepository::new(pool), users.clone());

    let state = AppState {
        bookings,
        publisher,
        users,
    };
    let app = api::create_router(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting API server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
