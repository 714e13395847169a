use crate::config::Config;
use crate::error::StackTrace;
use crate::handler::{AppModule, CatalogDatabase};
use crate::route::CatalogRouter;
use driver::database::{MemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

const DEFAULT_LOG_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let config = Config::load()?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    match config.postgres_url.as_deref() {
        Some(url) => {
            let database = PostgresDatabase::connect(url).await?;
            serve(config.bind, database).await?;
        }
        None => {
            tracing::info!("POSTGRES_URL is not set, serving the seeded in-memory catalog");
            serve(config.bind, MemoryDatabase::seeded()?).await?;
        }
    }

    Ok(())
}

async fn serve<D: CatalogDatabase>(
    bind: SocketAddr,
    database: D,
) -> error_stack::Result<(), KernelError> {
    let router = axum::Router::<AppModule<D>>::new()
        .route_catalog()
        .layer(CorsLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(AppModule::new(database));

    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {bind}"))?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
