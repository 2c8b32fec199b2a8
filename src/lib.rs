use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{routing::get, Router};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod repositories;
mod utils;
mod validation;

use repositories::cliente::{ClienteRepository, PgClienteRepository};

#[derive(Clone)]
pub struct AppState {
    pub clientes: Arc<dyn ClienteRepository>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/clientes",
            get(handlers::cliente::get_enabled).post(handlers::cliente::create),
        )
        .route(
            "/clientes/search/:nombre",
            get(handlers::cliente::search_by_name),
        )
        .route(
            "/clientes/:id",
            get(handlers::cliente::get_by_id)
                .put(handlers::cliente::update)
                .patch(handlers::cliente::disable)
                .delete(handlers::cliente::delete),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    cors.allow_origin(AllowOrigin::list(origins))
}

pub async fn axum() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::Config::from_env().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.pg.poolminsize)
        .max_connections(config.pg.poolmaxsize)
        .connect(config.database_url().as_ref())
        .await
        .context("failed to create pool database connection")?;

    if config.pg.run_migrations {
        sqlx::migrate!()
            .run(&pool)
            .await
            .context("failed to run database migrations")?;
    }

    let state = AppState {
        clientes: Arc::new(PgClienteRepository::new(pool)),
    };

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors.allowed_origins)),
    );

    let addr = config
        .server_addr()
        .parse::<SocketAddr>()
        .context("invalid server address")?;

    tracing::info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::repositories::memory::MemoryClienteRepository;

    fn app(allowed_origins: &[&str]) -> Router {
        let state = AppState {
            clientes: Arc::new(MemoryClienteRepository::default()),
        };
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| origin.to_string())
            .collect::<Vec<_>>();

        router(state).layer(cors_layer(&allowed_origins))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/clientes")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(&[]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = app(&["http://localhost:4200"])
            .oneshot(preflight("http://localhost:4200"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:4200"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let response = app(&["http://localhost:4200"])
            .oneshot(preflight("http://evil.test"))
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_cors_wildcard() {
        let response = app(&["*"])
            .oneshot(preflight("http://anywhere.test"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
