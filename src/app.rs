// src/app.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::auth::services::AuthService;
use crate::config::{Config, CorsOrigins};
use crate::handlers::auth::{login, signup};
use crate::handlers::health::health;
use crate::handlers::records::{list_audit, list_users};
use crate::handlers::views::{view_audit, view_users};

/// JSON endpoints, mounted under `/api`
pub fn api_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/users", get(list_users))
        .route("/audit", get(list_audit))
        .with_state(service)
}

/// HTML renderings of the two tables
pub fn view_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/view-users", get(view_users))
        .route("/view-audit", get(view_audit))
        .with_state(service)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| {
                    HeaderValue::from_str(origin)
                        .inspect_err(|_| tracing::warn!(%origin, "ignoring invalid CORS origin"))
                        .ok()
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        }
    }
}

/// Construit l'application complète
pub fn build_router(service: Arc<AuthService>, config: &Config) -> Router {
    let static_dir = &config.static_dir;

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes(Arc::clone(&service)))
        .merge(view_routes(service))
        .route_service("/", ServeFile::new(static_dir.join("login.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors_layer(&config.cors_origins))
        // Middleware global de tracing
        .layer(TraceLayer::new_for_http())
}
