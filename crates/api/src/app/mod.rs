//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: course lookup on top of the content store
//! - `tree.rs`: content serialization and tree walking
//! - `routes/`: HTTP routes + handlers
//! - `pagination.rs`: page-number pagination of list responses
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use courseware_auth::StaticKeyValidator;
use courseware_infra::{AppConfig, ContentStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod tree;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig, store: Arc<dyn ContentStore>) -> Router {
    let validator = StaticKeyValidator::new(config.api_key.clone(), config.debug);
    let auth_state = middleware::AuthState {
        validator: Arc::new(validator),
    };
    let context_state = middleware::ContextState {
        public_base_url: config.public_base_url.clone(),
        base_path: config.base_path.clone(),
    };

    let services = Arc::new(services::AppServices::new(
        store,
        services::Limits::from(config),
    ));

    // The list answers at the mount point with and without a trailing slash.
    let api = if config.base_path.is_empty() {
        routes::router()
    } else {
        Router::new()
            .route(
                &format!("{}/", config.base_path),
                get(routes::courses::list_courses),
            )
            .nest(&config.base_path, routes::router())
    };

    // Protected routes: require a valid API key.
    let protected = api
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::api_key_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_middleware))
                .layer(axum::middleware::from_fn_with_state(
                    context_state,
                    middleware::request_context_middleware,
                )),
        )
}
