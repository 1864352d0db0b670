// Declare modules to be part of the library crate

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod state;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;

pub use config::{ConfigError, ServerConfig};
pub use state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the HTTP router over `state`.
///
/// Requests without an `X-Request-ID` get a fresh UUID; the id is echoed on
/// the response and recorded on the request span.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Routes for /employees
        .route("/employees", get(handlers::list_employees).post(handlers::register_employee))
        .route("/employees/search", get(handlers::search_employees))
        .route("/employees/verify", post(handlers::verify_employee))
        .route("/employees/match", post(handlers::match_employee))
        .route(
            "/employees/:employee_id",
            get(handlers::get_employee)
                .patch(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        // Routes for /clock
        .route("/clock/:employee_id/in", post(handlers::clock_in))
        .route("/clock/:employee_id/out", post(handlers::clock_out))
        .route("/clock/:employee_id/status", get(handlers::clock_status))
        .route("/clock/:employee_id/entries", get(handlers::shift_history))
        // Add middleware; the last layer added runs first
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");
            info_span!("http_request", method = %request.method(), uri = %request.uri(), request_id)
        }))
        .layer(SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuid))
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .with_state(state)
}
