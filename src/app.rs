use std::any::Any;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::errors::ErrorBody;
use crate::logging::panic_message;
use crate::routes::{health, query};
use crate::state::AppState;

pub fn create_app(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/query", query::router())
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin))
}

/// One origin; any method and header from it. Credentials require mirroring
/// rather than wildcards.
fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    // Location and backtrace were already logged by the panic hook
    let description = panic_message(&*panic);
    error!("Request handler panicked: {}", description);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::internal(description))).into_response()
}
