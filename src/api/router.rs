//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Middleware stack (outermost → innermost):
//! 1. Request tracing → 2. CORS → 3. Access log

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::CorsOrigins;
use crate::lookup::TreatmentLookupService;

/// Build the API router around a lookup service.
pub fn ayush_api_router(lookup: Arc<TreatmentLookupService>, cors: &CorsOrigins) -> Router {
    build_router(ApiContext::new(lookup), cors_layer(cors))
}

fn build_router(ctx: ApiContext, cors: CorsLayer) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost).
    Router::new()
        .route("/ayush/search", get(endpoints::search::search))
        .route("/ayush/conditions", get(endpoints::conditions::list))
        .route("/api/health", get(endpoints::health::check))
        .fallback(unknown_route)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// The frontend is served from another origin, so lookups need CORS.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}
