//! Explainer router.
//!
//! `GET /` serves the form page; JSON endpoints are nested under `/api/`
//! and marked `Cache-Control: no-store` since responses echo patient
//! selections.

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::page;
use crate::api::types::ApiContext;

/// Build the explainer router.
pub fn explainer_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/form", get(endpoints::form::options))
        .route("/glossary", get(endpoints::glossary::list))
        .route("/explain", post(endpoints::explain::explain))
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(page::form_page))
        .nest("/api", api)
        .fallback(endpoints::not_found)
}
