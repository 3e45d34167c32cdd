//! "Learn more" panel: the condition term table.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::explain::GlossaryEntry;

#[derive(Serialize)]
pub struct GlossaryResponse {
    pub entries: Vec<GlossaryEntry>,
    pub markdown: String,
}

/// `GET /api/glossary`
pub async fn list(State(ctx): State<ApiContext>) -> Json<GlossaryResponse> {
    Json(GlossaryResponse {
        entries: ctx.explainer.glossary(),
        markdown: ctx.explainer.glossary_markdown(),
    })
}
