//! Report explanation endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::explain::Explanation;
use crate::models::ReportForm;

#[derive(Serialize)]
pub struct ExplainResponse {
    /// Display string, sections joined by line breaks.
    pub text: String,
    #[serde(flatten)]
    pub sections: Explanation,
}

/// `POST /api/explain` — validate the submitted form and explain it.
pub async fn explain(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ReportForm>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(form) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let report = form.validate()?;

    let sections = ctx.explainer.explain(&report);
    Ok(Json(ExplainResponse {
        text: sections.render(),
        sections,
    }))
}

