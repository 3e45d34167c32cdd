//! Form option lists for the client.

use axum::Json;
use serde::Serialize;

use crate::form::FormOptions;
use crate::models::ReportForm;

#[derive(Serialize)]
pub struct FormResponse {
    #[serde(flatten)]
    pub options: FormOptions,
    pub defaults: ReportForm,
}

/// `GET /api/form` — selectable labels, help texts and default values.
pub async fn options() -> Json<FormResponse> {
    Json(FormResponse {
        options: FormOptions::build(),
        defaults: ReportForm::default(),
    })
}
