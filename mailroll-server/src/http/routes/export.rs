//! CSV export endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Email;

const CSV_HEADER: &str = "Id,EmailName";

/// Quote a field only when it would otherwise break the row (RFC 4180).
fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}

/// Render emails as CSV: header row, then one `id,name` line per email.
pub fn render_csv(emails: &[Email]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + emails.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for email in emails {
        out.push_str(&email.id.to_string());
        out.push(',');
        out.push_str(&csv_field(&email.name));
        out.push('\n');
    }
    out
}

/// GET /export - download all emails as CSV
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "emails.csv attachment", body = String, content_type = "text/csv")
    ),
    tag = "Export"
)]
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let emails = state.emails.list().await?;
    tracing::info!(rows = emails.len(), "exporting emails");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=emails.csv",
            ),
        ],
        render_csv(&emails),
    ))
}

/// Export routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/export", get(export_csv))
}
