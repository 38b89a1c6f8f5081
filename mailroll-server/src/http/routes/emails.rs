//! Email CRUD endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Email, EmailInput};

/// GET /emails - list every registered email
#[utoipa::path(
    get,
    path = "/emails",
    responses(
        (status = 200, description = "All emails", body = Vec<Email>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Emails"
)]
pub async fn list_emails(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Email>>, ApiError> {
    let emails = state.emails.list().await?;
    Ok(Json(emails))
}

/// GET /emails/{id} - get a single email
#[utoipa::path(
    get,
    path = "/emails/{id}",
    params(("id" = i32, Path, description = "Email id")),
    responses(
        (status = 200, description = "The email", body = Email),
        (status = 404, description = "No email with this id")
    ),
    tag = "Emails"
)]
pub async fn get_email(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Email>, ApiError> {
    state
        .emails
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { id })
}

/// POST /emails - register a new email
#[utoipa::path(
    post,
    path = "/emails",
    request_body = EmailInput,
    responses(
        (status = 201, description = "Email created", body = Email,
            headers(("Location" = String, description = "Path of the new email"))),
        (status = 409, description = "Email already registered", body = String)
    ),
    tag = "Emails"
)]
pub async fn create_email(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailInput>,
) -> Result<impl IntoResponse, ApiError> {
    // Fast path; the unique index still decides races between creates.
    if state.emails.exists_by_name(&input.name).await? {
        return Err(ApiError::Conflict { name: input.name });
    }

    let email = state.emails.insert(input).await?;
    tracing::info!(id = email.id, "email created");

    let location = format!("/emails/{}", email.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(email)))
}

/// PUT /emails/{id} - replace the name of an email
#[utoipa::path(
    put,
    path = "/emails/{id}",
    params(("id" = i32, Path, description = "Email id")),
    request_body = EmailInput,
    responses(
        (status = 204, description = "Email updated"),
        (status = 404, description = "No email with this id"),
        (status = 409, description = "Name held by another email", body = String)
    ),
    tag = "Emails"
)]
pub async fn update_email(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<EmailInput>,
) -> Result<StatusCode, ApiError> {
    state.emails.update(id, &input.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /emails/{id} - remove an email
#[utoipa::path(
    delete,
    path = "/emails/{id}",
    params(("id" = i32, Path, description = "Email id")),
    responses(
        (status = 204, description = "Email deleted"),
        (status = 404, description = "No email with this id")
    ),
    tag = "Emails"
)]
pub async fn delete_email(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.emails.delete(id).await?;
    tracing::info!(id, "email deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Email routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/emails", get(list_emails).post(create_email))
        .route(
            "/emails/{id}",
            get(get_email).put(update_email).delete(delete_email),
        )
}
