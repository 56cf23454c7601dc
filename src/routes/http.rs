//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! or the store. Each handler is instrumented; failures map to the JSON error
//! envelope through `Error`'s `IntoResponse`.

use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::{extract::{Path, State}, Json};
use tracing::{info, instrument};

use crate::domain::WorksheetPatch;
use crate::error::Error;
use crate::logic;
use crate::options;
use crate::protocol::*;
use crate::state::AppState;

/// Malformed or non-JSON bodies become the 400 envelope instead of axum's
/// plain-text rejection.
fn bad_body(_: JsonRejection) -> Error {
  Error::Validation("Invalid request body".into())
}

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_worksheet(
  State(state): State<Arc<AppState>>,
  body: Result<Json<WorksheetRequest>, JsonRejection>,
) -> Result<Json<WorksheetOut>, Error> {
  let Json(req) = body.map_err(bad_body)?;
  let worksheet = logic::generate_worksheet(&state, req).await?;
  info!(target: "worksheet", id = %worksheet.id, "HTTP worksheet generated");
  Ok(Json(WorksheetOut { success: true, worksheet }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_worksheets(
  State(state): State<Arc<AppState>>,
) -> Json<WorksheetListOut> {
  let worksheets = state.store.list().await;
  info!(target: "worksheet", count = worksheets.len(), "HTTP worksheets listed");
  Json(WorksheetListOut { success: true, worksheets })
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_worksheet(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<WorksheetOut>, Error> {
  let worksheet = state.store.get(&id).await?;
  Ok(Json(WorksheetOut { success: true, worksheet }))
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_update_worksheet(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  body: Result<Json<WorksheetPatch>, JsonRejection>,
) -> Result<Json<WorksheetOut>, Error> {
  let Json(patch) = body.map_err(bad_body)?;
  let worksheet = state.store.update(&id, patch).await?;
  info!(target: "worksheet", %id, "HTTP worksheet updated");
  Ok(Json(WorksheetOut { success: true, worksheet }))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_worksheet(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<MessageOut>, Error> {
  state.store.delete(&id).await?;
  info!(target: "worksheet", %id, "HTTP worksheet deleted");
  Ok(Json(MessageOut { success: true, message: "Worksheet deleted".into() }))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_export_worksheet(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ExportOut>, Error> {
  let worksheet = logic::export_worksheet(&state, &id).await?;
  // Rendering is deferred to the client; we only account for the download.
  Ok(Json(ExportOut {
    success: true,
    message: "Use browser print dialog for PDF export".into(),
    worksheet,
  }))
}

#[instrument(level = "info")]
pub async fn http_get_options() -> Json<OptionsOut> {
  Json(OptionsOut {
    success: true,
    subjects: options::SUBJECTS,
    grades: options::GRADES,
    question_types: options::QUESTION_TYPES,
    difficulties: options::DIFFICULTIES,
  })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_send_welcome(
  State(state): State<Arc<AppState>>,
  body: Result<Json<WelcomeIn>, JsonRejection>,
) -> Result<Json<MessageOut>, Error> {
  let Json(input) = body.map_err(bad_body)?;
  logic::send_welcome(&state, &input.email, &input.name).await?;
  Ok(Json(MessageOut { success: true, message: "Welcome email sent successfully".into() }))
}
