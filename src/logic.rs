//! Core lifecycle behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Orchestrating generation (validate -> defaults -> collaborator -> store)
//!   - The export side-effect (download counter)
//!   - The welcome email trigger
//!
//! Nothing here retries: every collaborator failure is logged with the
//! operation that hit it, then surfaced once.

use tracing::{error, info, instrument};

use crate::domain::{new_worksheet_id, Worksheet};
use crate::error::{Error, Result};
use crate::protocol::WorksheetRequest;
use crate::state::AppState;

/// Validate the request, apply defaults, call the generator, store the
/// result and hand it back.
#[instrument(level = "info", skip(state, req), fields(topic = %req.topic))]
pub async fn generate_worksheet(state: &AppState, req: WorksheetRequest) -> Result<Worksheet> {
  // Topic is the one required field, checked before defaulting and before
  // any collaborator is touched.
  if req.topic.trim().is_empty() {
    return Err(Error::Validation("Topic is required".into()));
  }
  let spec = req.with_defaults();

  let Some(oa) = &state.openai else {
    error!(target: "worksheet", topic = %spec.topic, "Generation requested but no OpenAI client is configured");
    return Err(Error::Generation("generator not configured (missing OPENAI_API_KEY)".into()));
  };

  info!(target: "worksheet", topic = %spec.topic, count = spec.question_count, "Generating worksheet");
  let mut ws = match oa.generate_worksheet(&state.prompts, &spec).await {
    Ok(ws) => ws,
    Err(e) => {
      error!(target: "worksheet", topic = %spec.topic, error = %e, "Worksheet generation failed");
      return Err(Error::Generation(e));
    }
  };

  // The generator's record is authoritative, its id included; allocate one
  // only if it somehow arrived blank.
  if ws.id.is_empty() {
    ws.id = new_worksheet_id();
  }
  state.store.create(ws.clone()).await?;
  info!(target: "worksheet", id = %ws.id, questions = ws.questions.len(), "Worksheet stored");
  Ok(ws)
}

/// Look up the record, bump its download counter, return the updated record.
/// No document is rendered here; printing happens client-side.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn export_worksheet(state: &AppState, id: &str) -> Result<Worksheet> {
  let ws = state.store.increment_downloads(id).await?;
  info!(target: "worksheet", %id, downloads = ws.downloads, "Worksheet exported");
  Ok(ws)
}

/// Fire the welcome email. Failures here are surfaced to the caller of this
/// one request and never touch worksheet state.
#[instrument(level = "info", skip(state, email, name), fields(name_len = name.len()))]
pub async fn send_welcome(state: &AppState, email: &str, name: &str) -> Result<()> {
  if email.trim().is_empty() {
    return Err(Error::Validation("Email is required".into()));
  }

  let Some(mailer) = &state.mailer else {
    error!(target: "worksheet_backend", "Welcome email requested but no Resend client is configured");
    return Err(Error::Notification("mailer not configured (missing RESEND_API_KEY)".into()));
  };

  match mailer.send_welcome(&state.email_templates, email.trim(), name).await {
    Ok(()) => {
      info!(target: "worksheet_backend", "Welcome email sent");
      Ok(())
    }
    Err(e) => {
      error!(target: "worksheet_backend", error = %e, "Welcome email send failed");
      Err(Error::Notification(e))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{EmailTemplates, Prompts};
  use crate::domain::{Difficulty, Worksheet};
  use crate::store::WorksheetStore;
  use std::sync::Arc;

  /// State with no collaborators configured, for exercising the paths that
  /// must fail (or succeed) before any external call happens.
  fn offline_state() -> AppState {
    AppState {
      store: Arc::new(WorksheetStore::new()),
      openai: None,
      mailer: None,
      prompts: Prompts::default(),
      email_templates: EmailTemplates::default(),
    }
  }

  fn stored(id: &str) -> Worksheet {
    Worksheet {
      id: id.into(),
      title: "Photosynthesis basics".into(),
      status: "draft".into(),
      topic: "Photosynthesis".into(),
      subject: "biology".into(),
      grade_level: "7".into(),
      difficulty: Difficulty::Easy,
      language: "en".into(),
      questions: vec![],
      downloads: 0,
    }
  }

  #[tokio::test]
  async fn empty_topic_fails_validation_before_the_generator() {
    let state = offline_state();
    // With no generator configured, reaching the collaborator step would
    // yield Generation -- seeing Validation proves the check runs first.
    let err = generate_worksheet(&state, WorksheetRequest::default()).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), "Topic is required");
  }

  #[tokio::test]
  async fn whitespace_topic_is_still_missing() {
    let state = offline_state();
    let req = WorksheetRequest { topic: "   ".into(), ..Default::default() };
    let err = generate_worksheet(&state, req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[tokio::test]
  async fn unconfigured_generator_surfaces_a_generation_error() {
    let state = offline_state();
    let req = WorksheetRequest { topic: "Photosynthesis".into(), ..Default::default() };
    let err = generate_worksheet(&state, req).await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));
  }

  #[tokio::test]
  async fn export_bumps_downloads_each_time() {
    let state = offline_state();
    state.store.create(stored("w1")).await.unwrap();

    assert_eq!(export_worksheet(&state, "w1").await.unwrap().downloads, 1);
    assert_eq!(export_worksheet(&state, "w1").await.unwrap().downloads, 2);
  }

  #[tokio::test]
  async fn export_of_unknown_id_is_not_found() {
    let state = offline_state();
    let err = export_worksheet(&state, "nope").await.unwrap_err();
    assert!(matches!(err, Error::WorksheetNotFound));
  }

  #[tokio::test]
  async fn empty_email_fails_validation_before_the_mailer() {
    let state = offline_state();
    // Same ordering argument as the topic check: a reached mailer step would
    // yield Notification here.
    let err = send_welcome(&state, "", "Ann").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), "Email is required");
  }

  #[tokio::test]
  async fn unconfigured_mailer_surfaces_a_notification_error() {
    let state = offline_state();
    let err = send_welcome(&state, "ann@example.com", "Ann").await.unwrap_err();
    assert!(matches!(err, Error::Notification(_)));
  }
}
