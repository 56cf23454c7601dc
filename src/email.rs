//! Minimal Resend client for transactional email.
//!
//! One-shot formatted sends over the Resend REST API; no delivery state is
//! kept here. Success is Resend answering 200/201.
//!
//! NOTE: We never log the API key, and recipient addresses stay out of logs.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{instrument, info};

use crate::config::EmailTemplates;
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone)]
pub struct Resend {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub from: String,
}

#[derive(Serialize)]
struct EmailRequest {
  from: String,
  to: Vec<String>,
  subject: String,
  html: String,
}

/// Render the welcome subject/body for a recipient. Empty names get a
/// friendly fallback so the greeting never reads "Hey !".
pub fn render_welcome(templates: &EmailTemplates, name: &str) -> (String, String) {
  let name = if name.trim().is_empty() { "there" } else { name.trim() };
  let subject = templates.welcome_subject.clone();
  let html = fill_template(&templates.welcome_html, &[("name", name)]);
  (subject, html)
}

impl Resend {
  /// Construct the client if we find RESEND_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("RESEND_API_KEY").ok()?;
    let base_url =
      std::env::var("RESEND_BASE_URL").unwrap_or_else(|_| "https://api.resend.com".into());
    let from = std::env::var("RESEND_FROM_EMAIL")
      .unwrap_or_else(|_| "Worksheets <onboarding@resend.dev>".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, from })
  }

  /// Send one HTML email through Resend.
  #[instrument(level = "info", skip(self, to, subject, html), fields(subject_len = subject.len(), html_len = html.len()))]
  pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
    let url = format!("{}/emails", self.base_url);
    let req = EmailRequest {
      from: self.from.clone(),
      to: vec![to.to_string()],
      subject: subject.to_string(),
      html: html.to_string(),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "worksheet-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      let msg = extract_resend_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("Resend HTTP {}: {}", status, msg));
    }

    info!(target: "worksheet_backend", status = %status, "Email accepted by Resend");
    Ok(())
  }

  /// Render and send the welcome email.
  #[instrument(level = "info", skip(self, templates, to, name), fields(name_len = name.len()))]
  pub async fn send_welcome(
    &self,
    templates: &EmailTemplates,
    to: &str,
    name: &str,
  ) -> Result<(), String> {
    let (subject, html) = render_welcome(templates, name);
    self.send(to, &subject, &html).await
  }
}

/// Try to extract a clean error message from a Resend error body.
fn extract_resend_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EObj>(body) {
    Ok(e) => Some(e.message),
    Err(_) => None,
  }
}
