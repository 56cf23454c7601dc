//! Minimal OpenAI client for worksheet generation.
//!
//! We only call chat.completions and request a strict JSON object.
//! Calls are instrumented and log model names, latencies, and response sizes
//! (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short to
//! avoid PII leaks.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{instrument, info, error};

use crate::config::Prompts;
use crate::domain::{new_worksheet_id, GenerationSpec, Question, Worksheet};
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

/// Shape we ask the model for. Everything else on the worksheet record is
/// ours to fill in.
#[derive(Deserialize)]
struct Gen {
  #[serde(default)]
  title: String,
  #[serde(default)]
  questions: Vec<Question>,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model =
      std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
      max_tokens: None,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "worksheet-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  /// Generate a full worksheet from a defaulted spec. The returned record is
  /// authoritative: id allocated here, status starts at "draft", counters at
  /// zero.
  #[instrument(
    level = "info",
    skip(self, prompts, spec),
    fields(topic = %spec.topic, count = spec.question_count, model = %self.model)
  )]
  pub async fn generate_worksheet(
    &self,
    prompts: &Prompts,
    spec: &GenerationSpec,
  ) -> Result<Worksheet, String> {
    let count = spec.question_count.to_string();
    let types = spec.question_types.iter()
      .map(|t| t.as_str())
      .collect::<Vec<_>>()
      .join(", ");
    let pairs: &[(&str, &str)] = &[
      ("topic", &spec.topic),
      ("subject", &spec.subject),
      ("grade_level", &spec.grade_level),
      ("difficulty", spec.difficulty.as_str()),
      ("question_count", &count),
      ("question_types", &types),
      ("language", &spec.language),
    ];
    let system = fill_template(&prompts.generation_system, pairs);
    let user = fill_template(&prompts.generation_user_template, pairs);

    let start = std::time::Instant::now();
    let result = self.chat_json::<Gen>(&system, &user, 0.7).await;
    let elapsed = start.elapsed();

    let gen = match result {
      Ok(gen) => {
        info!(?elapsed, "Model response received successfully");
        gen
      }
      Err(e) => {
        error!(?elapsed, error = %e, "Model call failed during worksheet generation");
        return Err(e);
      }
    };

    let title = if gen.title.is_empty() {
      format!("{} worksheet", spec.topic)
    } else {
      gen.title
    };
    let ws = Worksheet {
      id: new_worksheet_id(),
      title,
      status: "draft".into(),
      topic: spec.topic.clone(),
      subject: spec.subject.clone(),
      grade_level: spec.grade_level.clone(),
      difficulty: spec.difficulty,
      language: spec.language.clone(),
      questions: gen.questions,
      downloads: 0,
    };

    info!(
      worksheet_id = %ws.id,
      title_preview = %trunc_for_log(&ws.title, 60),
      questions = ws.questions.len(),
      "Worksheet successfully generated"
    );

    Ok(ws)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
