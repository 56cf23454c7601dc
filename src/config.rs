//! Loading worksheet configuration (prompts + email templates) from TOML.
//!
//! See `WorksheetConfig`, `Prompts` and `EmailTemplates` for expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct WorksheetConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub email: EmailTemplates,
}

/// Prompts used by the OpenAI client. Defaults produce classroom-ready
/// worksheets; override them in TOML if you need to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub generation_system: String,
  pub generation_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_system: "You are an educational content generator for teachers. Respond ONLY with strict JSON.".into(),
      generation_user_template: "Create a {difficulty} worksheet about '{topic}' for grade {grade_level} {subject}, written in language '{language}'. Generate exactly {question_count} questions, using only these types: {question_types}. Return JSON with fields: title (string), questions (array). Each question has: question, type, options (string array, empty unless the type needs choices), answer, explanation. Keep questions age-appropriate and unambiguous.".into(),
    }
  }
}

/// Transactional email templates. `{name}` is substituted with the
/// recipient's name (or a friendly fallback) before sending.
#[derive(Clone, Debug, Deserialize)]
pub struct EmailTemplates {
  pub welcome_subject: String,
  pub welcome_html: String,
}

impl Default for EmailTemplates {
  fn default() -> Self {
    Self {
      welcome_subject: "Welcome aboard! 🎉".into(),
      welcome_html: r#"<!DOCTYPE html>
<html lang="en">
  <body style="margin:0;padding:0;font-family:-apple-system,'Segoe UI',Roboto,Arial,sans-serif;background-color:#f3f4f6;">
    <table role="presentation" style="width:100%;border-collapse:collapse;">
      <tr><td align="center" style="padding:40px 20px;">
        <table role="presentation" style="width:100%;max-width:600px;border-collapse:collapse;">
          <tr><td style="background:#0891b2;padding:32px;border-radius:16px 16px 0 0;text-align:center;">
            <h1 style="color:#ffffff;font-size:28px;margin:0;">Welcome aboard! 🎉</h1>
          </td></tr>
          <tr><td style="background-color:#ffffff;padding:32px;border-radius:0 0 16px 16px;">
            <p style="font-size:18px;color:#374151;margin:0 0 16px 0;">Hey {name}! 👋</p>
            <p style="font-size:15px;color:#6b7280;margin:0 0 16px 0;line-height:1.7;">
              Thanks for joining! You can now create worksheets on any topic in
              seconds: pick a subject, grade and difficulty, and we generate the
              questions for you.
            </p>
            <p style="font-size:13px;color:#9ca3af;margin:16px 0 0 0;">
              Need help? Just reply to this email.
            </p>
          </td></tr>
        </table>
      </td></tr>
    </table>
  </body>
</html>"#.into(),
    }
  }
}

/// Attempt to load `WorksheetConfig` from WORKSHEET_CONFIG_PATH.
/// On any parsing/IO error, returns None.
pub fn load_worksheet_config_from_env() -> Option<WorksheetConfig> {
  let path = std::env::var("WORKSHEET_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<WorksheetConfig>(&s) {
      Ok(cfg) => {
        info!(target: "worksheet_backend", %path, "Loaded worksheet config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "worksheet_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "worksheet_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_yields_defaults() {
    let cfg: WorksheetConfig = toml::from_str("").unwrap();
    assert!(cfg.prompts.generation_system.contains("strict JSON"));
    assert!(cfg.email.welcome_html.contains("{name}"));
  }

  #[test]
  fn toml_overrides_prompts() {
    let cfg: WorksheetConfig = toml::from_str(
      r#"
[prompts]
generation_system = "sys"
generation_user_template = "make {question_count} about {topic}"
"#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.generation_system, "sys");
    assert!(cfg.prompts.generation_user_template.contains("{topic}"));
    // email section untouched -> defaults
    assert!(cfg.email.welcome_subject.contains("Welcome"));
  }
}
