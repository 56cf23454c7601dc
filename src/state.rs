//! Application state: the worksheet store, prompts, and collaborator clients.
//!
//! This module owns:
//!   - the worksheet store (the only mutable shared state)
//!   - the prompts + email templates (from TOML or defaults)
//!   - optional OpenAI client (worksheet generation)
//!   - optional Resend client (welcome emails)

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::{load_worksheet_config_from_env, EmailTemplates, Prompts};
use crate::email::Resend;
use crate::openai::OpenAI;
use crate::store::WorksheetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WorksheetStore>,
    pub openai: Option<OpenAI>,
    pub mailer: Option<Resend>,
    pub prompts: Prompts,
    pub email_templates: EmailTemplates,
}

impl AppState {
    /// Build state from env: load config, init collaborator clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        // Load TOML config if provided (prompts + email templates).
        let cfg = load_worksheet_config_from_env().unwrap_or_default();

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "worksheet_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
        } else {
            warn!(target: "worksheet_backend", "OpenAI disabled (no OPENAI_API_KEY). Worksheet generation will fail.");
        }

        // Build optional Resend client (if API key present).
        let mailer = Resend::from_env();
        if let Some(m) = &mailer {
            info!(target: "worksheet_backend", from = %m.from, "Resend enabled.");
        } else {
            warn!(target: "worksheet_backend", "Resend disabled (no RESEND_API_KEY). Welcome emails will fail.");
        }

        Self {
            store: Arc::new(WorksheetStore::new()),
            openai,
            mailer,
            prompts: cfg.prompts,
            email_templates: cfg.email,
        }
    }
}
