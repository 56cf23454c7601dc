//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and clients independently.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Difficulty, GenerationSpec, QuestionType, Worksheet, DEFAULT_GRADE_LEVEL, DEFAULT_LANGUAGE,
    DEFAULT_QUESTION_COUNT, DEFAULT_SUBJECT,
};
use crate::options::OptionEntry;

/// Caller-supplied generation request. Everything except `topic` is optional
/// and falls back through the defaulting policy.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorksheetRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub question_types: Vec<QuestionType>,
    #[serde(default)]
    pub language: String,
}

impl WorksheetRequest {
    /// Defaulting policy: substitute the documented fallback for every
    /// optional field the caller left empty or zero. Consumes the request so
    /// the caller never observes a mutated value. Validation of `topic` is
    /// the orchestrator's job and happens before this runs.
    pub fn with_defaults(self) -> GenerationSpec {
        GenerationSpec {
            topic: self.topic,
            subject: if self.subject.is_empty() { DEFAULT_SUBJECT.into() } else { self.subject },
            grade_level: if self.grade_level.is_empty() {
                DEFAULT_GRADE_LEVEL.into()
            } else {
                self.grade_level
            },
            difficulty: self.difficulty.unwrap_or_default(),
            question_count: if self.question_count == 0 {
                DEFAULT_QUESTION_COUNT
            } else {
                self.question_count
            },
            question_types: if self.question_types.is_empty() {
                vec![QuestionType::MultipleChoice]
            } else {
                self.question_types
            },
            language: if self.language.is_empty() { DEFAULT_LANGUAGE.into() } else { self.language },
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct WorksheetOut {
    pub success: bool,
    pub worksheet: Worksheet,
}

#[derive(Serialize)]
pub struct WorksheetListOut {
    pub success: bool,
    pub worksheets: Vec<Worksheet>,
}

#[derive(Serialize)]
pub struct MessageOut {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ExportOut {
    pub success: bool,
    pub message: String,
    pub worksheet: Worksheet,
}

#[derive(Serialize)]
pub struct OptionsOut {
    pub success: bool,
    pub subjects: &'static [OptionEntry],
    pub grades: &'static [OptionEntry],
    pub question_types: &'static [OptionEntry],
    pub difficulties: &'static [OptionEntry],
}

#[derive(Debug, Deserialize)]
pub struct WelcomeIn {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
