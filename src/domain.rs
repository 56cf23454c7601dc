//! Domain models used by the backend: worksheets, questions, and the
//! fully-specified generation spec the defaulting policy produces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defaults substituted for optional request fields the caller left empty.
pub const DEFAULT_SUBJECT: &str = "general";
pub const DEFAULT_GRADE_LEVEL: &str = "5";
pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_LANGUAGE: &str = "en";

/// How demanding the generated questions should be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}
impl Default for Difficulty {
  fn default() -> Self { Difficulty::Medium }
}
impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

/// Question formats the generator can be asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  MultipleChoice,
  FillBlank,
  TrueFalse,
  Matching,
  ShortAnswer,
  Essay,
}
impl Default for QuestionType {
  fn default() -> Self { QuestionType::MultipleChoice }
}
impl QuestionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      QuestionType::MultipleChoice => "multiple_choice",
      QuestionType::FillBlank => "fill_blank",
      QuestionType::TrueFalse => "true_false",
      QuestionType::Matching => "matching",
      QuestionType::ShortAnswer => "short_answer",
      QuestionType::Essay => "essay",
    }
  }
}

/// Single exercise item. The store treats questions as opaque values that are
/// replaced wholesale on update; only the generator and the client interpret
/// them, so every field tolerates being absent in model output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
  #[serde(default)] pub question: String,
  #[serde(default, rename = "type")] pub kind: QuestionType,
  #[serde(default)] pub options: Vec<String>,
  #[serde(default)] pub answer: String,
  #[serde(default)] pub explanation: String,
}

/// Worksheet record persisted in-memory. `id` never changes after creation;
/// `downloads` only moves up, and only through the export operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
  pub id: String,
  pub title: String,
  /// Open set: "draft" at creation, "final" once the client marks it done.
  #[serde(default)] pub status: String,
  pub topic: String,
  pub subject: String,
  pub grade_level: String,
  pub difficulty: Difficulty,
  pub language: String,
  #[serde(default)] pub questions: Vec<Question>,
  #[serde(default)] pub downloads: u64,
}

/// Fully-specified generation request, produced by the defaulting policy
/// from a partial caller request. This is what the generator sees.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSpec {
  pub topic: String,
  pub subject: String,
  pub grade_level: String,
  pub difficulty: Difficulty,
  pub question_count: u32,
  pub question_types: Vec<QuestionType>,
  pub language: String,
}

/// Partial update payload for merge-if-present updates: only fields that are
/// present AND non-empty overwrite the stored value. Nested structures are
/// replaced wholesale, never deep-merged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorksheetPatch {
  #[serde(default)] pub title: Option<String>,
  #[serde(default)] pub status: Option<String>,
  #[serde(default)] pub questions: Option<Vec<Question>>,
}

/// Allocate a fresh worksheet identifier.
/// UUID v4: unique for the life of the process (and far beyond).
pub fn new_worksheet_id() -> String {
  Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn worksheet_ids_do_not_repeat() {
    let ids: HashSet<String> = (0..1000).map(|_| new_worksheet_id()).collect();
    assert_eq!(ids.len(), 1000);
  }

  #[test]
  fn question_tolerates_sparse_model_output() {
    let q: Question = serde_json::from_str(r#"{"question":"2+2?","answer":"4"}"#).unwrap();
    assert_eq!(q.kind, QuestionType::MultipleChoice);
    assert!(q.options.is_empty());
    assert!(q.explanation.is_empty());
  }

  #[test]
  fn wire_names_are_snake_case() {
    assert_eq!(Difficulty::Medium.as_str(), "medium");
    assert_eq!(QuestionType::FillBlank.as_str(), "fill_blank");
    let json = serde_json::to_string(&QuestionType::MultipleChoice).unwrap();
    assert_eq!(json, "\"multiple_choice\"");
  }
}
