//! Static option catalog backing the worksheet form.
//!
//! These lists are presentation metadata only; the backend accepts any
//! subject/grade string and validates difficulty/question types through
//! their serde enums.

use serde::Serialize;

/// One selectable `{value, label}` pair for the client form.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OptionEntry {
  pub value: &'static str,
  pub label: &'static str,
}

pub const SUBJECTS: &[OptionEntry] = &[
  OptionEntry { value: "math", label: "Mathematics" },
  OptionEntry { value: "science", label: "Science" },
  OptionEntry { value: "english", label: "English" },
  OptionEntry { value: "history", label: "History" },
  OptionEntry { value: "geography", label: "Geography" },
  OptionEntry { value: "biology", label: "Biology" },
  OptionEntry { value: "chemistry", label: "Chemistry" },
  OptionEntry { value: "physics", label: "Physics" },
];

pub const GRADES: &[OptionEntry] = &[
  OptionEntry { value: "k", label: "Kindergarten" },
  OptionEntry { value: "1", label: "1st Grade" },
  OptionEntry { value: "2", label: "2nd Grade" },
  OptionEntry { value: "3", label: "3rd Grade" },
  OptionEntry { value: "4", label: "4th Grade" },
  OptionEntry { value: "5", label: "5th Grade" },
  OptionEntry { value: "6", label: "6th Grade" },
  OptionEntry { value: "7", label: "7th Grade" },
  OptionEntry { value: "8", label: "8th Grade" },
  OptionEntry { value: "9", label: "9th Grade" },
  OptionEntry { value: "10", label: "10th Grade" },
  OptionEntry { value: "11", label: "11th Grade" },
  OptionEntry { value: "12", label: "12th Grade" },
];

pub const QUESTION_TYPES: &[OptionEntry] = &[
  OptionEntry { value: "multiple_choice", label: "Multiple Choice" },
  OptionEntry { value: "fill_blank", label: "Fill in the Blank" },
  OptionEntry { value: "true_false", label: "True/False" },
  OptionEntry { value: "matching", label: "Matching" },
  OptionEntry { value: "short_answer", label: "Short Answer" },
  OptionEntry { value: "essay", label: "Essay" },
];

pub const DIFFICULTIES: &[OptionEntry] = &[
  OptionEntry { value: "easy", label: "Easy" },
  OptionEntry { value: "medium", label: "Medium" },
  OptionEntry { value: "hard", label: "Hard" },
];

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, QuestionType};

  #[test]
  fn catalog_values_parse_into_their_enums() {
    for entry in QUESTION_TYPES {
      let json = format!("\"{}\"", entry.value);
      serde_json::from_str::<QuestionType>(&json).unwrap();
    }
    for entry in DIFFICULTIES {
      let json = format!("\"{}\"", entry.value);
      serde_json::from_str::<Difficulty>(&json).unwrap();
    }
  }

  #[test]
  fn grades_cover_k_through_12() {
    assert_eq!(GRADES.len(), 14);
    assert_eq!(GRADES[0].value, "k");
    assert_eq!(GRADES[13].value, "12");
  }
}
