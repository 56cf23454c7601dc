//! In-memory worksheet store.
//!
//! This module owns the only piece of mutable shared state in the backend:
//! the keyed worksheet collection. The raw map is never exposed; everything
//! goes through the methods here, so swapping in a durable backing store
//! later would not change any caller.
//!
//! Concurrency discipline: one RwLock serializes every operation. Reads take
//! the read lock and clone out a consistent snapshot; update, delete and the
//! download counter hold the write lock across the whole read-modify-write.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::instrument;

use crate::domain::{Worksheet, WorksheetPatch};
use crate::error::{Error, Result};

#[derive(Default)]
pub struct WorksheetStore {
    records: RwLock<HashMap<String, Worksheet>>,
}

impl WorksheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly generated worksheet under its id.
    /// A duplicate id means the allocator broke its uniqueness contract.
    #[instrument(level = "debug", skip(self, ws), fields(id = %ws.id))]
    pub async fn create(&self, ws: Worksheet) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&ws.id) {
            return Err(Error::Conflict(ws.id.clone()));
        }
        records.insert(ws.id.clone(), ws);
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get(&self, id: &str) -> Result<Worksheet> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(Error::WorksheetNotFound)
    }

    /// Snapshot of every live record. Iteration order is not meaningful.
    #[instrument(level = "debug", skip(self))]
    pub async fn list(&self) -> Vec<Worksheet> {
        self.records.read().await.values().cloned().collect()
    }

    /// Merge-if-present update: `title`, `status` and `questions` overwrite
    /// the stored value only when present and non-empty; every other stored
    /// field is untouched. Returns the merged record.
    #[instrument(level = "debug", skip(self, patch), fields(%id))]
    pub async fn update(&self, id: &str, patch: WorksheetPatch) -> Result<Worksheet> {
        let mut records = self.records.write().await;
        let ws = records.get_mut(id).ok_or(Error::WorksheetNotFound)?;
        if let Some(title) = patch.title {
            if !title.is_empty() {
                ws.title = title;
            }
        }
        if let Some(status) = patch.status {
            if !status.is_empty() {
                ws.status = status;
            }
        }
        if let Some(questions) = patch.questions {
            if !questions.is_empty() {
                ws.questions = questions;
            }
        }
        Ok(ws.clone())
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.records.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(Error::WorksheetNotFound),
        }
    }

    /// Bump the download counter and return the updated record. The write
    /// lock is held across the read-modify-write, so concurrent exports of
    /// the same record never lose increments.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn increment_downloads(&self, id: &str) -> Result<Worksheet> {
        let mut records = self.records.write().await;
        let ws = records.get_mut(id).ok_or(Error::WorksheetNotFound)?;
        ws.downloads += 1;
        Ok(ws.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, Question, QuestionType};
    use std::sync::Arc;

    fn sample(id: &str) -> Worksheet {
        Worksheet {
            id: id.into(),
            title: "Fractions practice".into(),
            status: "draft".into(),
            topic: "Fractions".into(),
            subject: "math".into(),
            grade_level: "5".into(),
            difficulty: Difficulty::Medium,
            language: "en".into(),
            questions: vec![Question {
                question: "What is 1/2 + 1/4?".into(),
                kind: QuestionType::MultipleChoice,
                options: vec!["3/4".into(), "1/6".into(), "2/6".into(), "1".into()],
                answer: "3/4".into(),
                explanation: "Common denominator is 4.".into(),
            }],
            downloads: 0,
        }
    }

    #[tokio::test]
    async fn get_returns_what_create_stored() {
        let store = WorksheetStore::new();
        let ws = sample("w1");
        store.create(ws.clone()).await.unwrap();
        assert_eq!(store.get("w1").await.unwrap(), ws);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let store = WorksheetStore::new();
        store.create(sample("w1")).await.unwrap();
        let err = store.create(sample("w1")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn update_with_title_changes_only_the_title() {
        let store = WorksheetStore::new();
        let before = sample("w1");
        store.create(before.clone()).await.unwrap();

        let patch = WorksheetPatch { title: Some("Renamed".into()), ..Default::default() };
        let after = store.update("w1", patch).await.unwrap();

        assert_eq!(after.title, "Renamed");
        assert_eq!(after.status, before.status);
        assert_eq!(after.topic, before.topic);
        assert_eq!(after.subject, before.subject);
        assert_eq!(after.grade_level, before.grade_level);
        assert_eq!(after.difficulty, before.difficulty);
        assert_eq!(after.language, before.language);
        assert_eq!(after.questions, before.questions);
        assert_eq!(after.downloads, before.downloads);
    }

    #[tokio::test]
    async fn empty_patch_is_a_no_op() {
        let store = WorksheetStore::new();
        let before = sample("w1");
        store.create(before.clone()).await.unwrap();

        let after = store.update("w1", WorksheetPatch::default()).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.get("w1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn empty_values_do_not_overwrite() {
        let store = WorksheetStore::new();
        let before = sample("w1");
        store.create(before.clone()).await.unwrap();

        let patch = WorksheetPatch {
            title: Some(String::new()),
            status: Some(String::new()),
            questions: Some(Vec::new()),
        };
        let after = store.update("w1", patch).await.unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn non_empty_questions_replace_wholesale() {
        let store = WorksheetStore::new();
        store.create(sample("w1")).await.unwrap();

        let replacement = vec![Question {
            question: "True or false: 1/2 > 1/3".into(),
            kind: QuestionType::TrueFalse,
            options: vec![],
            answer: "true".into(),
            explanation: String::new(),
        }];
        let patch = WorksheetPatch { questions: Some(replacement.clone()), ..Default::default() };
        let after = store.update("w1", patch).await.unwrap();
        assert_eq!(after.questions, replacement);
    }

    #[tokio::test]
    async fn deleted_ids_are_gone_for_every_operation() {
        let store = WorksheetStore::new();
        store.create(sample("w1")).await.unwrap();
        store.delete("w1").await.unwrap();

        assert!(matches!(store.get("w1").await.unwrap_err(), Error::WorksheetNotFound));
        assert!(matches!(
            store.update("w1", WorksheetPatch::default()).await.unwrap_err(),
            Error::WorksheetNotFound
        ));
        assert!(matches!(store.delete("w1").await.unwrap_err(), Error::WorksheetNotFound));
        assert!(matches!(
            store.increment_downloads("w1").await.unwrap_err(),
            Error::WorksheetNotFound
        ));
    }

    #[tokio::test]
    async fn list_returns_every_live_record() {
        let store = WorksheetStore::new();
        for id in ["a", "b", "c"] {
            store.create(sample(id)).await.unwrap();
        }
        let mut ids: Vec<String> = store.list().await.into_iter().map(|w| w.id).collect();
        ids.sort();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_exports_never_lose_increments() {
        let store = Arc::new(WorksheetStore::new());
        store.create(sample("w1")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment_downloads("w1").await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(store.get("w1").await.unwrap().downloads, 32);
    }
}
