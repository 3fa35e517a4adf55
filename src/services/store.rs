//! JSON-file-backed question store
//!
//! Owns the question list and the global current round. The bank panel only
//! reads snapshots from here and sends back [`BankCommand`]s.

use crate::model::{BankCommand, Question, Round, RoundNumber, Team};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankData {
    #[serde(default)]
    pub current_round: RoundNumber,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

pub struct QuestionStore {
    /// None keeps everything in memory
    path: Option<PathBuf>,
    data: BankData,
}

impl QuestionStore {
    /// Open the store at `path`. A missing file starts an empty bank.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = Self::read(&path)?;
        tracing::info!(
            path = %path.display(),
            questions = data.questions.len(),
            "question store opened"
        );
        Ok(Self {
            path: Some(path),
            data,
        })
    }

    #[cfg(test)]
    pub fn in_memory(data: BankData) -> Self {
        Self { path: None, data }
    }

    fn read(path: &Path) -> Result<BankData> {
        if !path.exists() {
            return Ok(BankData::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Replace the snapshot with what is on disk
    ///
    /// On error the previous snapshot is kept.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            self.data = Self::read(path)?;
            tracing::info!(questions = self.data.questions.len(), "question store reloaded");
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }

        // Write a sibling file and rename it over the old one
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        tracing::debug!(path = %path.display(), "question store saved");
        Ok(())
    }

    /// Apply a command to the in-memory snapshot
    pub fn apply(&mut self, command: &BankCommand) {
        match command {
            BankCommand::Add {
                question,
                description,
                round,
            } => {
                let id = Uuid::new_v4().to_string();
                tracing::info!(%id, round = round.number(), "question added");
                self.data.questions.push(Question {
                    id,
                    round: round.number(),
                    question: question.clone(),
                    description: description.clone(),
                    is_locked: false,
                    assigned_to_team_id: None,
                    is_active: false,
                });
            }
            BankCommand::Delete(id) => {
                let before = self.data.questions.len();
                self.data.questions.retain(|q| &q.id != id);
                tracing::info!(%id, removed = before - self.data.questions.len(), "question deleted");
            }
            BankCommand::ActivateMany(ids) => {
                let mut activated = 0;
                for question in self.data.questions.iter_mut() {
                    if ids.contains(&question.id) {
                        question.is_active = true;
                        activated += 1;
                    }
                }
                tracing::info!(requested = ids.len(), activated, "questions activated");
            }
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.data.questions
    }

    pub fn current_round(&self) -> RoundNumber {
        self.data.current_round
    }

    pub fn teams(&self) -> &[Team] {
        &self.data.teams
    }

    pub fn round_info(&self, round: RoundNumber) -> Option<&Round> {
        self.data.rounds.iter().find(|r| r.number == round)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn question(id: &str, round: u8, is_active: bool) -> Question {
        Question {
            id: id.to_string(),
            round,
            question: format!("Question {}", id),
            description: String::new(),
            is_locked: false,
            assigned_to_team_id: None,
            is_active,
        }
    }

    fn store_with(questions: Vec<Question>) -> QuestionStore {
        QuestionStore::in_memory(BankData {
            questions,
            ..BankData::default()
        })
    }

    #[test]
    fn test_add_creates_inactive_question_with_fresh_id() {
        let mut store = store_with(vec![]);
        let add = BankCommand::Add {
            question: "What is UX?".to_string(),
            description: "Explain core principles.".to_string(),
            round: RoundNumber::Two,
        };
        store.apply(&add);
        store.apply(&add);

        let questions = store.questions();
        assert_eq!(questions.len(), 2);
        assert_ne!(questions[0].id, questions[1].id);
        assert_eq!(questions[0].round, 2);
        assert!(!questions[0].is_active);
        assert!(!questions[0].is_locked);
    }

    #[test]
    fn test_delete_removes_only_that_id() {
        let mut store = store_with(vec![question("q1", 1, false), question("q2", 1, true)]);
        store.apply(&BankCommand::Delete("q2".to_string()));
        store.apply(&BankCommand::Delete("missing".to_string()));

        let ids: Vec<&str> = store.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1"]);
    }

    #[test]
    fn test_activate_many_ignores_unknown_ids() {
        let mut store = store_with(vec![
            question("q1", 1, false),
            question("q2", 1, false),
            question("q3", 1, false),
        ]);
        store.apply(&BankCommand::ActivateMany(vec![
            "q3".to_string(),
            "nope".to_string(),
            "q1".to_string(),
        ]));

        let active: Vec<bool> = store.questions().iter().map(|q| q.is_active).collect();
        assert_eq!(active, vec![true, false, true]);
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let store = QuestionStore::open(dir.path().join("bank.json")).unwrap();
        assert!(store.questions().is_empty());
        assert_eq!(store.current_round(), RoundNumber::One);
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("bank.json");

        let mut store = QuestionStore::open(&path).unwrap();
        store.apply(&BankCommand::Add {
            question: "Q".to_string(),
            description: "D".to_string(),
            round: RoundNumber::Three,
        });
        store.save().unwrap();

        let reopened = QuestionStore::open(&path).unwrap();
        assert_eq!(reopened.questions().len(), 1);
        assert_eq!(reopened.questions()[0].round, 3);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, r#"{"questions":[{"id":"q1","round":1,"question":"Q"}]}"#).unwrap();

        let mut store = QuestionStore::open(&path).unwrap();
        store.apply(&BankCommand::Delete("q1".to_string()));
        store.save().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("bank.json")]);
        assert!(QuestionStore::open(&path).unwrap().questions().is_empty());
    }

    #[test]
    fn test_reads_full_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"{
                "currentRound": 2,
                "questions": [
                    {"id":"q1","round":2,"question":"Q","description":"D","isLocked":true,"assignedToTeamId":"t1","isActive":true}
                ],
                "teams": [{"id":"t1","name":"Nova","round":2}],
                "rounds": [{"number":2,"name":"Design Remix","maxTeams":6,"description":"Remix it"}]
            }"#,
        )
        .unwrap();

        let store = QuestionStore::open(&path).unwrap();
        assert_eq!(store.current_round(), RoundNumber::Two);
        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.teams()[0].name, "Nova");
        assert_eq!(store.round_info(RoundNumber::Two).map(|r| r.max_teams), Some(6));
        assert!(store.round_info(RoundNumber::One).is_none());
    }

    #[test]
    fn test_corrupt_reload_keeps_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, r#"{"questions":[{"id":"q1","round":1,"question":"Q"}]}"#).unwrap();

        let mut store = QuestionStore::open(&path).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(store.reload().is_err());
        assert_eq!(store.questions().len(), 1);
    }
}
