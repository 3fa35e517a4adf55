//! Shared entity shapes: questions, teams, rounds and the signed-in user

use super::round::RoundNumber;
use serde::{Deserialize, Serialize};

/// One quiz prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Round number as stored; only 1..=3 ever shows up in a round view
    pub round: u8,
    pub question: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_team_id: Option<String>,
    /// false = still in the bank, true = on the spin wheel
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_active: bool,
}

impl Question {
    pub fn in_round(&self, round: RoundNumber) -> bool {
        self.round == round.number()
    }

    /// Status label for the active table
    pub fn status_label(&self) -> &'static str {
        if self.is_locked {
            "Assigned"
        } else {
            "Available"
        }
    }
}

/// A competing team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub round: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_spun: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Round metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub number: RoundNumber,
    pub name: String,
    pub max_teams: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Participant,
}

/// The person operating the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            role: Some(UserRole::Admin),
            team_name: None,
            team_id: None,
        }
    }
}

impl User {
    pub fn display_name(&self) -> String {
        match (self.role, &self.team_name) {
            (Some(UserRole::Admin), _) => "admin".to_string(),
            (Some(UserRole::Participant), Some(team)) => format!("participant ({})", team),
            (Some(UserRole::Participant), None) => "participant".to_string(),
            (None, _) => "guest".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_json_shape() {
        let json = r#"{
            "id": "q1",
            "round": 2,
            "question": "What is UX?",
            "description": "Explain core principles.",
            "isLocked": true,
            "assignedToTeamId": "t1",
            "isActive": true
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.round, 2);
        assert!(question.is_locked);
        assert!(question.is_active);
        assert_eq!(question.assigned_to_team_id.as_deref(), Some("t1"));
        assert_eq!(question.status_label(), "Assigned");
    }

    #[test]
    fn test_question_missing_is_active_means_bank() {
        let json = r#"{"id":"q1","round":1,"question":"Q","description":"D","isLocked":false}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(!question.is_active);
        assert!(question.in_round(RoundNumber::One));
        assert!(!question.in_round(RoundNumber::Two));

        let out = serde_json::to_string(&question).unwrap();
        assert!(!out.contains("isActive"));
        assert!(!out.contains("assignedToTeamId"));
    }

    #[test]
    fn test_user_role_serde() {
        let user: User = serde_json::from_str(r#"{"role":"participant","teamName":"Nova"}"#).unwrap();
        assert_eq!(user.role, Some(UserRole::Participant));
        assert_eq!(user.display_name(), "participant (Nova)");

        let guest: User = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert_eq!(guest.display_name(), "guest");
        assert_eq!(User::default().display_name(), "admin");
    }

    #[test]
    fn test_round_metadata_parses() {
        let json = r#"{"number":3,"name":"Finale","maxTeams":4,"description":"Last one"}"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.number, RoundNumber::Three);
        assert_eq!(round.max_teams, 4);
    }
}
