//! Request/response types for the QuizSense backend
//!
//! Report payloads are left as `serde_json::Value`; their shape is owned by
//! the backend and only rendered, never interpreted, on this side.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

// ============ Auth ============

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body returned by `/auth/register` and `/auth/login`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Stored verbatim in the session
    pub user: Value,
    /// Any other top-level fields the backend sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User profile as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_quizzes: u32,
    #[serde(default)]
    pub current_streak: u32,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============ Quiz ============

/// Quiz difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateQuizRequest<'a> {
    pub subject: &'a str,
    pub topic: &'a str,
    pub difficulty: Difficulty,
    pub num_questions: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct AutoQuizRequest<'a> {
    pub domain: &'a str,
    pub num_questions: u32,
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub q_id: String,
    pub question: String,
    /// Option key ("A".."D") to option text
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    pub topic: String,
    #[serde(default)]
    pub sub_topic: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A generated quiz
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub quiz_id: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
    pub total_questions: u32,
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_time_limit() -> u32 {
    10
}

/// Answer to one question
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SingleAnswer {
    pub q_id: String,
    pub selected_option: String,
    #[serde(default)]
    pub time_taken_seconds: u32,
}

impl SingleAnswer {
    pub fn new(q_id: impl Into<String>, selected_option: impl Into<String>) -> Self {
        Self {
            q_id: q_id.into(),
            selected_option: selected_option.into(),
            time_taken_seconds: 0,
        }
    }

    pub fn took(mut self, seconds: u32) -> Self {
        self.time_taken_seconds = seconds;
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerSubmission<'a> {
    pub quiz_id: &'a str,
    pub answers: &'a [SingleAnswer],
    pub total_time_seconds: u32,
}

/// Graded answer for one question
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuestionResult {
    pub q_id: String,
    pub question: String,
    pub selected_option: String,
    pub correct_option: String,
    pub is_correct: bool,
    pub topic: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Graded quiz returned by `/quiz/submit`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub quiz_id: String,
    pub user_id: String,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub time_taken_seconds: u32,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
    /// Topic to `{"correct": n, "total": m}`
    #[serde(default)]
    pub topic_breakdown: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Daily quiz limit status from `/quiz/can-take-quiz`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizAvailability {
    pub can_take_quiz: bool,
    #[serde(default)]
    pub has_taken_today: bool,
    #[serde(default)]
    pub next_quiz_available: Option<String>,
    #[serde(default)]
    pub message: String,
}
