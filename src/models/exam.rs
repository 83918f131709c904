// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use validator::Validate;

use crate::models::dictionary::{Difficulty, ExamCategory, QuestionCategory};

/// A single selectable option on a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Category-specific payload of a question, tagged on `category`.
///
/// A TRUE_FALSE question carries a single boolean answer key; the choice
/// categories carry an option list. Nothing else is representable, so the
/// grader never has to re-check which fields are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum QuestionKind {
    #[serde(rename = "TRUE_FALSE", rename_all = "camelCase")]
    TrueFalse { correct_answer: bool },
    #[serde(rename = "SINGLE_CHOICE")]
    SingleChoice { answers: Vec<AnswerOption> },
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice { answers: Vec<AnswerOption> },
}

impl QuestionKind {
    pub fn category(&self) -> QuestionCategory {
        match self {
            QuestionKind::TrueFalse { .. } => QuestionCategory::TrueFalse,
            QuestionKind::SingleChoice { .. } => QuestionCategory::SingleChoice,
            QuestionKind::MultipleChoice { .. } => QuestionCategory::MultipleChoice,
        }
    }

    /// Option list for choice questions, `None` for TRUE_FALSE.
    pub fn answers(&self) -> Option<&[AnswerOption]> {
        match self {
            QuestionKind::TrueFalse { .. } => None,
            QuestionKind::SingleChoice { answers } | QuestionKind::MultipleChoice { answers } => {
                Some(answers)
            }
        }
    }
}

/// A validated question. Only the exam validator produces these; the grader
/// and the database only ever see this strict shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub display_name: String,
    pub point: f64,
    pub is_required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Raw, untrusted question payload as authored by the client.
///
/// Every field is optional so the validator, not the deserializer, decides
/// what a well-formed question looks like and can report which field at
/// which position is wrong.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub point: Option<f64>,
    #[serde(default)]
    pub is_required: Option<bool>,
    #[serde(default)]
    pub correct_answer: Option<bool>,
    #[serde(default)]
    pub answers: Option<Vec<AnswerOptionDraft>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionDraft {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

/// Represents the 'exams' table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i64,
    pub exam_name: String,

    /// Duration in minutes.
    pub exam_duration: i64,

    /// Declared total; always equals the sum of question points for a
    /// persisted exam.
    pub total_point: f64,

    pub category: String,
    pub difficulty: String,

    /// Ordered question list, stored as JSONB. A question's identity is its
    /// zero-based position in this list; reordering changes which historical
    /// results map to which question.
    pub questions: Json<Vec<Question>>,

    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Exam row without the question payload, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub id: i64,
    pub exam_name: String,
    pub exam_duration: i64,
    pub total_point: f64,
    pub category: String,
    pub difficulty: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Question as shown to a test-taker: answer keys stripped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub display_name: String,
    pub category: QuestionCategory,
    pub point: f64,
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        PublicQuestion {
            display_name: question.display_name.clone(),
            category: question.kind.category(),
            point: question.point,
            is_required: question.is_required,
            answers: question
                .kind
                .answers()
                .map(|answers| answers.iter().map(|a| a.text.clone()).collect()),
        }
    }
}

/// DTO for creating an exam.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "examName must be between 1 and 200 characters."
    ))]
    pub exam_name: String,
    #[validate(range(min = 1, message = "examDuration must be a positive number of minutes."))]
    pub exam_duration: i64,
    pub total_point: f64,
    pub category: ExamCategory,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

/// DTO for updating an exam. Fields are optional; when `questions` is
/// present, `total_point` must be too, and the validator gate re-runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamRequest {
    pub exam_name: Option<String>,
    pub exam_duration: Option<i64>,
    pub total_point: Option<f64>,
    pub category: Option<ExamCategory>,
    pub difficulty: Option<Difficulty>,
    pub is_active: Option<bool>,
    pub questions: Option<Vec<QuestionDraft>>,
}
