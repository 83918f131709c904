// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;

/// One answer in a submission, addressed by the question's zero-based
/// position within the exam's question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_position: usize,

    /// For TRUE_FALSE: the chosen boolean. For choice questions: whether the
    /// question was affirmatively marked.
    pub answered: bool,
}

/// DTO for submitting a test attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    pub exam_id: i64,
    pub answers: Vec<AnsweredQuestion>,
}

/// Graded outcome of a single answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question_position: usize,
    pub answered: bool,
    pub is_correct: bool,
}

/// Represents the 'test_results' table. Immutable once created; `exam_id` is
/// a back-reference that survives exam deletion.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i64,
    pub exam_id: i64,
    pub user_id: i64,
    pub total_point: f64,
    pub score_points: f64,
    pub submitted_answers: Json<Vec<GradedAnswer>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Response returned to the submitter. `percentage` is derived at response
/// time, never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultResponse {
    pub id: i64,
    pub exam_id: i64,
    pub exam_name: String,
    pub user_id: i64,
    pub total_point: f64,
    pub score_points: f64,
    pub percentage: f64,
    pub submitted_answers: Vec<GradedAnswer>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Result row joined with exam and user display data for the admin listing.
/// The joins are LEFT: a deleted exam leaves `exam_name` empty but the
/// result record intact.
#[derive(Debug, FromRow)]
pub struct ResultRow {
    pub id: i64,
    pub exam_id: i64,
    pub exam_name: Option<String>,
    pub user_id: i64,
    pub username: Option<String>,
    pub total_point: f64,
    pub score_points: f64,
    pub submitted_answers: Json<Vec<GradedAnswer>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResultResponse {
    pub id: i64,
    pub exam_id: i64,
    pub exam_name: Option<String>,
    pub user_id: i64,
    pub username: Option<String>,
    pub total_point: f64,
    pub score_points: f64,
    pub percentage: f64,
    pub submitted_answers: Vec<GradedAnswer>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl From<ResultRow> for AdminResultResponse {
    fn from(row: ResultRow) -> Self {
        let percentage = crate::engine::grader::percentage(row.score_points, row.total_point);
        AdminResultResponse {
            id: row.id,
            exam_id: row.exam_id,
            exam_name: row.exam_name,
            user_id: row.user_id,
            username: row.username,
            total_point: row.total_point,
            score_points: row.score_points,
            percentage,
            submitted_answers: row.submitted_answers.0,
            submitted_at: row.submitted_at,
        }
    }
}
