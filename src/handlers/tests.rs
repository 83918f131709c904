// src/handlers/tests.rs
//
// Test-taking surface: list available tests, fetch one with answer keys
// stripped, and submit an attempt for grading.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::{PgPool, types::Json as SqlJson};

use crate::{
    engine,
    error::AppError,
    handlers::exams::fetch_exam,
    models::exam::{ExamSummary, PublicQuestion},
    models::result::{SubmitTestRequest, TestResult, TestResultResponse},
    utils::jwt::Claims,
};

#[derive(Debug, Deserialize)]
pub struct ListTestsQuery {
    pub active: Option<bool>,
}

/// Lists test summaries, optionally filtered by the active flag.
pub async fn list_tests(
    State(pool): State<PgPool>,
    Query(query): Query<ListTestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tests = sqlx::query_as::<_, ExamSummary>(
        r#"
        SELECT id, exam_name, exam_duration, total_point, category, difficulty,
               is_active, created_at, updated_at
        FROM exams
        WHERE $1::BOOLEAN IS NULL OR is_active = $1
        ORDER BY id
        "#,
    )
    .bind(query.active)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list tests: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(tests))
}

/// Fetches a single test with its questions stripped of answer keys.
pub async fn get_test(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = fetch_exam(&pool, id).await?;

    let questions: Vec<PublicQuestion> = exam.questions.iter().map(PublicQuestion::from).collect();

    Ok(Json(serde_json::json!({
        "id": exam.id,
        "examName": exam.exam_name,
        "examDuration": exam.exam_duration,
        "totalPoint": exam.total_point,
        "category": exam.category,
        "difficulty": exam.difficulty,
        "questions": questions,
        "createdAt": exam.created_at,
        "updatedAt": exam.updated_at
    })))
}

/// Submits a test attempt.
///
/// Loads the exam addressed by the path, grades the submission with the
/// engine and persists the result. Any grading precondition failure aborts
/// before anything is written.
pub async fn submit_test(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = fetch_exam(&pool, id).await?;

    let graded = engine::grade_submission(&exam, &payload)?;

    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let result = sqlx::query_as::<_, TestResult>(
        r#"
        INSERT INTO test_results (exam_id, user_id, total_point, score_points, submitted_answers)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, exam_id, user_id, total_point, score_points, submitted_answers, submitted_at
        "#,
    )
    .bind(exam.id)
    .bind(user_id)
    .bind(graded.total_point)
    .bind(graded.score_points)
    .bind(SqlJson(&graded.answers))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save test result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let response = TestResultResponse {
        id: result.id,
        exam_id: result.exam_id,
        exam_name: exam.exam_name,
        user_id: result.user_id,
        total_point: result.total_point,
        score_points: result.score_points,
        percentage: graded.percentage(),
        submitted_answers: result.submitted_answers.0,
        submitted_at: result.submitted_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
