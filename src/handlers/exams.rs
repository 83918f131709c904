// src/handlers/exams.rs
//
// Admin exam authoring. Every write goes through the exam validator gate;
// nothing structurally invalid reaches the database.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json as SqlJson};
use validator::Validate;

use crate::{
    engine,
    error::AppError,
    models::exam::{CreateExamRequest, Exam, ExamSummary, UpdateExamRequest},
};

const EXAM_COLUMNS: &str = "id, exam_name, exam_duration, total_point, category, difficulty, \
                            questions, is_active, created_at, updated_at";

/// Creates a new exam.
/// Admin only.
pub async fn create_exam(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let questions = engine::validate_exam(&payload.questions, payload.total_point)?;

    let exam = sqlx::query_as::<_, Exam>(&format!(
        r#"
        INSERT INTO exams (exam_name, exam_duration, total_point, category, difficulty, questions, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {EXAM_COLUMNS}
        "#,
    ))
    .bind(&payload.exam_name)
    .bind(payload.exam_duration)
    .bind(payload.total_point)
    .bind(payload.category.as_str())
    .bind(payload.difficulty.as_str())
    .bind(SqlJson(&questions))
    .bind(payload.is_active.unwrap_or(true))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(exam)))
}

/// Lists all exams including their question payloads.
/// Admin only.
pub async fn list_exams(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let exams = sqlx::query_as::<_, Exam>(&format!(
        "SELECT {EXAM_COLUMNS} FROM exams ORDER BY id"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exams: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(exams))
}

/// Lists exam summaries without the question payloads.
/// Admin only.
pub async fn list_exams_without_questions(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let exams = sqlx::query_as::<_, ExamSummary>(
        r#"
        SELECT id, exam_name, exam_duration, total_point, category, difficulty,
               is_active, created_at, updated_at
        FROM exams
        ORDER BY id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exam summaries: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(exams))
}

/// Fetches a single exam by ID.
/// Admin only.
pub async fn get_exam(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = fetch_exam(&pool, id).await?;
    Ok(Json(exam))
}

/// Updates an exam. Fields are optional; touching `questions` re-runs the
/// full validator gate against the declared `totalPoint`.
/// Admin only.
pub async fn update_exam(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Check existence first for a clean 404.
    let _existing = fetch_exam(&pool, id).await?;

    let validated_questions = match &payload.questions {
        Some(drafts) => {
            let total_point = payload.total_point.ok_or_else(|| {
                AppError::BadRequest(
                    "totalPoint is required when questions are updated".to_string(),
                )
            })?;
            Some(engine::validate_exam(drafts, total_point)?)
        }
        None => None,
    };

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE exams SET ");
    let mut separated = builder.separated(", ");

    if let Some(exam_name) = payload.exam_name {
        separated.push("exam_name = ");
        separated.push_bind_unseparated(exam_name);
    }

    if let Some(exam_duration) = payload.exam_duration {
        separated.push("exam_duration = ");
        separated.push_bind_unseparated(exam_duration);
    }

    if let Some(total_point) = payload.total_point {
        separated.push("total_point = ");
        separated.push_bind_unseparated(total_point);
    }

    if let Some(category) = payload.category {
        separated.push("category = ");
        separated.push_bind_unseparated(category.as_str());
    }

    if let Some(difficulty) = payload.difficulty {
        separated.push("difficulty = ");
        separated.push_bind_unseparated(difficulty.as_str());
    }

    if let Some(is_active) = payload.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
    }

    if let Some(questions) = validated_questions {
        separated.push("questions = ");
        separated.push_bind_unseparated(SqlJson(questions));
    }

    separated.push("updated_at = NOW()");

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(format!(" RETURNING {EXAM_COLUMNS}"));

    let exam: Exam = builder
        .build_query_as()
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update exam {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(exam))
}

/// Deletes an exam. Historical results keep their exam reference; nothing
/// cascades.
/// Admin only.
pub async fn delete_exam(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM exams WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete exam {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Exam with ID {} not found", id)));
    }

    Ok(Json(serde_json::json!({
        "message": "Exam deleted successfully",
        "id": id
    })))
}

/// Flips the active flag, independently of content edits.
/// Moderator or Admin.
pub async fn toggle_exam_active(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row: Option<(bool,)> =
        sqlx::query_as("UPDATE exams SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1 RETURNING is_active")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to toggle exam {}: {:?}", id, e);
                AppError::InternalServerError(e.to_string())
            })?;

    let (is_active,) = row.ok_or(AppError::NotFound(format!("Exam with ID {} not found", id)))?;

    Ok(Json(serde_json::json!({
        "message": "Exam active status toggled",
        "id": id,
        "isActive": is_active
    })))
}

pub(crate) async fn fetch_exam(pool: &PgPool, id: i64) -> Result<Exam, AppError> {
    sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch exam {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::NotFound(format!("Exam with ID {} not found", id)))
}
