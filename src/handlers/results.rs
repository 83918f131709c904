// src/handlers/results.rs
//
// Admin result inspection. Results are immutable; the only write is delete.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::result::{AdminResultResponse, ResultRow},
};

/// Lists all results, newest first, joined with exam and user display data
/// where those records still exist.
/// Moderator or Admin.
pub async fn list_results(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, ResultRow>(
        r#"
        SELECT r.id, r.exam_id, e.exam_name, r.user_id, u.username,
               r.total_point, r.score_points, r.submitted_answers, r.submitted_at
        FROM test_results r
        LEFT JOIN exams e ON e.id = r.exam_id
        LEFT JOIN users u ON u.id = r.user_id
        ORDER BY r.submitted_at DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let results: Vec<AdminResultResponse> = rows.into_iter().map(Into::into).collect();

    Ok(Json(results))
}

/// Deletes a result by ID.
/// Moderator or Admin.
pub async fn delete_result(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM test_results WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete result {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Result with ID {} not found",
            id
        )));
    }

    Ok(Json(serde_json::json!({
        "message": "Result deleted successfully",
        "id": id
    })))
}
