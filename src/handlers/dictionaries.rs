// src/handlers/dictionaries.rs
//
// Static `{label, value}` listings the front-end builds its pickers from.

use axum::{Json, response::IntoResponse};

use crate::models::dictionary;

pub async fn question_categories() -> impl IntoResponse {
    Json(dictionary::question_categories())
}

pub async fn difficulties() -> impl IntoResponse {
    Json(dictionary::difficulties())
}

pub async fn exam_categories() -> impl IntoResponse {
    Json(dictionary::exam_categories())
}

pub async fn permissions() -> impl IntoResponse {
    Json(dictionary::permissions())
}

pub async fn statuses() -> impl IntoResponse {
    Json(dictionary::statuses())
}
