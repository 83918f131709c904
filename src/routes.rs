// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, dictionaries, exams, results, tests},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, moderator_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, tests, dictionaries, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new().route("/logout", post(auth::logout)).layer(
                middleware::from_fn_with_state(state.clone(), auth_middleware),
            ),
        );

    let user_routes = Router::new()
        .route("/me", get(auth::me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Test-taking: any authenticated user.
    let test_routes = Router::new()
        .route("/", get(tests::list_tests))
        .route("/{id}", get(tests::get_test))
        .route("/{id}/submit", post(tests::submit_test))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let dictionary_routes = Router::new()
        .route("/question-categories", get(dictionaries::question_categories))
        .route("/difficulties", get(dictionaries::difficulties))
        .route("/exam-categories", get(dictionaries::exam_categories))
        .route("/permissions", get(dictionaries::permissions))
        .route("/statuses", get(dictionaries::statuses));

    // Exam authoring: admin only, except toggle-active which moderators may
    // also hit. Double middleware protection: Auth first, then role check.
    let admin_exam_routes = Router::new()
        .route("/", post(exams::create_exam).get(exams::list_exams))
        .route(
            "/list/without-questions",
            get(exams::list_exams_without_questions),
        )
        .route(
            "/{id}",
            get(exams::get_exam)
                .put(exams::update_exam)
                .delete(exams::delete_exam),
        )
        .layer(middleware::from_fn(admin_middleware))
        .merge(
            Router::new()
                .route("/{id}/toggle-active", patch(exams::toggle_exam_active))
                .layer(middleware::from_fn(moderator_middleware)),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_result_routes = Router::new()
        .route("/", get(results::list_results))
        .route("/{id}", delete(results::delete_result))
        .layer(middleware::from_fn(moderator_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_dictionary_routes = Router::new()
        .route("/question-categories", get(dictionaries::question_categories))
        .route("/difficulties", get(dictionaries::difficulties))
        .route("/exam-categories", get(dictionaries::exam_categories))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/tests", test_routes)
        .nest("/api/dictionaries", dictionary_routes)
        .nest("/api/admin/exams", admin_exam_routes)
        .nest("/api/admin/results", admin_result_routes)
        .nest("/api/admin/dictionaries", admin_dictionary_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
