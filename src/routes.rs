// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{quiz, user},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the quiz and user sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-role"),
        ]);

    let quiz_routes = Router::new()
        .route("/", post(quiz::create_quiz).get(quiz::list_quizzes))
        .route("/end", post(quiz::end_quiz))
        .route(
            "/{id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        )
        .route("/{id}/start", post(quiz::start_quiz));

    let user_routes = Router::new()
        .route("/", get(user::list_users))
        .route("/roles", post(user::assign_role).delete(user::remove_role))
        .route("/roles/batch", post(user::assign_role_list))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::rename_user)
                .delete(user::delete_user),
        );

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/users", user_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
