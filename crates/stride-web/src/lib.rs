//! Stride Web Server
//!
//! Axum-based HTTP API for the Stride planning backend.

pub mod auth;
pub mod routes;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Auth
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        // Goals
        .route("/goals", get(routes::goals::list_goals))
        .route("/goals", post(routes::goals::create_goal))
        .route("/goals/{id}", get(routes::goals::get_goal))
        .route("/goals/{id}", put(routes::goals::update_goal))
        .route("/goals/{id}", delete(routes::goals::delete_goal))
        // Sprints
        .route("/sprints", get(routes::sprints::list_sprints))
        .route("/sprints", post(routes::sprints::create_sprint))
        .route("/sprints/{id}", get(routes::sprints::get_sprint))
        .route("/sprints/{id}", put(routes::sprints::update_sprint))
        .route("/sprints/{id}", delete(routes::sprints::delete_sprint))
        // Tasks
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/{id}", get(routes::tasks::get_task))
        .route("/tasks/{id}", put(routes::tasks::update_task))
        .route("/tasks/{id}", delete(routes::tasks::delete_task))
        // AI
        .route("/ai/chat", post(routes::ai::chat))
        .route("/ai/suggest-goals", post(routes::ai::suggest_goals))
        .route("/ai/suggest-tasks", post(routes::ai::suggest_tasks))
        .route(
            "/ai/regenerate-goal-scope/{goal_id}",
            post(routes::ai::regenerate_goal_scope),
        )
        .route("/ai/conversations", get(routes::ai::list_conversations))
        .route("/ai/conversations/{id}", get(routes::ai::get_conversation))
        // Health
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the listener fails.
///
/// Shutdown runs the cache teardown so the optional connection is released
/// exactly once.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let cache = state.cache.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("API listening on http://{}:{}", host, port);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    cache.close().await;
    result?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
