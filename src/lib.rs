pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod parser;
pub mod services;
pub mod state;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    extract::DefaultBodyLimit,
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};

use crate::state::AppState;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size;
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/", get(handlers::serve_index))
        .route("/index/", get(handlers::serve_index))
        .route("/hello", get(handlers::hello))

        // Auth routes
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .route("/register", get(handlers::serve_register_page).post(handlers::handle_register))
        .route("/logout", get(handlers::handle_logout))

        // Sheet routes
        .route("/sheets/new", get(handlers::serve_new_sheet).post(handlers::create_sheet))
        .route("/sheets/:name", get(handlers::view_sheet))
        .route("/sheets/:name/delete", get(handlers::confirm_delete).post(handlers::delete_sheet))

        .nest_service("/static", ServeDir::new(static_dir))

        .layer(from_fn_with_state(state.clone(), middleware::resolve_identity))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .with_state(state)
}
