use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::{Request, State},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::Identity;
use crate::state::AppState;

/// Resolves the session cookie into an [`Identity`] request extension and
/// keeps anonymous callers out of the sheet pages.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let identity = state.auth.identity(&jar);

    if identity == Identity::Anonymous && requires_login(req.uri().path()) {
        tracing::debug!("Anonymous request for {} sent to login", req.uri().path());
        return Redirect::to("/login").into_response();
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}

fn requires_login(path: &str) -> bool {
    path == "/sheets" || path.starts_with("/sheets/")
}
