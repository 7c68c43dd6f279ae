use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse, Response},
};

use crate::auth::Identity;
use crate::errors::AppResult;
use crate::pages::{self, Page};
use crate::state::AppState;

const ANONYMOUS_NAV: &str = r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#;
const MEMBER_NAV: &str = r#"<a href="/sheets/new">New sheet</a> <a href="/logout">Log out</a>"#;

pub async fn serve_index(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Response> {
    let page = Page::load(state.templates(), "index.html")?;

    let page = match identity.username() {
        None => page
            .text("title", "Please log in or register")
            .html("nav", ANONYMOUS_NAV),
        Some(username) => {
            let names = state.repo.list_sheet_names(username).await?;
            tracing::debug!("User {} has {} sheets", username, names.len());

            let sheets_html = names
                .iter()
                .map(|name| {
                    format!(
                        r#"<li><a href="{}">{}</a> <a href="{}/delete" class="delete-btn">Delete</a></li>"#,
                        pages::attr(&pages::sheet_path(name)),
                        html_escape::encode_text(name),
                        pages::attr(&pages::sheet_path(name)),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");

            page.text("title", format!("Welcome {}", username))
                .html("nav", MEMBER_NAV)
                .html("sheets", sheets_html)
        }
    };

    Ok(Html(page.render()).into_response())
}

pub async fn hello() -> &'static str {
    "hello\n"
}
