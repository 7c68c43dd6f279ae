//! HTML page rendering.
//!
//! Templates live on disk (`templates.dir`) and are read per request. A
//! template refers to values as `{{key}}`; values set with [`Page::text`] are
//! HTML-escaped, values set with [`Page::html`] are inserted as-is and must
//! already be safe. Unknown keys render as empty text.

use std::collections::HashMap;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::errors::AppResult;

pub struct Page {
    template: String,
    values: HashMap<&'static str, String>,
}

impl Page {
    pub fn load(dir: &str, name: &str) -> AppResult<Self> {
        let path = Path::new(dir).join(name);
        let template = std::fs::read_to_string(&path).map_err(|e| {
            tracing::error!("Failed to read template {}: {}", path.display(), e);
            e
        })?;
        Ok(Self::from_template(template))
    }

    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            values: HashMap::new(),
        }
    }

    pub fn text(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        self.values.insert(key, encode_text(value.as_ref()).into_owned());
        self
    }

    pub fn html(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    /// Single pass, so placeholders inside inserted values stay literal.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    if let Some(value) = self.values.get(key) {
                        out.push_str(value);
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Escapes text for use inside a double-quoted attribute, e.g. a link target.
pub fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

/// Path segment for a sheet name in links and redirects.
pub fn sheet_path(name: &str) -> String {
    format!("/sheets/{}", urlencoding::encode(name))
}

/// `<li>` entries for a list of plain strings.
pub fn list_items<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| format!("<li>{}</li>", encode_text(v.as_ref())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The generic failure page. Kept in code so it renders even when the
/// template directory is unavailable.
pub fn fail_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Something went wrong</title><link rel="stylesheet" href="/static/style.css"></head>
<body>
<h1>Something went wrong</h1>
<p class="error">{}</p>
<a href="/index/">Back to your sheets</a>
</body>
</html>"#,
        encode_text(message)
    )
}
