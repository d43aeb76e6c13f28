//! Recipient page parameters
//!
//! The proposal page is addressed as `/?name=<name>&image=<url>`. Both
//! values are untrusted and are cleaned here before they reach the page.

use url::Url;

use crate::constants::{DEFAULT_RECIPIENT_NAME, MAX_NAME_LEN};

/// Sanitized parameters for the proposal page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientParams {
    pub name: String,
    pub photo: Option<Url>,
}

/// Where a page request should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// No recipient name: send the visitor to the create flow
    Create,
    Proposal(RecipientParams),
}

/// Keep ASCII letters, whitespace, `'` and `-`; cut to 20 characters; trim;
/// title-case each space-separated word. Falls back when nothing survives.
pub fn sanitize_name(raw: Option<&str>, fallback: &str) -> String {
    let Some(raw) = raw else {
        return fallback.to_string();
    };

    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || *c == '\'' || *c == '-')
        .take(MAX_NAME_LEN)
        .collect();
    let trimmed = filtered.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    trimmed
        .split(' ')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Only absolute http(s) URLs survive; anything else means "no photo".
pub fn sanitize_photo_url(raw: Option<&str>) -> Option<Url> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Some(url),
        Ok(url) => {
            tracing::debug!(scheme = url.scheme(), "photo URL rejected");
            None
        }
        Err(err) => {
            tracing::debug!(%err, "photo URL unparseable");
            None
        }
    }
}

/// Resolve a raw query string (with or without the leading `?`).
pub fn resolve_route(query: &str) -> PageRoute {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut name = None;
    let mut image = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "name" if name.is_none() => name = Some(value.into_owned()),
            "image" if image.is_none() => image = Some(value.into_owned()),
            _ => {}
        }
    }

    match name.as_deref() {
        None | Some("") => PageRoute::Create,
        Some(raw) => PageRoute::Proposal(RecipientParams {
            name: sanitize_name(Some(raw), DEFAULT_RECIPIENT_NAME),
            photo: sanitize_photo_url(image.as_deref()),
        }),
    }
}
