//! Endpoint construction for the agent backend.
//!
//! The base URL is user-configurable and may carry a path prefix such as
//! `/api`, so joins must neither drop nor double slashes.

use crate::core::model::ChatTarget;

/// Remove trailing slashes from a base URL.
///
/// ```
/// use agentchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:3000/api/"), "http://localhost:3000/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use agentchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:3000/api/", "/health"),
///     "http://localhost:3000/api/health"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Relative chat endpoint for a target, e.g. `agents/aws-docs/chat/reasoning`.
pub fn chat_endpoint(target: &ChatTarget, reasoning: bool) -> String {
    let family = match target {
        ChatTarget::Agent(_) => "agents",
        ChatTarget::Team(_) => "teams",
    };
    let suffix = if reasoning { "/reasoning" } else { "" };
    format!(
        "{family}/{}/chat{suffix}",
        urlencoding::encode(target.id())
    )
}
