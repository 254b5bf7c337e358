//! URL helpers for building endpoint addresses from the configured server.

/// Normalize a server URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use edubridge::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8080"), "http://localhost:8080");
/// assert_eq!(normalize_base_url("http://localhost:8080///"), "http://localhost:8080");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a server URL and an endpoint path without doubling slashes
///
/// # Examples
///
/// ```
/// use edubridge::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8080/", "/chat"),
///     "http://localhost:8080/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Accepts `http://` and `https://` URLs with a non-empty host part.
pub fn is_http_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    ["http://", "https://"].iter().any(|scheme| {
        candidate
            .strip_prefix(scheme)
            .map(|rest| !rest.trim_start_matches('/').is_empty())
            .unwrap_or(false)
    })
}
