use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::HttpMethod;

static METHOD_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)`(GET|POST|PUT|DELETE|PATCH)\s+([^`]+)`").expect("valid method/path regex")
});

/// Find the first inline code span of the form `` `METHOD /path` `` in a block.
///
/// The method is normalized to upper case and the path trimmed. A span whose
/// path is blank counts as no match.
pub fn extract_method_and_path(body: &str) -> Option<(HttpMethod, String)> {
    let caps = METHOD_PATH.captures(body)?;
    let method = caps[1].parse::<HttpMethod>().ok()?;
    let path = caps[2].trim();
    if path.is_empty() {
        return None;
    }
    Some((method, path.to_string()))
}
