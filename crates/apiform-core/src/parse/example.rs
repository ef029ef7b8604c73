use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Marker text that introduces a request example.
pub const EXAMPLE_MARKER: &str = "Example Request";

/// A fenced block: opening fence plus the rest of its line, then the content
/// up to the next fence.
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?\n(.*?)```").expect("valid fenced block regex"));

/// Extract the first fenced block after "Example Request".
///
/// Valid JSON is returned parsed; anything else comes back as the trimmed raw
/// text in a JSON string. `None` when there is no marker, no fence, or the
/// fence is empty.
pub fn extract_example(body: &str) -> Option<Value> {
    let start = body.find(EXAMPLE_MARKER)?;
    let caps = FENCED_BLOCK.captures(&body[start..])?;
    let code = caps.get(1)?.as_str();
    if code.is_empty() {
        return None;
    }

    match serde_json::from_str(code) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(code.trim().to_string())),
    }
}
