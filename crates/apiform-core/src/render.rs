use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::HttpMethod;
use crate::error::RenderError;

/// The request a snippet describes. At most one of `query` and `body` is set,
/// and neither is ever an empty object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestShape {
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Map<String, Value>>,
}

impl RequestShape {
    /// Place a payload as a query for GET/DELETE and as a body otherwise.
    pub fn new(endpoint: String, method: HttpMethod, payload: Map<String, Value>) -> Self {
        let (query, body) = if payload.is_empty() {
            (None, None)
        } else if method.sends_query() {
            (Some(payload), None)
        } else {
            (None, Some(payload))
        };
        Self {
            endpoint,
            method,
            query,
            body,
        }
    }

    /// YAML with the `endpoint` value always on one line.
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        let raw = serde_yaml_ng::to_string(self)?;
        Ok(fix_endpoint_yaml(&raw))
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> Result<RenderedRequest, RenderError> {
        Ok(RenderedRequest {
            yaml: self.to_yaml()?,
            json: self.to_json()?,
        })
    }
}

/// Both serializations of one request shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub yaml: String,
    pub json: String,
}

static FOLDED_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)endpoint:\s*>[+-]?\s*$").expect("valid folded endpoint regex")
});

static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(\w+):").expect("valid key line regex"));

/// Rejoin an `endpoint:` value that a YAML encoder folded into a block scalar.
///
/// `endpoint: >-` followed by more-indented continuation lines becomes a
/// single `endpoint: <value>` line. Literal `|` blocks carry real newlines
/// and are left alone, as are all other lines.
pub fn fix_endpoint_yaml(yaml: &str) -> String {
    let lines: Vec<&str> = yaml.split('\n').collect();
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let Some(caps) = FOLDED_ENDPOINT.captures(line) else {
            fixed.push(line.to_string());
            i += 1;
            continue;
        };

        let indent = caps.get(1).map_or("", |m| m.as_str());
        let mut value = String::new();
        let mut j = i + 1;

        while j < lines.len() {
            let next = lines[j];
            if next.trim().is_empty() {
                break;
            }
            if let Some(key) = KEY_LINE.captures(next) {
                if key[1].len() <= indent.len() {
                    break;
                }
            }

            let next_indent = next.len() - next.trim_start().len();
            if next_indent <= indent.len() {
                break;
            }
            let continuation = next.trim();
            if !is_block_indicator(continuation) {
                value.push_str(continuation);
            }
            j += 1;
        }

        if value.is_empty() {
            fixed.push(line.to_string());
        } else {
            fixed.push(format!("{indent}endpoint: {value}"));
        }
        i = j;
    }

    fixed.join("\n")
}

fn is_block_indicator(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| matches!(c, '>' | '|' | '-'))
}
