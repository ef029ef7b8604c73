//! Placeholder substitution into path templates, query strings, and example
//! bodies.
//!
//! Replacement is literal substring replacement, key by key in input order.
//! A value that textually contains another key's token can be rewritten by a
//! later key's pass, so the order of the input map matters.

use serde_json::{Map, Value};

use crate::naming::sanitize_param_name;

use super::WorkflowInputs;

/// The non-empty user value for `key`, looked up as given and then sanitized.
pub fn lookup_input<'a>(values: &'a WorkflowInputs, key: &str) -> Option<&'a str> {
    let raw = values.get(key).map(String::as_str).filter(|v| !v.is_empty());
    raw.or_else(|| {
        values
            .get(&sanitize_param_name(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    })
}

/// Token spellings replaced for one key, in replacement order.
fn token_variants(key: &str) -> [String; 6] {
    let lower = key.to_lowercase();
    let upper = key.to_uppercase();
    [
        format!("<{key}>"),
        format!("<{lower}>"),
        format!("<{upper}>"),
        key.to_string(),
        lower,
        upper,
    ]
}

/// Replace every token of every non-empty input in `input`.
pub fn replace_placeholders(input: &str, values: &WorkflowInputs) -> String {
    let mut output = input.to_string();
    for (key, value) in values {
        if key.is_empty() || value.is_empty() {
            continue;
        }
        for token in token_variants(key) {
            output = output.replace(&token, value);
        }
    }
    output
}

/// Apply [`replace_placeholders`] to every string inside an object, recursing
/// through nested objects. Arrays and scalars are copied unchanged.
pub fn replace_in_object(object: &Map<String, Value>, values: &WorkflowInputs) -> Map<String, Value> {
    object
        .iter()
        .map(|(key, value)| {
            let replaced = match value {
                Value::String(s) => Value::String(replace_placeholders(s, values)),
                Value::Object(nested) => Value::Object(replace_in_object(nested, values)),
                other => other.clone(),
            };
            (key.clone(), replaced)
        })
        .collect()
}

/// Resolve a path template against user inputs.
///
/// The base path gets token substitution. Each `key=value` query pair takes
/// the user's value for `key` when there is one, otherwise its template value
/// with tokens substituted.
pub fn apply_inputs_to_path(path: &str, values: &WorkflowInputs) -> String {
    let (raw_base, raw_query) = path.split_once('?').unwrap_or((path, ""));
    let base = replace_placeholders(raw_base, values);
    if raw_query.is_empty() {
        return base;
    }

    let pairs: Vec<String> = raw_query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, template) = pair.split_once('=').unwrap_or((pair, ""));
            let value = match lookup_input(values, key) {
                Some(user) => user.to_string(),
                None => replace_placeholders(template, values),
            };
            format!("{key}={value}")
        })
        .collect();

    format!("{base}?{}", pairs.join("&"))
}
