//! The data behind a single-endpoint input form: fields, defaults, hints, and
//! the request produced from submitted values.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{Endpoint, Parameter};
use crate::naming::sanitize_param_name;
use crate::render::RequestShape;
use crate::workflow::SYNC_CONFIG_PATH;
use crate::workflow::inputs::MUTUAL_EXCLUSION_WARNING;

const SDN_VERSION: &str = "sdn_version";
const SDN_VERSION_NOTICE: &str = "Defaulting to 2 (SDN2). Use 1 only for legacy/SDN1 fabrics.";

/// One input of an endpoint form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub required: bool,
    pub description: String,
    pub hint: String,
}

pub fn form_fields(endpoint: &Endpoint) -> Vec<FormField> {
    endpoint
        .params
        .iter()
        .map(|param| FormField {
            name: sanitize_param_name(&param.name),
            required: param.required,
            description: param.description.clone(),
            hint: hint_for(param, endpoint),
        })
        .collect()
}

/// The example value for a parameter, by raw or sanitized name.
pub fn example_for<'a>(endpoint: &'a Endpoint, param_name: &str) -> Option<&'a Value> {
    let Some(Value::Object(example)) = &endpoint.example else {
        return None;
    };
    example
        .get(param_name)
        .or_else(|| example.get(&sanitize_param_name(param_name)))
}

/// Pre-filled form values: example values for required parameters only, plus
/// `sdn_version: 2` when the endpoint takes one.
pub fn defaults_from_example(endpoint: &Endpoint) -> Map<String, Value> {
    let mut defaults = Map::new();
    for param in endpoint.params.iter().filter(|p| p.required) {
        if let Some(value) = example_for(endpoint, &param.name) {
            defaults.insert(sanitize_param_name(&param.name), value.clone());
        }
    }

    let takes_sdn_version = endpoint
        .params
        .iter()
        .any(|p| sanitize_param_name(&p.name) == SDN_VERSION);
    if takes_sdn_version && !defaults.contains_key(SDN_VERSION) {
        defaults.insert(SDN_VERSION.to_string(), Value::from(2));
    }
    defaults
}

pub fn hint_for(param: &Parameter, endpoint: &Endpoint) -> String {
    let example = example_for(endpoint, &param.name);
    let name = sanitize_param_name(&param.name);
    let description = param.description.trim();

    if name == SDN_VERSION {
        return match example {
            Some(ex) => format!("{SDN_VERSION_NOTICE} Example: {}", display_value(ex)),
            None => SDN_VERSION_NOTICE.to_string(),
        };
    }

    if endpoint.path == SYNC_CONFIG_PATH && matches!(name.as_str(), "device_id" | "hostname") {
        return match example {
            Some(ex) => format!("{MUTUAL_EXCLUSION_WARNING} Example: {}", display_value(ex)),
            None if !description.is_empty() => format!("{description} {MUTUAL_EXCLUSION_WARNING}"),
            None => MUTUAL_EXCLUSION_WARNING.to_string(),
        };
    }

    match example {
        Some(ex) => format!("Example: {}", display_value(ex)),
        None if !description.is_empty() => description.to_string(),
        None if param.required => "Required".to_string(),
        None => "Optional".to_string(),
    }
}

/// Drop empty strings and nulls; `0` and `false` are kept.
pub fn clean_payload(values: Map<String, Value>) -> Map<String, Value> {
    values
        .into_iter()
        .filter(|(_, value)| !matches!(value, Value::Null) && value.as_str() != Some(""))
        .collect()
}

/// Build the request for submitted form values.
///
/// On the sync-config endpoint `device_id` and `hostname` are mutually
/// exclusive; when both are set `hostname` is dropped.
pub fn build_endpoint_request(endpoint: &Endpoint, values: &Map<String, Value>) -> RequestShape {
    let mut payload = clean_payload(values.clone());

    let both_filters = ["device_id", "hostname"]
        .iter()
        .all(|key| payload.get(*key).is_some_and(is_truthy));
    if endpoint.path == SYNC_CONFIG_PATH && both_filters {
        payload = payload
            .into_iter()
            .filter(|(key, _)| key != "hostname")
            .collect();
    }

    RequestShape::new(endpoint.path.clone(), endpoint.method, payload)
}

/// Render a JSON value for display: strings bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
