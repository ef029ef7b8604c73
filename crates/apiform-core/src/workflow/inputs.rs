use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::form::display_value;
use crate::naming::sanitize_param_name;

use super::assembler::WorkflowAssembler;
use super::body_template::SYNC_CONFIG_PATH;
use super::definition::Workflow;

static ANGLED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").expect("valid angled token regex"));

static UPPER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z0-9_]{2,}\b").expect("valid upper token regex"));

/// Shown for the sync-config filters that can't be combined.
pub const MUTUAL_EXCLUSION_WARNING: &str =
    "⚠️ Cannot be used together with the other parameter. Only one can be specified.";

impl WorkflowAssembler<'_> {
    /// Every input field a workflow can use, deduplicated in order of first
    /// discovery.
    ///
    /// Fields come from angle-bracket and upper-case path tokens, query keys,
    /// angle-bracket tokens in query values, the matched endpoint's
    /// parameters and example keys, and the workflow's manual field list.
    pub fn input_fields(&self, workflow: &Workflow) -> Vec<String> {
        let mut tokens: IndexSet<String> = IndexSet::new();

        for step in &workflow.steps {
            for caps in ANGLED_TOKEN.captures_iter(&step.path) {
                tokens.insert(caps[1].to_string());
            }
            for m in UPPER_TOKEN.find_iter(&step.path) {
                tokens.insert(m.as_str().to_string());
            }

            if let Some((_, query)) = step.path.split_once('?') {
                for pair in query.split('&') {
                    let mut parts = pair.split('=');
                    let key = parts.next().unwrap_or_default();
                    let value = parts.next().unwrap_or_default();
                    if !key.is_empty() {
                        tokens.insert(key.to_string());
                    }
                    for caps in ANGLED_TOKEN.captures_iter(value) {
                        tokens.insert(caps[1].to_string());
                    }
                }
            }

            if let Some(endpoint) = self.endpoint_for(step) {
                tokens.extend(endpoint.params.iter().map(|p| p.name.clone()));
                tokens.extend(endpoint.example_body().keys().cloned());
            }
        }

        tokens.extend(self.library.manual_inputs_for(&workflow.id).iter().cloned());
        tokens.into_iter().collect()
    }

    /// A short help text for one workflow input field.
    ///
    /// Manual hints win, then the sync-config exclusion warning, then the
    /// first matching parameter description or example value across the
    /// workflow's steps. Empty when nothing is known.
    pub fn input_hint(&self, workflow: &Workflow, field: &str) -> String {
        let normalized = sanitize_param_name(field);
        let hints = &self.library.input_hints;
        if let Some(hint) = hints.get(field).or_else(|| hints.get(&normalized)) {
            return hint.clone();
        }

        if workflow.has_step_path(SYNC_CONFIG_PATH)
            && matches!(normalized.as_str(), "device_id" | "sync_hostname")
        {
            return MUTUAL_EXCLUSION_WARNING.to_string();
        }

        for step in &workflow.steps {
            let Some(endpoint) = self.endpoint_for(step) else {
                continue;
            };
            let param = endpoint
                .params
                .iter()
                .find(|p| sanitize_param_name(&p.name) == normalized || p.name == field);
            if let Some(param) = param.filter(|p| !p.description.is_empty()) {
                return param.description.clone();
            }

            let example = endpoint.example_body();
            for key in [field, normalized.as_str()] {
                if let Some(value) = example.get(key).filter(|v| !v.is_null()) {
                    return format!("Example: {}", display_value(value));
                }
            }
        }

        String::new()
    }
}
