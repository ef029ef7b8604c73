use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{Catalog, Endpoint};
use crate::error::RenderError;
use crate::render::RequestShape;

use super::body_template::BodyTemplate;
use super::definition::{Workflow, WorkflowLibrary, WorkflowStep};
use super::placeholders::{apply_inputs_to_path, lookup_input, replace_in_object};
use super::WorkflowInputs;

/// The rendered request for one workflow step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnippet {
    pub step_id: String,
    pub step_label: String,
    pub yaml: String,
    pub json: String,
    pub request: RequestShape,
}

/// Builds workflow snippets against an immutable catalog and workflow library.
///
/// Every method is a pure function of its arguments, so snippets can be
/// recomputed on each input change.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowAssembler<'a> {
    pub catalog: &'a Catalog,
    pub library: &'a WorkflowLibrary,
}

impl<'a> WorkflowAssembler<'a> {
    pub fn new(catalog: &'a Catalog, library: &'a WorkflowLibrary) -> Self {
        Self { catalog, library }
    }

    /// The catalog endpoint a step calls, if any.
    pub fn endpoint_for(&self, step: &WorkflowStep) -> Option<&'a Endpoint> {
        self.catalog.find_for_step(&step.path, step.method)
    }

    /// One snippet per step, in step order.
    pub fn build_snippets(
        &self,
        workflow: &Workflow,
        inputs: &WorkflowInputs,
    ) -> Result<Vec<WorkflowSnippet>, RenderError> {
        workflow
            .steps
            .iter()
            .map(|step| self.build_snippet(step, inputs))
            .collect()
    }

    pub fn build_snippet(
        &self,
        step: &WorkflowStep,
        inputs: &WorkflowInputs,
    ) -> Result<WorkflowSnippet, RenderError> {
        let endpoint = apply_inputs_to_path(&step.path, inputs);
        let payload = self.step_payload(step, inputs);
        let request = RequestShape::new(endpoint, step.method, payload);
        let rendered = request.render()?;

        Ok(WorkflowSnippet {
            step_id: step.id.clone(),
            step_label: step.label.clone(),
            yaml: rendered.yaml,
            json: rendered.json,
            request,
        })
    }

    /// The query/body payload for a step before placement.
    pub fn step_payload(&self, step: &WorkflowStep, inputs: &WorkflowInputs) -> Map<String, Value> {
        if let Some(template) = BodyTemplate::for_path(&step.path) {
            return template.build(inputs);
        }

        let Some(endpoint) = self.endpoint_for(step) else {
            log::warn!(
                "no catalog endpoint for step {} ({} {})",
                step.id,
                step.method,
                step.path
            );
            return Map::new();
        };

        let example = replace_in_object(&endpoint.example_body(), inputs);
        merge_ordered(example, user_overrides(endpoint, inputs))
    }
}

/// Non-empty user values for the endpoint's declared parameters.
fn user_overrides(endpoint: &Endpoint, inputs: &WorkflowInputs) -> Map<String, Value> {
    let mut provided = Map::new();
    for param in &endpoint.params {
        if let Some(value) = lookup_input(inputs, &param.name) {
            provided.insert(param.name.clone(), Value::String(value.to_string()));
        }
    }
    provided
}

/// Overlay `overlay` onto `base`. Overlay values win; keys already in `base`
/// keep their position and new keys are appended in overlay order.
pub fn merge_ordered(base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    let mut merged = base;
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HttpMethod, Parameter};
    use serde_json::json;

    fn inputs(pairs: &[(&str, &str)]) -> WorkflowInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn param(name: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            description: String::new(),
            required: false,
        }
    }

    fn step(id: &str, method: HttpMethod, path: &str) -> WorkflowStep {
        WorkflowStep {
            id: id.to_string(),
            label: id.to_string(),
            description: String::new(),
            method,
            path: path.to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Endpoint {
                id: "create-vrf".to_string(),
                title: "Create VRF".to_string(),
                section: "SDN".to_string(),
                method: HttpMethod::Post,
                path: "/api/v4/sdn/vrf".to_string(),
                params: vec![param("vrf_name"), param("site"), param("tenant")],
                example: Some(json!({
                    "vrf_name": "<vrf_name>",
                    "site": "wcd",
                    "options": {"owner": "tenant"}
                })),
            },
            Endpoint {
                id: "get-vlan".to_string(),
                title: "Get VLAN".to_string(),
                section: "SDN".to_string(),
                method: HttpMethod::Get,
                path: "/api/v4/sdn/vlan?vlan_definition_id=<id>".to_string(),
                params: vec![param("vlan\\_definition\\_id")],
                example: None,
            },
        ])
    }

    #[test]
    fn test_merge_ordered() {
        let base = json!({"a": 1, "b": 2}).as_object().cloned().unwrap();
        let overlay = json!({"c": 3, "a": "x"}).as_object().cloned().unwrap();
        let merged = merge_ordered(base, overlay);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged["a"], "x");
    }

    #[test]
    fn test_example_body_with_user_overlay() {
        let catalog = catalog();
        let library = WorkflowLibrary::default();
        let assembler = WorkflowAssembler::new(&catalog, &library);
        let values = inputs(&[("vrf_name", "blue"), ("tenant", "acme"), ("site", "")]);
        let payload = assembler.step_payload(&step("s", HttpMethod::Post, "/api/v4/sdn/vrf"), &values);
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["vrf_name", "site", "options", "tenant"]);
        assert_eq!(payload["vrf_name"], "blue");
        assert_eq!(payload["site"], "wcd");
        assert_eq!(payload["options"], json!({"owner": "acme"}));
    }

    #[test]
    fn test_example_body_without_overlay() {
        let catalog = catalog();
        let library = WorkflowLibrary::default();
        let assembler = WorkflowAssembler::new(&catalog, &library);
        let payload =
            assembler.step_payload(&step("s", HttpMethod::Post, "/api/v4/sdn/vrf"), &inputs(&[]));
        assert_eq!(payload["vrf_name"], "<vrf_name>");
    }

    #[test]
    fn test_get_step_uses_query_and_sanitized_params() {
        let catalog = catalog();
        let library = WorkflowLibrary::default();
        let assembler = WorkflowAssembler::new(&catalog, &library);
        let values = inputs(&[("vlan_definition_id", "42")]);
        let snippet = assembler
            .build_snippet(
                &step("g", HttpMethod::Get, "/api/v4/sdn/vlan?vlan_definition_id=<vlan_definition_id>"),
                &values,
            )
            .unwrap();
        assert_eq!(snippet.request.endpoint, "/api/v4/sdn/vlan?vlan_definition_id=42");
        assert_eq!(
            snippet.request.query,
            json!({"vlan\\_definition\\_id": "42"}).as_object().cloned()
        );
        assert!(snippet.request.body.is_none());
    }

    #[test]
    fn test_unmatched_step_renders_endpoint_and_method_only() {
        let catalog = catalog();
        let library = WorkflowLibrary::default();
        let assembler = WorkflowAssembler::new(&catalog, &library);
        let snippet = assembler
            .build_snippet(&step("u", HttpMethod::Put, "/api/v4/sdn/unknown"), &inputs(&[]))
            .unwrap();
        assert!(snippet.request.query.is_none() && snippet.request.body.is_none());
        assert_eq!(snippet.json, "{\n  \"endpoint\": \"/api/v4/sdn/unknown\",\n  \"method\": \"PUT\"\n}");
    }

    #[test]
    fn test_template_steps_ignore_catalog() {
        let catalog = catalog();
        let library = WorkflowLibrary::default();
        let assembler = WorkflowAssembler::new(&catalog, &library);
        let values = inputs(&[("device_name", "sw1")]);
        let payload = assembler.step_payload(
            &step("l", HttpMethod::Post, "/api/v4/sdn/arista/switch/lockout"),
            &values,
        );
        assert_eq!(
            Value::Object(payload),
            json!({"hostname": "sw1", "lockout": "soft_lockout"})
        );
    }
}
