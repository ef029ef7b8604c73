use apiform_core::catalog::Catalog;
use apiform_core::config::ExtractConfig;
use apiform_core::render::RequestShape;
use apiform_core::workflow::{WorkflowAssembler, WorkflowInputs, WorkflowLibrary};
use serde_json::json;

const NETWORK_DOCS: &str = include_str!("fixtures/network_api_docs.md");

fn catalog() -> Catalog {
    Catalog::from_document(NETWORK_DOCS, &ExtractConfig::default())
}

fn inputs(pairs: &[(&str, &str)]) -> WorkflowInputs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn builtin_library_loads() {
    let library = WorkflowLibrary::builtin().expect("built-in library should parse");
    assert_eq!(library.workflows.len(), 26);
    for workflow in &library.workflows {
        assert!(!workflow.steps.is_empty(), "{} has no steps", workflow.id);
    }
    assert!(library.get("no-such-workflow").is_err());
}

#[test]
fn sync_config_prefers_device_id() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library
        .get("deploy-new-arista-switch-existing-site")
        .unwrap();

    let mut values = library.default_inputs();
    values.insert("device_id".to_string(), "d1".to_string());
    values.insert("sync_hostname".to_string(), "h1".to_string());

    let snippets = assembler.build_snippets(workflow, &values).unwrap();
    assert_eq!(snippets.len(), 4);

    let sync = snippets.last().unwrap();
    assert_eq!(sync.step_id, "sync-switch-config");
    let body = sync.request.body.as_ref().expect("sync config sends a body");
    assert_eq!(body.get("device_id"), Some(&json!("d1")));
    assert!(body.get("hostname").is_none());

    let lockout = &snippets[1].request;
    assert_eq!(
        lockout.body.as_ref().and_then(|b| b.get("lockout")),
        Some(&json!("soft_lockout"))
    );
}

#[test]
fn sync_config_falls_back_to_hostname() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library
        .get("deploy-new-arista-switch-existing-site")
        .unwrap();

    let mut values = library.default_inputs();
    values.insert("sync_hostname".to_string(), "h1".to_string());

    let sync = assembler
        .build_snippet(workflow.steps.last().unwrap(), &values)
        .unwrap();
    assert_eq!(
        sync.request.body,
        json!({"site": "tst", "device_type": "lf", "fabric": "cloud", "pod": "p01", "hostname": "h1"})
            .as_object()
            .cloned()
    );
}

#[test]
fn load_balancer_inputs_come_from_query_keys() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library.get("load-balancer-vip-lifecycle").unwrap();

    let fields = assembler.input_fields(workflow);
    for expected in ["fqdn", "port", "type", "protocol", "site"] {
        assert!(fields.iter().any(|f| f == expected), "missing {expected}");
    }
    assert_eq!(
        assembler.input_hint(workflow, "fqdn"),
        "Fully-qualified domain name, e.g. rundeck.ssnc-corp.cloud"
    );
}

#[test]
fn gslb_query_uses_user_value() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library.get("gslb-wip-lifecycle").unwrap();
    assert!(assembler.input_fields(workflow).iter().any(|f| f == "wip"));

    let values = inputs(&[("wip", "app.ssnc-corp.cloud")]);
    let snippets = assembler.build_snippets(workflow, &values).unwrap();

    assert_eq!(snippets[0].request.endpoint, "/api/v4/cloud/gslb?wip=app.ssnc-corp.cloud");
    assert!(snippets[0].request.body.is_none());
    // The create example is raw text, so only the user's value lands in the body.
    assert_eq!(
        snippets[1].request.body,
        json!({"wip": "app.ssnc-corp.cloud"}).as_object().cloned()
    );
}

#[test]
fn missing_endpoint_yields_bare_request() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library.get("vm-ip-lifecycle").unwrap();

    let snippets = assembler.build_snippets(workflow, &WorkflowInputs::new()).unwrap();
    // Assign IP is in the fixture; Delete IP is not.
    assert_eq!(
        snippets[0].request.body,
        json!({"site": "wcd", "tenant": "ops", "hostname": "vm01"})
            .as_object()
            .cloned()
    );
    assert!(snippets[1].request.body.is_none());
    assert!(snippets[1].request.query.is_none());
}

#[test]
fn snippets_render_the_same_request_in_both_formats() {
    let catalog = catalog();
    let library = WorkflowLibrary::builtin().unwrap();
    let assembler = WorkflowAssembler::new(&catalog, &library);
    let workflow = library.get("load-balancer-vip-lifecycle").unwrap();

    let snippets = assembler
        .build_snippets(workflow, &library.default_inputs())
        .unwrap();
    for snippet in &snippets {
        let from_yaml: RequestShape = serde_yaml_ng::from_str(&snippet.yaml).unwrap();
        let from_json: RequestShape = serde_json::from_str(&snippet.json).unwrap();
        assert_eq!(from_yaml, snippet.request);
        assert_eq!(from_json, snippet.request);
        assert!(snippet.request.query.is_none() || snippet.request.body.is_none());
    }
}
