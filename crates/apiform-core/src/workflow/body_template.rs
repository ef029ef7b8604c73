use serde_json::{Map, Value};

use super::WorkflowInputs;

pub const ADHOC_REGISTER_PATH: &str = "/api/v4/sdn/arista/switch/adhoc_register";
pub const LOCKOUT_PATH: &str = "/api/v4/sdn/arista/switch/lockout";
pub const ADHOC_ONBOARD_PATH: &str = "/api/v4/sdn/arista/switch/adhoc_onboard";
pub const SYNC_CONFIG_PATH: &str = "/api/v4/sdn/arista/switch/sync_config";

/// Steps whose body is built from named inputs instead of the catalog example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTemplate {
    AdhocRegister,
    Lockout,
    AdhocOnboard,
    SyncConfig,
}

impl BodyTemplate {
    /// Match a step by its exact (unresolved) path.
    pub fn for_path(path: &str) -> Option<Self> {
        match path {
            ADHOC_REGISTER_PATH => Some(Self::AdhocRegister),
            LOCKOUT_PATH => Some(Self::Lockout),
            ADHOC_ONBOARD_PATH => Some(Self::AdhocOnboard),
            SYNC_CONFIG_PATH => Some(Self::SyncConfig),
            _ => None,
        }
    }

    pub fn build(&self, inputs: &WorkflowInputs) -> Map<String, Value> {
        let mut body = BodyBuilder::new(inputs);
        match self {
            Self::AdhocRegister => {
                for field in [
                    "topology_name",
                    "device_name",
                    "device_layer",
                    "device_model",
                    "device_pod",
                    "device_cabinet",
                ] {
                    body.field(field);
                }
                for field in [
                    "device_service_cabinet",
                    "device_management_cabinet",
                    "device_console_cabinet",
                ] {
                    body.optional(field);
                }
            }
            Self::Lockout => {
                body.field_as("hostname", "device_name");
                body.literal("lockout", "soft_lockout");
            }
            Self::AdhocOnboard => {
                body.field("device_name");
                body.field("device_mac");
            }
            Self::SyncConfig => {
                body.field("site");
                for field in ["device_type", "fabric", "pod"] {
                    body.optional(field);
                }
                // device_id and hostname are mutually exclusive; device_id wins.
                if body.has("device_id") {
                    body.optional("device_id");
                } else {
                    body.optional_as("hostname", "sync_hostname");
                }
            }
        }
        body.finish()
    }
}

/// Accumulates body fields in insertion order.
struct BodyBuilder<'a> {
    inputs: &'a WorkflowInputs,
    body: Map<String, Value>,
}

impl<'a> BodyBuilder<'a> {
    fn new(inputs: &'a WorkflowInputs) -> Self {
        Self {
            inputs,
            body: Map::new(),
        }
    }

    fn has(&self, input: &str) -> bool {
        self.inputs.get(input).is_some_and(|v| !v.is_empty())
    }

    /// Copy an input that is always sent, even when empty. Absent inputs are skipped.
    fn field(&mut self, name: &str) {
        self.field_as(name, name);
    }

    fn field_as(&mut self, name: &str, input: &str) {
        if let Some(value) = self.inputs.get(input) {
            self.body.insert(name.to_string(), Value::String(value.clone()));
        }
    }

    /// Copy an input only when it is non-empty.
    fn optional(&mut self, name: &str) {
        self.optional_as(name, name);
    }

    fn optional_as(&mut self, name: &str, input: &str) {
        if self.has(input) {
            self.field_as(name, input);
        }
    }

    fn literal(&mut self, name: &str, value: &str) {
        self.body
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    fn finish(self) -> Map<String, Value> {
        self.body
    }
}
