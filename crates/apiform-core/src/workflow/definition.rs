use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::HttpMethod;
use crate::error::WorkflowError;

use super::WorkflowInputs;

const BUILTIN_LIBRARY: &str = include_str!("../../data/workflows.yaml");

/// One call in a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub method: HttpMethod,
    /// Path template; may carry a literal or placeholder-bearing query string.
    pub path: String,
}

/// A fixed, ordered sequence of endpoint calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn has_step_path(&self, path: &str) -> bool {
        self.steps.iter().any(|step| step.path == path)
    }
}

/// Hand-authored workflow reference data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkflowLibrary {
    pub workflows: Vec<Workflow>,
    /// Extra input fields per workflow id that path text can't reveal.
    pub manual_inputs: IndexMap<String, Vec<String>>,
    /// Hand-written hints keyed by field name.
    pub input_hints: IndexMap<String, String>,
    /// Values used to pre-fill workflow inputs.
    pub default_inputs: WorkflowInputs,
}

impl WorkflowLibrary {
    /// The library compiled into the crate.
    pub fn builtin() -> Result<Self, WorkflowError> {
        Self::from_yaml(BUILTIN_LIBRARY)
    }

    pub fn from_yaml(input: &str) -> Result<Self, WorkflowError> {
        Ok(serde_yaml_ng::from_str(input)?)
    }

    /// Load a replacement library from disk.
    pub fn load(path: &Path) -> Result<Self, WorkflowError> {
        let content = fs::read_to_string(path).map_err(|source| WorkflowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn get(&self, id: &str) -> Result<&Workflow, WorkflowError> {
        self.workflows
            .iter()
            .find(|wf| wf.id == id)
            .ok_or_else(|| WorkflowError::UnknownWorkflow(id.to_string()))
    }

    pub fn manual_inputs_for(&self, workflow_id: &str) -> &[String] {
        self.manual_inputs
            .get(workflow_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn default_inputs(&self) -> WorkflowInputs {
        self.default_inputs.clone()
    }
}
