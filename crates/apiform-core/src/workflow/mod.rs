pub mod assembler;
pub mod body_template;
pub mod definition;
pub mod inputs;
pub mod placeholders;

use indexmap::IndexMap;

use crate::error::WorkflowError;

pub use assembler::{WorkflowAssembler, WorkflowSnippet, merge_ordered};
pub use body_template::{BodyTemplate, SYNC_CONFIG_PATH};
pub use definition::{Workflow, WorkflowLibrary, WorkflowStep};
pub use placeholders::{apply_inputs_to_path, replace_placeholders};

/// User-supplied values keyed by field name, in entry order.
pub type WorkflowInputs = IndexMap<String, String>;

/// Parse a `key=value` assignment. The value may itself contain `=` or be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), WorkflowError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(WorkflowError::InvalidAssignment(raw.to_string())),
    }
}
