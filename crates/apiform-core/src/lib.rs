pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod naming;
pub mod parse;
pub mod render;
pub mod workflow;

pub use catalog::{Catalog, Endpoint, HttpMethod, Parameter};
pub use render::RequestShape;
pub use workflow::{Workflow, WorkflowAssembler, WorkflowInputs, WorkflowLibrary, WorkflowSnippet};
