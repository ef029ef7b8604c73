use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.apiform.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiformConfig {
    /// Markdown API reference the catalog is extracted from.
    pub doc_path: String,
    /// Where `apiform build` writes the endpoint catalog.
    pub output: String,
    /// Catalog read by the workflow and request commands. Defaults to `output`.
    pub catalog: Option<String>,
    /// Replacement workflow library. The embedded library is used when unset.
    pub workflows: Option<String>,
    pub extract: ExtractConfig,
}

impl Default for ApiformConfig {
    fn default() -> Self {
        Self {
            doc_path: "network_api_docs.md".to_string(),
            output: "data/endpoints.json".to_string(),
            catalog: None,
            workflows: None,
            extract: ExtractConfig::default(),
        }
    }
}

impl ApiformConfig {
    /// Apply `DOC_PATH` / `OUTPUT_PATH` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(doc_path) = lookup(DOC_PATH_VAR).filter(|v| !v.is_empty()) {
            self.doc_path = doc_path;
        }
        if let Some(output) = lookup(OUTPUT_PATH_VAR).filter(|v| !v.is_empty()) {
            self.output = output;
        }
        self
    }

    /// The catalog consumers should read.
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(self.catalog.as_deref().unwrap_or(&self.output))
    }
}

/// Heading lines that belong to the document itself rather than to its sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// A `# ` line with this prefix is the document title, not a section.
    pub title_prefix: String,
    /// A `## ` line with this prefix is the reference title, not an endpoint.
    pub reference_heading: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_prefix: "# Network".to_string(),
            reference_heading: "## Network (Skynet) API Reference".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apiform.yaml";

/// Environment variable overriding `doc_path`.
pub const DOC_PATH_VAR: &str = "DOC_PATH";

/// Environment variable overriding `output`.
pub const OUTPUT_PATH_VAR: &str = "OUTPUT_PATH";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApiformConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ApiformConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r###"# apiform configuration
doc_path: network_api_docs.md     # Markdown API reference (env: DOC_PATH)
output: data/endpoints.json       # generated endpoint catalog (env: OUTPUT_PATH)
# catalog: data/endpoints.json    # catalog read by `request` / `workflow` (defaults to output)
# workflows: workflows.yaml       # replace the built-in workflow library

extract:
  title_prefix: "# Network"                             # document title, never a section
  reference_heading: "## Network (Skynet) API Reference"  # reference title, never an endpoint
"###
}
