use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ExtractConfig;
use crate::error::CatalogError;
use crate::parse;

/// HTTP method of a documented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// GET and DELETE send their payload as a query, everything else as a body.
    pub fn sends_query(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

/// One documented field of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// One API operation extracted from the reference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub title: String,
    pub section: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Parsed JSON example, or the raw example text when it isn't valid JSON.
    #[serde(default)]
    pub example: Option<Value>,
}

impl Endpoint {
    /// The example request body when it is a JSON object, otherwise empty.
    pub fn example_body(&self) -> Map<String, Value> {
        match &self.example {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        base_path(&self.path)
    }
}

/// Strip the literal query string from a path template.
pub fn base_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// The extracted endpoint catalog, as persisted by the build step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub generated_at: DateTime<Utc>,
    pub endpoints: Vec<Endpoint>,
}

impl Catalog {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            generated_at: Utc::now(),
            endpoints,
        }
    }

    /// Extract a catalog from Markdown document text.
    pub fn from_document(text: &str, options: &ExtractConfig) -> Self {
        Self::new(parse::extract_endpoints(text, options))
    }

    /// Read a previously written catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the catalog as pretty JSON, creating parent directories as needed.
    ///
    /// The content is encoded before anything touches the disk.
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} endpoints to {}", self.endpoints.len(), path.display());
        Ok(())
    }

    /// Look up an endpoint by its slug.
    pub fn get(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|ep| ep.id == id)
    }

    /// Find the endpoint a workflow step calls: same method, same path with
    /// query strings ignored on both sides.
    pub fn find_for_step(&self, path: &str, method: HttpMethod) -> Option<&Endpoint> {
        let target = base_path(path);
        self.endpoints
            .iter()
            .find(|ep| ep.method == method && ep.base_path() == target)
    }

    /// Endpoints matching a search term. An empty term matches everything.
    pub fn filter<'a>(&'a self, term: &str) -> Vec<&'a Endpoint> {
        self.endpoints
            .iter()
            .filter(|ep| term.is_empty() || super::matches_search(ep, term))
            .collect()
    }
}
