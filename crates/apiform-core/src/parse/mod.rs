pub mod blocks;
pub mod example;
pub mod method_path;
pub mod params;
pub mod requiredness;

use std::fs;
use std::path::Path;

use crate::catalog::Endpoint;
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::naming::slugify;

use blocks::EndpointBlock;

/// Read the Markdown source document. A missing or unreadable file is fatal.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    fs::read_to_string(path).map_err(|source| ExtractError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract every endpoint from a Markdown API reference, in document order.
///
/// Blocks without a detectable method and path are dropped silently.
pub fn extract_endpoints(text: &str, options: &ExtractConfig) -> Vec<Endpoint> {
    blocks::split_blocks(text, options)
        .iter()
        .filter_map(build_endpoint)
        .collect()
}

fn build_endpoint(block: &EndpointBlock<'_>) -> Option<Endpoint> {
    let body = block.body();
    let Some((method, path)) = method_path::extract_method_and_path(&body) else {
        log::debug!("dropping heading without method/path: {}", block.title);
        return None;
    };
    let params = params::extract_params(&block.lines, method);
    let example = example::extract_example(&body);

    Some(Endpoint {
        id: slugify(&block.title),
        title: block.title.clone(),
        section: block.section.clone(),
        method,
        path,
        params,
        example,
    })
}
