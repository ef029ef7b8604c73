use indexmap::IndexMap;

use super::types::Endpoint;

/// Group endpoints by section, sections in order of first appearance.
pub fn group_by_section<'a, I>(endpoints: I) -> IndexMap<&'a str, Vec<&'a Endpoint>>
where
    I: IntoIterator<Item = &'a Endpoint>,
{
    let mut groups: IndexMap<&str, Vec<&Endpoint>> = IndexMap::new();
    for ep in endpoints {
        groups.entry(ep.section.as_str()).or_default().push(ep);
    }
    groups
}

/// Case-insensitive substring match over title, path, and method.
pub fn matches_search(endpoint: &Endpoint, term: &str) -> bool {
    let q = term.to_lowercase();
    endpoint.title.to_lowercase().contains(&q)
        || endpoint.path.to_lowercase().contains(&q)
        || endpoint.method.as_str().to_lowercase().contains(&q)
}
