pub mod grouping;
pub mod types;

pub use grouping::{group_by_section, matches_search};
pub use types::{Catalog, Endpoint, HttpMethod, Parameter, base_path};
