use crate::config::ExtractConfig;

/// Section assigned to endpoints that appear before any `# ` heading.
pub const DEFAULT_SECTION: &str = "General";

/// The lines owned by one `## ` endpoint heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBlock<'a> {
    pub title: String,
    pub section: String,
    /// Lines after the heading up to (excluding) the next endpoint heading.
    pub lines: Vec<&'a str>,
}

impl EndpointBlock<'_> {
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

/// Segment a document into endpoint blocks.
///
/// Every `# ` line other than the document title updates the current
/// section, including ones that fall inside an earlier endpoint's block;
/// each block records the section in effect at its heading.
pub fn split_blocks<'a>(text: &'a str, options: &ExtractConfig) -> Vec<EndpointBlock<'a>> {
    let mut blocks: Vec<EndpointBlock<'a>> = Vec::new();
    let mut section = DEFAULT_SECTION.to_string();

    for line in text.lines() {
        if is_section_header(line, options) {
            section = heading_text(line, "# ");
        }

        if is_endpoint_header(line, options) {
            blocks.push(EndpointBlock {
                title: heading_text(line, "## "),
                section: section.clone(),
                lines: Vec::new(),
            });
        } else if let Some(current) = blocks.last_mut() {
            current.lines.push(line);
        }
    }

    blocks
}

fn heading_text(line: &str, marker: &str) -> String {
    line.strip_prefix(marker).unwrap_or(line).trim().to_string()
}

fn is_section_header(line: &str, options: &ExtractConfig) -> bool {
    line.starts_with("# ") && !line.starts_with(options.title_prefix.as_str())
}

fn is_endpoint_header(line: &str, options: &ExtractConfig) -> bool {
    line.starts_with("## ") && !line.starts_with(options.reference_heading.as_str())
}
