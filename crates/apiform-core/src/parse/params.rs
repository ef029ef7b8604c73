use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{HttpMethod, Parameter};
use crate::naming::sanitize_param_name;

use super::requiredness::is_required;

static TABLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\| *Parameter\s*\|").expect("valid table header regex"));

/// Collect parameters from every `| Parameter | ... |` table in a block.
///
/// The header row and the separator row after it are skipped; rows are read
/// until the first line that doesn't start with `|`. Rows with fewer than two
/// non-empty cells are ignored.
pub fn extract_params(lines: &[&str], method: HttpMethod) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        if !TABLE_HEADER.is_match(lines[idx]) {
            idx += 1;
            continue;
        }

        idx += 2;
        while idx < lines.len() && lines[idx].starts_with('|') {
            if let Some(param) = parse_row(lines[idx], method) {
                params.push(param);
            }
            idx += 1;
        }
    }

    params
}

fn parse_row(line: &str, method: HttpMethod) -> Option<Parameter> {
    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if cells.len() < 2 {
        return None;
    }

    let description = cells[1].to_string();
    Some(Parameter {
        name: sanitize_param_name(cells[0]),
        required: is_required(&description, method),
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_basic_table() {
        let text = "\
| Parameter | Description |
|---|---|
| `tenant` | Required. Tenant name |
| site\\_code: | Optional. Site code |
";
        let params = extract_params(&lines(text), HttpMethod::Post);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "tenant");
        assert!(params[0].required);
        assert_eq!(params[1].name, "site_code");
        assert_eq!(params[1].description, "Optional. Site code");
        assert!(!params[1].required);
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let text = "|parameter| description |\n|--|--|\n| a | b |\n";
        let params = extract_params(&lines(text), HttpMethod::Get);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "a");
    }

    #[test]
    fn test_short_rows_skipped() {
        let text = "\
| Parameter | Description |
|---|---|
| lonely | |
|  |  |
| kept | value |
";
        let params = extract_params(&lines(text), HttpMethod::Get);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "kept");
    }

    #[test]
    fn test_table_ends_at_non_pipe_line() {
        let text = "\
| Parameter | Description |
|---|---|
| a | first |

| b | not part of the table |
";
        let params = extract_params(&lines(text), HttpMethod::Get);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_multiple_tables() {
        let text = "\
| Parameter | Description |
|---|---|
| a | first |
Body fields:
| Parameter | Description | Type |
|---|---|---|
| b | second | string |
";
        let params = extract_params(&lines(text), HttpMethod::Post);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_other_tables_ignored() {
        let text = "| Field | Description |\n|---|---|\n| a | b |\n";
        assert!(extract_params(&lines(text), HttpMethod::Get).is_empty());
    }
}
