/// Derive a stable endpoint id from its heading.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims dashes from both ends.
///
/// - `Create Zone` → `create-zone`
/// - `GET /api/v4 (SDN2)` → `get-api-v4-sdn2`
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut pending_dash = false;

    for ch in lower.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Sanitize a parameter name taken from a Markdown table cell.
///
/// Unescapes `\_`, drops backticks and angle brackets, strips trailing
/// `:`/`;`/`,`, trims, and collapses whitespace runs into `_`. The pass is
/// repeated until the name stops changing, so sanitizing is idempotent.
pub fn sanitize_param_name(name: &str) -> String {
    let mut current = sanitize_once(name);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(name: &str) -> String {
    let unescaped = name.replace("\\_", "_");
    let stripped: String = unescaped
        .chars()
        .filter(|c| !matches!(c, '`' | '<' | '>'))
        .collect();
    let stripped = stripped
        .strip_suffix([':', ';', ','])
        .unwrap_or(&stripped)
        .trim();
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}
