//! Heuristic requiredness of a documented parameter.
//!
//! The rules below are evaluated in order and the first one that applies
//! decides. Rule order is observable behaviour: a description such as
//! "Optional. Required if x" is optional because the leading-marker rule runs
//! first.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::catalog::HttpMethod;

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)required\s+(?:if|when)\b").expect("valid conditional regex")
});

static EXPLICIT_REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^required[.(]").expect("valid required regex"));

/// Phrases that flip a write parameter without a marker to optional.
static OPTIONAL_INDICATORS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)\bdefault",
        r"(?i)\bnull\b",
        r"(?i)\boptional\b",
        r"(?i)\bif\s+\w+",
        r"(?i)\bleft\s+out\b",
        r"(?i)\bcan\s+be\s+left",
        r"(?i)\bcan\s+be\s+null",
        r"(?i)\bmay\s+be\b",
    ])
    .expect("valid optional indicator regexes")
});

/// The text a rule is evaluated against.
#[derive(Debug)]
pub struct Subject<'a> {
    pub description: &'a str,
    pub lower: String,
    pub method: HttpMethod,
}

impl<'a> Subject<'a> {
    pub fn new(description: &'a str, method: HttpMethod) -> Self {
        Self {
            description,
            lower: description.to_lowercase(),
            method,
        }
    }

    /// Neither "optional" nor "required" opens the description.
    fn unmarked(&self) -> bool {
        !self.lower.starts_with("optional") && !self.lower.starts_with("required")
    }

    fn is_write(&self) -> bool {
        matches!(self.method, HttpMethod::Post | HttpMethod::Put)
    }
}

/// One row of the decision table.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Subject<'_>) -> bool,
    pub required: bool,
}

/// The decision table, in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "leading optional",
        applies: |s| s.lower.starts_with("optional"),
        required: false,
    },
    Rule {
        name: "conditionally required",
        applies: |s| CONDITIONAL.is_match(s.description),
        required: false,
    },
    Rule {
        name: "explicitly required",
        applies: |s| EXPLICIT_REQUIRED.is_match(s.description.trim()),
        required: true,
    },
    Rule {
        name: "unmarked write with optional wording",
        applies: |s| s.unmarked() && s.is_write() && OPTIONAL_INDICATORS.is_match(s.description),
        required: false,
    },
    Rule {
        name: "unmarked write",
        applies: |s| s.unmarked() && s.is_write(),
        required: true,
    },
    Rule {
        name: "unmarked read",
        applies: |s| s.unmarked(),
        required: false,
    },
];

/// Decide whether a parameter is required from its description and the
/// endpoint's method. Falls back to optional when no rule applies.
pub fn is_required(description: &str, method: HttpMethod) -> bool {
    let subject = Subject::new(description, method);
    RULES
        .iter()
        .find(|rule| (rule.applies)(&subject))
        .map(|rule| rule.required)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METHODS: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    #[test]
    fn test_leading_optional_wins_for_every_method() {
        for method in ALL_METHODS {
            assert!(!is_required("Optional. The tenant name", method));
            assert!(!is_required("OPTIONAL - required if site is set", method));
        }
    }

    #[test]
    fn test_explicit_required() {
        for method in ALL_METHODS {
            assert!(is_required("Required. Tenant name", method));
            assert!(is_required("required(string) site code", method));
        }
    }

    #[test]
    fn test_conditional_requirement_is_optional() {
        assert!(!is_required("Required if device_id is not set.", HttpMethod::Post));
        assert!(!is_required("Site code, required when fabric is given", HttpMethod::Put));
    }

    #[test]
    fn test_required_without_punctuation_falls_back_to_optional() {
        assert!(!is_required("Required: tenant name", HttpMethod::Post));
        assert!(!is_required("Required - tenant name", HttpMethod::Get));
    }

    #[test]
    fn test_write_defaults_to_required() {
        assert!(is_required("The tenant name", HttpMethod::Post));
        assert!(is_required("The tenant name", HttpMethod::Put));
        assert!(!is_required("The tenant name", HttpMethod::Patch));
    }

    #[test]
    fn test_write_with_optional_wording() {
        let cases = [
            "The VLAN ID. Default is 100.",
            "Description, can be null",
            "Only used if specified",
            "Can be left blank",
            "May be omitted",
            "Pod name (optional)",
            "Leave null to skip",
            "Can be left out entirely",
        ];
        for desc in cases {
            assert!(!is_required(desc, HttpMethod::Post), "{desc}");
        }
    }

    #[test]
    fn test_read_defaults_to_optional() {
        assert!(!is_required("The tenant name", HttpMethod::Get));
        assert!(!is_required("The tenant name", HttpMethod::Delete));
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names[0], "leading optional");
        assert_eq!(names[2], "explicitly required");
        assert_eq!(names.len(), 6);
    }
}
