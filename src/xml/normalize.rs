//! Textual namespace flattening applied before parsing
//!
//! Namespace-aware querying is a non-goal: declarations are stripped and
//! prefixed names rewritten so downstream conversion and queries see plain
//! tag and attribute names. The transform is pure text and idempotent.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static DEFAULT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r#"\s*xmlns\s*=\s*("[^"]*"|'[^']*')"#).unwrap()
});

static PREFIX_DECL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r#"\s*xmlns:([A-Za-z_][A-Za-z0-9._-]*)\s*=\s*("[^"]*"|'[^']*')"#).unwrap()
});

static XML_DECL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<\?xml.+?\?>").unwrap()
});

/// Flatten namespaces in raw markup.
///
/// Strips every `xmlns="…"` and `xmlns:p="…"` declaration, rewrites prefixed
/// attribute usages `p:name` to `p_name`, and drops the prefix from opening
/// and closing element tags. Inputs without namespaces pass through
/// unchanged, and re-running on normalized output is a no-op.
pub fn normalize(raw: &str) -> String {
    let mut prefixes: Vec<String> = Vec::new();
    for caps in PREFIX_DECL.captures_iter(raw) {
        if let Some(p) = caps.get(1) {
            if !prefixes.iter().any(|known| known == p.as_str()) {
                prefixes.push(p.as_str().to_string());
            }
        }
    }

    let mut out = DEFAULT_DECL.replace_all(raw, "").into_owned();
    out = PREFIX_DECL.replace_all(&out, "").into_owned();

    for prefix in &prefixes {
        // attribute usages keep the prefix, joined with an underscore
        let pattern = format!(r#"(["'\s]){}:"#, regex::escape(prefix));
        if let Ok(usage) = Regex::new(&pattern) {
            out = usage
                .replace_all(&out, |caps: &Captures<'_>| {
                    let lead = caps.get(1).map_or("", |m| m.as_str());
                    format!("{lead}{prefix}_")
                })
                .into_owned();
        }
        // element tags drop the prefix entirely
        out = out.replace(&format!("<{prefix}:"), "<");
        out = out.replace(&format!("</{prefix}:"), "</");
    }

    out
}

/// Remove the `<?xml …?>` declaration from a document, trimming the result.
pub fn strip_declaration(xml: &str) -> String {
    XML_DECL.replace(xml, "").trim().to_string()
}
