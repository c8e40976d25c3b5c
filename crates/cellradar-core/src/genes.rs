//! Gene symbol canonicalisation.
//!
//! User input arrives with arbitrary case, stray punctuation and pasted
//! whitespace ("cd34 ", "HLA-DR"). The canonical form used for store
//! lookups is uppercase alphanumeric: first any non-alphanumeric that
//! immediately precedes a hyphen is dropped together with the hyphen,
//! then every remaining non-alphanumeric is stripped, then the result is
//! upper-cased. Input that reduces to the empty string is passed through
//! unchanged and simply fails lookup downstream.

use regex::Regex;

fn hyphen_pair_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9A-Za-z]-").unwrap())
}

fn non_alphanumeric_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9A-Za-z]").unwrap())
}

/// Canonicalise one raw gene name. Queries are canonicalised name by
/// name, duplicates included; they are dropped later, at resolution time.
pub fn canonical_symbol(raw: &str) -> String {
    let stripped = hyphen_pair_regex().replace_all(raw, "");
    let stripped = non_alphanumeric_regex().replace_all(&stripped, "");
    stripped.to_uppercase()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases_and_trims() {
        assert_eq!(canonical_symbol("cd34 "), "CD34");
        assert_eq!(canonical_symbol("  gata1"), "GATA1");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(canonical_symbol("HLA-DR"), "HLADR");
        assert_eq!(canonical_symbol("il.2"), "IL2");
        assert_eq!(canonical_symbol("tal_1"), "TAL1");
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let canonical = canonical_symbol("Spi-1");
        assert_eq!(canonical_symbol(&canonical), canonical);
    }

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(canonical_symbol(""), "");
        assert_eq!(canonical_symbol("---"), "");
    }

    #[test]
    fn test_distinct_spellings_collapse_to_one_symbol() {
        assert_eq!(canonical_symbol("cd34"), canonical_symbol("CD-34"));
    }
}
