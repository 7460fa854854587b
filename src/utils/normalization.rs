//! Ingredient Normalization Utilities
//!
//! Converts free-text ingredient lists into ordered lowercase tokens.
//!
//! Catalog exports encode ingredient lists in several shapes:
//! - R list literals: `c("marha", "hagyma", "paprika")`
//! - JSON-ish arrays: `["marha", "hagyma"]`
//! - plain comma-separated text: `marha, hagyma, paprika`
//!
//! All of them reduce to the same token sequence. Source order is kept and
//! duplicates survive, since repeated ingredients weight the match score.

/// Default minimum token length (in characters)
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Separators accepted in free-text search queries
const QUERY_SEPARATORS: &[char] = &[',', ';', '+', '&'];

/// Strip list-literal wrappers and quote characters
///
/// `c("a","b")` → `a,b`, `["a", "b"]` → `a, b`
pub fn strip_list_literal(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(inner) = text.strip_prefix("c(") {
        text = inner.strip_suffix(')').unwrap_or(inner);
    } else if let Some(inner) = text.strip_prefix('[') {
        text = inner.strip_suffix(']').unwrap_or(inner);
    }

    text.chars()
        .filter(|c| !matches!(c, '"' | '\'' | '“' | '”' | '„'))
        .collect()
}

/// Normalize raw ingredient text into lowercase tokens
///
/// Absent input yields an empty sequence. Tokens shorter than `min_len`
/// characters are dropped.
pub fn normalize_ingredients(raw: Option<&str>, min_len: usize) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    strip_list_literal(raw)
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| token.chars().count() >= min_len)
        .collect()
}

/// Normalize a free-text search query into distinct search terms
///
/// Splits on commas, whitespace, semicolons, plus and ampersand. Keeps the
/// first occurrence of each term.
pub fn normalize_query(raw: &str, min_len: usize) -> Vec<String> {
    let cleaned = strip_list_literal(raw);
    let mut terms: Vec<String> = Vec::new();

    for token in cleaned.split(|c: char| c.is_whitespace() || QUERY_SEPARATORS.contains(&c)) {
        let term = token.trim().to_lowercase();
        if term.chars().count() < min_len {
            continue;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    terms
}
