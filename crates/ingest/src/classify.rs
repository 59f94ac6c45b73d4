use sheetmap_core::{CanonicalField, FieldKeywords};

use crate::util::token_set_ratio;

/// Minimum token-set score for a header to claim a field. Lowering this
/// raises the false-positive rate on short abbreviated headers.
pub const MATCH_THRESHOLD: f64 = 70.0;

/// A header's best-scoring field before the threshold gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMatch {
    pub field: CanonicalField,
    pub score: f64,
}

/// Canonicalise a raw header for comparison: lowercase, strip everything
/// that is not a letter, digit, or space, collapse runs of whitespace, trim.
/// Total and idempotent.
pub fn normalize_header(raw: &str) -> String {
    let mut scrubbed = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            scrubbed.push(c);
        } else {
            scrubbed.push(' ');
        }
    }
    scrubbed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Score `header` against every synonym of every field, returning the single
/// best candidate and its score.
///
/// Replacement is strictly greater-than: on a tied score the first
/// field/synonym pair in registry order keeps the slot. That makes the
/// scan order part of the observable tie-break and must not be relaxed
/// to `>=`.
pub fn best_match(header: &str, keywords: &FieldKeywords) -> Option<FieldMatch> {
    let name = normalize_header(header);
    let mut best: Option<FieldMatch> = None;
    for (field, synonyms) in keywords.iter() {
        for synonym in synonyms {
            let score = token_set_ratio(&name, synonym);
            if best.map_or(true, |b| score > b.score) {
                best = Some(FieldMatch { field, score });
            }
        }
    }
    best
}

/// The field this header maps to, or `None` when the best score falls short
/// of [`MATCH_THRESHOLD`]. Sub-threshold headers are never auto-labelled;
/// the assignor buckets them as unclassified.
pub fn classify_header(header: &str, keywords: &FieldKeywords) -> Option<CanonicalField> {
    best_match(header, keywords)
        .filter(|m| m.score >= MATCH_THRESHOLD)
        .map(|m| m.field)
}
