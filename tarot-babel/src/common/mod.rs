//! The bidirectional normalization engines shared by all storage adapters.
//!
//! Flattening and reconstruction are two halves of one contract over the
//! relational schema; the keyword cell serialization lives here because both
//! sides must agree on it exactly.

pub mod flatten;
pub mod reconstruct;

/// Separator between serialized keywords: comma plus a single space. The
/// flatten engine joins with this exact string and the reconstruct engine
/// splits on it; the two must never drift apart.
pub const KEYWORD_SEPARATOR: &str = ", ";

/// Serialize a keyword list into a single tabular cell.
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(KEYWORD_SEPARATOR)
}

/// Split a keyword cell back into a list. A blank cell is an empty list,
/// never a list holding one empty string.
pub fn split_keywords(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(KEYWORD_SEPARATOR).map(str::to_string).collect()
}
