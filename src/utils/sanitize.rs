//! Text cleanup for scraped table cells.

/// Trims `text` and collapses every internal whitespace run to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepares a numeric cell for decimal parsing.
///
/// Strips trailing citation markers (`432.92[1]`, `50.5[a][b]`), thousands
/// separators and surrounding whitespace. Anything else is left for the
/// decimal parser to reject.
pub fn clean_numeric_text(text: &str) -> String {
    let mut rest = text.trim();
    while rest.ends_with(']') {
        match rest.rfind('[') {
            Some(open) => rest = rest[..open].trim_end(),
            None => break,
        }
    }
    rest.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect()
}
