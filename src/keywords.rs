//! Keyword input parsing.
//!
//! Keywords are entered as a comma-separated list. Because article text is
//! matched one word at a time, a literal space inside a keyword is written as
//! `_`: `"climate_change, vaccine"` → `["climate change", "vaccine"]`.

/// Split user input into lowercase keywords, dropping empty items.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.replace('_', " ").to_lowercase())
        .collect()
}
