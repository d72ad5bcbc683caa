//! Slide naming: `NNN-` ordering prefixes and display names.
//!
//! Content folders may carry an optional numeric prefix that fixes their
//! position without showing up in the gallery:
//! - `010-Chapter-One/` → slide "Chapter One", ordered 10th
//! - `extras/` → slide "extras", ordered after every numbered folder
//!
//! What the player sees is the custom name set for a slide, or the slide
//! name capitalized ("extras" → "Extras").

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Result of parsing a folder name like `020-Bad-Endings`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Bad-Endings`)
    pub number: Option<u32>,
    /// Slide name: the part after `NNN-` with dashes turned into spaces.
    /// For unnumbered entries, this is the full input with the same treatment.
    pub name: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-Bad-Endings"` → number=Some(20), name="Bad Endings"
/// - `"001"` → number=Some(1), name=""
/// - `"extras"` → number=None, name="extras"
/// - `"side-stories"` → number=None, name="side stories"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-') {
        if let Ok(number) = prefix.parse::<u32>() {
            return ParsedName {
                number: Some(number),
                name: rest.replace('-', " "),
            };
        }
    }
    if let Ok(number) = name.parse::<u32>() {
        return ParsedName {
            number: Some(number),
            name: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.replace('-', " "),
    }
}

/// Numbered entries first (by number), then the rest by name.
pub fn entry_order(a: &ParsedName, b: &ParsedName) -> Ordering {
    match (a.number, b.number) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The name shown for a slide: its custom name, or the name capitalized.
pub fn display_name(name: &str, custom: &BTreeMap<String, String>) -> String {
    custom
        .get(name)
        .cloned()
        .unwrap_or_else(|| capitalize(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word_name() {
        let p = parse_entry_name("020-Bad-Endings");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "Bad Endings");
    }

    #[test]
    fn number_only() {
        assert_eq!(parse_entry_name("001").name, "");
        assert_eq!(parse_entry_name("001-").number, Some(1));
        assert_eq!(parse_entry_name("001-").name, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("side-stories");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "side stories");
    }

    #[test]
    fn non_numeric_prefix_is_part_of_name() {
        let p = parse_entry_name("v2-extras");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "v2 extras");
    }

    #[test]
    fn ordering_puts_numbered_first() {
        let mut names: Vec<_> = ["extras", "020-B", "010-C", "alpha"]
            .iter()
            .map(|n| parse_entry_name(n))
            .collect();
        names.sort_by(entry_order);
        let sorted: Vec<_> = names.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(sorted, vec!["C", "B", "alpha", "extras"]);
    }

    #[test]
    fn capitalize_lowers_the_rest() {
        assert_eq!(capitalize("extras"), "Extras");
        assert_eq!(capitalize("BAD endings"), "Bad endings");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn custom_name_wins() {
        let mut custom = BTreeMap::new();
        custom.insert("ch1".to_string(), "Chapter I".to_string());
        assert_eq!(display_name("ch1", &custom), "Chapter I");
        assert_eq!(display_name("ch2", &custom), "Ch2");
    }
}
