use super::classifier::age_pattern;
use crate::config::TokenSet;
use regex::Regex;
use std::sync::OnceLock;

/// Leading token run of the cleaned name that precedes the first age token or
/// stop word, looking only at the text before the first `-`.
///
/// A trailing club suffix ("United", "Town") is re-attached when it is the
/// last token and was not already captured. When the very first token is a
/// stop word the first token is returned alone. A name with nothing before
/// its first `-` falls back to the first word found anywhere in it, so only
/// blank input yields an empty base.
pub(crate) fn extract_base_name(cleaned: &str, stop_words: &TokenSet, suffixes: &TokenSet) -> String {
    let segment = cleaned.split('-').next().unwrap_or_default().trim();
    let tokens: Vec<&str> = segment.split_whitespace().collect();

    let mut captured: Vec<&str> = tokens
        .iter()
        .copied()
        .take_while(|token| !is_stop_token(token, stop_words))
        .collect();

    if let Some(last) = tokens.last().copied() {
        if suffixes.contains(last) && !captured.contains(&last) {
            captured.push(last);
        }
    }

    if captured.is_empty() {
        captured.extend(tokens.first().copied().or_else(|| first_word(cleaned)));
    }

    captured.join(" ").trim().to_string()
}

fn first_word(cleaned: &str) -> Option<&str> {
    cleaned
        .split(|c: char| c == '-' || c.is_whitespace())
        .find(|word| !word.is_empty())
}

fn is_stop_token(token: &str, stop_words: &TokenSet) -> bool {
    age_pattern().is_match(token) || stop_words.contains(token)
}

fn fc_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(F\.?C\.?)\s+").expect("static FC prefix pattern"))
}

/// Re-reads the uncleaned name: a leading `FC`/`F.C.` is kept verbatim in
/// front of the extracted base name.
pub(crate) fn display_club_name(original: &str, base_name: &str) -> String {
    match fc_prefix().captures(original).and_then(|caps| caps.get(1)) {
        Some(prefix) => format!("{} {}", prefix.as_str(), base_name),
        None => base_name.to_string(),
    }
}
