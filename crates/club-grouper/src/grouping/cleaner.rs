use crate::config::KeywordRules;
use regex::Regex;
use std::sync::OnceLock;

fn fc_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bF\.?C\b\.?").expect("static FC pattern"))
}

fn afc_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bAFC\b").expect("static AFC pattern"))
}

fn trailing_punctuation() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.,]$").expect("static trailing pattern"))
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Working form of a raw name: abbreviations expanded, FC/AFC tokens and one
/// trailing `.`/`,` removed, whitespace collapsed.
pub(crate) fn clean_name(raw: &str, rules: &KeywordRules) -> String {
    let expanded = rules.expand_abbreviations(raw);
    let without_fc = fc_token().replace_all(&expanded, "");
    let without_afc = afc_token().replace_all(&without_fc, "");
    let without_trailing = trailing_punctuation().replace(&without_afc, "");
    collapse_whitespace(&without_trailing)
}
