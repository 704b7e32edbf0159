use super::classifier::Category;
use super::cleaner::collapse_whitespace;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn parenthesized() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\(.*?\)").expect("static parenthesis pattern"))
}

fn fc_variant() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(?:JF?C?|F C)\b").expect("static FC variant pattern"))
}

/// Grouping-only canonical form of a display club name. Never shown to users.
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn normalize_for_merge(display_name: &str) -> String {
    let upper = display_name.to_uppercase();
    let without_periods = upper.replace('.', "");
    let without_parens = parenthesized().replace_all(&without_periods, "");
    let collapsed = collapse_whitespace(&without_parens);
    fc_variant().replace_all(&collapsed, "FC").into_owned()
}

/// `(merge-normalized club, category)`; one per output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub club: String,
    pub category: Category,
}

impl GroupKey {
    pub fn new(club: impl Into<String>, category: Category) -> Self {
        Self {
            club: club.into(),
            category,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.club, self.category)
    }
}
