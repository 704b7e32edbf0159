use crate::config::KeywordRules;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Team bucket. Every classified name gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Youth,
    Ladies,
    Mens,
    Disability,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Youth => "Youth",
            Category::Ladies => "Ladies",
            Category::Mens => "Mens",
            Category::Disability => "Disability",
        }
    }

    pub fn is_youth(self) -> bool {
        matches!(self, Category::Youth)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Age-group token such as `U12`. Matches inside a token too (`U12s`).
pub(crate) fn age_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bU\d+").expect("static age pattern"))
}

/// Age/youth signals outrank every gender or disability keyword.
pub(crate) fn classify(cleaned: &str, rules: &KeywordRules) -> Category {
    if age_pattern().is_match(cleaned) || rules.youth().is_match(cleaned) {
        Category::Youth
    } else if rules.ladies().is_match(cleaned) {
        Category::Ladies
    } else if rules.mens().is_match(cleaned) {
        Category::Mens
    } else if rules.disability().is_match(cleaned) {
        Category::Disability
    } else {
        Category::Mens
    }
}
