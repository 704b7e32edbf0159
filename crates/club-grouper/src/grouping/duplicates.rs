use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn scoreline() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d+\s*-\s*\d+(?:\s*\(.*?\))?\n?$").expect("static scoreline pattern")
    })
}

/// Match results such as `2-1` or `3 - 3 (aet)` that leak into the name column.
pub(crate) fn is_scoreline(name: &str) -> bool {
    scoreline().is_match(name)
}

/// Rows that count: non-blank and not a scoreline, still in input order.
pub(crate) fn countable_rows(raw: &[String]) -> Vec<&str> {
    raw.iter()
        .map(String::as_str)
        .filter(|name| !name.trim().is_empty() && !is_scoreline(name))
        .collect()
}

/// First occurrence of every byte-identical name, in input order.
pub(crate) fn unique_rows<'a>(rows: &[&'a str]) -> IndexSet<&'a str> {
    rows.iter().copied().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRecord {
    pub name: String,
    pub occurrences: usize,
    pub duplicate_count: usize,
}

/// Exact-duplicate statistics, independent of club grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    /// Ordered by name.
    pub records: Vec<DuplicateRecord>,
    pub total_duplicates: usize,
    /// Countable rows before duplicates are collapsed.
    pub original_team_count: usize,
}

impl DuplicateReport {
    pub fn has_duplicates(&self) -> bool {
        self.total_duplicates > 0
    }
}

pub(crate) fn account_duplicates(rows: &[&str]) -> DuplicateReport {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for name in rows.iter().copied() {
        *occurrences.entry(name).or_default() += 1;
    }

    let records: Vec<DuplicateRecord> = occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| DuplicateRecord {
            name: name.to_string(),
            occurrences: count,
            duplicate_count: count - 1,
        })
        .collect();

    DuplicateReport {
        total_duplicates: records.iter().map(|record| record.duplicate_count).sum(),
        original_team_count: rows.len(),
        records,
    }
}
