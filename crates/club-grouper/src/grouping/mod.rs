//! Rule-based grouping of free-text team names into `club (category)` rows.
//!
//! Per name: clean → classify + extract base name → display name → merge key.
//! Names are bucketed by key, then a second pass reconciles youth buckets.
//! Exact-duplicate accounting runs over the same input so the grouped total
//! can be checked against the original row count.

mod aggregator;
mod classifier;
mod cleaner;
mod duplicates;
mod extractor;
mod merge_key;
mod reconciler;
pub mod report;

pub use classifier::Category;
pub use duplicates::{DuplicateRecord, DuplicateReport};
pub use merge_key::{normalize_for_merge, GroupKey};

use crate::config::KeywordRules;
use aggregator::GroupingAggregator;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Every stage of the pipeline for one raw name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedName {
    pub original: String,
    pub cleaned: String,
    pub category: Category,
    pub base_name: String,
    pub display_name: String,
    pub key: GroupKey,
}

/// One output row: every original name sharing a [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamGroup {
    pub club: String,
    pub category: Category,
    pub members: Vec<String>,
}

impl TeamGroup {
    pub(crate) fn new(key: GroupKey, members: Vec<String>) -> Self {
        Self {
            club: key.club,
            category: key.category,
            members,
        }
    }

    /// Rendered `"{club} ({category})"` label.
    pub fn key(&self) -> String {
        format!("{} ({})", self.club, self.category)
    }

    pub fn team_count(&self) -> usize {
        self.members.len()
    }
}

/// Audit line proving no row was lost: grouped + duplicates == original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupingCheck {
    pub grouped_total: usize,
    pub total_duplicates: usize,
    pub check_total: usize,
    pub original_team_count: usize,
}

impl GroupingCheck {
    pub fn is_balanced(&self) -> bool {
        self.check_total == self.original_team_count
    }

    pub fn summary(&self) -> String {
        format!(
            "{} + {} = {}",
            self.grouped_total, self.total_duplicates, self.check_total
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingOutcome {
    /// Sorted by rendered key.
    pub groups: Vec<TeamGroup>,
    pub duplicates: DuplicateReport,
}

impl GroupingOutcome {
    pub fn grouped_total(&self) -> usize {
        self.groups.iter().map(TeamGroup::team_count).sum()
    }

    pub fn check(&self) -> GroupingCheck {
        let grouped_total = self.grouped_total();
        GroupingCheck {
            grouped_total,
            total_duplicates: self.duplicates.total_duplicates,
            check_total: grouped_total + self.duplicates.total_duplicates,
            original_team_count: self.duplicates.original_team_count,
        }
    }

    pub fn group(&self, key: &str) -> Option<&TeamGroup> {
        self.groups.iter().find(|group| group.key() == key)
    }
}

/// Entry point of the engine. Holds only a borrow of the read-only rules, so
/// one set of rules can serve any number of concurrent runs.
#[derive(Debug, Clone, Copy)]
pub struct TeamGrouper<'a> {
    rules: &'a KeywordRules,
}

impl<'a> TeamGrouper<'a> {
    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }

    /// Runs the per-name pipeline without any grouping.
    pub fn classify_name(&self, original: &str) -> ClassifiedName {
        let cleaned = cleaner::clean_name(original, self.rules);
        let category = classifier::classify(&cleaned, self.rules);
        let stop_words = if category.is_youth() {
            self.rules.youth_stop_words()
        } else {
            self.rules.all_stop_words()
        };
        let base_name =
            extractor::extract_base_name(&cleaned, stop_words, self.rules.club_suffixes());
        let display_name = extractor::display_club_name(original, &base_name);
        let key = GroupKey::new(normalize_for_merge(&display_name), category);

        ClassifiedName {
            original: original.to_string(),
            cleaned,
            category,
            base_name,
            display_name,
            key,
        }
    }

    pub fn group<I, S>(&self, names: I) -> GroupingOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = names.into_iter().map(Into::into).collect();
        let rows = duplicates::countable_rows(&raw);
        let duplicates = duplicates::account_duplicates(&rows);

        let mut aggregator = GroupingAggregator::default();
        for name in duplicates::unique_rows(&rows) {
            let classified = self.classify_name(name);
            debug!(
                original = %classified.original,
                category = %classified.category,
                display = %classified.display_name,
                key = %classified.key,
                "classified team name"
            );
            aggregator.insert(classified.key, classified.original);
        }
        let first_pass_members = aggregator.member_count();

        let groups = reconciler::merge_youth_subteams(aggregator.into_groups());
        let outcome = GroupingOutcome { groups, duplicates };
        let check = outcome.check();

        info!(
            input_rows = raw.len(),
            groups = outcome.groups.len(),
            grouped_total = check.grouped_total,
            total_duplicates = check.total_duplicates,
            original_team_count = check.original_team_count,
            "team names grouped"
        );
        if !check.is_balanced() || first_pass_members != check.grouped_total {
            warn!(
                check = %check.summary(),
                original_team_count = check.original_team_count,
                "grouping check does not balance"
            );
        }

        outcome
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::rules;
    use super::*;

    #[test]
    fn scenario_age_groups_and_duplicates() {
        let rules = rules();
        let outcome = TeamGrouper::new(&rules).group([
            "Ashby Town U10",
            "Ashby Town U12",
            "2-1",
            "Ashby Town U10",
        ]);

        assert_eq!(outcome.groups.len(), 1);
        let group = outcome.group("ASHBY TOWN (Youth)").expect("youth group");
        assert_eq!(group.team_count(), 2);
        assert_eq!(group.members, vec!["Ashby Town U10", "Ashby Town U12"]);

        assert_eq!(
            outcome.duplicates.records,
            vec![DuplicateRecord {
                name: "Ashby Town U10".into(),
                occurrences: 2,
                duplicate_count: 1,
            }]
        );
        let check = outcome.check();
        assert_eq!(check.summary(), "2 + 1 = 3");
        assert_eq!(check.original_team_count, 3);
        assert!(check.is_balanced());
    }

    #[test]
    fn scenario_case_and_fc_variants_merge() {
        let rules = rules();
        let outcome = TeamGrouper::new(&rules).group(["Ashby Ladies", "ASHBY LADIES FC"]);

        assert_eq!(outcome.groups.len(), 1);
        let group = outcome.group("ASHBY (Ladies)").expect("ladies group");
        assert_eq!(group.team_count(), 2);
        assert!(!outcome.duplicates.has_duplicates());
    }

    #[test]
    fn scenario_empty_input() {
        let rules = rules();
        let outcome = TeamGrouper::new(&rules).group(Vec::<String>::new());
        assert!(outcome.groups.is_empty());
        assert_eq!(outcome.grouped_total(), 0);
        assert!(outcome.check().is_balanced());
    }

    #[test]
    fn leading_fc_prefix_is_kept_in_display_and_key() {
        let rules = rules();
        let grouper = TeamGrouper::new(&rules);

        let prefixed = grouper.classify_name("F.C. Ashby Rovers");
        assert_eq!(prefixed.cleaned, "Ashby Rovers");
        assert!(prefixed.display_name.starts_with("F.C. "));
        assert_eq!(prefixed.key.club, "FC ASHBY ROVERS");

        // A leading FC survives into the key, so it does not fold into the
        // bare club name; it does fold with other spellings of the prefix.
        let bare = grouper.classify_name("Ashby Rovers");
        assert_ne!(prefixed.key, bare.key);
        let plain_prefix = grouper.classify_name("FC Ashby Rovers");
        assert_eq!(prefixed.key, plain_prefix.key);

        // A trailing FC is only noise and is dropped.
        let trailing = grouper.classify_name("Ashby Rovers F.C.");
        assert_eq!(trailing.key, bare.key);
    }

    #[test]
    fn youth_signal_beats_ladies_keyword() {
        let rules = rules();
        let classified = TeamGrouper::new(&rules).classify_name("Ashby Ladies U14");
        assert_eq!(classified.category, Category::Youth);
        assert_eq!(classified.base_name, "Ashby Ladies");
    }

    #[test]
    fn leading_dash_still_yields_a_club_key() {
        let rules = rules();
        let classified = TeamGrouper::new(&rules).classify_name("- Ashby Town");
        assert_eq!(classified.base_name, "Ashby");
        assert_eq!(classified.key.to_string(), "ASHBY (Mens)");
    }

    #[test]
    fn abbreviations_feed_classification_and_extraction() {
        let rules = rules();
        let grouper = TeamGrouper::new(&rules);
        let classified = grouper.classify_name("Riverside Utd Jnrs - Cup");
        assert_eq!(classified.cleaned, "Riverside United Juniors - Cup");
        assert_eq!(classified.category, Category::Youth);
        assert_eq!(classified.key.to_string(), "RIVERSIDE UNITED (Youth)");

        let reserves = grouper.classify_name("Riverside Utd Res");
        assert_eq!(reserves.category, Category::Mens);
        assert_eq!(reserves.base_name, "Riverside United");
    }

    #[test]
    fn blank_rows_are_ignored_everywhere() {
        let rules = rules();
        let outcome = TeamGrouper::new(&rules).group(["", "  ", "Ashby Town", ""]);
        assert_eq!(outcome.grouped_total(), 1);
        assert!(!outcome.duplicates.has_duplicates());
        assert_eq!(outcome.check().original_team_count, 1);
    }

    #[test]
    fn categories_split_the_same_club() {
        let rules = rules();
        let outcome = TeamGrouper::new(&rules).group([
            "Ashby Town",
            "Ashby Town Ladies",
            "Ashby Town U9",
            "Ashby Town Vets",
            "Ashby Town PAN",
        ]);
        let keys: Vec<String> = outcome.groups.iter().map(TeamGroup::key).collect();
        assert_eq!(
            keys,
            vec![
                "ASHBY TOWN (Disability)",
                "ASHBY TOWN (Ladies)",
                "ASHBY TOWN (Mens)",
                "ASHBY TOWN (Youth)",
            ]
        );
        assert_eq!(outcome.group("ASHBY TOWN (Mens)").map(TeamGroup::team_count), Some(2));
    }

    #[test]
    fn conservation_holds_for_mixed_input() {
        let rules = rules();
        let names = [
            "Ashby Town U10",
            "Ashby Town U10",
            "Ashby Town U10",
            "F.C. Ashby",
            "FC Ashby",
            "3 - 1 (aet)",
            "",
            "Riverside Ladies",
            "Riverside Ladies",
            "Black Lions Blue",
        ];
        let outcome = TeamGrouper::new(&rules).group(names);
        let check = outcome.check();
        assert_eq!(check.original_team_count, 8);
        assert_eq!(check.total_duplicates, 3);
        assert_eq!(check.grouped_total, 5);
        assert!(check.is_balanced());
    }
}
