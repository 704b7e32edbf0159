use super::merge_key::{normalize_for_merge, GroupKey};
use super::TeamGroup;
use indexmap::IndexMap;
use tracing::debug;

/// Second pass over the already-grouped keyspace.
///
/// Youth keys have their club re-normalized and colliding buckets are
/// concatenated. Other categories pass through. Members are then sorted, and
/// groups are ordered by their rendered key.
pub(crate) fn merge_youth_subteams(groups: IndexMap<GroupKey, Vec<String>>) -> Vec<TeamGroup> {
    let mut merged: IndexMap<GroupKey, Vec<String>> = IndexMap::with_capacity(groups.len());

    for (GroupKey { club, category }, members) in groups {
        let club = if category.is_youth() {
            normalize_for_merge(&club)
        } else {
            club
        };

        let key = GroupKey::new(club, category);
        if merged.contains_key(&key) {
            debug!(%key, members = members.len(), "merging youth sub-team bucket");
        }
        merged.entry(key).or_default().extend(members);
    }

    let mut reconciled: Vec<TeamGroup> = merged
        .into_iter()
        .map(|(key, mut members)| {
            members.sort();
            TeamGroup::new(key, members)
        })
        .collect();
    reconciled.sort_by_cached_key(TeamGroup::key);
    reconciled
}
