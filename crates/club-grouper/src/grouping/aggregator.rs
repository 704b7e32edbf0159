use super::merge_key::GroupKey;
use indexmap::IndexMap;

/// First-pass buckets keyed by [`GroupKey`]. Keys and members keep insertion
/// order.
#[derive(Debug, Default)]
pub(crate) struct GroupingAggregator {
    groups: IndexMap<GroupKey, Vec<String>>,
}

impl GroupingAggregator {
    pub(crate) fn insert(&mut self, key: GroupKey, original: String) {
        self.groups.entry(key).or_default().push(original);
    }

    pub(crate) fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub(crate) fn into_groups(self) -> IndexMap<GroupKey, Vec<String>> {
        self.groups
    }
}
