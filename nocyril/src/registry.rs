//! Lookup table of monitored communities.

use std::collections::HashMap;

use tracing::warn;

use crate::config::GroupConfig;

/// Read-only map from community ID to its callback settings.
///
/// Built once at startup and shared behind an `Arc`; there is no way to add
/// or remove groups afterwards.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<i64, GroupConfig>,
}

impl GroupRegistry {
    /// Build the registry. A later entry replaces an earlier one with the
    /// same `group_id`.
    pub fn new(groups: impl IntoIterator<Item = GroupConfig>) -> Self {
        let mut map = HashMap::new();

        for group in groups {
            let group_id = group.group_id;
            if map.insert(group_id, group).is_some() {
                warn!(group_id = group_id, "registry_duplicate_group");
            }
        }

        Self { groups: map }
    }

    pub fn lookup(&self, group_id: i64) -> Option<&GroupConfig> {
        self.groups.get(&group_id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
