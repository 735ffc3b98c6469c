//! Consumer-side digest of a change list.
//!
//! A change list is ordered by version and every entry is idempotent, so the
//! last entry per id decides what happens to that resource. `ChangeBatch`
//! folds a list down to that decision and the next cursor. Nothing here is
//! persisted; the caller stores `next_cursor` and passes it back as `after`.

use std::collections::HashMap;

use crate::types::{ChangeKind, ChangeListItem, ChangeListVersion};

/// Highest `changeListVersion` in `items`, or `None` when empty.
pub fn latest_version(items: &[ChangeListItem]) -> Option<ChangeListVersion> {
    items.iter().map(|item| item.change_list_version).max()
}

/// What a consumer must do after one change-list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    /// Ids to refetch, ordered by their final change.
    pub refetch: Vec<String>,
    /// Ids to remove locally, ordered by their final change.
    pub delete: Vec<String>,
    /// Cursor for the next fetch. `None` only if nothing was ever observed.
    pub next_cursor: Option<ChangeListVersion>,
}

impl ChangeBatch {
    pub fn from_items(after: Option<ChangeListVersion>, items: &[ChangeListItem]) -> Self {
        let last_index: HashMap<&str, usize> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.as_str(), index))
            .collect();

        let mut batch = ChangeBatch {
            next_cursor: latest_version(items).into_iter().chain(after).max(),
            ..Default::default()
        };

        for (index, item) in items.iter().enumerate() {
            if last_index.get(item.id.as_str()) != Some(&index) {
                continue;
            }
            match item.kind() {
                ChangeKind::Upsert => batch.refetch.push(item.id.clone()),
                ChangeKind::Tombstone => batch.delete.push(item.id.clone()),
            }
        }

        batch
    }

    pub fn is_empty(&self) -> bool {
        self.refetch.is_empty() && self.delete.is_empty()
    }
}
