use crate::domain::model::{ItemId, StatusEntry, StatusValue};
use std::collections::HashMap;

/// Upsert map from item id to status, keeping first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    entries: Vec<StatusEntry>,
    positions: HashMap<ItemId, usize>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates the entry for `item_id`. Ids outside the catalogue are kept as-is.
    pub fn set_status(&mut self, item_id: impl Into<ItemId>, status: StatusValue) {
        let item_id = item_id.into();
        match self.positions.get(&item_id) {
            Some(&pos) => self.entries[pos].status = status,
            None => {
                self.positions.insert(item_id.clone(), self.entries.len());
                self.entries.push(StatusEntry { item_id, status });
            }
        }
    }

    pub fn get_status(&self, item_id: &ItemId) -> StatusValue {
        self.positions
            .get(item_id)
            .map(|&pos| self.entries[pos].status)
            .unwrap_or_default()
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.positions.contains_key(item_id)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<StatusEntry> for StatusStore {
    /// Repeated ids collapse to the last status seen.
    fn from_iter<I: IntoIterator<Item = StatusEntry>>(iter: I) -> Self {
        let mut store = StatusStore::new();
        for entry in iter {
            store.set_status(entry.item_id, entry.status);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalogue::Catalogue;

    #[test]
    fn unset_items_read_as_unknown() {
        let store = StatusStore::new();
        for item in Catalogue::iso27001().items() {
            assert_eq!(store.get_status(&item.item_id()), StatusValue::Unknown);
        }
    }

    #[test]
    fn repeated_set_updates_in_place() {
        let mut store = StatusStore::new();
        store.set_status("4.1", StatusValue::Initial);
        store.set_status("A.5.1", StatusValue::Limited);
        store.set_status("4.1", StatusValue::Managed);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_status(&ItemId::from("4.1")), StatusValue::Managed);
        let matching: Vec<_> = store
            .entries()
            .iter()
            .filter(|entry| entry.item_id.as_str() == "4.1")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(store.entries()[0].item_id.as_str(), "4.1");
    }

    #[test]
    fn orphaned_ids_are_stored() {
        let mut store = StatusStore::new();
        store.set_status("Z.99", StatusValue::Defined);
        assert_eq!(store.get_status(&ItemId::from("Z.99")), StatusValue::Defined);
    }

    #[test]
    fn collecting_entries_keeps_last_duplicate() {
        let store: StatusStore = vec![
            StatusEntry {
                item_id: ItemId::from("5.2"),
                status: StatusValue::Initial,
            },
            StatusEntry {
                item_id: ItemId::from("5.2"),
                status: StatusValue::Optimized,
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_status(&ItemId::from("5.2")), StatusValue::Optimized);
    }
}
