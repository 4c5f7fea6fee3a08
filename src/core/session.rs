use crate::core::catalogue::Catalogue;
use crate::core::store::StatusStore;
use crate::domain::model::{Category, ItemId, StatusValue, UserProfile};
use crate::utils::error::{Result, SgsiError};
use crate::utils::validation::validate_non_empty_string;

/// Everything one user session owns: the profile and the recorded statuses.
///
/// Passed explicitly to every operation; exports only ever borrow it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    profile: UserProfile,
    store: StatusStore,
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            store: StatusStore::new(),
        }
    }

    pub fn with_store(profile: UserProfile, store: StatusStore) -> Self {
        Self { profile, store }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StatusStore {
        &mut self.store
    }

    /// Stores the profile fields and marks them saved. On failure the profile stays unconfirmed.
    pub fn confirm_profile(&mut self, name: &str, company: &str) -> Result<()> {
        self.profile.name = name.trim().to_string();
        self.profile.company = company.trim().to_string();
        self.profile.saved = false;

        validate_non_empty_string("name", &self.profile.name)?;
        validate_non_empty_string("company", &self.profile.company)?;

        self.profile.saved = true;
        tracing::debug!(
            "Profile confirmed for {} ({})",
            self.profile.name,
            self.profile.company
        );
        Ok(())
    }

    pub fn require_confirmed(&self) -> Result<()> {
        if self.profile.saved {
            Ok(())
        } else {
            Err(SgsiError::validation(
                "ingresa tu nombre y la empresa para continuar",
            ))
        }
    }

    /// Records a status for a catalogue item. Unlike the raw store, rejects unknown ids.
    pub fn record(&mut self, catalogue: &Catalogue, item_id: ItemId, status: StatusValue) -> Result<()> {
        self.require_confirmed()?;
        if !catalogue.contains(&item_id) {
            return Err(SgsiError::UnknownItem {
                id: item_id.to_string(),
            });
        }
        tracing::debug!("Recording {} = {}", item_id, status);
        self.store.set_status(item_id, status);
        Ok(())
    }

    /// Adds an `Unknown` entry for every item of the section that has none yet,
    /// the way opening a section in the form records its default selections.
    /// Returns how many entries were added.
    pub fn visit_section(&mut self, catalogue: &Catalogue, category: Category) -> usize {
        let mut added = 0;
        for item in catalogue.items_in(category) {
            let id = item.item_id();
            if !self.store.contains(&id) {
                self.store.set_status(id, StatusValue::Unknown);
                added += 1;
            }
        }
        added
    }
}
