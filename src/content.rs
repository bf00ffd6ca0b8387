//! Content item facts and the content store collaborator.

use dashmap::DashMap;
use std::sync::Arc;

use crate::{error::Result, grant::AdhocGrant};

/// The workflow-relevant facts about one content item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemFacts {
    workflow_id: String,
    state_id: String,
    community_id: u64,
}

impl ItemFacts {
    /// Create item facts for an item in the given workflow state and community.
    pub fn new(
        workflow_id: impl Into<String>,
        state_id: impl Into<String>,
        community_id: u64,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            state_id: state_id.into(),
            community_id,
        }
    }

    /// Get the id of the workflow the item is in.
    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    /// Get the id of the item's current workflow state.
    pub fn state_id(&self) -> &str {
        &self.state_id
    }

    /// Get the id of the community the item belongs to.
    pub fn community_id(&self) -> u64 {
        self.community_id
    }
}

/// Trait for the content repository the resolver reads item data from.
///
/// All lookups are synchronous; the resolver never retries them. An empty
/// grant list from [`adhoc_grants`](ContentStore::adhoc_grants) is a valid,
/// meaningful result (it selects the membership fallback), not an error.
pub trait ContentStore: Send + Sync {
    /// Load the workflow facts for an item; `Ok(None)` if the item is missing.
    fn item_facts(&self, item_id: &str) -> Result<Option<ItemFacts>>;

    /// Snapshot of the ad-hoc grants currently recorded for an item.
    fn adhoc_grants(&self, item_id: &str) -> Result<Vec<AdhocGrant>>;

    /// Whether the resolving user can read in the item's containing folders.
    fn can_read_in_folders(&self, item_id: &str) -> Result<bool>;

    /// Whether the resolving user can write in the item's containing folders.
    fn can_write_in_folders(&self, item_id: &str) -> Result<bool>;
}

/// In-memory content store backed by `DashMap`.
///
/// Items without an explicit folder-access entry default to readable and
/// writable.
#[derive(Debug, Default, Clone)]
pub struct MemoryContentStore {
    facts: Arc<DashMap<String, ItemFacts>>,
    grants: Arc<DashMap<String, Vec<AdhocGrant>>>,
    folder_access: Arc<DashMap<String, (bool, bool)>>,
}

impl MemoryContentStore {
    /// Create a new empty content store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the facts for an item.
    pub fn insert_item(&self, item_id: impl Into<String>, facts: ItemFacts) {
        self.facts.insert(item_id.into(), facts);
    }

    /// Record an ad-hoc grant; it is appended to the grant's item snapshot.
    pub fn add_grant(&self, grant: AdhocGrant) {
        self.grants
            .entry(grant.item_id().to_string())
            .or_default()
            .push(grant);
    }

    /// Set the folder read/write flags for an item.
    pub fn set_folder_access(&self, item_id: impl Into<String>, read: bool, write: bool) {
        self.folder_access.insert(item_id.into(), (read, write));
    }

    /// Get the number of items with recorded facts.
    pub fn item_count(&self) -> usize {
        self.facts.len()
    }
}

impl ContentStore for MemoryContentStore {
    fn item_facts(&self, item_id: &str) -> Result<Option<ItemFacts>> {
        Ok(self.facts.get(item_id).map(|f| f.clone()))
    }

    fn adhoc_grants(&self, item_id: &str) -> Result<Vec<AdhocGrant>> {
        Ok(self
            .grants
            .get(item_id)
            .map(|g| g.clone())
            .unwrap_or_default())
    }

    fn can_read_in_folders(&self, item_id: &str) -> Result<bool> {
        Ok(self.folder_access.get(item_id).map(|a| a.0).unwrap_or(true))
    }

    fn can_write_in_folders(&self, item_id: &str) -> Result<bool> {
        Ok(self.folder_access.get(item_id).map(|a| a.1).unwrap_or(true))
    }
}
