//! Workflow catalog: lookup of workflow definitions by id.

use dashmap::DashMap;
use std::sync::Arc;

use crate::{error::Result, workflow::Workflow};

/// Trait for loading workflow definitions.
///
/// A missing workflow is reported as `Ok(None)`; the resolver turns that
/// into a fatal [`Error::WorkflowNotFound`](crate::error::Error::WorkflowNotFound).
/// `Err` is reserved for failures of the backing store itself.
pub trait WorkflowCatalog: Send + Sync {
    /// Load the workflow definition for the given id.
    fn workflow(&self, id: &str) -> Result<Option<Workflow>>;
}

/// In-memory workflow catalog backed by `DashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    workflows: Arc<DashMap<String, Workflow>>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace a workflow definition, keyed by its id.
    pub fn insert(&self, workflow: Workflow) {
        self.workflows.insert(workflow.id().to_string(), workflow);
    }

    /// Get the number of registered workflows.
    pub fn workflow_count(&self) -> usize {
        self.workflows.len()
    }
}

impl WorkflowCatalog for MemoryCatalog {
    fn workflow(&self, id: &str) -> Result<Option<Workflow>> {
        Ok(self.workflows.get(id).map(|w| w.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_catalog_lookup() {
        let catalog = MemoryCatalog::new();
        catalog.insert(Workflow::new("article", "Admin"));

        assert_eq!(catalog.workflow_count(), 1);
        assert!(catalog.workflow("article").unwrap().is_some());
        assert!(catalog.workflow("missing").unwrap().is_none());
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let catalog = MemoryCatalog::new();
        catalog.insert(Workflow::new("article", "Admin"));
        catalog.insert(Workflow::new("article", "Editor"));

        let workflow = catalog.workflow("article").unwrap().unwrap();
        assert_eq!(workflow.administrator_role(), "Editor");
        assert_eq!(catalog.workflow_count(), 1);
    }
}
