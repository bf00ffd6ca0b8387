//! Batch resolution over many content items.

use crate::{
    assignment::AssignmentType, backend::RoleProvider, catalog::WorkflowCatalog,
    content::ContentStore, error::Result, resolver::AssignmentResolver,
};

/// Extension trait for resolving many items in one session.
pub trait BatchResolve {
    /// Resolve one assignment type per input item, same order, same length.
    ///
    /// Items are resolved one by one on the same resolver so the session's
    /// directory caches amortize across the batch. There is no
    /// partial-result contract: the first fatal lookup failure aborts the
    /// whole batch.
    fn resolve_batch<I, T>(&self, item_ids: I) -> Result<Vec<AssignmentType>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>;
}

impl<C, S, P> BatchResolve for AssignmentResolver<C, S, P>
where
    C: WorkflowCatalog,
    S: ContentStore,
    P: RoleProvider,
{
    fn resolve_batch<I, T>(&self, item_ids: I) -> Result<Vec<AssignmentType>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        item_ids
            .into_iter()
            .map(|item_id| self.resolve_item(item_id.as_ref()))
            .collect()
    }
}
