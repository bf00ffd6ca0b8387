//! Per-item ad-hoc role grants.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::assignment::AdhocMode;

/// A per-item, per-user role grant supplementing a state's static assignments.
///
/// Grants are produced and destroyed by workflow-transition code outside this
/// crate; the resolver only ever reads a snapshot of the grants recorded for
/// one item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct AdhocGrant {
    id: String,
    user: String,
    role: String,
    mode: AdhocMode,
    item_id: String,
    created_at: DateTime<Utc>,
}

impl AdhocGrant {
    /// Create a new grant with a generated id.
    pub fn new(
        user: impl Into<String>,
        role: impl Into<String>,
        mode: AdhocMode,
        item_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: user.into(),
            role: role.into(),
            mode,
            item_id: item_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Get the grant's unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the name of the user this grant applies to.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the role name being granted.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Get the ad-hoc mode this grant was recorded with.
    pub fn mode(&self) -> AdhocMode {
        self.mode
    }

    /// Get the content item this grant is scoped to.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Get when the grant was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether this grant proves the given (user, role, mode) triple.
    ///
    /// All three must match; a grant recorded with a different mode never
    /// satisfies a role evaluated under another mode.
    pub fn matches(&self, user: &str, role: &str, mode: AdhocMode) -> bool {
        self.user == user && self.role == role && self.mode == mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_matches_exact_triple() {
        let grant = AdhocGrant::new("bob", "Reviewer", AdhocMode::Enabled, "item-1");

        assert!(grant.matches("bob", "Reviewer", AdhocMode::Enabled));
        assert!(!grant.matches("carol", "Reviewer", AdhocMode::Enabled));
        assert!(!grant.matches("bob", "Editor", AdhocMode::Enabled));
        assert!(!grant.matches("bob", "Reviewer", AdhocMode::Anonymous));
    }

    #[test]
    fn test_grant_ids_are_unique() {
        let a = AdhocGrant::new("bob", "Reviewer", AdhocMode::Enabled, "item-1");
        let b = AdhocGrant::new("bob", "Reviewer", AdhocMode::Enabled, "item-1");
        assert_ne!(a.id(), b.id());
    }
}
