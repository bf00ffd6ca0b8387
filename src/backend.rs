//! Backend roles, community associations, and the role provider collaborator.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::Result;

/// A role as known to the backend user directory.
///
/// Backend roles carry the stable numeric id that community associations are
/// keyed by; workflow definitions only ever reference roles by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct BackendRole {
    id: u64,
    name: String,
}

impl BackendRole {
    /// Create a backend role.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Get the stable backend role id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the role name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A (role, community) association restricting a role's visibility.
///
/// A role with zero associations is global and matches every community; a
/// role with one or more associations only matches the listed communities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityRoleAssociation {
    /// The backend role id.
    pub role_id: u64,
    /// The community the role is visible in.
    pub community_id: u64,
}

impl CommunityRoleAssociation {
    /// Create a new association.
    pub fn new(role_id: u64, community_id: u64) -> Self {
        Self {
            role_id,
            community_id,
        }
    }
}

/// Trait for the backend directory that maps role names to backend roles and
/// backend roles to community associations.
///
/// An empty result from [`roles_by_name`](RoleProvider::roles_by_name) means
/// the name is unmapped; the caller logs a warning and skips the role rather
/// than failing the evaluation.
pub trait RoleProvider: Send + Sync {
    /// Find the backend roles registered under a name.
    fn roles_by_name(&self, name: &str) -> Result<Vec<BackendRole>>;

    /// Find the community associations for a set of backend role ids.
    ///
    /// Roles with no associations simply produce no entries.
    fn communities_by_roles(&self, role_ids: &[u64]) -> Result<Vec<CommunityRoleAssociation>>;
}

/// In-memory role provider backed by `DashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryRoleProvider {
    by_name: Arc<DashMap<String, Vec<BackendRole>>>,
    associations: Arc<DashMap<u64, Vec<u64>>>,
}

impl MemoryRoleProvider {
    /// Create a new empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend role under its name.
    pub fn register_role(&self, name: impl Into<String>, id: u64) {
        let name = name.into();
        self.by_name
            .entry(name.clone())
            .or_default()
            .push(BackendRole::new(id, name));
    }

    /// Associate a backend role with a community.
    pub fn associate(&self, role_id: u64, community_id: u64) {
        self.associations
            .entry(role_id)
            .or_default()
            .push(community_id);
    }
}

impl RoleProvider for MemoryRoleProvider {
    fn roles_by_name(&self, name: &str) -> Result<Vec<BackendRole>> {
        Ok(self
            .by_name
            .get(name)
            .map(|r| r.clone())
            .unwrap_or_default())
    }

    fn communities_by_roles(&self, role_ids: &[u64]) -> Result<Vec<CommunityRoleAssociation>> {
        let mut out = Vec::new();
        for &role_id in role_ids {
            if let Some(communities) = self.associations.get(&role_id) {
                for &community_id in communities.iter() {
                    out.push(CommunityRoleAssociation::new(role_id, community_id));
                }
            }
        }
        Ok(out)
    }
}
