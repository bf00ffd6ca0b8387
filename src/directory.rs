//! Session-scoped role directory cache.

#[cfg(feature = "audit")]
use log::warn;

use dashmap::DashMap;
use std::collections::HashSet;

use crate::{
    backend::{CommunityRoleAssociation, RoleProvider},
    error::Result,
};

/// Bidirectional name/id/community cache over a [`RoleProvider`].
///
/// The directory is owned by exactly one resolver session. Its three caches
/// are populated lazily on first lookup and never invalidated within the
/// session's lifetime; staleness across sessions is acceptable because a
/// session spans one logical request.
#[derive(Debug)]
pub struct RoleDirectory<P: RoleProvider> {
    provider: P,
    // name -> backend ids; an empty entry records an unmapped name so the
    // provider is not queried (and the warning not emitted) twice.
    ids_by_name: DashMap<String, Vec<u64>>,
    names_by_id: DashMap<u64, String>,
    communities_by_id: DashMap<u64, Vec<u64>>,
}

impl<P: RoleProvider> RoleDirectory<P> {
    /// Create a directory over the given provider with empty caches.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            ids_by_name: DashMap::new(),
            names_by_id: DashMap::new(),
            communities_by_id: DashMap::new(),
        }
    }

    /// Resolve role names to backend role ids.
    ///
    /// Names with no backend mapping are logged as warnings and skipped;
    /// they never fail the lookup.
    pub fn ids_for_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<HashSet<u64>> {
        let mut ids = HashSet::new();
        for name in names {
            if let Some(cached) = self.ids_by_name.get(name) {
                ids.extend(cached.iter().copied());
                continue;
            }

            let roles = self.provider.roles_by_name(name)?;
            #[cfg(feature = "audit")]
            if roles.is_empty() {
                warn!("Role '{name}' has no backend mapping; skipping");
            }

            let mut resolved = Vec::with_capacity(roles.len());
            for role in roles {
                resolved.push(role.id());
                self.names_by_id.insert(role.id(), role.name().to_string());
            }
            ids.extend(resolved.iter().copied());
            self.ids_by_name.insert(name.to_string(), resolved);
        }
        Ok(ids)
    }

    /// Resolve backend role ids back to role names.
    ///
    /// Resolution happens purely from the reverse cache built by
    /// [`ids_for_names`](Self::ids_for_names); ids the session has never
    /// resolved forward are skipped.
    pub fn names_for_ids(&self, ids: &HashSet<u64>) -> HashSet<String> {
        let mut names = HashSet::new();
        for id in ids {
            match self.names_by_id.get(id) {
                Some(name) => {
                    names.insert(name.clone());
                }
                None => {
                    #[cfg(feature = "audit")]
                    warn!("Backend role id {id} was never resolved in this session; skipping");
                }
            }
        }
        names
    }

    /// Look up the community associations for a set of backend role ids.
    ///
    /// Ids not yet cached are fetched from the provider in one call; roles
    /// the provider returns no entries for are cached as global (empty list).
    pub fn community_associations(
        &self,
        ids: &HashSet<u64>,
    ) -> Result<Vec<CommunityRoleAssociation>> {
        let uncached: Vec<u64> = ids
            .iter()
            .copied()
            .filter(|id| !self.communities_by_id.contains_key(id))
            .collect();

        if !uncached.is_empty() {
            let fetched = self.provider.communities_by_roles(&uncached)?;
            for &id in &uncached {
                self.communities_by_id.entry(id).or_default();
            }
            for association in fetched {
                self.communities_by_id
                    .entry(association.role_id)
                    .or_default()
                    .push(association.community_id);
            }
        }

        let mut out = Vec::new();
        for id in ids {
            if let Some(communities) = self.communities_by_id.get(id) {
                for &community_id in communities.iter() {
                    out.push(CommunityRoleAssociation::new(*id, community_id));
                }
            }
        }
        Ok(out)
    }
}
