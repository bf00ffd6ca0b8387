//! The assignment resolver: computes a user's effective assignment type.
//!
//! One resolver is created per evaluation request, bound to one
//! [`Session`], and discarded afterwards. All collaborator lookups are
//! synchronous and never retried; the only caching is the session-scoped
//! [`RoleDirectory`].
//!
//! # Evaluation order
//!
//! For a (user, item) pair the resolver performs, in order: administrator
//! short-circuit, static role membership, ad-hoc grant evaluation, community
//! filtering, reduction to the strongest assignment type, cross-community
//! demotion, and finally the folder-security override.

#[cfg(feature = "audit")]
use log::debug;

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::{
    assignment::{AdhocMode, AssignmentType},
    backend::RoleProvider,
    catalog::WorkflowCatalog,
    content::ContentStore,
    directory::RoleDirectory,
    error::{Error, Result},
    grant::AdhocGrant,
    session::Session,
    workflow::{State, Workflow},
};

/// Process-wide resolver policy toggles.
///
/// The toggles are passed into the resolver's constructor rather than read
/// from ambient global state, so two resolvers with different settings can
/// evaluate identical inputs side by side. [`ResolverConfig::from_env`]
/// reads the process settings once for callers that want the deployment
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Whether community associations filter the assigned role set.
    pub filter_by_community: bool,
    /// Whether folder read/write permissions cap the computed type.
    pub folder_security_override: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            filter_by_community: true,
            folder_security_override: true,
        }
    }
}

impl ResolverConfig {
    /// Read the process-wide settings, once, from the environment.
    ///
    /// Recognized variables: `WORKFLOW_ACCESS_FILTER_BY_COMMUNITY` and
    /// `WORKFLOW_ACCESS_FOLDER_SECURITY`; the values `0`, `false`, `off` and
    /// `no` disable the toggle. Unset variables keep the default (enabled).
    /// The first read is cached for the process lifetime; the settings are
    /// not hot-reloadable.
    pub fn from_env() -> Self {
        static SETTINGS: OnceLock<ResolverConfig> = OnceLock::new();
        *SETTINGS.get_or_init(|| Self {
            filter_by_community: env_flag("WORKFLOW_ACCESS_FILTER_BY_COMMUNITY"),
            folder_security_override: env_flag("WORKFLOW_ACCESS_FOLDER_SECURITY"),
        })
    }
}

fn env_flag(var: &str) -> bool {
    match std::env::var(var) {
        Ok(value) => !matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off" | "no"
        ),
        Err(_) => true,
    }
}

/// Computes the effective [`AssignmentType`] for one user.
///
/// Generic over the three out-of-scope collaborators: the workflow catalog,
/// the content store, and the backend role provider.
pub struct AssignmentResolver<C, S, P>
where
    C: WorkflowCatalog,
    S: ContentStore,
    P: RoleProvider,
{
    catalog: C,
    content: S,
    directory: RoleDirectory<P>,
    session: Session,
    config: ResolverConfig,
}

impl<C, S, P> AssignmentResolver<C, S, P>
where
    C: WorkflowCatalog,
    S: ContentStore,
    P: RoleProvider,
{
    /// Create a resolver with the default configuration (both toggles on).
    pub fn new(catalog: C, content: S, provider: P, session: Session) -> Self {
        Self::with_config(catalog, content, provider, session, ResolverConfig::default())
    }

    /// Create a resolver with an explicit configuration.
    pub fn with_config(
        catalog: C,
        content: S,
        provider: P,
        session: Session,
        config: ResolverConfig,
    ) -> Self {
        Self {
            catalog,
            content,
            directory: RoleDirectory::new(provider),
            session,
            config,
        }
    }

    /// Get the session this resolver is bound to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the resolver's configuration.
    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Resolve the user's assignment type for one content item.
    ///
    /// Runs the full algorithm: item facts, static and ad-hoc role sets,
    /// community filtering, cross-community demotion, and the
    /// folder-security override.
    pub fn resolve_item(&self, item_id: &str) -> Result<AssignmentType> {
        let facts = self
            .content
            .item_facts(item_id)?
            .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;
        let workflow = self.load_workflow(facts.workflow_id())?;
        let state = workflow.state(facts.state_id()).ok_or_else(|| Error::StateNotFound {
            workflow: facts.workflow_id().to_string(),
            state: facts.state_id().to_string(),
        })?;

        let mut result =
            self.assignment_in_state(&workflow, state, facts.community_id(), Some(item_id))?;

        // The administrator short-circuit bypasses every cap, folder
        // security included.
        let is_administrator = self.session.has_role(workflow.administrator_role());
        if self.config.folder_security_override && !is_administrator {
            if result >= AssignmentType::Assignee && !self.content.can_write_in_folders(item_id)? {
                result = AssignmentType::Reader;
            }
            if result == AssignmentType::Reader && !self.content.can_read_in_folders(item_id)? {
                result = AssignmentType::None;
            }
        }

        #[cfg(feature = "audit")]
        debug!(
            "Resolved item '{item_id}' for user '{}': {result}",
            self.session.user()
        );

        Ok(result)
    }

    /// Resolve the user's assignment type for an explicit workflow state,
    /// in the abstract.
    ///
    /// No item is involved, so no ad-hoc grants participate and the
    /// folder-security override does not apply. Used for "what would this
    /// user get in state Y" queries.
    pub fn resolve_in_state(
        &self,
        workflow_id: &str,
        state_id: &str,
        community_id: u64,
    ) -> Result<AssignmentType> {
        let workflow = self.load_workflow(workflow_id)?;
        let state = workflow.state(state_id).ok_or_else(|| Error::StateNotFound {
            workflow: workflow_id.to_string(),
            state: state_id.to_string(),
        })?;
        self.assignment_in_state(&workflow, state, community_id, None)
    }

    fn load_workflow(&self, workflow_id: &str) -> Result<Workflow> {
        self.catalog
            .workflow(workflow_id)?
            .ok_or_else(|| Error::WorkflowNotFound(workflow_id.to_string()))
    }

    fn assignment_in_state(
        &self,
        workflow: &Workflow,
        state: &State,
        community_id: u64,
        item_id: Option<&str>,
    ) -> Result<AssignmentType> {
        // Administrator short-circuit: no ad-hoc or community filtering applies.
        if self.session.has_role(workflow.administrator_role()) {
            #[cfg(feature = "audit")]
            debug!(
                "User '{}' administers workflow '{}'",
                self.session.user(),
                workflow.id()
            );
            return Ok(AssignmentType::Admin);
        }

        let mut assigned: HashSet<&str> = HashSet::new();

        // Static assignments: DISABLED roles are granted purely by membership.
        for role in state.roles() {
            if role.adhoc() == AdhocMode::Disabled && self.session.has_role(role.role()) {
                assigned.insert(role.role());
            }
        }

        // Ad-hoc assignments only participate when an item is being resolved.
        if let Some(item_id) = item_id {
            let grants = self.content.adhoc_grants(item_id)?;
            self.collect_adhoc_roles(state, &grants, &mut assigned);
        }

        let assigned = if self.config.filter_by_community {
            self.filter_by_community(assigned, community_id)?
        } else {
            assigned
        };

        // Reduce to the strongest assignment type among the surviving roles.
        let mut result = AssignmentType::None;
        for role in state.roles() {
            if assigned.contains(role.role()) {
                result = result.max(role.assignment());
            }
        }

        // An item in a foreign community never yields more than read access.
        if community_id != self.session.community_id() && result > AssignmentType::Reader {
            result = AssignmentType::Reader;
        }

        Ok(result)
    }

    /// Collect the role names the user qualifies for through ad-hoc grants.
    ///
    /// The fallback is per item, not per role: only when the item has no
    /// grants at all do ENABLED/ANONYMOUS roles degrade to plain membership
    /// checks. Once any grant exists for the item, a role without a matching
    /// grant gets nothing, membership or not.
    fn collect_adhoc_roles<'a>(
        &self,
        state: &'a State,
        grants: &[AdhocGrant],
        assigned: &mut HashSet<&'a str>,
    ) {
        if grants.is_empty() {
            for role in state.roles() {
                if role.adhoc().is_adhoc() && self.session.has_role(role.role()) {
                    assigned.insert(role.role());
                }
            }
            return;
        }

        let user = self.session.user();
        for role in state.roles() {
            match role.adhoc() {
                AdhocMode::Disabled => {}
                AdhocMode::Enabled => {
                    let granted = grants
                        .iter()
                        .any(|g| g.matches(user, role.role(), AdhocMode::Enabled));
                    if granted && self.session.has_role(role.role()) {
                        assigned.insert(role.role());
                    }
                }
                AdhocMode::Anonymous => {
                    let granted = grants
                        .iter()
                        .any(|g| g.matches(user, role.role(), AdhocMode::Anonymous));
                    if granted {
                        assigned.insert(role.role());
                    }
                }
            }
        }
    }

    /// Keep only the assigned roles visible in the given community.
    ///
    /// Roles whose backend ids carry no community association are global and
    /// always pass; association-bearing roles pass only if associated with
    /// `community_id`. Names without a backend mapping drop out of the set
    /// (the directory has already logged them).
    fn filter_by_community<'a>(
        &self,
        assigned: HashSet<&'a str>,
        community_id: u64,
    ) -> Result<HashSet<&'a str>> {
        if assigned.is_empty() {
            return Ok(assigned);
        }

        let backend_ids = self.directory.ids_for_names(assigned.iter().copied())?;
        let associations = self.directory.community_associations(&backend_ids)?;

        let associated: HashSet<u64> = associations.iter().map(|a| a.role_id).collect();
        let mut kept: HashSet<u64> = HashSet::new();
        for &id in &backend_ids {
            if !associated.contains(&id) {
                kept.insert(id);
            }
        }
        for association in &associations {
            if association.community_id == community_id {
                kept.insert(association.role_id);
            }
        }

        let kept_names = self.directory.names_for_ids(&kept);
        Ok(assigned
            .into_iter()
            .filter(|name| kept_names.contains(*name))
            .collect())
    }
}
