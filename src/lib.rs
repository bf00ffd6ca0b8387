//! # Workflow Access
//!
//! This crate computes the effective permission level (the *assignment type*)
//! a user holds for a content item in a workflow state, combining static
//! role-to-state assignments, per-item ad-hoc role grants, community-based
//! role filtering, and folder-security overrides.
//!
//! ## Features
//!
//! - Totally ordered assignment types: `NONE < READER < ASSIGNEE < ADMIN`
//! - Administrator short-circuit per workflow
//! - Static (membership-based) and ad-hoc (grant-based) state roles
//! - Community scoping: global roles pass everywhere, restricted roles only
//!   match their listed communities
//! - Cross-community demotion and folder-security caps
//! - Session-scoped lazy caching of role directory lookups
//! - Batch resolution with one amortized session
//!
//! ## Quick Start
//!
//! ```rust
//! use workflow_access::{
//!     AdhocMode, AssignedRole, AssignmentResolver, AssignmentType, ItemFacts,
//!     MemoryCatalog, MemoryContentStore, MemoryRoleProvider, Session, State, Workflow,
//! };
//!
//! // Define a workflow whose review state assigns "Editor" as ASSIGNEE.
//! let catalog = MemoryCatalog::new();
//! catalog.insert(
//!     Workflow::new("article", "Admin").with_state(State::new("review").with_role(
//!         AssignedRole::new("Editor", AssignmentType::Assignee, AdhocMode::Disabled),
//!     )),
//! );
//!
//! // One content item in that state, in community 10.
//! let content = MemoryContentStore::new();
//! content.insert_item("item-1", ItemFacts::new("article", "review", 10));
//!
//! // The backend knows the "Editor" role; no community restriction.
//! let provider = MemoryRoleProvider::new();
//! provider.register_role("Editor", 1);
//!
//! // Resolve for bob, who holds "Editor" in community 10.
//! let session = Session::new("bob", 10).with_role("Editor");
//! let resolver = AssignmentResolver::new(catalog, content, provider, session);
//!
//! assert_eq!(resolver.resolve_item("item-1")?, AssignmentType::Assignee);
//! # Ok::<(), workflow_access::Error>(())
//! ```
//!
//! ## Audit Logging
//!
//! With the `audit` feature enabled (the default), resolution decisions and
//! misconfigured role data are logged through the standard `log` facade:
//!
//! ```rust
//! use workflow_access::init_audit_logger;
//!
//! // Initialize logging early in program execution, then configure the
//! // level through RUST_LOG, e.g. RUST_LOG=info,workflow_access=debug.
//! init_audit_logger();
//! ```
//!
//! The following events are logged:
//! - Role names with no backend mapping (warning)
//! - Administrator short-circuits and final resolution results (debug)

#[cfg(feature = "audit")]
pub fn init_audit_logger() {
    env_logger::init();
}

pub mod assignment;
pub mod backend;
pub mod batch;
pub mod catalog;
pub mod content;
pub mod directory;
pub mod error;
pub mod grant;
pub mod resolver;
pub mod session;
pub mod workflow;

// Re-export main types for convenience
pub use crate::{
    assignment::{AdhocMode, AssignmentType},
    backend::{BackendRole, CommunityRoleAssociation, MemoryRoleProvider, RoleProvider},
    batch::BatchResolve,
    catalog::{MemoryCatalog, WorkflowCatalog},
    content::{ContentStore, ItemFacts, MemoryContentStore},
    directory::RoleDirectory,
    error::Error,
    grant::AdhocGrant,
    resolver::{AssignmentResolver, ResolverConfig},
    session::Session,
    workflow::{AssignedRole, State, Workflow},
};
