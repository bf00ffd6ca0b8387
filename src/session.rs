//! Resolver session state: one user, one role set, one community.

use std::collections::HashSet;

/// The identity a resolver evaluates assignments for.
///
/// A session is owned by exactly one resolver and never shared across users;
/// it exists for the duration of one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    user: String,
    role_names: HashSet<String>,
    community_id: u64,
}

impl Session {
    /// Create a session for a user in a community, with no roles yet.
    pub fn new(user: impl Into<String>, community_id: u64) -> Self {
        Self {
            user: user.into(),
            role_names: HashSet::new(),
            community_id,
        }
    }

    /// Add a role name to the session's role set.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role_names.insert(role.into());
        self
    }

    /// Add multiple role names to the session's role set.
    pub fn with_roles<I, T>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.role_names.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Get the user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the user's role names.
    pub fn role_names(&self) -> &HashSet<String> {
        &self.role_names
    }

    /// Check whether the session holds a role by name.
    pub fn has_role(&self, role: &str) -> bool {
        self.role_names.contains(role)
    }

    /// Get the user's own community id.
    pub fn community_id(&self) -> u64 {
        self.community_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_roles() {
        let session = Session::new("bob", 10)
            .with_role("Editor")
            .with_roles(["Reviewer", "Author"]);

        assert_eq!(session.user(), "bob");
        assert_eq!(session.community_id(), 10);
        assert!(session.has_role("Editor"));
        assert!(session.has_role("Author"));
        assert!(!session.has_role("Admin"));
        assert_eq!(session.role_names().len(), 3);
    }
}
