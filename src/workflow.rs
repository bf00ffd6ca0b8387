//! Workflow definitions: workflows, states, and their assigned roles.

use crate::assignment::{AdhocMode, AssignmentType};

/// A role bound to a workflow state, with its permission level and ad-hoc mode.
///
/// The `role` field is the workflow-level role identifier (a role name);
/// numeric backend role ids exist only inside the
/// [`RoleDirectory`](crate::directory::RoleDirectory).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignedRole {
    role: String,
    assignment: AssignmentType,
    adhoc: AdhocMode,
}

impl AssignedRole {
    /// Create a new assigned role.
    pub fn new(role: impl Into<String>, assignment: AssignmentType, adhoc: AdhocMode) -> Self {
        Self {
            role: role.into(),
            assignment,
            adhoc,
        }
    }

    /// Get the role name.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Get the permission level this role grants in its state.
    pub fn assignment(&self) -> AssignmentType {
        self.assignment
    }

    /// Get the ad-hoc mode governing how this role is granted.
    pub fn adhoc(&self) -> AdhocMode {
        self.adhoc
    }
}

/// A single state in a workflow, with its ordered list of assigned roles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    id: String,
    roles: Vec<AssignedRole>,
}

impl State {
    /// Create a new state with no assigned roles.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
        }
    }

    /// Add an assigned role to this state.
    pub fn with_role(mut self, role: AssignedRole) -> Self {
        self.roles.push(role);
        self
    }

    /// Add multiple assigned roles to this state.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = AssignedRole>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Get the state id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the ordered list of roles assigned to this state.
    pub fn roles(&self) -> &[AssignedRole] {
        &self.roles
    }
}

/// An immutable workflow definition.
///
/// Loaded once per id from the [`WorkflowCatalog`](crate::catalog::WorkflowCatalog)
/// and treated as read-mostly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Workflow {
    id: String,
    administrator_role: String,
    states: Vec<State>,
}

impl Workflow {
    /// Create a new workflow with the given administrator role and no states.
    pub fn new(id: impl Into<String>, administrator_role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            administrator_role: administrator_role.into(),
            states: Vec::new(),
        }
    }

    /// Add a state to this workflow.
    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Get the workflow id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the name of the role that administers this workflow.
    ///
    /// A user holding this role receives
    /// [`AssignmentType::Admin`] in every state, unconditionally.
    pub fn administrator_role(&self) -> &str {
        &self.administrator_role
    }

    /// Get the ordered list of states.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Look up a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_construction() {
        let workflow = Workflow::new("article", "Admin")
            .with_state(
                State::new("draft").with_role(AssignedRole::new(
                    "Editor",
                    AssignmentType::Assignee,
                    AdhocMode::Disabled,
                )),
            )
            .with_state(State::new("published"));

        assert_eq!(workflow.id(), "article");
        assert_eq!(workflow.administrator_role(), "Admin");
        assert_eq!(workflow.states().len(), 2);
    }

    #[test]
    fn test_state_lookup() {
        let workflow = Workflow::new("article", "Admin")
            .with_state(State::new("draft"))
            .with_state(State::new("review"));

        assert!(workflow.state("review").is_some());
        assert!(workflow.state("missing").is_none());
    }

    #[test]
    fn test_state_role_order_is_preserved() {
        let state = State::new("review").with_roles([
            AssignedRole::new("Editor", AssignmentType::Assignee, AdhocMode::Disabled),
            AssignedRole::new("Reviewer", AssignmentType::Reader, AdhocMode::Enabled),
        ]);

        let names: Vec<&str> = state.roles().iter().map(|r| r.role()).collect();
        assert_eq!(names, ["Editor", "Reviewer"]);
    }
}
