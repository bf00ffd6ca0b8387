//! Assignment types and ad-hoc modes for workflow state roles.

use std::cmp::Ordering;
use std::fmt;

/// The permission level a user holds for a content item in a workflow state.
///
/// Levels are totally ordered from weakest to strongest:
/// `None < Reader < Assignee < Admin`. The ordering is defined by an
/// explicit numeric rank, never by variant declaration order, so reordering
/// the variants cannot silently change comparison results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentType {
    /// No access to the item in this state.
    None,
    /// Read-only access.
    Reader,
    /// The user may act on the item in this state.
    Assignee,
    /// Full administrative access to the workflow.
    Admin,
}

impl AssignmentType {
    /// Numeric rank used for all comparisons: `None` = 0 up to `Admin` = 3.
    pub fn rank(self) -> u8 {
        match self {
            AssignmentType::None => 0,
            AssignmentType::Reader => 1,
            AssignmentType::Assignee => 2,
            AssignmentType::Admin => 3,
        }
    }

    /// Check whether this level grants at least the given level.
    pub fn at_least(self, other: AssignmentType) -> bool {
        self >= other
    }
}

impl PartialOrd for AssignmentType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AssignmentType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignmentType::None => "NONE",
            AssignmentType::Reader => "READER",
            AssignmentType::Assignee => "ASSIGNEE",
            AssignmentType::Admin => "ADMIN",
        };
        f.write_str(name)
    }
}

/// How a state role participates in per-item ad-hoc grants.
///
/// A role's mode fully determines whether its static state assignment is
/// honored directly (`Disabled`) or must be proven by a matching
/// [`AdhocGrant`](crate::grant::AdhocGrant) before it is counted
/// (`Enabled` / `Anonymous`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum AdhocMode {
    /// The role is granted purely by membership; ad-hoc grants are ignored.
    Disabled,
    /// The role requires a matching grant *and* plain membership.
    Enabled,
    /// The role requires a matching grant; no membership check applies.
    Anonymous,
}

impl AdhocMode {
    /// Whether this mode participates in ad-hoc grant evaluation at all.
    pub fn is_adhoc(self) -> bool {
        !matches!(self, AdhocMode::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_ordering_is_total() {
        assert!(AssignmentType::None < AssignmentType::Reader);
        assert!(AssignmentType::Reader < AssignmentType::Assignee);
        assert!(AssignmentType::Assignee < AssignmentType::Admin);
    }

    #[test]
    fn test_assignment_rank_values() {
        assert_eq!(AssignmentType::None.rank(), 0);
        assert_eq!(AssignmentType::Reader.rank(), 1);
        assert_eq!(AssignmentType::Assignee.rank(), 2);
        assert_eq!(AssignmentType::Admin.rank(), 3);
    }

    #[test]
    fn test_max_picks_strongest_level() {
        let winner = [
            AssignmentType::Reader,
            AssignmentType::Admin,
            AssignmentType::Assignee,
        ]
        .into_iter()
        .max()
        .unwrap();
        assert_eq!(winner, AssignmentType::Admin);
    }

    #[test]
    fn test_at_least() {
        assert!(AssignmentType::Assignee.at_least(AssignmentType::Reader));
        assert!(AssignmentType::Assignee.at_least(AssignmentType::Assignee));
        assert!(!AssignmentType::Reader.at_least(AssignmentType::Assignee));
    }

    #[test]
    fn test_adhoc_mode_participation() {
        assert!(!AdhocMode::Disabled.is_adhoc());
        assert!(AdhocMode::Enabled.is_adhoc());
        assert!(AdhocMode::Anonymous.is_adhoc());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AssignmentType::Assignee.to_string(), "ASSIGNEE");
        assert_eq!(AssignmentType::None.to_string(), "NONE");
    }
}
