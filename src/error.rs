//! Error types for assignment resolution.

use thiserror::Error;

/// The main error type for assignment resolution operations.
///
/// All variants are fatal to the resolution in progress: they indicate
/// missing or corrupt reference data, or a failing collaborator, and are
/// never retried. An unmapped role name is deliberately *not* an error;
/// the role directory logs it and skips the role.
#[derive(Error, Debug)]
pub enum Error {
    /// No workflow definition exists for the given id.
    #[error("Workflow '{0}' not found")]
    WorkflowNotFound(String),

    /// The workflow exists but has no state with the given id.
    #[error("State '{state}' not found in workflow '{workflow}'")]
    StateNotFound {
        /// The workflow that was searched.
        workflow: String,
        /// The state id that could not be found.
        state: String,
    },

    /// No content item exists for the given id.
    #[error("Content item '{0}' not found")]
    ItemNotFound(String),

    /// The workflow catalog collaborator failed.
    #[error("Workflow catalog lookup failed: {0}")]
    Catalog(String),

    /// The content store collaborator failed.
    #[error("Content store lookup failed: {0}")]
    Content(String),

    /// The backend role provider failed.
    #[error("Role provider lookup failed: {0}")]
    Directory(String),

    /// Invalid resolver configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for assignment resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
