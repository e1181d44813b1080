use thiserror::Error;

/// Reasons an edit or import is declined.
#[derive(Error, Debug)]
pub enum EditError {
	#[error("Invalid edit: {0}")]
	Validation(String),

	#[error("Internal invariant violated: {0}")]
	InternalInvariant(String),

	#[error("Node '{0}' not found")]
	NodeNotFound(String),

	#[error("No node is being edited")]
	NoActiveEdit,

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type EditResult<T> = Result<T, EditError>;
