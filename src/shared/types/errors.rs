use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed, missing or ill-ordered input.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    /// Overlapping reservation or duplicate check-in.
    #[error("{0}")]
    Conflict(String),

    /// The slot is not currently available.
    #[error("{0}")]
    Forbidden(String),

    /// The record write went through but the slot flag write (or the commit)
    /// did not. The surrounding transaction has been rolled back.
    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// `"<Entity> <id> not found"`
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    /// Re-labels a failure of the slot-flag half of a dual write.
    pub fn into_operation(self, context: &str) -> Self {
        match self {
            Self::Operation(_) => self,
            other => Self::Operation(format!("{}: {}", context, other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}
