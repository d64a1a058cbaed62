use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::query::QueryError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

/// Field name to human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("owner `{0}` is not a registered client")]
    OwnerNotFound(String),

    #[error("incorrect secret")]
    WrongSecret,

    #[error("{0}")]
    InvalidField(String),

    #[error("{0}")]
    InvalidSearchValue(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("authentication required")]
    Unauthorized,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Registration hit an identifier that already has a credential.
    pub fn duplicate_identifier() -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(
            "identifier".to_string(),
            vec!["identifier is already registered".to_string()],
        );
        ServiceError::Validation(fields)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("entity not found".to_string()),
            other => ServiceError::Unexpected(other.to_string()),
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidField(_) => ServiceError::InvalidField(err.to_string()),
            QueryError::InvalidSearchValue { .. } => {
                ServiceError::InvalidSearchValue(err.to_string())
            }
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("invalid value ({})", error.code),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ServiceError::Validation(fields)
    }
}
