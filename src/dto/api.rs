//! Payloads exchanged by the `/api` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::AuthenticatedUser;
use crate::pagination::Page;
use crate::services::ServiceError;
use crate::services::errors::FieldErrors;

/// Query parameters accepted by the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListParams {
    /// Free-text search; empty means no filter.
    pub search: Option<String>,
    /// Column to search and sort on.
    pub column: Option<String>,
    /// `desc` for descending order, anything else ascending.
    pub order: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Paginated listing body: `{count, next, previous, results}`.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageResponse<T> {
    /// Builds navigation links by replacing the `page` parameter of the
    /// current request.
    pub fn new(
        page: Page<T>,
        base_url: &str,
        params: &ListParams,
    ) -> Result<Self, serde_html_form::ser::Error> {
        let link = |number: usize| -> Result<String, serde_html_form::ser::Error> {
            let query = serde_html_form::to_string(ListParams {
                page: Some(number),
                ..params.clone()
            })?;
            Ok(format!("{base_url}?{query}"))
        };

        let next = if page.has_next() {
            Some(link(page.page + 1)?)
        } else {
            None
        };
        let previous = if page.has_previous() {
            Some(link(page.page - 1)?)
        } else {
            None
        };

        Ok(Self {
            count: page.count,
            next,
            previous,
            results: page.results,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i32>,
    pub message: String,
}

impl LoginResponse {
    pub fn authenticated(user: &AuthenticatedUser) -> Self {
        Self {
            authenticated: true,
            role: Some(user.role.code()),
            message: format!("User {} authenticated.", user.identifier),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            role: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub identifier: String,
    pub role: i32,
}

impl From<AuthenticatedUser> for SessionResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            identifier: user.identifier.into_inner(),
            role: user.role.code(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Validation(fields) => Self {
                error: err.to_string(),
                fields: Some(fields.clone()),
            },
            // Internal details stay in the logs.
            ServiceError::Unexpected(_) => Self::new("internal server error"),
            other => Self::new(other.to_string()),
        }
    }
}
