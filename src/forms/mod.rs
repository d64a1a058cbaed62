//! Request payloads accepted by the clinic API and their validation.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod accounts;
pub mod auth;
pub mod pets;

/// Records a failed value-object construction under `field` and yields the
/// value when it succeeded.
fn checked<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Result<T, TypeConstraintError>,
) -> Option<T> {
    match value {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, field_error("invalid", err.to_string()));
            None
        }
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Runs the derived validators, returning an empty error set on success so
/// manual checks can be added to it.
fn derived_errors<T: validator::Validate>(form: &T) -> ValidationErrors {
    form.validate().err().unwrap_or_default()
}
