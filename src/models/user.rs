//! Diesel models for login credentials.

use diesel::prelude::*;

use crate::domain::types::{Identifier, Role, TypeConstraintError, UserId};
use crate::domain::user::{Credential as DomainCredential, NewCredential as DomainNewCredential};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::Credential`].
pub struct User {
    pub id: i32,
    pub identifier: String,
    pub secret_hash: String,
    pub role: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub identifier: &'a str,
    pub secret_hash: &'a str,
    pub role: i32,
}

impl TryFrom<User> for DomainCredential {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            identifier: Identifier::new(user.identifier)?,
            secret_hash: user.secret_hash,
            role: Role::try_from(user.role)?,
        })
    }
}

impl<'a> From<&'a DomainNewCredential> for NewUser<'a> {
    fn from(credential: &'a DomainNewCredential) -> Self {
        Self {
            identifier: credential.identifier.as_str(),
            secret_hash: credential.secret_hash.as_str(),
            role: credential.role.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_with_unknown_role_is_rejected() {
        let user = User {
            id: 1,
            identifier: "ana".to_string(),
            secret_hash: "$argon2id$stub".to_string(),
            role: 7,
        };
        assert_eq!(
            DomainCredential::try_from(user).unwrap_err(),
            TypeConstraintError::UnknownRole(7)
        );
    }

    #[test]
    fn new_credential_stores_role_code() {
        let credential = DomainNewCredential {
            identifier: Identifier::new("ana").unwrap(),
            secret_hash: "hash".to_string(),
            role: Role::Client,
        };
        let row: NewUser = (&credential).into();
        assert_eq!(row.identifier, "ana");
        assert_eq!(row.role, 4);
    }
}
