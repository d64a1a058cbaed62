//! Repository implementation for login credentials.

use diesel::prelude::*;

use crate::{
    domain::{types::Identifier, user::Credential},
    models::user::User as DbUser,
    repository::{CredentialReader, DieselRepository, errors::RepositoryResult},
};

impl CredentialReader for DieselRepository {
    fn get_credential_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> RepositoryResult<Option<Credential>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::identifier.eq(identifier.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        match user {
            Some(user) => Ok(Some(Credential::try_from(user)?)),
            None => Ok(None),
        }
    }
}
