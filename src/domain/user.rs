use serde::Serialize;

use crate::domain::types::{Identifier, Role, UserId};

/// Stored login credential. The secret only ever exists as a one-way hash.
#[derive(Clone, Debug, PartialEq)]
pub struct Credential {
    pub id: UserId,
    pub identifier: Identifier,
    pub secret_hash: String,
    pub role: Role,
}

#[derive(Clone, Debug)]
pub struct NewCredential {
    pub identifier: Identifier,
    pub secret_hash: String,
    pub role: Role,
}

/// Identity returned by a successful credential check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub identifier: Identifier,
    pub role: Role,
}

impl From<Credential> for AuthenticatedUser {
    fn from(credential: Credential) -> Self {
        Self {
            identifier: credential.identifier,
            role: credential.role,
        }
    }
}
