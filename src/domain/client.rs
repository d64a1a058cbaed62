use serde::Serialize;

use crate::domain::types::{EmailAddress, Identifier, NationalId, PersonName, PhoneNumber};

/// Client profile linked one-to-one with a credential of role client.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Client {
    pub identifier: Identifier,
    pub national_id: NationalId,
    pub name: PersonName,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
}

/// Client profile about to be persisted together with its credential.
#[derive(Clone, Debug)]
pub struct NewClient {
    pub identifier: Identifier,
    pub national_id: NationalId,
    pub name: PersonName,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
}

impl NewClient {
    #[must_use]
    pub fn new(
        identifier: Identifier,
        national_id: NationalId,
        name: PersonName,
        phone: PhoneNumber,
        email: EmailAddress,
    ) -> Self {
        Self {
            identifier,
            national_id,
            name,
            phone,
            email,
        }
    }
}
