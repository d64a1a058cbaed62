use serde::Serialize;

use crate::domain::types::{EmailAddress, Identifier, NationalId, PersonName, PhoneNumber};

/// Veterinarian profile linked one-to-one with a credential of role
/// veterinarian.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Vet {
    pub identifier: Identifier,
    pub national_id: NationalId,
    pub name: PersonName,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
}

#[derive(Clone, Debug)]
pub struct NewVet {
    pub identifier: Identifier,
    pub national_id: NationalId,
    pub name: PersonName,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
}

impl NewVet {
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
