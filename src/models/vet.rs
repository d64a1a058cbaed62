use diesel::prelude::*;

use crate::domain::types::{
    EmailAddress, Identifier, NationalId, PersonName, PhoneNumber, TypeConstraintError,
};
use crate::domain::vet::{NewVet as DomainNewVet, Vet as DomainVet};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vets)]
#[diesel(primary_key(identifier))]
pub struct Vet {
    pub identifier: String,
    pub national_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vets)]
pub struct NewVet<'a> {
    pub identifier: &'a str,
    pub national_id: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
}

impl TryFrom<Vet> for DomainVet {
    type Error = TypeConstraintError;

    fn try_from(vet: Vet) -> Result<Self, Self::Error> {
        Ok(Self {
            identifier: Identifier::new(vet.identifier)?,
            national_id: NationalId::new(vet.national_id)?,
            name: PersonName::new(vet.name)?,
            phone: PhoneNumber::new(vet.phone)?,
            email: EmailAddress::new(vet.email)?,
        })
    }
}

impl<'a> From<&'a DomainNewVet> for NewVet<'a> {
    fn from(vet: &'a DomainNewVet) -> Self {
        Self {
            identifier: vet.identifier.as_str(),
            national_id: vet.national_id.as_str(),
            name: vet.name.as_str(),
            phone: vet.phone.as_str(),
            email: vet.email.as_str(),
        }
    }
}
