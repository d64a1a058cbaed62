use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{
    EmailAddress, Identifier, NationalId, PersonName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(primary_key(identifier))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub identifier: String,
    pub national_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub identifier: &'a str,
    pub national_id: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            identifier: Identifier::new(client.identifier)?,
            national_id: NationalId::new(client.national_id)?,
            name: PersonName::new(client.name)?,
            phone: PhoneNumber::new(client.phone)?,
            email: EmailAddress::new(client.email)?,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            identifier: client.identifier.as_str(),
            national_id: client.national_id.as_str(),
            name: client.name.as_str(),
            phone: client.phone.as_str(),
            email: client.email.as_str(),
        }
    }
}
