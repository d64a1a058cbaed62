use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::pet::{NewPet as DomainNewPet, Pet as DomainPet};
use crate::domain::types::{Breed, Identifier, PetId, PetName, PetSex, Species, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pets)]
/// Diesel model for [`crate::domain::pet::Pet`].
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub birth_date: NaiveDate,
    pub owner_identifier: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pets)]
pub struct NewPet<'a> {
    pub name: &'a str,
    pub species: &'a str,
    pub breed: &'a str,
    pub sex: &'a str,
    pub birth_date: NaiveDate,
    pub owner_identifier: &'a str,
}

impl TryFrom<Pet> for DomainPet {
    type Error = TypeConstraintError;

    fn try_from(pet: Pet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PetId::try_from(pet.id)?,
            name: PetName::new(pet.name)?,
            species: Species::new(pet.species)?,
            breed: Breed::new(pet.breed)?,
            sex: PetSex::new(pet.sex)?,
            birth_date: pet.birth_date,
            owner: Identifier::new(pet.owner_identifier)?,
        })
    }
}

impl<'a> From<&'a DomainNewPet> for NewPet<'a> {
    fn from(pet: &'a DomainNewPet) -> Self {
        Self {
            name: pet.name.as_str(),
            species: pet.species.as_str(),
            breed: pet.breed.as_str(),
            sex: pet.sex.as_str(),
            birth_date: pet.birth_date,
            owner_identifier: pet.owner.as_str(),
        }
    }
}
