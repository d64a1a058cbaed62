use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::types::{Breed, Identifier, PetId, PetName, PetSex, Species};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub name: PetName,
    pub species: Species,
    pub breed: Breed,
    pub sex: PetSex,
    pub birth_date: NaiveDate,
    /// Identifier of the owning client.
    pub owner: Identifier,
}

#[derive(Clone, Debug)]
pub struct NewPet {
    pub name: PetName,
    pub species: Species,
    pub breed: Breed,
    pub sex: PetSex,
    pub birth_date: NaiveDate,
    pub owner: Identifier,
}

/// Birth date recorded for a pet whose owner only knows its age: January 1st
/// of `today.year - age`.
pub fn birth_date_from_age(age: u32, today: NaiveDate) -> Option<NaiveDate> {
    let year = today.year().checked_sub(i32::try_from(age).ok()?)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
