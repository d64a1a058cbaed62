use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::pet::{NewPet, birth_date_from_age};
use crate::domain::types::{Breed, Identifier, PetName, PetSex, Species};
use crate::forms::{checked, derived_errors, field_error};

#[derive(Debug, Deserialize, Validate)]
/// Payload for registering a pet. Either `birth_date` or `age` is required.
pub struct RegisterPetForm {
    #[serde(default, alias = "usuario_cliente")]
    pub owner: String,
    #[serde(default, alias = "nombre")]
    #[validate(length(max = 64))]
    pub name: String,
    #[serde(default, alias = "especie")]
    #[validate(length(max = 64))]
    pub species: String,
    #[serde(default, alias = "raza")]
    #[validate(length(max = 64))]
    pub breed: String,
    #[serde(default, alias = "sexo")]
    #[validate(length(max = 16))]
    pub sex: String,
    #[serde(default, alias = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, alias = "edad")]
    #[validate(range(max = 100))]
    pub age: Option<u32>,
}

impl RegisterPetForm {
    /// Validates the pet fields for an already resolved owner.
    pub fn into_new_pet(self, owner: Identifier, today: NaiveDate) -> Result<NewPet, ValidationErrors> {
        let mut errors = derived_errors(&self);

        let birth_date = match (self.birth_date, self.age) {
            (Some(date), _) if date > today => {
                errors.add(
                    "birth_date",
                    field_error("future", "birth date cannot be in the future"),
                );
                None
            }
            (Some(date), _) => Some(date),
            (None, Some(age)) => birth_date_from_age(age, today),
            (None, None) => {
                errors.add(
                    "birth_date",
                    field_error("required", "birth date or age is required"),
                );
                None
            }
        };

        let name = checked(&mut errors, "name", PetName::new(self.name));
        let species = checked(&mut errors, "species", Species::new(self.species));
        let breed = checked(&mut errors, "breed", Breed::new(self.breed));
        let sex = checked(&mut errors, "sex", PetSex::new(self.sex));

        match (name, species, breed, sex, birth_date) {
            (Some(name), Some(species), Some(breed), Some(sex), Some(birth_date))
                if errors.is_empty() =>
            {
                Ok(NewPet {
                    name,
                    species,
                    breed,
                    sex,
                    birth_date,
                    owner,
                })
            }
            _ => Err(errors),
        }
    }
}
