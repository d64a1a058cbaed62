//! Repository implementation for pets.

use diesel::dsl::{InnerJoin, IntoBoxed};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::casefold,
    domain::{
        pet::{NewPet, Pet},
        query::{PetField, SearchFilter},
    },
    models::pet::{NewPet as DbNewPet, Pet as DbPet},
    repository::{
        DieselRepository, PetListQuery, PetReader, PetWriter,
        errors::{RepositoryError, RepositoryResult},
        folded_pattern, page_window, sorted,
    },
    schema::{clients, pets},
};

type PetsWithOwners = IntoBoxed<'static, InnerJoin<pets::table, clients::table>, Sqlite>;

/// Pets joined to their owners, filtered on `field`.
fn filtered_pets(filter: &SearchFilter, field: PetField) -> RepositoryResult<PetsWithOwners> {
    let items = pets::table.inner_join(clients::table).into_boxed();

    let pattern = match filter {
        SearchFilter::All => return Ok(items),
        SearchFilter::BornIn(year) => {
            return Ok(items.filter(pets::birth_date.between(year.first_day(), year.last_day())));
        }
        SearchFilter::Contains(term) => folded_pattern(term),
    };

    let items = match field {
        PetField::Name => items.filter(casefold(pets::name).like(pattern).escape('\\')),
        PetField::Species => items.filter(casefold(pets::species).like(pattern).escape('\\')),
        PetField::Breed => items.filter(casefold(pets::breed).like(pattern).escape('\\')),
        PetField::Sex => items.filter(casefold(pets::sex).like(pattern).escape('\\')),
        PetField::Owner => {
            items.filter(casefold(clients::identifier).like(pattern).escape('\\'))
        }
        PetField::BirthDate => {
            return Err(RepositoryError::ValidationError(
                "birth dates are searched by age".to_string(),
            ));
        }
    };

    Ok(items)
}

fn into_domain(rows: Vec<DbPet>) -> RepositoryResult<Vec<Pet>> {
    rows.into_iter()
        .map(|row| Pet::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl PetReader for DieselRepository {
    fn list_pets(&self, query: &PetListQuery) -> RepositoryResult<(usize, Vec<Pet>)> {
        let mut conn = self.conn()?;
        let spec = &query.spec;

        let total = filtered_pets(&spec.filter, spec.field)?
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let items = filtered_pets(&spec.filter, spec.field)?;
        let mut items = match spec.field {
            PetField::Name => sorted!(items, pets::name, spec.direction),
            PetField::Species => sorted!(items, pets::species, spec.direction),
            PetField::Breed => sorted!(items, pets::breed, spec.direction),
            PetField::Sex => sorted!(items, pets::sex, spec.direction),
            PetField::BirthDate => sorted!(items, pets::birth_date, spec.direction),
            PetField::Owner => sorted!(items, clients::identifier, spec.direction),
        }
        .then_order_by(pets::id.asc());

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_window(pagination, total) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let rows = items.select(DbPet::as_select()).load::<DbPet>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }
}

impl PetWriter for DieselRepository {
    fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet> {
        let mut conn = self.conn()?;

        let db_pet: DbNewPet = pet.into();

        let created = diesel::insert_into(pets::table)
            .values(&db_pet)
            .get_result::<DbPet>(&mut conn)?;

        Ok(Pet::try_from(created)?)
    }
}
