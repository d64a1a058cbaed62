//! Repository implementation for veterinarian profiles.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::casefold,
    domain::{
        query::{QueryField, SearchFilter, VetField},
        types::Role,
        user::NewCredential,
        vet::{NewVet, Vet},
    },
    models::{
        user::NewUser as DbNewUser,
        vet::{NewVet as DbNewVet, Vet as DbVet},
    },
    repository::{
        DieselRepository, VetListQuery, VetReader, VetWriter,
        errors::{RepositoryError, RepositoryResult},
        folded_pattern, page_window, sorted,
    },
    schema::{users, vets},
};

/// Veterinarian profiles whose credential carries the veterinarian role.
fn filtered_vets(
    filter: &SearchFilter,
    field: VetField,
) -> RepositoryResult<vets::BoxedQuery<'static, Sqlite>> {
    let vet_identifiers = users::table
        .filter(users::role.eq(Role::Veterinarian.code()))
        .select(users::identifier);

    let items = vets::table
        .filter(vets::identifier.eq_any(vet_identifiers))
        .into_boxed();

    let pattern = match filter {
        SearchFilter::All => return Ok(items),
        SearchFilter::Contains(term) => folded_pattern(term),
        SearchFilter::BornIn(_) => {
            return Err(RepositoryError::ValidationError(format!(
                "vet field `{}` cannot be searched by age",
                field.name()
            )));
        }
    };

    let items = match field {
        VetField::Identifier => items.filter(casefold(vets::identifier).like(pattern).escape('\\')),
        VetField::NationalId => {
            items.filter(casefold(vets::national_id).like(pattern).escape('\\'))
        }
        VetField::Name => items.filter(casefold(vets::name).like(pattern).escape('\\')),
        VetField::Phone => items.filter(casefold(vets::phone).like(pattern).escape('\\')),
        VetField::Email => items.filter(casefold(vets::email).like(pattern).escape('\\')),
    };

    Ok(items)
}

impl VetReader for DieselRepository {
    fn list_vets(&self, query: &VetListQuery) -> RepositoryResult<(usize, Vec<Vet>)> {
        let mut conn = self.conn()?;
        let spec = &query.spec;

        let total = filtered_vets(&spec.filter, spec.field)?
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let items = filtered_vets(&spec.filter, spec.field)?;
        let mut items = match spec.field {
            VetField::Identifier => sorted!(items, vets::identifier, spec.direction),
            VetField::NationalId => sorted!(items, vets::national_id, spec.direction),
            VetField::Name => sorted!(items, vets::name, spec.direction),
            VetField::Phone => sorted!(items, vets::phone, spec.direction),
            VetField::Email => sorted!(items, vets::email, spec.direction),
        }
        .then_order_by(vets::identifier.asc());

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_window(pagination, total) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        items
            .load::<DbVet>(&mut conn)?
            .into_iter()
            .map(|row| Vet::try_from(row).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()
            .map(|vets| (total, vets))
    }
}

impl VetWriter for DieselRepository {
    fn create_vet(&self, credential: &NewCredential, vet: &NewVet) -> RepositoryResult<Vet> {
        let mut conn = self.conn()?;

        let db_user: DbNewUser = credential.into();
        let db_vet: DbNewVet = vet.into();

        let created = conn.transaction::<DbVet, diesel::result::Error, _>(|conn| {
            diesel::insert_into(users::table)
                .values(&db_user)
                .execute(conn)?;

            diesel::insert_into(vets::table)
                .values(&db_vet)
                .get_result::<DbVet>(conn)
        })?;

        Ok(Vet::try_from(created)?)
    }
}
