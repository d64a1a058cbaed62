//! Repository implementation for client profiles.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::casefold,
    domain::{
        client::{Client, NewClient},
        query::{ClientField, QueryField, SearchFilter},
        types::{Identifier, Role},
        user::NewCredential,
    },
    models::{
        client::{Client as DbClient, NewClient as DbNewClient},
        user::NewUser as DbNewUser,
    },
    repository::{
        ClientListQuery, ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
        folded_pattern, page_window, sorted,
    },
    schema::{clients, users},
};

/// Client profiles whose credential carries the client role, filtered on
/// `field`. Unordered and unpaginated.
fn filtered_clients(
    filter: &SearchFilter,
    field: ClientField,
) -> RepositoryResult<clients::BoxedQuery<'static, Sqlite>> {
    let client_identifiers = users::table
        .filter(users::role.eq(Role::Client.code()))
        .select(users::identifier);

    let items = clients::table
        .filter(clients::identifier.eq_any(client_identifiers))
        .into_boxed();

    let pattern = match filter {
        SearchFilter::All => return Ok(items),
        SearchFilter::Contains(term) => folded_pattern(term),
        SearchFilter::BornIn(_) => {
            return Err(RepositoryError::ValidationError(format!(
                "client field `{}` cannot be searched by age",
                field.name()
            )));
        }
    };

    let items = match field {
        ClientField::Identifier => {
            items.filter(casefold(clients::identifier).like(pattern).escape('\\'))
        }
        ClientField::NationalId => {
            items.filter(casefold(clients::national_id).like(pattern).escape('\\'))
        }
        ClientField::Name => items.filter(casefold(clients::name).like(pattern).escape('\\')),
        ClientField::Phone => items.filter(casefold(clients::phone).like(pattern).escape('\\')),
        ClientField::Email => items.filter(casefold(clients::email).like(pattern).escape('\\')),
    };

    Ok(items)
}

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ClientReader for DieselRepository {
    fn get_client_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;

        let client = filtered_clients(&SearchFilter::All, ClientField::Identifier)?
            .filter(clients::identifier.eq(identifier.as_str().to_owned()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        match client {
            Some(client) => Ok(Some(Client::try_from(client)?)),
            None => Ok(None),
        }
    }

    fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        let mut conn = self.conn()?;
        let spec = &query.spec;

        let total = filtered_clients(&spec.filter, spec.field)?
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let items = filtered_clients(&spec.filter, spec.field)?;
        let mut items = match spec.field {
            ClientField::Identifier => sorted!(items, clients::identifier, spec.direction),
            ClientField::NationalId => sorted!(items, clients::national_id, spec.direction),
            ClientField::Name => sorted!(items, clients::name, spec.direction),
            ClientField::Phone => sorted!(items, clients::phone, spec.direction),
            ClientField::Email => sorted!(items, clients::email, spec.direction),
        }
        .then_order_by(clients::identifier.asc());

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_window(pagination, total) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbClient>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(
        &self,
        credential: &NewCredential,
        client: &NewClient,
    ) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let db_user: DbNewUser = credential.into();
        let db_client: DbNewClient = client.into();

        let created = conn.transaction::<DbClient, diesel::result::Error, _>(|conn| {
            diesel::insert_into(users::table)
                .values(&db_user)
                .execute(conn)?;

            diesel::insert_into(clients::table)
                .values(&db_client)
                .get_result::<DbClient>(conn)
        })?;

        Ok(Client::try_from(created)?)
    }
}
