//! Allow-listed filter and ordering specifications for record listings.
//!
//! Callers hand in raw `search`, `column` and `order` strings. Column names are
//! resolved against a closed enum per record type so nothing the caller types
//! ever reaches the SQL builder as an identifier. The repository layer turns a
//! [`QuerySpec`] into a typed Diesel query.

use std::fmt::Debug;

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

use crate::domain::pet::birth_date_from_age;

/// Errors raised while turning request parameters into a [`QuerySpec`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Column is not in the record type's allow-list.
    #[error("field `{0}` cannot be used for searching or sorting")]
    InvalidField(String),
    /// Search term cannot be interpreted for the selected column.
    #[error("`{value}` is not a valid search value for `{field}`")]
    InvalidSearchValue { field: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the literal `desc` sorts descending; anything else is ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Calendar year matched by an age search, with its inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthYear {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl BirthYear {
    /// Birth year of something `age` whole years old on `today`.
    pub fn from_age(age: u32, today: NaiveDate) -> Option<Self> {
        let first_day = birth_date_from_age(age, today)?;
        let last_day = NaiveDate::from_ymd_opt(first_day.year(), 12, 31)?;
        Some(Self {
            first_day,
            last_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchFilter {
    /// Empty search term: every record matches.
    All,
    /// Case-insensitive substring match on the selected column.
    Contains(String),
    /// Birth date falls within the given year.
    BornIn(BirthYear),
}

/// A filterable and sortable column of some record type.
pub trait QueryField: Copy + Debug + PartialEq {
    /// Column used when the request does not name one.
    const DEFAULT: Self;

    /// Resolves a request column name. `None` means the name is not allowed.
    fn from_name(name: &str) -> Option<Self>;

    /// Canonical column name.
    fn name(self) -> &'static str;

    /// Interprets a non-empty search term for this column.
    fn filter_for(self, term: &str, _today: NaiveDate) -> Result<SearchFilter, QueryError> {
        Ok(SearchFilter::Contains(term.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientField {
    Identifier,
    NationalId,
    Name,
    Phone,
    Email,
}

impl QueryField for ClientField {
    const DEFAULT: Self = ClientField::Identifier;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "identifier" | "usuario" => Some(ClientField::Identifier),
            "national_id" | "cedula" => Some(ClientField::NationalId),
            "name" | "nombre" => Some(ClientField::Name),
            "phone" | "telefono" => Some(ClientField::Phone),
            "email" | "correo" => Some(ClientField::Email),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ClientField::Identifier => "identifier",
            ClientField::NationalId => "national_id",
            ClientField::Name => "name",
            ClientField::Phone => "phone",
            ClientField::Email => "email",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VetField {
    Identifier,
    NationalId,
    Name,
    Phone,
    Email,
}

impl QueryField for VetField {
    const DEFAULT: Self = VetField::Name;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "identifier" | "usuario" => Some(VetField::Identifier),
            "national_id" | "cedula" => Some(VetField::NationalId),
            "name" | "nombre" => Some(VetField::Name),
            "phone" | "telefono" => Some(VetField::Phone),
            "email" | "correo" => Some(VetField::Email),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            VetField::Identifier => "identifier",
            VetField::NationalId => "national_id",
            VetField::Name => "name",
            VetField::Phone => "phone",
            VetField::Email => "email",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PetField {
    Name,
    Species,
    Breed,
    Sex,
    /// Searched by age in whole years, sorted by birth date.
    BirthDate,
    /// Identifier of the linked client record.
    Owner,
}

impl QueryField for PetField {
    const DEFAULT: Self = PetField::Name;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" | "nombre" => Some(PetField::Name),
            "species" | "especie" => Some(PetField::Species),
            "breed" | "raza" => Some(PetField::Breed),
            "sex" | "sexo" => Some(PetField::Sex),
            "birth_date" | "fecha_nacimiento" => Some(PetField::BirthDate),
            "owner" | "owning_client_identifier" | "usuario_cliente" => Some(PetField::Owner),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PetField::Name => "name",
            PetField::Species => "species",
            PetField::Breed => "breed",
            PetField::Sex => "sex",
            PetField::BirthDate => "birth_date",
            PetField::Owner => "owner",
        }
    }

    fn filter_for(self, term: &str, today: NaiveDate) -> Result<SearchFilter, QueryError> {
        match self {
            PetField::BirthDate => {
                let invalid = || QueryError::InvalidSearchValue {
                    field: self.name(),
                    value: term.to_string(),
                };
                let age = term.parse::<u32>().map_err(|_| invalid())?;
                let year = BirthYear::from_age(age, today).ok_or_else(invalid)?;
                Ok(SearchFilter::BornIn(year))
            }
            _ => Ok(SearchFilter::Contains(term.to_string())),
        }
    }
}

/// Validated filter and ordering for one listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySpec<F> {
    pub field: F,
    pub filter: SearchFilter,
    pub direction: SortDirection,
}

impl<F: QueryField> Default for QuerySpec<F> {
    fn default() -> Self {
        Self {
            field: F::DEFAULT,
            filter: SearchFilter::All,
            direction: SortDirection::Asc,
        }
    }
}

/// Builds a query against today's local date.
pub fn build_query<F: QueryField>(
    search: Option<&str>,
    column: Option<&str>,
    order: Option<&str>,
) -> Result<QuerySpec<F>, QueryError> {
    build_query_on(search, column, order, Local::now().date_naive())
}

/// Builds a query, resolving derived fields relative to `today`.
pub fn build_query_on<F: QueryField>(
    search: Option<&str>,
    column: Option<&str>,
    order: Option<&str>,
    today: NaiveDate,
) -> Result<QuerySpec<F>, QueryError> {
    let field = match column.map(str::trim).filter(|c| !c.is_empty()) {
        Some(name) => F::from_name(name).ok_or_else(|| QueryError::InvalidField(name.to_string()))?,
        None => F::DEFAULT,
    };

    let filter = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => field.filter_for(term, today)?,
        None => SearchFilter::All,
    };

    Ok(QuerySpec {
        field,
        filter,
        direction: SortDirection::parse(order),
    })
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` escaped
/// by `\`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
