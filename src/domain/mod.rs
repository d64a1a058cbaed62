//! Domain aggregates exposed by the clinic service layer.

pub mod client;
pub mod pet;
pub mod query;
pub mod types;
pub mod user;
pub mod vet;
