//! Database models shared across the clinic repository.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod pet;
pub mod user;
pub mod vet;
