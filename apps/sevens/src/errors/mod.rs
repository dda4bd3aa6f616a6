//! Error handling for the Sevens engine and its collaborators.

pub mod domain;

pub use domain::DomainError;
