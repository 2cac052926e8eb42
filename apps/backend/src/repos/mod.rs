//! Persistence layer over the SeaORM adapters, speaking `DomainError`.

pub mod accounts;
pub mod expenses;
