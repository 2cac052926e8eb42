//! SeaORM adapters. Functions here return `sea_orm::DbErr`; the repos layer
//! maps errors and converts rows into domain models.

pub mod accounts_sea;
pub mod expenses_sea;
