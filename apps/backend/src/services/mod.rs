pub mod accounts;
pub mod expenses;
pub mod session;
