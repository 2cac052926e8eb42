pub mod accounts;
pub mod expenses;

pub use accounts::DbAccountStatus;
pub use accounts::Entity as Accounts;
pub use accounts::Model as Account;
pub use expenses::Entity as Expenses;
pub use expenses::Model as Expense;
