pub mod current_account;
pub mod resource_id;
pub mod validated_json;

pub use current_account::CurrentAccount;
pub use resource_id::ResourceId;
pub use validated_json::ValidatedJson;
