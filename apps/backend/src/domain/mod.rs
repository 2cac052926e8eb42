//! Domain layer: pure account lifecycle, ownership and input rules.

pub mod account_lifecycle;
pub mod ownership;
pub mod validation;

pub use account_lifecycle::{AccountStatus, LifecycleEvent};
