//! Account lifecycle state machine.
//!
//! ```text
//!            delete
//!   Active ---------> Deleted
//!     ^                  |
//!     +------------------+
//!            restore
//! ```
//!
//! Accounts are never hard-deleted. Repeating a transition is reported as a
//! conflict rather than absorbed, so a second delete is observably different
//! from the first and from a missing account.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Deleted,
}

impl AccountStatus {
    pub const INITIAL: AccountStatus = AccountStatus::Active;

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Deleted => "Deleted",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Delete,
    Restore,
}

/// Next status for `event`, or the conflict explaining why it is refused.
pub fn transition(
    current: AccountStatus,
    event: LifecycleEvent,
) -> Result<AccountStatus, DomainError> {
    match (current, event) {
        (AccountStatus::Active, LifecycleEvent::Delete) => Ok(AccountStatus::Deleted),
        (AccountStatus::Deleted, LifecycleEvent::Restore) => Ok(AccountStatus::Active),
        (AccountStatus::Deleted, LifecycleEvent::Delete) => Err(DomainError::conflict(
            ConflictKind::AccountAlreadyDeleted,
            "Account is already deleted",
        )),
        (AccountStatus::Active, LifecycleEvent::Restore) => Err(DomainError::conflict(
            ConflictKind::AccountNotDeleted,
            "Account is not deleted",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accounts_start_active() {
        assert_eq!(AccountStatus::INITIAL, AccountStatus::Active);
    }

    #[test]
    fn delete_then_restore_round_trips() {
        let deleted = transition(AccountStatus::Active, LifecycleEvent::Delete).unwrap();
        assert_eq!(deleted, AccountStatus::Deleted);
        let restored = transition(deleted, LifecycleEvent::Restore).unwrap();
        assert_eq!(restored, AccountStatus::Active);
    }

    #[test]
    fn second_delete_is_already_deleted() {
        let err = transition(AccountStatus::Deleted, LifecycleEvent::Delete).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AccountAlreadyDeleted, _)
        ));
    }

    #[test]
    fn restore_on_active_is_refused() {
        let err = transition(AccountStatus::Active, LifecycleEvent::Restore).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::AccountNotDeleted, _)
        ));
    }
}
