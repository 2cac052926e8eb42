//! Resource ownership checks.

use crate::errors::domain::{DomainError, ForbiddenKind};

/// `Ok` only when `owner_id` is the authenticated account.
pub fn ensure_owner(owner_id: i64, identity_id: i64) -> Result<(), DomainError> {
    if owner_id == identity_id {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotOwner,
            "Resource belongs to another account",
        ))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn only_the_owner_passes(owner in 1i64..10_000, caller in 1i64..10_000) {
            let result = ensure_owner(owner, caller);
            prop_assert_eq!(result.is_ok(), owner == caller);
        }
    }
}
