// DomainError / TokenError -> AppError mapping, no HTTP or database involved
use crate::auth::jwt::{TokenError, VerificationFailure};
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

fn mapped(e: DomainError) -> (ErrorCode, u16) {
    let app: AppError = e.into();
    (app.code(), app.status().as_u16())
}

#[test]
fn validation_is_400() {
    assert_eq!(
        mapped(DomainError::validation(ValidationKind::InvalidEmail, "bad")),
        (ErrorCode::InvalidEmail, 400)
    );
    assert_eq!(
        mapped(DomainError::validation_other("name is required")),
        (ErrorCode::ValidationError, 400)
    );
}

#[test]
fn lifecycle_conflicts_are_distinct_409s() {
    assert_eq!(
        mapped(DomainError::conflict(ConflictKind::AccountAlreadyDeleted, "x")),
        (ErrorCode::AccountAlreadyDeleted, 409)
    );
    assert_eq!(
        mapped(DomainError::conflict(ConflictKind::AccountNotDeleted, "x")),
        (ErrorCode::AccountNotDeleted, 409)
    );
    assert_eq!(
        mapped(DomainError::conflict(ConflictKind::UniqueEmail, "x")),
        (ErrorCode::UniqueEmail, 409)
    );
}

#[test]
fn not_found_is_distinct_from_terminal_state() {
    let (code, status) = mapped(DomainError::not_found(NotFoundKind::Account, "gone"));
    assert_eq!((code, status), (ErrorCode::AccountNotFound, 404));
    assert_ne!(code, ErrorCode::AccountAlreadyDeleted);

    assert_eq!(
        mapped(DomainError::not_found(NotFoundKind::Expense, "gone")),
        (ErrorCode::ExpenseNotFound, 404)
    );
}

#[test]
fn forbidden_is_403() {
    assert_eq!(
        mapped(DomainError::forbidden(ForbiddenKind::NotOwner, "x")),
        (ErrorCode::NotOwner, 403)
    );
    assert_eq!(
        mapped(DomainError::forbidden(ForbiddenKind::AccountDeleted, "x")),
        (ErrorCode::AccountDeleted, 403)
    );
}

#[test]
fn infra_statuses() {
    assert_eq!(
        mapped(DomainError::infra(InfraErrorKind::Timeout, "slow")),
        (ErrorCode::DbTimeout, 504)
    );
    assert_eq!(
        mapped(DomainError::infra(InfraErrorKind::DbUnavailable, "down")),
        (ErrorCode::DbUnavailable, 503)
    );
    assert_eq!(
        mapped(DomainError::infra(InfraErrorKind::Other("x".into()), "boom")),
        (ErrorCode::DbError, 500)
    );
}

#[test]
fn token_errors() {
    let expired: AppError = TokenError::Verification(VerificationFailure::Expired).into();
    assert_eq!(expired.code(), ErrorCode::UnauthorizedExpiredToken);

    for failure in [
        VerificationFailure::InvalidSignature,
        VerificationFailure::UnexpectedAlgorithm,
        VerificationFailure::Malformed,
        VerificationFailure::InvalidClaims,
    ] {
        let app: AppError = TokenError::Verification(failure).into();
        assert_eq!(app.code(), ErrorCode::UnauthorizedInvalidToken);
        assert_eq!(app.status().as_u16(), 401);
    }

    let missing: AppError = TokenError::Verification(VerificationFailure::SecretUnavailable).into();
    assert_eq!(missing.code(), ErrorCode::ConfigError);
    assert_eq!(missing.status().as_u16(), 500);

    let signing: AppError = TokenError::Signing {
        detail: "no key".into(),
    }
    .into();
    assert_eq!(signing.code(), ErrorCode::SigningError);
}
