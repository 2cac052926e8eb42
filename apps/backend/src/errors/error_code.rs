//! Error codes for the Pocketbank backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that
//! appears in HTTP responses.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required (also used for identity/account mismatches)
    Unauthorized,
    /// No session cookie and no Bearer header
    UnauthorizedMissingToken,
    /// Token failed signature, algorithm, shape or claim checks
    UnauthorizedInvalidToken,
    /// Token is past its expiry
    UnauthorizedExpiredToken,
    /// Email/password pair did not verify
    InvalidCredentials,
    /// Caller does not own the addressed resource
    NotOwner,
    /// Account is soft-deleted
    AccountDeleted,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Invalid email address
    InvalidEmail,
    /// Invalid path id
    InvalidId,
    /// Malformed JSON body
    BadRequest,

    // Resource Not Found
    AccountNotFound,
    ExpenseNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Email already registered
    UniqueEmail,
    /// Delete on an account that is already deleted
    AccountAlreadyDeleted,
    /// Restore on an account that is not deleted
    AccountNotDeleted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Token could not be signed
    SigningError,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code, exactly as it appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingToken => "UNAUTHORIZED_MISSING_TOKEN",
            Self::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            Self::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotOwner => "NOT_OWNER",
            Self::AccountDeleted => "ACCOUNT_DELETED",

            // Request Validation
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidId => "INVALID_ID",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ExpenseNotFound => "EXPENSE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::AccountAlreadyDeleted => "ACCOUNT_ALREADY_DELETED",
            Self::AccountNotDeleted => "ACCOUNT_NOT_DELETED",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::SigningError => "SIGNING_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
