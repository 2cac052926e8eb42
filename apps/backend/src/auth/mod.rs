pub mod claims;
pub mod jwt;
pub mod password;
pub mod session_cookie;

pub use claims::IdentityClaims;
pub use jwt::{TokenCodec, TokenError, VerificationFailure};
pub use password::{CredentialError, CredentialVerifier};
