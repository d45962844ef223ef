//! Error type for prefix parsing and set algebra.

use crate::models::AddressFamily;
use thiserror::Error;

/// Failure of a parse or set operation.
///
/// Every variant names the offending token or families so the caller can
/// report it without extra context. None of them are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// The token is neither an IPv4 nor an IPv6 address (with optional `/len`).
    #[error("Network is not a CIDR or IP: \"{token}\"")]
    UnparsableAddress { token: String },

    /// The `/len` suffix is negative or wider than the family allows.
    #[error("Prefix length {length} out of range 0-{max} in \"{token}\"")]
    PrefixLengthOutOfRange {
        token: String,
        length: String,
        max: u8,
    },

    /// A bare address was given while the parser requires an explicit length.
    #[error("Missing prefix length in \"{token}\"")]
    MissingPrefixLength { token: String },

    /// A prefix was constructed with a length wider than its family.
    #[error("Network length /{length} is too long for {family}")]
    InvalidPrefixLength { length: u8, family: AddressFamily },

    /// Two operands belong to different address families.
    #[error("Cannot combine {left} and {right} networks")]
    FamilyMismatch {
        left: AddressFamily,
        right: AddressFamily,
    },
}
