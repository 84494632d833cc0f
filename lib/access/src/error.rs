//! Error types for authentication and role lookup.
//!
//! Errors carry meaning, not transport detail: callers branch on the
//! variant, and user-facing messages are produced at the route boundary so
//! nothing here discloses whether an e-mail exists in the directory.

use std::fmt;

/// Failures of the authorization-code exchange, by meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The code is expired, already used, or malformed. User-correctable by
    /// starting the login over; the same code must never be retried.
    InvalidGrant,
    /// Transport failure or timeout reaching the provider.
    Network(String),
    /// Any other provider-side failure (non-2xx response, missing or
    /// malformed ID token).
    Provider(String),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrant => {
                write!(f, "authorization code rejected by the provider")
            }
            Self::Network(reason) => {
                write!(f, "provider unreachable: {reason}")
            }
            Self::Provider(reason) => {
                write!(f, "provider error: {reason}")
            }
        }
    }
}

impl std::error::Error for ExchangeError {}

/// Failure reaching or querying the role directory.
///
/// Distinct from a clean "no row" lookup result, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory query itself failed.
    Query(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(reason) => write!(f, "role directory query failed: {reason}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Authentication failures surfaced by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The code exchange failed.
    Exchange(ExchangeError),
    /// A required ID-token claim was absent.
    MissingClaim { claim: &'static str },
    /// The role directory could not be queried.
    Directory(DirectoryError),
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exchange(e) => write!(f, "{e}"),
            Self::MissingClaim { claim } => write!(f, "missing required claim: {claim}"),
            Self::Directory(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AuthenticationError {}

impl From<ExchangeError> for AuthenticationError {
    fn from(e: ExchangeError) -> Self {
        Self::Exchange(e)
    }
}

impl From<DirectoryError> for AuthenticationError {
    fn from(e: DirectoryError) -> Self {
        Self::Directory(e)
    }
}
