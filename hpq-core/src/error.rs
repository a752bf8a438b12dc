//! Error handling for the hpq combiner machinery.
//!
//! This module defines the error kinds surfaced uniformly across every
//! scheme, adapter, and combiner in the workspace.

use core::fmt;

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::{boxed::Box, string::String};

/// The error type for hpq operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key buffer is the wrong length, or fails component-level parsing.
    InvalidKey { expected: usize, actual: usize },

    /// A ciphertext buffer is the wrong length.
    InvalidCiphertext { expected: usize, actual: usize },

    /// A seed buffer is the wrong length for `DeriveKeyPair` or
    /// deterministic encapsulation.
    InvalidSeed { expected: usize, actual: usize },

    /// A key or ciphertext belongs to a different scheme than the one
    /// invoked.
    TypeMismatch {
        #[cfg(feature = "alloc")]
        expected: String,
        #[cfg(not(feature = "alloc"))]
        expected: &'static str,
        #[cfg(feature = "alloc")]
        actual: String,
        #[cfg(not(feature = "alloc"))]
        actual: &'static str,
    },

    /// Marshal was attempted on a partially constructed composite key.
    Uninitialized,

    /// A wrapped error from a component scheme; the first encountered is
    /// propagated, component index included for diagnosis.
    ComponentFailure {
        component_index: usize,
        #[cfg(feature = "alloc")]
        source: Box<Error>,
        #[cfg(not(feature = "alloc"))]
        source: &'static Error,
    },

    /// The process-global randomness source failed.
    RngFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertext { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidSeed { expected, actual } => {
                write!(f, "invalid seed length: expected {expected}, got {actual}")
            }
            Error::TypeMismatch { expected, actual } => {
                write!(f, "scheme mismatch: expected {expected}, got {actual}")
            }
            Error::Uninitialized => write!(f, "operation attempted on an uninitialized key"),
            Error::ComponentFailure {
                component_index,
                source,
            } => write!(f, "component {component_index} failed: {source}"),
            Error::RngFailure => write!(f, "random number generator failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for hpq operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_display() {
        let e = Error::InvalidKey {
            expected: 32,
            actual: 16,
        };
        assert_eq!(e.to_string(), "invalid key length: expected 32, got 16");
    }

    #[test]
    fn component_failure_wraps_source() {
        let inner = Error::InvalidCiphertext {
            expected: 32,
            actual: 31,
        };
        let wrapped = Error::ComponentFailure {
            component_index: 1,
            source: Box::new(inner),
        };
        assert!(wrapped.to_string().contains("component 1 failed"));
    }
}
