//! Error types for pricing, implied volatility and analytics snapshots.

use std::fmt;

/// Errors raised by the pricing engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Option type is neither call nor put.
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// Newton-Raphson solver did not converge within max iterations.
    NonConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate before giving up.
        last_iv: f64,
    },

    /// Invalid numerical input (e.g. a lattice with zero steps).
    InvalidParams {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Failed to serialize an analytics snapshot.
    SerializationError {
        /// Underlying serializer message.
        message: String,
    },

    /// Failed to deserialize an analytics snapshot.
    DeserializationError {
        /// Underlying deserializer message.
        message: String,
    },

    /// Snapshot checksum does not match its payload.
    ChecksumMismatch {
        /// Checksum stored in the package.
        expected: String,
        /// Checksum recomputed from the payload.
        actual: String,
    },

    /// Snapshot was written with an unknown format version.
    UnsupportedVersion {
        /// Version found in the package.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidArgument { message } => {
                write!(f, "invalid argument: {message}")
            }
            PricingError::NonConvergence {
                iterations,
                last_iv,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last IV: {last_iv:.4}"
                )
            }
            PricingError::InvalidParams { message } => {
                write!(f, "invalid parameters: {message}")
            }
            PricingError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            PricingError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            PricingError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            PricingError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported snapshot version: {found} (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for PricingError {}
