//! Error types for lanemath operations.
//!
//! The numeric kernels never fail: they follow IEEE754 propagation and hand
//! back NaN or infinities. Errors only surface at the host-facing edges,
//! where integer codes are decoded, pipeline settings are validated and
//! slice lengths are checked.

use thiserror::Error;

/// Errors that can occur in lanemath operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneMathError {
    /// A flux-limiter code outside `0..=9` was supplied.
    #[error("Unknown flux limiter code {code} (expected 0..=9)")]
    UnknownFluxLimiter {
        /// The rejected code.
        code: i32,
    },

    /// No Gauss–Legendre table exists for the requested order.
    #[error("Unsupported Gauss-Legendre order {order} (expected 1..=10)")]
    UnsupportedQuadratureOrder {
        /// The rejected order.
        order: usize,
    },

    /// A pipeline configuration value is out of range.
    #[error("Invalid pipeline configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// Two slices that must match in length do not.
    #[error("Length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the leading input.
        expected: usize,
        /// Length of the offending slice.
        found: usize,
    },
}

/// Result type alias for lanemath operations.
pub type Result<T> = std::result::Result<T, LaneMathError>;

/// Creates an unknown flux limiter error.
pub fn unknown_flux_limiter(code: i32) -> LaneMathError {
    LaneMathError::UnknownFluxLimiter { code }
}

/// Creates an unsupported quadrature order error.
pub fn unsupported_order(order: usize) -> LaneMathError {
    LaneMathError::UnsupportedQuadratureOrder { order }
}

/// Creates an invalid configuration error.
pub fn invalid_config(message: impl Into<String>) -> LaneMathError {
    LaneMathError::InvalidConfig {
        message: message.into(),
    }
}

/// Returns `Ok(())` when `found == expected`, a length mismatch otherwise.
pub fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LaneMathError::LengthMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_flux_limiter_display() {
        let display = format!("{}", unknown_flux_limiter(42));
        assert!(display.contains("Unknown flux limiter"));
        assert!(display.contains("42"));
    }

    #[test]
    fn test_unsupported_order_display() {
        let display = format!("{}", unsupported_order(11));
        assert!(display.contains("Gauss-Legendre"));
        assert!(display.contains("11"));
    }

    #[test]
    fn test_invalid_config_display() {
        let display = format!("{}", invalid_config("parallel chunk must be non-zero"));
        assert!(display.contains("Invalid pipeline configuration"));
        assert!(display.contains("parallel chunk must be non-zero"));
    }

    #[test]
    fn test_check_len() {
        assert!(check_len(8, 8).is_ok());
        assert_eq!(
            check_len(8, 7),
            Err(LaneMathError::LengthMismatch {
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = invalid_config("test error");
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
