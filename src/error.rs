//! Error types for cache construction.
//!
//! [`ConfigError`] is the only error the crate produces. It is returned from
//! constructors and builders when the requested configuration cannot yield a
//! working cache. Cache operations themselves never fail: `add` always
//! succeeds and `get` reports absence with `None`.
//!
//! ```
//! use cacheevict::builder::CacheBuilder;
//! use cacheevict::config::CachePolicy;
//! use cacheevict::error::ConfigError;
//!
//! let err = CacheBuilder::new()
//!     .policy(CachePolicy::Lru)
//!     .capacity(0)
//!     .build::<String, u32>()
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//! ```

use thiserror::Error;

/// Returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity is counted in entries and must be at least 1.
    #[error("capacity must be greater than 0")]
    ZeroCapacity,

    /// The policy name did not match any supported policy.
    #[error("unsupported policy: {0:?} (expected one of fifo, lru, lfu, arc)")]
    UnknownPolicy(String),

    /// A builder was asked to build without a policy.
    #[error("no eviction policy specified")]
    MissingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "capacity must be greater than 0"
        );
        assert!(
            ConfigError::UnknownPolicy("mru".into())
                .to_string()
                .contains("\"mru\"")
        );
        assert_eq!(
            ConfigError::MissingPolicy.to_string(),
            "no eviction policy specified"
        );
    }

    #[test]
    fn clone_and_eq() {
        let a = ConfigError::UnknownPolicy("x".into());
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ConfigError::ZeroCapacity);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
