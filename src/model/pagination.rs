//! Pagination bounds

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};

/// Limit applied when the client leaves it at zero
pub const DEFAULT_PAGINATION_LIMIT: u32 = 50;

/// Largest page a client may request
pub const MAXIMUM_LIMIT: u32 = 1000;

/// Largest `limit + offset` window a client may request
pub const MAXIMUM_LIMIT_OFFSET_SIZE: u32 = 10000;

/// Page window of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of items returned; 0 means "apply the default"
    #[serde(default)]
    pub limit: u32,
    /// Number of items skipped
    #[serde(default)]
    pub offset: u32,
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Checks the page and window bounds.
    ///
    /// A zero limit is valid here; it is resolved by normalization.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.limit > MAXIMUM_LIMIT {
            return Err(ValidationError::LimitExceeded {
                limit: self.limit,
                maximum: MAXIMUM_LIMIT,
            });
        }

        let window = u64::from(self.limit) + u64::from(self.offset);
        if window > u64::from(MAXIMUM_LIMIT_OFFSET_SIZE) {
            return Err(ValidationError::LimitOffsetExceeded {
                limit: self.limit,
                offset: self.offset,
                maximum: MAXIMUM_LIMIT_OFFSET_SIZE,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_valid() {
        assert!(Pagination::new(0, 0).validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        assert!(Pagination::new(MAXIMUM_LIMIT, 0).validate().is_ok());
        assert!(matches!(
            Pagination::new(MAXIMUM_LIMIT + 1, 0).validate(),
            Err(ValidationError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_window_bounds() {
        assert!(Pagination::new(1000, 9000).validate().is_ok());
        assert!(matches!(
            Pagination::new(1000, 9001).validate(),
            Err(ValidationError::LimitOffsetExceeded { .. })
        ));
    }

    #[test]
    fn test_window_does_not_overflow() {
        assert!(Pagination::new(10, u32::MAX).validate().is_err());
    }
}
