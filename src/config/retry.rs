//! Retry budget for throttled requests.

use crate::error::ConfigError;

/// How many times a throttled (HTTP 429) request may be resent.
///
/// The budget is only consumed by 429 responses. A `Limited(n)` budget allows
/// `n + 1` attempts in total; `Unlimited` keeps retrying until the server stops
/// throttling, the call is cancelled, or its deadline expires.
///
/// # Example
///
/// ```rust
/// use desk_api::RetryBudget;
///
/// assert_eq!(RetryBudget::from_sentinel(-1).unwrap(), RetryBudget::Unlimited);
/// assert_eq!(RetryBudget::from_sentinel(3).unwrap(), RetryBudget::Limited(3));
/// assert_eq!(RetryBudget::Limited(3).max_attempts(), Some(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryBudget {
    /// Retry for as long as the server keeps answering 429.
    #[default]
    Unlimited,
    /// Retry at most this many times.
    Limited(u32),
}

impl RetryBudget {
    /// Converts the integer form used by the service's documentation, where
    /// `-1` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxRetries`] for values below `-1` or
    /// above `u32::MAX`.
    pub fn from_sentinel(value: i64) -> Result<Self, ConfigError> {
        match value {
            -1 => Ok(Self::Unlimited),
            n => u32::try_from(n)
                .map(Self::Limited)
                .map_err(|_| ConfigError::InvalidMaxRetries { value }),
        }
    }

    /// Returns the total number of attempts allowed, or `None` when unlimited.
    #[must_use]
    pub const fn max_attempts(&self) -> Option<u32> {
        match *self {
            Self::Unlimited => None,
            Self::Limited(n) => Some(n.saturating_add(1)),
        }
    }

    /// Consumes one retry. Returns `false` when the budget is exhausted.
    pub fn try_consume(&mut self) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(0) => false,
            Self::Limited(n) => {
                *n -= 1;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sentinel_rejects_below_minus_one() {
        assert!(matches!(
            RetryBudget::from_sentinel(-2),
            Err(ConfigError::InvalidMaxRetries { value: -2 })
        ));
    }

    #[test]
    fn test_limited_budget_never_goes_negative() {
        let mut budget = RetryBudget::Limited(2);
        assert!(budget.try_consume());
        assert!(budget.try_consume());
        assert!(!budget.try_consume());
        assert!(!budget.try_consume());
        assert_eq!(budget, RetryBudget::Limited(0));
    }

    #[test]
    fn test_zero_budget_allows_single_attempt() {
        assert_eq!(RetryBudget::Limited(0).max_attempts(), Some(1));
        assert!(!RetryBudget::Limited(0).try_consume());
    }

    #[test]
    fn test_unlimited_budget_always_consumes() {
        let mut budget = RetryBudget::Unlimited;
        for _ in 0..1000 {
            assert!(budget.try_consume());
        }
        assert_eq!(budget.max_attempts(), None);
    }
}
