//! Desk API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for selecting the `/api/{version}`
//! path segment.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Desk API version.
///
/// The service exposes its REST API under `/api/{version}`. `V2` is the
/// current version; `Custom` covers anything else of the form `v<number>`.
///
/// # Example
///
/// ```rust
/// use desk_api::ApiVersion;
///
/// let version: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2);
/// assert_eq!(ApiVersion::latest().to_string(), "v2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2.
    V2,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2
    }

    fn is_valid(version: &str) -> bool {
        version
            .strip_prefix('v')
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("v2"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim().to_lowercase();
        if !Self::is_valid(&version) {
            return Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            });
        }
        Ok(match version.as_str() {
            "v2" => Self::V2,
            _ => Self::Custom(version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_custom_versions() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("V2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!(
            "v3".parse::<ApiVersion>().unwrap(),
            ApiVersion::Custom("v3".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        for bad in ["", "v", "2", "v2.1", "version2"] {
            assert!(
                matches!(
                    bad.parse::<ApiVersion>(),
                    Err(ConfigError::InvalidApiVersion { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(ApiVersion::V2.to_string(), "v2");
        assert_eq!(ApiVersion::Custom("v7".to_string()).to_string(), "v7");
    }
}
