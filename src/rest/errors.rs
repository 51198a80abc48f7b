//! Error types for resource addressing and resource operations.
//!
//! # Error Handling
//!
//! - [`PathError`]: a path was requested that the resource kind cannot form.
//!   These are usage errors and are raised before any request is sent.
//! - [`ResourceError`]: everything a resource operation can fail with,
//!   wrapping [`HttpError`] for transport and API failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::rest::ResourceError;
//! use desk_api::clients::HttpError;
//!
//! match client.cases().get("42").await {
//!     Ok(case) => println!("Subject: {:?}", case.subject),
//!     Err(ResourceError::Http(HttpError::Api(e))) if e.code == 404 => {
//!         println!("No such case");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Errors raised while building a resource path.
///
/// # Example
///
/// ```rust
/// use desk_api::rest::{PathError, ResourcePath};
/// use desk_api::resources::REPLY;
///
/// let result = ResourcePath::for_kind(&REPLY).build();
/// assert_eq!(result, Err(PathError::MissingIdentity { kind: "reply" }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path needs an identity segment that was not supplied.
    #[error("A '{kind}' path requires a resource id")]
    MissingIdentity {
        /// The kind that needed an id.
        kind: &'static str,
    },

    /// The kind has no top-level path; its members are addressed by their
    /// `self` link or below a parent.
    #[error("A '{kind}' has no top-level path; address it through its parent or self link")]
    NotTopLevel {
        /// The kind that was addressed at the top level.
        kind: &'static str,
    },

    /// The nested kind is not reachable below the parent kind.
    #[error("'{nested}' cannot be nested under '{parent}'")]
    UnsupportedNesting {
        /// The parent kind.
        parent: &'static str,
        /// The requested nested kind.
        nested: &'static str,
    },

    /// An id or action segment was empty.
    #[error("The {segment} segment of a resource path cannot be empty")]
    EmptySegment {
        /// Which segment was empty (`id`, `nested id` or `action`).
        segment: &'static str,
    },
}

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The path for the operation could not be formed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// An HTTP-level error occurred (network, API status, decode).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The page's embedded entries were already unraveled.
    #[error("The embedded entries of this page were already consumed")]
    PayloadConsumed,

    /// The embedded entries did not decode as the requested resource kind.
    #[error("Failed to decode embedded {kind} entries: {source}")]
    Unravel {
        /// The resource kind being decoded.
        kind: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A resource lacks the `self` link needed to address it.
    #[error("The {kind} has no self link, so it cannot be addressed")]
    MissingIdentity {
        /// The resource kind.
        kind: &'static str,
    },

    /// A merge response did not carry a `job` link.
    #[error("The merge response did not include a job link")]
    MissingJobLink,
}

impl ResourceError {
    /// Returns the HTTP status code when the failure came from the API.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.as_api_error().map(|api| api.code),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.as_api_error().and_then(|api| api.request_id.as_deref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiError;

    #[test]
    fn test_path_error_messages() {
        assert_eq!(
            PathError::UnsupportedNesting {
                parent: "job",
                nested: "case",
            }
            .to_string(),
            "'case' cannot be nested under 'job'"
        );
        assert!(PathError::EmptySegment { segment: "action" }
            .to_string()
            .contains("action"));
    }

    #[test]
    fn test_status_code_and_request_id_from_api_errors() {
        let api = ApiError::from_body(404, "GET", "https://x", b"{}", Some("req-9".to_string()));
        let error = ResourceError::from(HttpError::from(api));

        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.request_id(), Some("req-9"));
        assert_eq!(ResourceError::PayloadConsumed.status_code(), None);
    }

    #[test]
    fn test_path_error_converts() {
        let error: ResourceError = PathError::MissingIdentity { kind: "reply" }.into();
        assert!(matches!(error, ResourceError::Path(_)));
        assert_eq!(error.to_string(), "A 'reply' path requires a resource id");
    }
}
