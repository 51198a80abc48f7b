//! Path building for Desk resources.
//!
//! Every resource kind declares a [`ResourceKind`] descriptor: its collection
//! segment, whether it can only be addressed with an id, and which kinds may
//! be nested below it. [`ResourcePath`] turns a descriptor plus optional id,
//! nested kind and action into a path relative to the API base.
//!
//! # Path Shapes
//!
//! | Builder calls | Path |
//! |---|---|
//! | `for_kind(&CASE)` | `/cases` |
//! | `.with_id("42")` | `/cases/42` |
//! | `.with_id("42").with_nested(&CASE_EVENT)` | `/cases/42/case_events` |
//! | `.with_id("42").with_nested_member(&REPLY, "7")` | `/cases/42/replies/7` |
//! | `for_kind(&CUSTOMER).with_action("search")` | `/customers/search` |
//! | `.with_id("1").with_action("merge")` | `/customers/1/merge` |
//!
//! # Example
//!
//! ```rust
//! use desk_api::rest::ResourcePath;
//! use desk_api::resources::{CASE, CASE_EVENT, CUSTOMER};
//!
//! let path = ResourcePath::for_kind(&CASE)
//!     .with_id("42")
//!     .with_nested(&CASE_EVENT)
//!     .build()
//!     .unwrap();
//! assert_eq!(path, "/cases/42/case_events");
//!
//! let path = ResourcePath::for_kind(&CUSTOMER).with_action("search").build().unwrap();
//! assert_eq!(path, "/customers/search");
//! ```

use crate::rest::errors::PathError;

/// Declarative description of a resource kind.
///
/// Declared once per kind as a `const`:
///
/// ```rust
/// use desk_api::rest::ResourceKind;
///
/// const NOTE: ResourceKind = ResourceKind {
///     name: "note",
///     collection: "notes",
///     requires_identity: false,
///     nested: &[],
/// };
/// assert!(!NOTE.supports_nested(&NOTE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Singular lower-case name, used in errors and logs.
    pub name: &'static str,
    /// Collection path segment, e.g. `cases`.
    pub collection: &'static str,
    /// Whether members are only addressable through their own `self` link.
    ///
    /// Such kinds have no top-level path at all; they are reached below a
    /// parent (`/cases/{id}/replies/{reply_id}`).
    pub requires_identity: bool,
    /// Kinds that may appear below `/{collection}/{id}/`.
    pub nested: &'static [&'static ResourceKind],
}

impl ResourceKind {
    /// Returns `true` if `kind` may be nested below this kind.
    #[must_use]
    pub fn supports_nested(&self, kind: &ResourceKind) -> bool {
        self.nested
            .iter()
            .any(|candidate| candidate.collection == kind.collection)
    }
}

/// Builder for a resource path.
///
/// Paths are built per call and rendered once with [`build`](Self::build).
/// Id segments are percent-encoded.
#[derive(Debug, Clone)]
pub struct ResourcePath<'a> {
    kind: &'a ResourceKind,
    id: Option<String>,
    nested: Option<(&'a ResourceKind, Option<String>)>,
    action: Option<String>,
}

impl<'a> ResourcePath<'a> {
    /// Starts a path at the collection of `kind`.
    #[must_use]
    pub const fn for_kind(kind: &'a ResourceKind) -> Self {
        Self {
            kind,
            id: None,
            nested: None,
            action: None,
        }
    }

    /// Addresses a single member of the collection.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Addresses a nested collection below the member.
    #[must_use]
    pub fn with_nested(mut self, kind: &'a ResourceKind) -> Self {
        self.nested = Some((kind, None));
        self
    }

    /// Addresses a single member of a nested collection.
    #[must_use]
    pub fn with_nested_member(mut self, kind: &'a ResourceKind, id: impl Into<String>) -> Self {
        self.nested = Some((kind, Some(id.into())));
        self
    }

    /// Appends a named action (e.g. `search`, `merge`) to the most specific segment.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Renders the path.
    ///
    /// # Errors
    ///
    /// - [`PathError::EmptySegment`] if an id or the action is empty
    /// - [`PathError::MissingIdentity`] if the kind requires an id, or a
    ///   nested collection is requested, and no id was given
    /// - [`PathError::NotTopLevel`] if a kind that requires identity is
    ///   addressed by id at the top level
    /// - [`PathError::UnsupportedNesting`] if the nested kind is not declared
    ///   by the parent kind
    pub fn build(&self) -> Result<String, PathError> {
        let id = non_empty(self.id.as_deref(), "id")?;
        let action = non_empty(self.action.as_deref(), "action")?;

        let mut path = format!("/{}", self.kind.collection);

        match id {
            Some(_) if self.kind.requires_identity => {
                return Err(PathError::NotTopLevel {
                    kind: self.kind.name,
                });
            }
            Some(id) => {
                path.push('/');
                path.push_str(&urlencoding::encode(id));
            }
            None if self.kind.requires_identity || self.nested.is_some() => {
                return Err(PathError::MissingIdentity {
                    kind: self.kind.name,
                });
            }
            None => {}
        }

        if let Some((nested, nested_id)) = &self.nested {
            if !self.kind.supports_nested(nested) {
                return Err(PathError::UnsupportedNesting {
                    parent: self.kind.name,
                    nested: nested.name,
                });
            }
            path.push('/');
            path.push_str(nested.collection);

            if let Some(nested_id) = non_empty(nested_id.as_deref(), "nested id")? {
                path.push('/');
                path.push_str(&urlencoding::encode(nested_id));
            }
        }

        if let Some(action) = action {
            path.push('/');
            path.push_str(action);
        }

        Ok(path)
    }
}

fn non_empty<'s>(
    value: Option<&'s str>,
    segment: &'static str,
) -> Result<Option<&'s str>, PathError> {
    match value {
        Some("") => Err(PathError::EmptySegment { segment }),
        other => Ok(other),
    }
}
