//! Conditional request evaluation (`If-Match` / `If-None-Match`).
//!
//! | Headers                          | Outcome                                  |
//! |----------------------------------|------------------------------------------|
//! | `If-None-Match: *`               | create; the id must not exist yet        |
//! | no `If-Match` (or blank)         | `PreconditionRequired`                   |
//! | `If-Match` not matching the row  | `PreconditionFailed`                     |
//! | `If-Match` matching the row      | write gated on the asserted version      |

use crate::error::CatalogError;
use crate::etag::{self, EntityTag};
use crate::resource::{Resource, Versioned};

/// What a PUT should do, decided from its conditional headers alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteIntent {
    /// Create-if-absent.
    Create,
    /// Version-gated replacement of an existing resource.
    Update,
}

/// Conditional headers of a mutation or read request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
}

impl Preconditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `If-None-Match: *`, i.e. create-if-absent.
    pub fn create() -> Self {
        Self::new().with_if_none_match("*")
    }

    /// `If-Match` carrying the current tag of `current`.
    pub fn matching<R: Resource>(current: &Versioned<R>) -> Self {
        Self::new().with_if_match(current.etag().as_str())
    }

    pub fn with_if_match(mut self, value: impl Into<String>) -> Self {
        self.if_match = Some(value.into());
        self
    }

    pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    /// Decide between create and update for a PUT.
    pub fn write_intent(&self) -> Result<WriteIntent, CatalogError> {
        if self.if_none_match.as_deref().map(str::trim) == Some("*") {
            return Ok(WriteIntent::Create);
        }
        self.require_if_match()?;
        Ok(WriteIntent::Update)
    }

    /// The version the caller asserts for `current`.
    ///
    /// The `If-Match` value must match the current tag. The version is then
    /// read from an invertible `"<id>:<version>"` candidate, or taken from
    /// the row when the caller listed its exact strong tag. A bare `*`
    /// carries no version and is rejected.
    pub fn expected_version<R: Resource>(
        &self,
        current: &Versioned<R>,
    ) -> Result<i64, CatalogError> {
        let if_match = self.require_if_match()?;
        let tag = current.etag();

        if !etag::matches(Some(if_match), &tag) {
            return Err(CatalogError::PreconditionFailed(
                "If-Match header does not match the current entity tag".into(),
            ));
        }

        etag::extract_version(Some(if_match), current.id())
            .or_else(|| etag::lists(Some(if_match), &tag).then_some(current.version()))
            .ok_or_else(|| {
                CatalogError::PreconditionFailed(
                    "If-Match header must include an entity tag with version information".into(),
                )
            })
    }

    /// Conditional GET: does `If-None-Match` match the current tag?
    pub fn is_not_modified(&self, tag: &EntityTag) -> bool {
        etag::matches(self.if_none_match.as_deref(), tag)
    }

    fn require_if_match(&self) -> Result<&str, CatalogError> {
        self.if_match
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                CatalogError::PreconditionRequired(
                    "If-Match header is required when updating an existing resource.".into(),
                )
            })
    }
}
