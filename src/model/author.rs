use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::Resource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Resource)]
#[resource(collection = "authors")]
pub struct Author {
    pub id: Uuid,
    #[resource(natural_key)]
    pub name: String,
}

/// Full replacement payload for an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRequest {
    #[serde(default)]
    pub name: String,
}

impl AuthorRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The trimmed name, rejecting blank values.
    pub fn require_name(&self) -> Result<String, CatalogError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::PreconditionFailed(
                "Author name must not be blank".into(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Merge-patch payload for an author. Absent or blank fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AuthorPatch {
    fn name_value(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name_value().is_none()
    }

    /// Apply the patch on top of `current`.
    pub fn merge(&self, current: &Author) -> AuthorRequest {
        AuthorRequest::new(self.name_value().unwrap_or(&current.name))
    }
}
