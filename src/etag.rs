//! Strong entity tags derived from `(id, version)`.
//!
//! A tag is `"<hex>"` where `<hex>` is the SHA-256 digest of the hyphenated
//! id, a `:` byte and the decimal version. Tags produced here are always
//! strong; weak (`W/`) tags sent by clients are accepted when matching.

use std::fmt;

use sha2::{Digest, Sha256};
use uuid::Uuid;

const WILDCARD: &str = "*";
const WEAK_PREFIX: &str = "W/";

/// A quoted strong entity tag, as sent in the `ETag` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag(String);

impl EntityTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate the strong tag for a resource at a given version.
pub fn generate(id: Uuid, version: i64) -> EntityTag {
    let mut hasher = Sha256::new();
    hasher.update(id.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(version.to_string().as_bytes());
    EntityTag(format!("\"{}\"", hex::encode(hasher.finalize())))
}

/// Does an `If-Match` / `If-None-Match` header value match `current`?
///
/// The header may list several tags separated by commas, or `*`. A missing
/// or blank header never matches.
pub fn matches(header: Option<&str>, current: &EntityTag) -> bool {
    let Some(header) = header.filter(|h| !h.trim().is_empty()) else {
        return false;
    };

    let current = normalize(current.as_str());
    candidates(header).any(|candidate| candidate == WILDCARD || candidate == current)
}

/// Like [`matches`], but the wildcard does not count: `current` itself must be listed.
pub fn lists(header: Option<&str>, current: &EntityTag) -> bool {
    let Some(header) = header else {
        return false;
    };

    let current = normalize(current.as_str());
    candidates(header).any(|candidate| candidate == current)
}

/// Recover the version a client asserts for `id` from a header value.
///
/// Only tags of the invertible form `"<id>:<version>"` carry a version; the
/// first candidate of that form with a parseable version wins.
pub fn extract_version(header: Option<&str>, id: Uuid) -> Option<i64> {
    let header = header.filter(|h| !h.trim().is_empty())?;
    let prefix = format!("{}:", id);

    candidates(header)
        .filter(|candidate| candidate != WILDCARD)
        .filter_map(|candidate| {
            strip_quotes(&candidate)
                .strip_prefix(&prefix)
                .and_then(|rest| rest.parse::<i64>().ok())
        })
        .next()
}

fn candidates(header: &str) -> impl Iterator<Item = String> + '_ {
    header
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(normalize)
}

fn normalize(raw: &str) -> String {
    if raw == WILDCARD {
        return raw.to_string();
    }
    let raw = raw.strip_prefix(WEAK_PREFIX).unwrap_or(raw);
    if raw.starts_with('"') {
        raw.to_string()
    } else {
        format!("\"{}\"", raw)
    }
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
