//! HAL link types.
//!
//! A HAL document carries its relations in a `_links` object mapping a
//! relation name to `{ "href": ..., "templated": ... }`. Some servers emit an
//! array for a relation (Spring's `curies` for instance); the first entry is
//! kept in that case.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::hal::ResourceError;

/// Name of the relation pointing at the resource itself.
pub const SELF_REL: &str = "self";

/// A single HAL link.
///
/// # Example
///
/// ```rust
/// use hateoas_client::hal::Link;
///
/// let link = Link::templated("http://localhost/api/products{?page,size,sort}");
/// assert!(link.is_templated());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URI, possibly a URI template. `null` deserializes to empty.
    #[serde(default, deserialize_with = "nullable_string")]
    pub href: String,
    /// Whether `href` is a URI template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl Link {
    /// Creates a static link.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: None,
        }
    }

    /// Creates a templated link.
    pub fn templated(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            templated: Some(true),
        }
    }

    /// Returns `true` if the link is flagged as a URI template.
    #[must_use]
    pub fn is_templated(&self) -> bool {
        self.templated.unwrap_or(false)
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `_links` map of a HAL document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    /// Creates an empty link map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    #[must_use]
    pub fn with(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.insert(rel, link);
        self
    }

    /// Inserts or replaces a relation.
    pub fn insert(&mut self, rel: impl Into<String>, link: Link) {
        self.0.insert(rel.into(), link);
    }

    /// Returns the link for `rel`, if present.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    /// Returns `true` if `rel` is present with a non-empty href.
    #[must_use]
    pub fn has(&self, rel: &str) -> bool {
        self.get(rel).is_some_and(|link| !link.href.is_empty())
    }

    /// Returns the `self` link, if present.
    #[must_use]
    pub fn self_link(&self) -> Option<&Link> {
        self.get(SELF_REL)
    }

    /// Returns `true` if the map holds no relations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over relations in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Link)> {
        self.0.iter()
    }

    /// Looks up a relation that must be usable for navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] if the map is empty, the
    /// relation is missing, or its href is empty.
    pub fn relation(&self, name: &str) -> Result<&Link, ResourceError> {
        match self.0.get(name) {
            Some(link) if !link.href.is_empty() => Ok(link),
            _ => Err(ResourceError::RelationNotFound {
                relation: name.to_string(),
            }),
        }
    }
}

impl FromIterator<(String, Link)> for Links {
    fn from_iter<I: IntoIterator<Item = (String, Link)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkValue {
    Single(Link),
    Many(Vec<Link>),
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, LinkValue>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(rel, value)| match value {
                LinkValue::Single(link) => Some((rel, link)),
                LinkValue::Many(links) => links.into_iter().next().map(|link| (rel, link)),
            })
            .collect())
    }
}
