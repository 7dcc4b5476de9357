//! Structural resource-kind detection.
//!
//! HAL documents carry no explicit type tag; the kind is inferred from the
//! shape of the JSON object. Checks run from the most specific shape to the
//! least specific: paged collection, collection, resource, embedded resource.

use std::fmt;

use serde_json::Value;

use crate::config::HalFormat;

/// The shape of a HAL document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `_embedded` and `page` blocks.
    PagedCollection,
    /// `_embedded` block without `page`.
    Collection,
    /// `_links` containing a `self` relation.
    Resource,
    /// `_links` without a `self` relation.
    Embedded,
}

impl ResourceKind {
    /// Detects the kind of a strict HAL document.
    ///
    /// Returns `None` for plain JSON (no `_links`, no `_embedded`) and for
    /// anything that is not an object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hateoas_client::hal::ResourceKind;
    /// use serde_json::json;
    ///
    /// let body = json!({"name": "Chair", "_links": {"self": {"href": "http://localhost/api/products/1"}}});
    /// assert_eq!(ResourceKind::detect(&body), Some(ResourceKind::Resource));
    /// ```
    #[must_use]
    pub fn detect(value: &Value) -> Option<Self> {
        Self::detect_with(value, HalFormat::default())
    }

    /// Detects the kind, applying the configured format tolerances.
    ///
    /// With `embedded_optional`, `_links` plus `page` without `_embedded` is a
    /// paged collection.
    #[must_use]
    pub fn detect_with(value: &Value, format: HalFormat) -> Option<Self> {
        let object = value.as_object()?;
        let has_embedded = object.contains_key("_embedded");
        let has_page = object.contains_key("page");
        let links = object.get("_links").and_then(Value::as_object);

        if has_embedded && has_page {
            return Some(Self::PagedCollection);
        }
        if has_embedded {
            return Some(Self::Collection);
        }
        if format.embedded_optional && has_page && links.is_some() {
            return Some(Self::PagedCollection);
        }
        match links {
            Some(links) if links.contains_key("self") => Some(Self::Resource),
            Some(_) => Some(Self::Embedded),
            None => None,
        }
    }

    /// Returns `true` for either collection kind.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::PagedCollection | Self::Collection)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PagedCollection => write!(f, "paged collection"),
            Self::Collection => write!(f, "collection"),
            Self::Resource => write!(f, "resource"),
            Self::Embedded => write!(f, "embedded resource"),
        }
    }
}
