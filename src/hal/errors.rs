//! Error types for HAL resource operations.
//!
//! Three families of failure are distinguished:
//!
//! - **Usage errors**: [`ResourceError::RelationNotFound`],
//!   [`ResourceError::MissingSelfLink`], [`ResourceError::ReservedParam`],
//!   [`ResourceError::EmptyArgument`], [`ResourceError::PageOutOfRange`]
//! - **Shape mismatches**: [`ResourceError::ShapeMismatch`] when the server
//!   answers with a different kind of document than requested, and
//!   [`ResourceError::Deserialize`] when the payload does not fit the type
//! - **Pass-through**: [`ResourceError::Http`] forwards [`HttpError`] unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use hateoas_client::hal::ResourceError;
//!
//! match product.get_relation::<Category>(&client, "category", None).await {
//!     Ok(category) => println!("Category: {}", category.name),
//!     Err(ResourceError::RelationNotFound { relation }) => println!("no {relation} link"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::hal::ResourceKind;

/// Error type for HAL resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The relation is absent from `_links` or has an empty href.
    #[error("No relation found with name '{relation}'")]
    RelationNotFound {
        /// The relation name that was requested.
        relation: String,
    },

    /// The object has no `self` link, so it cannot be identified.
    #[error("Resource has no self link; it cannot be used where a resource identity is required")]
    MissingSelfLink,

    /// A reserved parameter was passed through the generic params map.
    #[error("Please, pass '{name}' param via the '{field}' option, not as a generic param")]
    ReservedParam {
        /// The reserved parameter name.
        name: String,
        /// The dedicated option field to use instead.
        field: &'static str,
    },

    /// A required argument was empty.
    #[error("Passed param '{argument}' must not be empty")]
    EmptyArgument {
        /// The name of the argument.
        argument: &'static str,
    },

    /// A page index beyond the last page was requested.
    #[error("Page {requested} is out of range; the collection has {total_pages} page(s)")]
    PageOutOfRange {
        /// The requested zero-based page index.
        requested: u64,
        /// Total number of pages reported by the server.
        total_pages: u64,
    },

    /// The server returned a document of an unexpected kind.
    #[error("Expected a {expected} but the response is {}", describe_found(.found))]
    ShapeMismatch {
        /// The kind the operation expects.
        expected: ResourceKind,
        /// The detected kind, `None` for plain JSON.
        found: Option<ResourceKind>,
    },

    /// The payload could not be converted to or from the typed model.
    #[error("Failed to convert resource: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns `true` for errors caused by the caller's arguments.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::RelationNotFound { .. }
                | Self::MissingSelfLink
                | Self::ReservedParam { .. }
                | Self::EmptyArgument { .. }
                | Self::PageOutOfRange { .. }
        )
    }

    /// Returns the HTTP status code if the error came from a server response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_found(found: &Option<ResourceKind>) -> String {
    found.map_or_else(|| "plain JSON".to_string(), |kind| format!("a {kind}"))
}

/// Fails with [`ResourceError::EmptyArgument`] when `value` is blank.
pub(crate) fn require_not_empty(value: &str, argument: &'static str) -> Result<(), ResourceError> {
    if value.trim().is_empty() {
        return Err(ResourceError::EmptyArgument { argument });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_relation_not_found_message() {
        let error = ResourceError::RelationNotFound {
            relation: "owner".to_string(),
        };
        assert_eq!(error.to_string(), "No relation found with name 'owner'");
        assert!(error.is_usage_error());
    }

    #[test]
    fn test_reserved_param_message_names_option_field() {
        let error = ResourceError::ReservedParam {
            name: "page".to_string(),
            field: "page",
        };
        let message = error.to_string();
        assert!(message.contains("'page'"));
        assert!(message.contains("option"));
    }

    #[test]
    fn test_shape_mismatch_message() {
        let error = ResourceError::ShapeMismatch {
            expected: ResourceKind::Collection,
            found: Some(ResourceKind::Resource),
        };
        assert_eq!(
            error.to_string(),
            "Expected a collection but the response is a resource"
        );

        let error = ResourceError::ShapeMismatch {
            expected: ResourceKind::Resource,
            found: None,
        };
        assert!(error.to_string().ends_with("plain JSON"));
        assert!(!error.is_usage_error());
    }

    #[test]
    fn test_require_not_empty() {
        assert!(require_not_empty("products", "resource_name").is_ok());
        assert!(matches!(
            require_not_empty("  ", "resource_name"),
            Err(ResourceError::EmptyArgument {
                argument: "resource_name"
            })
        ));
    }

    #[test]
    fn test_http_error_passes_through() {
        let error: ResourceError = HttpError::Response(HttpResponseError {
            code: 409,
            method: "post".to_string(),
            url: "http://localhost/api/products".to_string(),
            message: "{}".to_string(),
        })
        .into();

        assert_eq!(error.status(), Some(409));
        assert!(error.to_string().contains("409"));
    }
}
