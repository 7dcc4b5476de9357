//! Result type of write operations.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::HttpResponse;
use crate::hal::{Observe, Resource, ResourceError, ResourceKind};

/// What a POST, PUT, PATCH or DELETE hands back.
///
/// With [`Observe::Body`] the body is instantiated as a [`Resource`] when it
/// is one and kept as JSON otherwise. With [`Observe::Response`] the full
/// HTTP response is returned untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum HalResponse<T> {
    /// The body was a HAL resource.
    Resource(Resource<T>),
    /// The body was not a resource (often empty for `204 No Content`).
    Body(Value),
    /// The full response, requested with [`Observe::Response`].
    Response(HttpResponse),
}

impl<T: DeserializeOwned> HalResponse<T> {
    /// Builds the result for the requested observe mode.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if a resource body does not fit
    /// `T`.
    pub fn from_http(response: HttpResponse, observe: Observe) -> Result<Self, ResourceError> {
        if observe == Observe::Response {
            return Ok(Self::Response(response));
        }
        if ResourceKind::detect(&response.body) == Some(ResourceKind::Resource) {
            return Ok(Self::Resource(serde_json::from_value(response.body)?));
        }
        Ok(Self::Body(response.body))
    }
}

impl<T> HalResponse<T> {
    /// Returns the resource, if the body was one.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource<T>> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the full response, if it was requested.
    #[must_use]
    pub fn into_response(self) -> Option<HttpResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the resource, or a shape error naming what came back.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ShapeMismatch`] unless the body was a
    /// resource.
    pub fn require_resource(self) -> Result<Resource<T>, ResourceError> {
        match self {
            Self::Resource(resource) => Ok(resource),
            Self::Body(body) | Self::Response(HttpResponse { body, .. }) => {
                Err(ResourceError::ShapeMismatch {
                    expected: ResourceKind::Resource,
                    found: ResourceKind::detect(&body),
                })
            }
        }
    }
}
