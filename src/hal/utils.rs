//! Conversion between raw HAL JSON and typed resources.
//!
//! The `instantiate_*` functions validate the document kind before handing
//! the payload to serde; [`resolve_values`] goes the other way and flattens a
//! typed graph into a request body where every nested resource is replaced by
//! its `self` URI.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::HalFormat;
use crate::hal::url::remove_template_params;
use crate::hal::{
    EmbeddedResource, Include, Links, PageData, PagedResourceCollection, RequestBody, Resource,
    ResourceCollection, ResourceError, ResourceKind,
};

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";
const PAGE_KEY: &str = "page";

/// Any HAL document, instantiated according to its detected kind.
#[derive(Clone, Debug, PartialEq)]
pub enum HalDocument<T> {
    /// A paged collection.
    PagedCollection(PagedResourceCollection<T>),
    /// An unpaged collection.
    Collection(ResourceCollection<T>),
    /// An entity resource.
    Resource(Resource<T>),
    /// A value object without `self` link.
    Embedded(EmbeddedResource<T>),
    /// Plain JSON (including an empty body).
    Plain(Value),
}

impl<T: DeserializeOwned> HalDocument<T> {
    /// Instantiates a document by its detected kind.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if the payload does not fit
    /// `T`, or [`ResourceError::ShapeMismatch`] for collection items without
    /// a `self` link.
    pub fn from_value(value: Value, format: HalFormat) -> Result<Self, ResourceError> {
        Ok(match ResourceKind::detect_with(&value, format) {
            Some(ResourceKind::PagedCollection) => {
                Self::PagedCollection(instantiate_paged_collection(value, format)?)
            }
            Some(ResourceKind::Collection) => {
                Self::Collection(instantiate_collection(value, format)?)
            }
            Some(ResourceKind::Resource) => Self::Resource(instantiate_resource(value)?),
            Some(ResourceKind::Embedded) => {
                Self::Embedded(instantiate_embedded_resource(value)?)
            }
            None => Self::Plain(value),
        })
    }
}

impl<T> HalDocument<T> {
    /// Returns the detected kind, `None` for plain JSON.
    #[must_use]
    pub const fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::PagedCollection(_) => Some(ResourceKind::PagedCollection),
            Self::Collection(_) => Some(ResourceKind::Collection),
            Self::Resource(_) => Some(ResourceKind::Resource),
            Self::Embedded(_) => Some(ResourceKind::Embedded),
            Self::Plain(_) => None,
        }
    }
}

/// Instantiates an entity resource.
///
/// # Errors
///
/// Returns [`ResourceError::ShapeMismatch`] unless the payload is a resource
/// (has `_links.self`), or [`ResourceError::Deserialize`] if it does not fit
/// `T`.
pub fn instantiate_resource<T: DeserializeOwned>(payload: Value) -> Result<Resource<T>, ResourceError> {
    expect_kind(&payload, HalFormat::default(), ResourceKind::Resource, |kind| {
        kind == ResourceKind::Resource
    })?;
    Ok(serde_json::from_value(payload)?)
}

/// Instantiates a value object.
///
/// Any object that is not a collection is accepted; a `self` link, if
/// present, is kept in the links map.
///
/// # Errors
///
/// Returns [`ResourceError::ShapeMismatch`] for collections and non-objects,
/// or [`ResourceError::Deserialize`] if the payload does not fit `T`.
pub fn instantiate_embedded_resource<T: DeserializeOwned>(
    payload: Value,
) -> Result<EmbeddedResource<T>, ResourceError> {
    let kind = ResourceKind::detect(&payload);
    if !payload.is_object() || kind.is_some_and(|k| k.is_collection()) {
        return Err(ResourceError::ShapeMismatch {
            expected: ResourceKind::Embedded,
            found: kind,
        });
    }
    Ok(serde_json::from_value(payload)?)
}

/// Instantiates a collection from every array under `_embedded`.
///
/// Arrays are concatenated in key order. A paged payload is accepted and its
/// page block ignored. With [`HalFormat::embedded_optional`], a payload with
/// only `_links` is an empty collection.
///
/// # Errors
///
/// Returns [`ResourceError::ShapeMismatch`] if the payload is not a
/// collection or an item lacks a `self` link, or
/// [`ResourceError::Deserialize`] if an item does not fit `T`.
pub fn instantiate_collection<T: DeserializeOwned>(
    payload: Value,
    format: HalFormat,
) -> Result<ResourceCollection<T>, ResourceError> {
    expect_kind(&payload, format, ResourceKind::Collection, |kind| {
        kind.is_collection()
            || (format.embedded_optional
                && matches!(kind, ResourceKind::Resource | ResourceKind::Embedded))
    })?;

    let Value::Object(mut object) = payload else {
        return Ok(ResourceCollection::default());
    };
    let links = take_links(&mut object)?;

    let mut resources = Vec::new();
    if let Some(Value::Object(embedded)) = object.remove(EMBEDDED_KEY) {
        for (_, value) in embedded {
            let items = match value {
                Value::Array(items) => items,
                other => vec![other],
            };
            for item in items {
                expect_kind(&item, format, ResourceKind::Resource, |kind| {
                    kind == ResourceKind::Resource
                })?;
                resources.push(serde_json::from_value(item)?);
            }
        }
    }

    Ok(ResourceCollection::new(resources, links))
}

/// Instantiates a paged collection.
///
/// A collection without a `page` block gets [`PageData::default`]: page 0,
/// size 20, no elements, one page.
///
/// # Errors
///
/// Same as [`instantiate_collection`].
pub fn instantiate_paged_collection<T: DeserializeOwned>(
    mut payload: Value,
    format: HalFormat,
) -> Result<PagedResourceCollection<T>, ResourceError> {
    expect_kind(&payload, format, ResourceKind::PagedCollection, |kind| {
        kind.is_collection()
    })?;

    let page = match payload.as_object_mut().and_then(|o| o.remove(PAGE_KEY)) {
        Some(page) => serde_json::from_value(page)?,
        None => PageData::default(),
    };
    let collection = instantiate_collection(payload, format)?;
    Ok(PagedResourceCollection::new(collection, page))
}

/// Flattens a typed body into the JSON sent to the server.
///
/// Top-level `_links` and `_embedded` are dropped. Nested objects with a
/// `self` link become that link's URI; other nested objects are resolved
/// recursively. `null` fields survive only with [`Include::NullValues`].
///
/// # Errors
///
/// Returns [`ResourceError::Deserialize`] if the body cannot be serialized.
///
/// # Example
///
/// ```rust
/// use hateoas_client::hal::utils::resolve_values;
/// use hateoas_client::hal::RequestBody;
/// use serde_json::json;
///
/// let body = json!({
///     "name": "Chair",
///     "description": null,
///     "category": {"name": "Furniture", "_links": {"self": {"href": "http://localhost/api/categories/3"}}}
/// });
/// let resolved = resolve_values(&RequestBody::new(body)).unwrap();
/// assert_eq!(resolved, json!({"name": "Chair", "category": "http://localhost/api/categories/3"}));
/// ```
pub fn resolve_values<B: Serialize>(body: &RequestBody<B>) -> Result<Value, ResourceError> {
    let value = serde_json::to_value(&body.body)?;
    Ok(match value {
        Value::Object(mut object) => {
            object.remove(LINKS_KEY);
            object.remove(EMBEDDED_KEY);
            Value::Object(resolve_fields(object, body.include))
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| resolve_nested(item, body.include))
                .collect(),
        ),
        other => other,
    })
}

/// Joins the `self` URIs of resources into a `text/uri-list` body.
///
/// # Errors
///
/// Returns [`ResourceError::MissingSelfLink`] if any resource has no `self`
/// link.
pub fn resolve_uri_list<T>(resources: &[Resource<T>]) -> Result<String, ResourceError> {
    let hrefs = resources
        .iter()
        .map(Resource::get_self_link_href)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(hrefs.join("\n"))
}

fn resolve_fields(object: Map<String, Value>, include: Include) -> Map<String, Value> {
    object
        .into_iter()
        .filter(|(_, value)| include == Include::NullValues || !value.is_null())
        .map(|(key, value)| (key, resolve_nested(value, include)))
        .collect()
}

fn resolve_nested(value: Value, include: Include) -> Value {
    match value {
        Value::Object(mut object) => {
            if let Some(href) = self_href(&object) {
                return Value::String(href);
            }
            object.remove(LINKS_KEY);
            Value::Object(resolve_fields(object, include))
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| resolve_nested(item, include))
                .collect(),
        ),
        other => other,
    }
}

fn self_href(object: &Map<String, Value>) -> Option<String> {
    object
        .get(LINKS_KEY)?
        .get("self")?
        .get("href")?
        .as_str()
        .filter(|href| !href.is_empty())
        .map(remove_template_params)
}

fn take_links(object: &mut Map<String, Value>) -> Result<Links, ResourceError> {
    Ok(match object.remove(LINKS_KEY) {
        Some(links) => serde_json::from_value(links)?,
        None => Links::new(),
    })
}

fn expect_kind(
    payload: &Value,
    format: HalFormat,
    expected: ResourceKind,
    accept: impl Fn(ResourceKind) -> bool,
) -> Result<(), ResourceError> {
    let found = ResourceKind::detect_with(payload, format);
    if found.is_some_and(accept) {
        return Ok(());
    }
    tracing::warn!(%expected, ?found, "Unexpected HAL document kind");
    Err(ResourceError::ShapeMismatch { expected, found })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Category {
        name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Product {
        name: String,
        price: f64,
        #[serde(default)]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<Resource<Category>>,
        #[serde(default)]
        tags: Vec<Resource<Category>>,
    }

    fn product_payload() -> Value {
        json!({
            "name": "Chair",
            "price": 12.5,
            "description": null,
            "category": {
                "name": "Furniture",
                "_links": {"self": {"href": "http://localhost/api/categories/3"}}
            },
            "tags": [
                {"name": "wood", "_links": {"self": {"href": "http://localhost/api/tags/1"}}}
            ],
            "_links": {
                "self": {"href": "http://localhost/api/products/1"},
                "category": {"href": "http://localhost/api/products/1/category"}
            }
        })
    }

    fn collection_payload(with_page: bool) -> Value {
        let mut payload = json!({
            "_embedded": {
                "products": [
                    {"name": "Chair", "price": 1.0, "_links": {"self": {"href": "http://localhost/api/products/1"}}},
                    {"name": "Table", "price": 2.0, "_links": {"self": {"href": "http://localhost/api/products/2"}}}
                ],
                "specialProducts": [
                    {"name": "Lamp", "price": 3.0, "_links": {"self": {"href": "http://localhost/api/products/3"}}}
                ]
            },
            "_links": {"self": {"href": "http://localhost/api/products"}}
        });
        if with_page {
            payload["page"] = json!({"size": 3, "totalElements": 9, "totalPages": 3, "number": 1});
        }
        payload
    }

    #[test]
    fn test_instantiate_then_resolve_replaces_nested_resources() {
        let resource: Resource<Product> = instantiate_resource(product_payload()).unwrap();
        assert_eq!(resource.tags.len(), 1);

        let resolved = resolve_values(&RequestBody::new(&resource)).unwrap();
        assert_eq!(
            resolved,
            json!({
                "name": "Chair",
                "price": 12.5,
                "category": "http://localhost/api/categories/3",
                "tags": ["http://localhost/api/tags/1"]
            })
        );
    }

    #[test]
    fn test_resolve_keeps_nulls_when_requested() {
        let resource: Resource<Product> = instantiate_resource(product_payload()).unwrap();
        let resolved =
            resolve_values(&RequestBody::new(&resource).include(Include::NullValues)).unwrap();
        assert_eq!(resolved["description"], Value::Null);
    }

    #[test]
    fn test_resolve_recurses_into_embedded_objects() {
        let body = json!({
            "address": {
                "city": "Oslo",
                "zip": null,
                "_links": {"country": {"href": "http://localhost/api/countries/1"}}
            },
            "_embedded": {"ignored": []}
        });
        assert_eq!(
            resolve_values(&RequestBody::new(body)).unwrap(),
            json!({"address": {"city": "Oslo"}})
        );
    }

    #[test]
    fn test_instantiate_resource_rejects_other_kinds() {
        let err = instantiate_resource::<Product>(collection_payload(false)).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::ShapeMismatch {
                expected: ResourceKind::Resource,
                found: Some(ResourceKind::Collection)
            }
        ));
        assert!(instantiate_resource::<Category>(json!({"name": "x"})).is_err());
    }

    #[test]
    fn test_instantiate_embedded_resource() {
        let embedded: EmbeddedResource<Category> = instantiate_embedded_resource(json!({
            "name": "Furniture",
            "_links": {"products": {"href": "http://localhost/api/categories/3/products"}}
        }))
        .unwrap();
        assert_eq!(embedded.name, "Furniture");
        assert!(instantiate_embedded_resource::<Category>(collection_payload(false)).is_err());
        assert!(instantiate_embedded_resource::<Category>(json!([1])).is_err());
    }

    #[test]
    fn test_instantiate_collection_concatenates_embedded_arrays() {
        let collection: ResourceCollection<Product> =
            instantiate_collection(collection_payload(false), HalFormat::default()).unwrap();
        let names: Vec<&str> = collection.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Chair", "Table", "Lamp"]);
        assert!(collection.links.self_link().is_some());
    }

    #[test]
    fn test_instantiate_collection_requires_self_on_items() {
        let payload = json!({"_embedded": {"products": [{"name": "Chair", "price": 1.0}]}});
        assert!(matches!(
            instantiate_collection::<Product>(payload, HalFormat::default()),
            Err(ResourceError::ShapeMismatch {
                expected: ResourceKind::Resource,
                found: None
            })
        ));
    }

    #[test]
    fn test_embedded_optional_accepts_empty_collection() {
        let payload = json!({"_links": {"self": {"href": "http://localhost/api/products"}}});
        assert!(instantiate_collection::<Product>(payload.clone(), HalFormat::default()).is_err());

        let collection: ResourceCollection<Product> =
            instantiate_collection(payload, HalFormat { embedded_optional: true }).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_instantiate_paged_collection() {
        let paged: PagedResourceCollection<Product> =
            instantiate_paged_collection(collection_payload(true), HalFormat::default()).unwrap();
        assert_eq!(paged.page_number(), 1);
        assert_eq!(paged.page_size(), 3);
        assert_eq!(paged.total_elements(), 9);
        assert_eq!(paged.total_pages(), 3);
        assert_eq!(paged.resources().len(), 3);
    }

    #[test]
    fn test_collection_without_page_gets_default_paging() {
        let paged: PagedResourceCollection<Product> =
            instantiate_paged_collection(collection_payload(false), HalFormat::default()).unwrap();
        assert_eq!(paged.page_number(), 0);
        assert_eq!(paged.page_size(), 20);
        assert_eq!(paged.total_elements(), 0);
        assert_eq!(paged.total_pages(), 1);
        assert!(!paged.has_first() && !paged.has_prev() && !paged.has_next() && !paged.has_last());
    }

    #[test]
    fn test_hal_document_from_value() {
        let doc = HalDocument::<Product>::from_value(product_payload(), HalFormat::default()).unwrap();
        assert_eq!(doc.kind(), Some(ResourceKind::Resource));

        let doc = HalDocument::<Product>::from_value(collection_payload(true), HalFormat::default())
            .unwrap();
        assert_eq!(doc.kind(), Some(ResourceKind::PagedCollection));

        let doc = HalDocument::<Product>::from_value(json!({"count": 3}), HalFormat::default())
            .unwrap();
        assert_eq!(doc, HalDocument::Plain(json!({"count": 3})));
    }

    #[test]
    fn test_resolve_uri_list() {
        let resources = vec![
            Resource::new(Category { name: "a".to_string() }, "http://localhost/api/categories/1"),
            Resource::new(Category { name: "b".to_string() }, "http://localhost/api/categories/2{?projection}"),
        ];
        assert_eq!(
            resolve_uri_list(&resources).unwrap(),
            "http://localhost/api/categories/1\nhttp://localhost/api/categories/2"
        );

        let missing: Vec<Resource<Category>> =
            vec![serde_json::from_value(json!({"name": "c"})).unwrap()];
        assert!(matches!(
            resolve_uri_list(&missing),
            Err(ResourceError::MissingSelfLink)
        ));
    }
}
