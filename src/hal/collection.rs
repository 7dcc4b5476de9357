//! Resource collections and paged collections.
//!
//! Collections are built from `_embedded` arrays by
//! [`crate::hal::utils::instantiate_collection`] and
//! [`crate::hal::utils::instantiate_paged_collection`]. A paged collection
//! keeps the server's `page` block and its `first`/`prev`/`next`/`last`
//! links, and can fetch neighbouring pages.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::HalClient;
use crate::hal::params::DEFAULT_PAGE_SIZE;
use crate::hal::url::{remove_query_params, remove_template_params};
use crate::hal::{
    Links, PageParam, PagedGetOption, Resource, ResourceError, ResourceIdentifiable, Sort,
    SELF_REL,
};

const FIRST_REL: &str = "first";
const PREV_REL: &str = "prev";
const NEXT_REL: &str = "next";
const LAST_REL: &str = "last";

/// The HAL `page` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageData {
    /// Requested page size.
    pub size: u64,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Zero-based index of this page.
    pub number: u64,
}

impl Default for PageData {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            total_elements: 0,
            total_pages: 1,
            number: 0,
        }
    }
}

/// An ordered list of resources plus the collection's own links.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceCollection<T> {
    /// The resources, in server order.
    pub resources: Vec<Resource<T>>,
    /// The collection's `_links`.
    pub links: Links,
}

impl<T> Default for ResourceCollection<T> {
    fn default() -> Self {
        Self {
            resources: Vec::new(),
            links: Links::new(),
        }
    }
}

impl<T> ResourceCollection<T> {
    /// Creates a collection.
    #[must_use]
    pub const fn new(resources: Vec<Resource<T>>, links: Links) -> Self {
        Self { resources, links }
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if there are no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterates over the resources.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource<T>> {
        self.resources.iter()
    }
}

impl<T> ResourceIdentifiable for ResourceCollection<T> {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl<T> IntoIterator for ResourceCollection<T> {
    type Item = Resource<T>;
    type IntoIter = std::vec::IntoIter<Resource<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceCollection<T> {
    type Item = &'a Resource<T>;
    type IntoIter = std::slice::Iter<'a, Resource<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

impl<T> From<PagedResourceCollection<T>> for ResourceCollection<T> {
    fn from(paged: PagedResourceCollection<T>) -> Self {
        paged.collection
    }
}

/// One page of a collection.
///
/// # Example
///
/// ```rust,ignore
/// let mut page: PagedResourceCollection<Product> = client.get_page("products", None).await?;
/// while page.has_next() {
///     page = page.next(&client).await?;
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PagedResourceCollection<T> {
    /// The resources and links of this page.
    pub collection: ResourceCollection<T>,
    /// Page metadata; defaults apply when the server sent none.
    pub page: PageData,
}

impl<T> PagedResourceCollection<T> {
    /// Creates a paged collection.
    #[must_use]
    pub const fn new(collection: ResourceCollection<T>, page: PageData) -> Self {
        Self { collection, page }
    }

    /// Zero-based index of this page.
    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.page.number
    }

    /// Page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page.size
    }

    /// Total number of elements.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.page.total_elements
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.page.total_pages
    }

    /// The resources on this page.
    #[must_use]
    pub fn resources(&self) -> &[Resource<T>] {
        &self.collection.resources
    }

    /// URI of the first page.
    #[must_use]
    pub fn first_uri(&self) -> Option<&str> {
        self.uri(FIRST_REL)
    }

    /// URI of the previous page.
    #[must_use]
    pub fn prev_uri(&self) -> Option<&str> {
        self.uri(PREV_REL)
    }

    /// URI of this page.
    #[must_use]
    pub fn self_uri(&self) -> Option<&str> {
        self.uri(SELF_REL)
    }

    /// URI of the next page.
    #[must_use]
    pub fn next_uri(&self) -> Option<&str> {
        self.uri(NEXT_REL)
    }

    /// URI of the last page.
    #[must_use]
    pub fn last_uri(&self) -> Option<&str> {
        self.uri(LAST_REL)
    }

    /// Returns `true` if a `first` link is present.
    #[must_use]
    pub fn has_first(&self) -> bool {
        self.collection.links.has(FIRST_REL)
    }

    /// Returns `true` if a `prev` link is present.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.collection.links.has(PREV_REL)
    }

    /// Returns `true` if a `next` link is present.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.collection.links.has(NEXT_REL)
    }

    /// Returns `true` if a `last` link is present.
    #[must_use]
    pub fn has_last(&self) -> bool {
        self.collection.links.has(LAST_REL)
    }

    fn uri(&self, rel: &str) -> Option<&str> {
        self.collection
            .links
            .get(rel)
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

impl<T: DeserializeOwned> PagedResourceCollection<T> {
    /// Fetches the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `first` link, or
    /// a request error.
    pub async fn first(&self, client: &HalClient) -> Result<Self, ResourceError> {
        self.follow(client, FIRST_REL).await
    }

    /// Fetches the previous page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `prev` link, or
    /// a request error.
    pub async fn prev(&self, client: &HalClient) -> Result<Self, ResourceError> {
        self.follow(client, PREV_REL).await
    }

    /// Fetches the next page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `next` link, or
    /// a request error.
    pub async fn next(&self, client: &HalClient) -> Result<Self, ResourceError> {
        self.follow(client, NEXT_REL).await
    }

    /// Fetches the last page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `last` link, or
    /// a request error.
    pub async fn last(&self, client: &HalClient) -> Result<Self, ResourceError> {
        self.follow(client, LAST_REL).await
    }

    /// Fetches page `number`, keeping the current size and sort.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PageOutOfRange`] if `number` is not below
    /// [`Self::total_pages`], [`ResourceError::RelationNotFound`] without a
    /// `self` link, or a request error.
    pub async fn page(&self, client: &HalClient, number: u64) -> Result<Self, ResourceError> {
        if number >= self.page.total_pages.max(1) {
            return Err(ResourceError::PageOutOfRange {
                requested: number,
                total_pages: self.page.total_pages,
            });
        }
        self.custom_page(client, Some(number), None, None).await
    }

    /// Fetches the current page with a different size.
    ///
    /// The page number is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `self` link, or
    /// a request error.
    pub async fn size(&self, client: &HalClient, size: u64) -> Result<Self, ResourceError> {
        self.custom_page(client, None, Some(size), None).await
    }

    /// Fetches the current page with a different sort.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `self` link, or
    /// a request error.
    pub async fn sort_elements(&self, client: &HalClient, sort: Sort) -> Result<Self, ResourceError> {
        self.custom_page(client, None, None, Some(sort)).await
    }

    /// Fetches a page with explicit paging and sort.
    ///
    /// `None` keeps the current page number, the current size, or the sort
    /// already present in the `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RelationNotFound`] without a `self` link, or
    /// a request error.
    pub async fn custom_page(
        &self,
        client: &HalClient,
        page: Option<u64>,
        size: Option<u64>,
        sort: Option<Sort>,
    ) -> Result<Self, ResourceError> {
        let self_link = self.collection.links.relation(SELF_REL)?;
        let mut stripped = vec!["page", "size"];
        if sort.is_some() {
            stripped.push("sort");
        }
        let url = remove_query_params(&remove_template_params(&self_link.href), &stripped);

        let options = PagedGetOption {
            page: Some(PageParam::new(
                page.unwrap_or(self.page.number),
                size.unwrap_or(self.page.size),
            )),
            sort: sort.unwrap_or_default(),
            ..PagedGetOption::default()
        };
        client.get_page_by_url(&url, Some(options)).await
    }

    async fn follow(&self, client: &HalClient, rel: &str) -> Result<Self, ResourceError> {
        let link = self.collection.links.relation(rel)?;
        client.get_page_by_url(&link.href, None).await
    }
}

impl<T> ResourceIdentifiable for PagedResourceCollection<T> {
    fn links(&self) -> &Links {
        &self.collection.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::Link;

    #[test]
    fn test_page_data_defaults() {
        let page = PageData::default();
        assert_eq!(page.number, 0);
        assert_eq!(page.size, 20);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_data_deserializes_camel_case_with_defaults() {
        let page: PageData =
            serde_json::from_value(serde_json::json!({"totalElements": 42, "number": 2})).unwrap();
        assert_eq!(page.total_elements, 42);
        assert_eq!(page.number, 2);
        assert_eq!(page.size, 20);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_navigation_flags_follow_links() {
        let links = Links::new()
            .with("self", Link::new("http://localhost/api/products?page=1&size=2"))
            .with("first", Link::new("http://localhost/api/products?page=0&size=2"))
            .with("next", Link::new("http://localhost/api/products?page=2&size=2"))
            .with("prev", Link::new(""));
        let paged: PagedResourceCollection<()> =
            PagedResourceCollection::new(ResourceCollection::new(Vec::new(), links), PageData::default());

        assert!(paged.has_first());
        assert!(paged.has_next());
        assert!(!paged.has_prev());
        assert!(!paged.has_last());
        assert_eq!(
            paged.next_uri(),
            Some("http://localhost/api/products?page=2&size=2")
        );
        assert_eq!(paged.prev_uri(), None);
    }

    #[test]
    fn test_default_paged_collection_has_no_navigation() {
        let paged: PagedResourceCollection<()> = PagedResourceCollection::default();
        assert!(!paged.has_first() && !paged.has_prev() && !paged.has_next() && !paged.has_last());
        assert_eq!(paged.total_pages(), 1);
        assert!(paged.resources().is_empty());
    }

    #[test]
    fn test_collection_iteration() {
        let collection = ResourceCollection::new(
            vec![
                Resource::new(1, "http://localhost/api/numbers/1"),
                Resource::new(2, "http://localhost/api/numbers/2"),
            ],
            Links::new(),
        );
        let values: Vec<i32> = collection.iter().map(|r| r.data).collect();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(collection.len(), 2);
        assert!(!collection.is_empty());
    }
}
