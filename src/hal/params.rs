//! Request option types.
//!
//! Structured options are converted into query parameters (or URI template
//! variables) by [`crate::hal::url`]:
//!
//! - [`GetOption`] / [`PagedGetOption`]: projection, sort, page and free params
//! - [`RequestOption`]: free params and [`Observe`] mode for write operations
//! - [`RequestBody`]: a typed body plus the [`Include`] null-value policy
//!
//! # Example
//!
//! ```rust
//! use hateoas_client::hal::{PageParam, PagedGetOption, Sort, SortOrder};
//!
//! let options = PagedGetOption::default()
//!     .projection("productSummary")
//!     .page(PageParam::new(1, 50))
//!     .sort(Sort::new().by("name", SortOrder::Asc))
//!     .param("category", "chairs");
//! assert_eq!(options.page.unwrap().size, 50);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::hal::{Resource, ResourceError};

/// Default page index.
pub const DEFAULT_PAGE: u64 = 0;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Names that must be passed through dedicated option fields.
pub const RESERVED_PARAMS: &[(&str, &str)] = &[
    ("projection", "projection"),
    ("page", "page"),
    ("size", "page"),
    ("sort", "sort"),
];

/// A single query parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(serde_json::Number),
    /// Boolean value.
    Bool(bool),
    /// A resource, sent as its self-link URI.
    Resource(String),
}

impl ParamValue {
    /// Creates a value referencing a resource by its self link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the resource has no
    /// `self` link.
    pub fn resource<T>(resource: &Resource<T>) -> Result<Self, ResourceError> {
        Ok(Self::Resource(resource.get_self_link_href()?))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Resource(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_number_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

impl_number_param!(i32, i64, u32, u64, usize);

/// Free-form request parameters, ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParam(BTreeMap<String, ParamValue>);

impl RequestParam {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Inserts a resource-valued parameter (sent as its self-link URI).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingSelfLink`] if the resource has no
    /// `self` link.
    pub fn insert_resource<T>(
        &mut self,
        name: impl Into<String>,
        resource: &Resource<T>,
    ) -> Result<(), ResourceError> {
        self.0.insert(name.into(), ParamValue::resource(resource)?);
        Ok(())
    }

    /// Returns a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Fails if any reserved name is used as a free parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ReservedParam`] naming the option field to
    /// use instead.
    pub fn ensure_not_reserved(&self) -> Result<(), ResourceError> {
        for (name, field) in RESERVED_PARAMS {
            if self.0.contains_key(*name) {
                return Err(ResourceError::ReservedParam {
                    name: (*name).to_string(),
                    field: *field,
                });
            }
        }
        Ok(())
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Ordered sort specification, sent as repeated `sort=field,ORDER` params.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sort(Vec<(String, SortOrder)>);

impl Sort {
    /// Creates an empty sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort field.
    #[must_use]
    pub fn by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.0.push((field.into(), order));
        self
    }

    /// Returns `true` if no field is sorted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the query values, e.g. `name,ASC`.
    #[must_use]
    pub fn to_query_values(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(field, order)| format!("{field},{order}"))
            .collect()
    }
}

/// Page index and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageParam {
    /// Zero-based page index.
    pub page: u64,
    /// Number of elements per page.
    pub size: u64,
}

impl PageParam {
    /// Creates a page parameter.
    #[must_use]
    pub const fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }
}

impl Default for PageParam {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Options for fetching a single resource or an unpaged collection.
///
/// Cache hits are allowed by default.
#[derive(Clone, Debug, PartialEq)]
pub struct GetOption {
    /// Free-form parameters.
    pub params: RequestParam,
    /// Server-side projection name.
    pub projection: Option<String>,
    /// Sort specification.
    pub sort: Sort,
    /// Whether a cached response may be used.
    pub use_cache: bool,
}

impl Default for GetOption {
    fn default() -> Self {
        Self {
            params: RequestParam::new(),
            projection: None,
            sort: Sort::new(),
            use_cache: true,
        }
    }
}

impl GetOption {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projection.
    #[must_use]
    pub fn projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// Sets the sort specification.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Adds a free parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Sets whether a cached response may be used.
    #[must_use]
    pub const fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// Options for fetching a page of resources.
///
/// Cache hits are allowed by default.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedGetOption {
    /// Free-form parameters.
    pub params: RequestParam,
    /// Server-side projection name.
    pub projection: Option<String>,
    /// Sort specification.
    pub sort: Sort,
    /// Page index and size; `None` leaves the server default.
    pub page: Option<PageParam>,
    /// Whether a cached response may be used.
    pub use_cache: bool,
}

impl Default for PagedGetOption {
    fn default() -> Self {
        Self {
            params: RequestParam::new(),
            projection: None,
            sort: Sort::new(),
            page: None,
            use_cache: true,
        }
    }
}

impl PagedGetOption {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projection.
    #[must_use]
    pub fn projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// Sets the sort specification.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page index and size.
    #[must_use]
    pub const fn page(mut self, page: PageParam) -> Self {
        self.page = Some(page);
        self
    }

    /// Adds a free parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Sets whether a cached response may be used.
    #[must_use]
    pub const fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

impl From<GetOption> for PagedGetOption {
    fn from(option: GetOption) -> Self {
        Self {
            params: option.params,
            projection: option.projection,
            sort: option.sort,
            page: None,
            use_cache: option.use_cache,
        }
    }
}

impl From<RequestOption> for PagedGetOption {
    fn from(option: RequestOption) -> Self {
        Self {
            params: option.params,
            ..Self::default()
        }
    }
}

/// What a write operation hands back to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Observe {
    /// The body only, instantiated as a resource when it is one.
    #[default]
    Body,
    /// The full HTTP response.
    Response,
}

/// Options for write operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOption {
    /// Free-form parameters.
    pub params: RequestParam,
    /// Body-only or full response.
    pub observe: Observe,
}

impl RequestOption {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a free parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Sets the observe mode.
    #[must_use]
    pub const fn observe(mut self, observe: Observe) -> Self {
        self.observe = observe;
        self
    }
}

/// Policy for `null` fields when a body is flattened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Include {
    /// Drop fields whose value is `null`.
    #[default]
    NonNull,
    /// Keep `null` fields (e.g., to clear a value with PATCH).
    NullValues,
}

/// A typed request body and its null-value policy.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestBody<B> {
    /// The body.
    pub body: B,
    /// Null-value policy.
    pub include: Include,
}

impl<B> RequestBody<B> {
    /// Wraps a body, dropping null fields.
    pub const fn new(body: B) -> Self {
        Self {
            body,
            include: Include::NonNull,
        }
    }

    /// Sets the null-value policy.
    #[must_use]
    pub const fn include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }
}
