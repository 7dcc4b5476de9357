//! URL and URI-template helpers.
//!
//! HAL servers advertise templated links such as
//! `http://localhost/api/products{?page,size,sort,projection}`. Before a
//! request is sent the template is either filled from the request options or
//! stripped, so the HTTP layer only ever sees plain URLs.
//!
//! Supported expressions are the ones HAL servers emit: `{var}`, `{/var}`,
//! `{?var,...}` and `{&var,...}`. Variable modifiers (`*`, `:n`) are ignored.
//!
//! # Example
//!
//! ```rust
//! use hateoas_client::hal::url::{fill_template, remove_template_params};
//! use hateoas_client::hal::{PageParam, PagedGetOption};
//!
//! let template = "http://localhost/api/products{?page,size,sort}";
//! assert_eq!(remove_template_params(template), "http://localhost/api/products");
//!
//! let options = PagedGetOption::default().page(PageParam::new(2, 10));
//! let (url, rest) = fill_template(template, &options).unwrap();
//! assert_eq!(url, "http://localhost/api/products?page=2&size=10");
//! assert!(rest.is_empty());
//! ```

use reqwest::Url;

use crate::hal::errors::require_not_empty;
use crate::hal::{Link, PagedGetOption, ResourceError};

/// Query parameters in request order; keys may repeat.
pub type QueryPairs = Vec<(String, String)>;

/// Returns `true` if the link is a URI template.
///
/// A link counts as templated when flagged so, or when its href still holds
/// an expression.
#[must_use]
pub fn is_templated(link: &Link) -> bool {
    link.is_templated() || link.href.contains('{')
}

/// Converts structured options into query pairs.
///
/// Order: `projection`, `page`, `size`, each `sort`, then free params by name.
///
/// # Errors
///
/// Returns [`ResourceError::ReservedParam`] if a reserved name is passed as a
/// free param.
pub fn convert_to_http_params(options: &PagedGetOption) -> Result<QueryPairs, ResourceError> {
    options.params.ensure_not_reserved()?;

    let mut pairs = QueryPairs::new();
    if let Some(projection) = &options.projection {
        pairs.push(("projection".to_string(), projection.clone()));
    }
    if let Some(page) = options.page {
        pairs.push(("page".to_string(), page.page.to_string()));
        pairs.push(("size".to_string(), page.size.to_string()));
    }
    for sort in options.sort.to_query_values() {
        pairs.push(("sort".to_string(), sort));
    }
    for (name, value) in options.params.iter() {
        pairs.push((name.clone(), value.to_string()));
    }
    Ok(pairs)
}

/// Fills a URI template from the request options.
///
/// Variables found in the template consume the matching params; params the
/// template does not name are returned to be sent as query parameters.
/// Variables without a value are dropped, so empty options strip the
/// template entirely.
///
/// # Errors
///
/// Returns [`ResourceError::ReservedParam`] if a reserved name is passed as a
/// free param.
pub fn fill_template(
    template: &str,
    options: &PagedGetOption,
) -> Result<(String, QueryPairs), ResourceError> {
    let mut remaining = convert_to_http_params(options)?;
    let url = expand(template, &mut remaining);
    Ok((url, remaining))
}

/// Removes every template expression from a URL.
#[must_use]
pub fn remove_template_params(url: &str) -> String {
    expand(url, &mut QueryPairs::new())
}

/// Produces the URL to request for a link.
///
/// Templated links are filled; static links pass through and all options
/// become query parameters.
///
/// # Errors
///
/// Returns [`ResourceError::ReservedParam`] if a reserved name is passed as a
/// free param.
pub fn generate_link_url(
    link: &Link,
    options: &PagedGetOption,
) -> Result<(String, QueryPairs), ResourceError> {
    if is_templated(link) {
        fill_template(&link.href, options)
    } else {
        Ok((link.href.clone(), convert_to_http_params(options)?))
    }
}

/// Builds `{base}/{resource_name}` or `{base}/{resource_name}/search/{query}`.
///
/// # Errors
///
/// Returns [`ResourceError::EmptyArgument`] if `resource_name` or a given
/// `query` is blank.
pub fn generate_resource_url(
    base_url: &str,
    resource_name: &str,
    search_query: Option<&str>,
) -> Result<String, ResourceError> {
    require_not_empty(resource_name, "resource_name")?;

    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        resource_name.trim_matches('/')
    );
    if let Some(query) = search_query {
        require_not_empty(query, "query")?;
        url.push_str("/search/");
        url.push_str(query.trim_start_matches('/'));
    }
    Ok(url)
}

/// Returns the last path segment of a self link (the resource id).
#[must_use]
pub fn resource_id_from_url(url: &str) -> Option<String> {
    path_segments(url).pop()
}

/// Returns the path segment before the id (the resource collection name).
#[must_use]
pub fn resource_name_from_url(url: &str) -> Option<String> {
    let mut segments = path_segments(url);
    segments.pop()?;
    segments.pop()
}

/// Removes the named parameters from a URL's query string.
///
/// The path and fragment are kept as written; the remaining pairs keep their
/// original encoding and order.
#[must_use]
pub fn remove_query_params(url: &str, names: &[&str]) -> String {
    let Some(parsed) = parse_reference(url) else {
        return url.to_string();
    };
    let Some(query) = parsed.query() else {
        return url.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            let key = urlencoding::decode(key).unwrap_or_else(|_| key.into());
            !pair.is_empty() && !names.contains(&key.as_ref())
        })
        .collect();

    let head = url.split(['?', '#']).next().unwrap_or_default();
    let mut output = head.to_string();
    if !kept.is_empty() {
        output.push('?');
        output.push_str(&kept.join("&"));
    }
    if let Some(fragment) = parsed.fragment() {
        output.push('#');
        output.push_str(fragment);
    }
    output
}

/// Parses an absolute URL or a relative reference.
///
/// Relative references are parsed against a placeholder origin; callers only
/// read the path, query and fragment.
fn parse_reference(url: &str) -> Option<Url> {
    Url::parse(url)
        .or_else(|_| Url::parse("http://localhost/").and_then(|origin| origin.join(url)))
        .ok()
}

fn path_segments(url: &str) -> Vec<String> {
    parse_reference(&remove_template_params(url))
        .and_then(|parsed| {
            parsed.path_segments().map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
        })
        .unwrap_or_default()
}

fn expand(template: &str, remaining: &mut QueryPairs) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            // Unterminated expression: keep the text as is.
            output.push_str(&rest[start..]);
            return output;
        };
        let expression = &rest[start + 1..start + len];
        let has_query = output.contains('?');
        output.push_str(&expand_expression(expression, remaining, has_query));
        rest = &rest[start + len + 1..];
    }
    output.push_str(rest);
    output
}

fn expand_expression(expression: &str, remaining: &mut QueryPairs, has_query: bool) -> String {
    let (operator, names) = match expression.chars().next() {
        Some(op @ ('?' | '&' | '/' | '+' | '#' | '.' | ';')) => (Some(op), &expression[1..]),
        _ => (None, expression),
    };

    let mut values: Vec<(String, String)> = Vec::new();
    for name in names.split(',') {
        let name = name.trim().trim_end_matches('*');
        let name = name.split(':').next().unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let (taken, kept): (QueryPairs, QueryPairs) =
            std::mem::take(remaining).into_iter().partition(|(k, _)| k == name);
        *remaining = kept;
        values.extend(taken);
    }

    if values.is_empty() {
        return String::new();
    }

    let encode = |s: &str| urlencoding::encode(s).into_owned();
    match operator {
        Some('?' | '&') => {
            let prefix = if has_query { '&' } else { '?' };
            let pairs: Vec<String> = values
                .iter()
                .map(|(k, v)| format!("{k}={}", encode(v)))
                .collect();
            format!("{prefix}{}", pairs.join("&"))
        }
        Some('/') => values
            .iter()
            .map(|(_, v)| format!("/{}", encode(v)))
            .collect(),
        _ => values
            .iter()
            .map(|(_, v)| encode(v))
            .collect::<Vec<_>>()
            .join(","),
    }
}
