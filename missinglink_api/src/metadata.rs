//! Decoding of the pagination and query-echo response headers.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::types::{Metadata, PaginationMetadata, QueryParameterMetadata};
use crate::Error;

/// Header carrying pagination details of a collection response.
pub const PAGINATION_HEADER: &str = "X-Pagination";
/// Header echoing the query parameters the server applied.
pub const QUERY_PARAMETERS_HEADER: &str = "X-QueryParameters";

/// Extracts metadata from the known headers.
///
/// `X-Pagination` is checked first and, when present, is the only header
/// decoded. Without either header the result is empty. A header whose value
/// is not a JSON object of fields is an error.
pub fn decode_metadata(headers: &HeaderMap) -> Result<Metadata, Error> {
    if headers.contains_key(PAGINATION_HEADER) {
        let meta: PaginationMetadata = decode_header(headers, PAGINATION_HEADER)?;
        return Ok(meta.into_map());
    }
    if headers.contains_key(QUERY_PARAMETERS_HEADER) {
        let meta: QueryParameterMetadata = decode_header(headers, QUERY_PARAMETERS_HEADER)?;
        return Ok(meta.into_map());
    }
    Ok(Metadata::new())
}

fn decode_header<T>(headers: &HeaderMap, name: &'static str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let fail = |source: serde_json::Error| Error::Metadata {
        header: name,
        source,
    };
    let raw = headers
        .get(name)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    let value: serde_json::Value = serde_json::from_slice(raw).map_err(fail)?;
    if !value.is_object() {
        return Err(fail(serde::de::Error::custom("expected a JSON object")));
    }
    serde_json::from_value(value).map_err(fail)
}
