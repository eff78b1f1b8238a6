//! Pagination metadata carried in response headers.

use serde::{Deserialize, Deserializer, Serialize};

use super::envelope::Metadata;

/// Contents of the `X-Pagination` header.
///
/// Every field is kept as an opaque string. Numbers, booleans and `null`
/// sent by the server are accepted and turned into their string form, with
/// `null` and missing fields becoming empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    #[serde(default, deserialize_with = "opaque_string")]
    pub total_count: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub page_size: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub current_page: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub total_pages: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub prev_page_link: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub next_page_link: String,
}

/// Contents of the `X-QueryParameters` header: the pagination fields plus a
/// link back to the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameterMetadata {
    #[serde(flatten)]
    pub pagination: PaginationMetadata,
    #[serde(default, deserialize_with = "opaque_string")]
    pub current_page_link: String,
}

impl PaginationMetadata {
    pub fn into_map(self) -> Metadata {
        Metadata::from([
            ("totalCount".to_string(), self.total_count),
            ("pageSize".to_string(), self.page_size),
            ("currentPage".to_string(), self.current_page),
            ("totalPages".to_string(), self.total_pages),
            ("prevPageLink".to_string(), self.prev_page_link),
            ("nextPageLink".to_string(), self.next_page_link),
        ])
    }

    /// JSON form suitable for an `X-Pagination` header value.
    pub fn to_header_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl QueryParameterMetadata {
    pub fn into_map(self) -> Metadata {
        let mut map = self.pagination.into_map();
        map.insert("currentPageLink".to_string(), self.current_page_link);
        map
    }

    /// JSON form suitable for an `X-QueryParameters` header value.
    pub fn to_header_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}
