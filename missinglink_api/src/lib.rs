//! Typed client for a paginated REST resource.
//!
//! Builds paging/sorting query strings, sends one request per call and wraps
//! the outcome in a [`ResponseEnvelope`](types::ResponseEnvelope) together
//! with any pagination metadata the server put in the response headers.

mod client;
mod config;
mod errors;
pub mod metadata;
mod query;
pub mod types;
pub use self::client::{Client, CASE_PATH, MEDIA_TYPE_VERSION};
pub use self::config::{ClientConfig, DEFAULT_TIMEOUT};
pub use self::errors::{Error, ErrorKind};
pub use self::query::{PageLimits, PagingSortSpec, Query, SortDirection};
