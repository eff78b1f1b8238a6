//! Library layer for MissingLink: settings, default headers and input
//! validation around the `missinglink_api` client.

pub mod auth;
pub mod error;
pub mod settings;
pub mod validation;

pub use missinglink_api;
pub use missinglink_api::types;
pub use missinglink_api::{
    Client, ClientConfig, ErrorKind, PageLimits, PagingSortSpec, Query, SortDirection,
};

pub use auth::{basic_credentials, build_client, default_headers};
pub use error::{ConfigError, MissingLinkError};
pub use settings::{Settings, TypedClientSettings};
