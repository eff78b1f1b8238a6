//! Default request headers and client construction.
//!
//! The API identifies callers through a basic-credentials header carrying
//! the user name; the password part is not checked by the server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use missinglink_api::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::MissingLinkError;
use crate::settings::TypedClientSettings;

/// Header carrying the API version the client was written against.
pub const VERSION_HEADER: HeaderName = HeaderName::from_static("x-version");

/// Password sent alongside the user name.
pub const PLACEHOLDER_PASSWORD: &str = "doesn't matter";

/// `Basic base64(user:password)`, marked sensitive so it is redacted from
/// debug output.
pub fn basic_credentials(user: &str, password: &str) -> Result<HeaderValue, MissingLinkError> {
    let encoded = STANDARD.encode(format!("{}:{}", user, password));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|e| MissingLinkError::InvalidInput(format!("invalid credentials: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Headers attached to every request: the version marker and, when a user
/// name is configured, basic credentials.
pub fn default_headers(settings: &TypedClientSettings) -> Result<HeaderMap, MissingLinkError> {
    let mut headers = HeaderMap::new();
    let version = HeaderValue::from_str(&settings.api_version).map_err(|_| {
        MissingLinkError::InvalidInput(format!("invalid API version '{}'", settings.api_version))
    })?;
    headers.insert(VERSION_HEADER, version);
    if let Some(user) = settings.user_name.as_deref().filter(|u| !u.is_empty()) {
        headers.insert(AUTHORIZATION, basic_credentials(user, PLACEHOLDER_PASSWORD)?);
    }
    Ok(headers)
}

/// Builds an API client from settings.
pub fn build_client(settings: &TypedClientSettings) -> Result<Client, MissingLinkError> {
    let config = settings.client_config()?;
    let headers = default_headers(settings)?;
    tracing::debug!(
        "Building client for {} (timeout {}s, version {})",
        config.base_url(),
        config.timeout().as_secs(),
        config.api_version()
    );
    Ok(Client::new(config, headers)?)
}
