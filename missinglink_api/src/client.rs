//! HTTP client for the case API.

use std::fmt::Display;

use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    config::{ClientConfig, DEFAULT_TIMEOUT},
    metadata::decode_metadata,
    query::{PagingSortSpec, Query},
    types::{CaseID, CaseRecord, ResponseEnvelope},
    Error,
};

/// Media type sent in `Accept` (and `Content-Type` for bodies) on every request.
pub const MEDIA_TYPE_VERSION: &str = "application/json;v=1.0";

/// Resource path of the case collection, relative to the base URL.
pub const CASE_PATH: &str = "Case";

/// Status line, headers and fully read body of one response.
struct RawResponse {
    status: StatusCode,
    reason: Option<String>,
    headers: HeaderMap,
    body: String,
}

/// Typed client for the case API.
///
/// Holds only the immutable [`ClientConfig`] and a `reqwest::Client` built
/// with the configured timeout and the caller's default headers, so a single
/// instance can be cloned and used from concurrent tasks. Every call makes
/// exactly one request. Responses with a status of 400 or above come back as
/// an envelope carrying the raw body as the error message; only transport
/// failures and undecodable success responses are returned as [`Error`].
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client. `default_headers` (credentials, version marker and
    /// so on) are attached to every request.
    pub fn new(config: ClientConfig, default_headers: HeaderMap) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::ClientBuild(e)
            })?;
        Ok(Self { config, http })
    }

    /// Creates a client with the default timeout and no extra headers. Used
    /// for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(
            ClientConfig::new(base_url, DEFAULT_TIMEOUT, "1.0")?,
            HeaderMap::new(),
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Appends the segments of `path` to the base URL, so the two are
    /// always separated by exactly one `/`.
    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.config.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.config.base_url().to_string()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn get_url_with_id(&self, path: &str, id: impl Display) -> Result<Url, Error> {
        let mut url = self.get_url(path)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.config.base_url().to_string()))?
            .push(&id.to_string());
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_VERSION))
    }

    fn request_with_body<B>(&self, method: Method, url: Url, body: &B) -> Result<RequestBuilder, Error>
    where
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_string(body).map_err(Error::Encode)?;
        Ok(self
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_VERSION))
            .body(json))
    }

    /// Sends the request and reads the full response.
    ///
    /// On a status below 400 the body is decoded as `T` and the metadata
    /// headers are decoded afterwards. On 400 and above the body is kept as
    /// text and nothing is decoded.
    async fn execute<T>(&self, request: RequestBuilder) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self.send(request).await?;

        if resp.status.as_u16() >= 400 {
            tracing::warn!("Request failed with status {}", resp.status);
            return Ok(ResponseEnvelope::failure(resp.status, resp.body).with_reason(resp.reason));
        }

        let payload = match serde_json::from_str::<T>(&resp.body) {
            Ok(payload) => payload,
            Err(source) => {
                tracing::error!("Failed to parse resource: {}", source);
                return Err(Error::Decode {
                    source,
                    body: resp.body,
                });
            }
        };
        let metadata = decode_metadata(&resp.headers)?;

        Ok(ResponseEnvelope::success(resp.status, payload, metadata).with_reason(resp.reason))
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::Transport(e)
        })?;

        let status = resp.status();
        tracing::debug!("Response status {}", status);
        let headers = resp.headers().clone();
        // Only set when the server's phrase differs from the canonical one.
        let reason = resp
            .extensions()
            .get::<ReasonPhrase>()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned());
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;
        Ok(RawResponse {
            status,
            reason,
            headers,
            body,
        })
    }

    /// GET `base_url + path`, decoding the body as `T`.
    pub async fn get<T>(&self, path: &str) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path)?;
        self.execute(self.request(Method::GET, url)).await
    }

    /// GET a page of a collection. The paging and sorting parameters become
    /// the query string and the body is decoded as a sequence of `T`.
    pub async fn list<T>(
        &self,
        path: &str,
        query: &PagingSortSpec,
    ) -> Result<ResponseEnvelope<Vec<T>>, Error>
    where
        T: DeserializeOwned,
    {
        let url = query.add_to_url(&self.get_url(path)?);
        self.execute(self.request(Method::GET, url)).await
    }

    /// GET `base_url + path + "/" + id`, decoding the body as `T`.
    pub async fn get_by_id<T>(&self, path: &str, id: impl Display) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url_with_id(path, id)?;
        self.execute(self.request(Method::GET, url)).await
    }

    /// POST a JSON body, decoding the response body as `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ResponseEnvelope<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.get_url(path)?;
        self.execute(self.request_with_body(Method::POST, url, body)?)
            .await
    }

    /// PUT a JSON body to `path/id`, decoding the response body as `T`.
    pub async fn put<B, T>(
        &self,
        path: &str,
        id: impl Display,
        body: &B,
    ) -> Result<ResponseEnvelope<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.get_url_with_id(path, id)?;
        self.execute(self.request_with_body(Method::PUT, url, body)?)
            .await
    }

    /// DELETE `path/id`. A successful response body is ignored.
    pub async fn delete(&self, path: &str, id: impl Display) -> Result<ResponseEnvelope<()>, Error> {
        let url = self.get_url_with_id(path, id)?;
        let request = self
            .request(Method::DELETE, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_VERSION));
        let resp = self.send(request).await?;
        if resp.status.as_u16() >= 400 {
            tracing::warn!("Request failed with status {}", resp.status);
            return Ok(ResponseEnvelope::failure(resp.status, resp.body).with_reason(resp.reason));
        }
        let metadata = decode_metadata(&resp.headers)?;
        Ok(ResponseEnvelope::success(resp.status, (), metadata).with_reason(resp.reason))
    }

    /// Fetches a page of cases.
    pub async fn list_cases(
        &self,
        query: &PagingSortSpec,
    ) -> Result<ResponseEnvelope<Vec<CaseRecord>>, Error> {
        self.list::<CaseRecord>(CASE_PATH, query).await
    }

    /// Fetches a single case by its numeric ID.
    pub async fn get_case(&self, case_id: CaseID) -> Result<ResponseEnvelope<CaseRecord>, Error> {
        self.get_by_id::<CaseRecord>(CASE_PATH, case_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::with_base_url(base).unwrap()
    }

    #[test]
    fn url_join_normalizes_slashes() {
        for base in ["https://localhost/api", "https://localhost/api/"] {
            for path in ["Case", "/Case"] {
                assert_eq!(
                    client(base).get_url(path).unwrap().as_str(),
                    "https://localhost/api/Case"
                );
            }
        }
    }

    #[test]
    fn url_with_id_appends_segment() {
        let c = client("https://localhost/api/");
        assert_eq!(
            c.get_url_with_id("Case", 42).unwrap().as_str(),
            "https://localhost/api/Case/42"
        );
        assert_eq!(
            c.get_url_with_id("Case/", 42).unwrap().as_str(),
            "https://localhost/api/Case/42"
        );
    }

    #[test]
    fn url_join_keeps_nested_paths() {
        let c = client("https://localhost/api");
        assert_eq!(
            c.get_url("Case//5/").unwrap().as_str(),
            "https://localhost/api/Case/5"
        );
        assert_eq!(
            client("https://localhost").get_url("Case").unwrap().as_str(),
            "https://localhost/Case"
        );
    }

    #[test]
    fn url_with_id_escapes_segment() {
        let c = client("https://localhost/api/");
        assert_eq!(
            c.get_url_with_id("Case", "a/b c").unwrap().as_str(),
            "https://localhost/api/Case/a%2Fb%20c"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        assert!(matches!(
            Client::with_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Client::with_base_url("https://localhost/api?x=1"),
            Err(Error::InvalidBaseUrl(_))
        ));
    }
}
