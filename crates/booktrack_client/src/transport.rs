use booktrack_core::AuthSession;
use booktrack_logging::{bt_debug, bt_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{ApiError, ClientSettings};

/// A request relative to the transport's base endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Appends a query parameter. Empty values are kept, never dropped.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|err| ApiError::Encode(err.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Attaches the bearer credential of `session`, if any.
///
/// Without a session the request goes out unauthenticated and the server
/// decides whether to reject it.
pub fn authorize(builder: RequestBuilder, session: Option<&AuthSession>) -> RequestBuilder {
    match session {
        Some(session) => builder.bearer_auth(&session.token),
        None => builder,
    }
}

/// Single outbound HTTP seam. One attempt per call; no retries, no caching.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: ApiRequest,
        session: Option<&AuthSession>,
    ) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        // `Url::join` would replace the last base segment, so paths are appended.
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url =
            Url::parse(&joined).map_err(|err| ApiError::InvalidUrl(format!("{joined}: {err}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: ApiRequest,
        session: Option<&AuthSession>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(&request)?;
        bt_debug!(
            "{} {} authenticated={}",
            request.method,
            request.path,
            session.is_some()
        );

        let mut builder = authorize(self.client.request(request.method.clone(), url), session);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|err| {
            let err = map_reqwest_error(err);
            bt_warn!("{} {} failed: {}", request.method, request.path, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            bt_warn!("{} {} returned {}", request.method, request.path, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn authorize_sets_bearer_header_for_session() {
        let client = reqwest::Client::new();
        let session = AuthSession::new("t1", "alice");

        let request = authorize(client.get("http://localhost/books"), Some(&session))
            .build()
            .unwrap();

        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer t1");
    }

    #[test]
    fn authorize_without_session_leaves_request_untouched() {
        let client = reqwest::Client::new();

        let request = authorize(client.get("http://localhost/books"), None)
            .build()
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn endpoint_keeps_base_path_and_empty_query_values() {
        let transport =
            ReqwestTransport::new(&ClientSettings::with_base_url("http://localhost:8080/api"))
                .unwrap();
        let request = ApiRequest::get("/books")
            .query("query", "")
            .query("page", 0)
            .query("size", 20);

        let url = transport.endpoint(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/books?query=&page=0&size=20"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestTransport::new(&ClientSettings::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
