//! Authenticated HTTP plumbing shared by the resource clients.

use crate::result::{ShopError, ShopResult};
use crate::testdata::TestData;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Credentials and client identity sent with every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// `Authorization` header value
    pub token: String,
    /// `user-agent` header value
    pub user_agent: String,
    /// `Content-Type` header value
    pub content_type: String,
}

impl AuthContext {
    /// Create a context from explicit values
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        user_agent: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            user_agent: user_agent.into(),
            content_type: content_type.into(),
        }
    }

    /// Read `token`, `user_agent` and `content_type` from test data
    pub fn from_test_data(data: &TestData) -> ShopResult<Self> {
        let required = |key: &str| {
            data.get(key).ok_or_else(|| ShopError::MissingDataKey {
                key: key.to_string(),
            })
        };
        Ok(Self::new(
            required("token")?,
            required("user_agent")?,
            required("content_type")?,
        ))
    }

    /// Full header set: Authorization, user-agent, Content-Type
    pub fn headers(&self) -> ShopResult<HeaderMap> {
        let mut headers = self.identity_headers()?;
        headers.insert(CONTENT_TYPE, header_value(&CONTENT_TYPE, &self.content_type)?);
        Ok(headers)
    }

    /// Authorization and user-agent only
    pub fn identity_headers(&self) -> ShopResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&AUTHORIZATION, &self.token)?);
        headers.insert(USER_AGENT, header_value(&USER_AGENT, &self.user_agent)?);
        Ok(headers)
    }
}

fn header_value(name: &HeaderName, value: &str) -> ShopResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ShopError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Status and body of a completed request.
///
/// The body is read eagerly so the response can be inspected any number of
/// times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    /// Create a response
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Numeric status code
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Raw body
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as `T`
    pub fn json<T: DeserializeOwned>(&self) -> ShopResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            let model = std::any::type_name::<T>().rsplit("::").next().unwrap_or("body");
            ShopError::parse(model, e.to_string())
        })
    }
}

/// HTTP client with a fixed default header set
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Client sending the full header set
    pub fn new(auth: &AuthContext, timeout: Duration) -> ShopResult<Self> {
        Self::with_headers(auth.headers()?, timeout)
    }

    /// Client sending a caller-chosen header set
    pub fn with_headers(headers: HeaderMap, timeout: Duration) -> ShopResult<Self> {
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// GET
    pub async fn get(&self, url: &str) -> ShopResult<ApiResponse> {
        self.send(Method::GET, url, |r| r).await
    }

    /// GET with query parameters
    pub async fn get_with_query<Q>(&self, url: &str, query: &Q) -> ShopResult<ApiResponse>
    where
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, url, |r| r.query(query)).await
    }

    /// DELETE
    pub async fn delete(&self, url: &str) -> ShopResult<ApiResponse> {
        self.send(Method::DELETE, url, |r| r).await
    }

    /// POST with a JSON body
    pub async fn post_json<B>(&self, url: &str, body: &B) -> ShopResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, |r| r.json(body)).await
    }

    /// PUT with a JSON body
    pub async fn put_json<B>(&self, url: &str, body: &B) -> ShopResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, url, |r| r.json(body)).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ShopResult<ApiResponse> {
        let response = build(self.http.request(method.clone(), url)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%method, url, status = status.as_u16(), bytes = body.len(), "api call");
        Ok(ApiResponse::new(status, body))
    }
}
