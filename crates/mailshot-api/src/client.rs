//! Request construction against the backend origin

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::io::{HttpClient, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody};
use crate::session::Session;

/// Backend origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Scheme label placed before the token in the `Authorization` header
pub const AUTH_SCHEME: &str = "Token";

/// An opaque file returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// File name from `Content-Disposition`, when the server sent one
    pub suggested_name: Option<String>,
}

/// Entry point to the backend: base URL, session and transport
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
    http: Arc<dyn HttpClient>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, http: Arc<dyn HttpClient>) -> crate::Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Base URL must be http or https, got {:?}",
                base_url
            )));
        }

        tracing::debug!("Created ApiClient for {}", base_url);
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorization(&self) -> Option<String> {
        self.session
            .token()
            .map(|token| format!("{} {}", AUTH_SCHEME, token))
    }

    /// Dispatch a request and reject non-2xx answers
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> crate::Result<HttpResponse> {
        let url = self.url(path);
        let request = HttpRequest {
            method,
            url: url.clone(),
            authorization: self.authorization(),
            body,
        };

        let response = self.http.execute(request).await?;
        if !response.is_success() {
            tracing::warn!("{} {} returned status {}", method, url, response.status);
            return Err(ApiError::Status {
                method: method.to_string(),
                url,
                status: response.status,
                body: response.text(),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> crate::Result<T> {
        let response = self.send(method, path, body).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        self.send_json(Method::Get, path, RequestBody::Empty).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> crate::Result<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send_json(Method::Post, path, body).await
    }

    /// POST without a body, for action endpoints
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        self.send_json(Method::Post, path, RequestBody::Empty).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> crate::Result<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send_json(Method::Put, path, body).await
    }

    pub async fn delete(&self, path: &str) -> crate::Result<()> {
        self.send(Method::Delete, path, RequestBody::Empty).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> crate::Result<T> {
        self.send_json(Method::Post, path, RequestBody::Multipart(form))
            .await
    }

    /// GET a binary payload
    pub async fn download(&self, path: &str) -> crate::Result<Download> {
        let response = self.send(Method::Get, path, RequestBody::Empty).await?;
        let suggested_name = response
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition);
        Ok(Download {
            bytes: response.body,
            content_type: response.content_type,
            suggested_name,
        })
    }
}

/// Extract `filename` from a `Content-Disposition` header value
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, raw) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}
