use std::env;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use url::Url;

use crate::chat::ClientConfig;
use crate::error::{Error, Result};
use crate::observability::{
    CHAT_REQUESTS, LOGIN_REQUESTS, REQUEST_DURATION, REQUEST_ERRORS, TRANSPORT_ERRORS,
};
use crate::types::{
    ChatRequest, ChatResponse, Credentials, LoginRequest, LoginResponse, SessionToken,
};

/// Environment variable consulted when no base URL is configured.
pub const BASE_URL_ENV: &str = "CHATPANE_BASE_URL";

/// The two calls the chat client makes against its backend.
///
/// [`HttpBackend`] is the real implementation. The controller only ever
/// talks to this trait, so tests substitute scripted backends.
#[async_trait::async_trait(?Send)]
pub trait ChatBackend {
    /// Exchange credentials for a login response.
    ///
    /// A decoded 2xx body is returned as-is, success or not. A non-2xx status
    /// comes back as [`Error::Authentication`] or [`Error::Api`].
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse>;

    /// Send `message` with `token` as the bearer credential.
    async fn chat(&self, token: &SessionToken, message: &str) -> Result<ChatResponse>;
}

/// HTTP backend speaking JSON to the login and chat endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: ReqwestClient,
    base_url: Url,
    login_url: Url,
    chat_url: Url,
    timeout: Option<Duration>,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url` using the default endpoint paths.
    ///
    /// When `base_url` is `None` the CHATPANE_BASE_URL environment variable
    /// is consulted before falling back to the built-in default.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let mut config = ClientConfig::new();
        if let Some(base_url) = base_url.or_else(|| env::var(BASE_URL_ENV).ok()) {
            config = config.with_base_url(base_url);
        }
        Self::from_config(&config)
    }

    /// Create a backend from a resolved configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&normalize_base(&config.base_url))?;
        let login_url = base_url.join(config.login_path.trim_start_matches('/'))?;
        let chat_url = base_url.join(config.chat_path.trim_start_matches('/'))?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            login_url,
            chat_url,
            timeout: config.timeout,
        })
    }

    /// The URL every endpoint path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resolved login endpoint.
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// The resolved chat endpoint.
    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn timeout_secs(&self) -> Option<f64> {
        self.timeout.map(|t| t.as_secs_f64())
    }

    /// Convert a non-success response into an error.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // The chat endpoint explains rejections through the same `reply`
        // field it uses for answers.
        #[derive(Deserialize)]
        struct ErrorBody {
            reply: Option<String>,
            status: Option<String>,
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.reply.or(parsed.status))
            .unwrap_or(body);

        match status_code {
            401 | 403 => Error::authentication(message),
            408 => Error::timeout(message, None),
            _ => Error::api(status_code, message),
        }
    }

    async fn post<B: serde::Serialize>(
        &self,
        url: &Url,
        headers: HeaderMap,
        body: &B,
    ) -> Result<Response> {
        let start = Instant::now();
        let result = self
            .client
            .post(url.clone())
            .headers(headers)
            .json(body)
            .send()
            .await;
        REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let response = result.map_err(|e| {
            TRANSPORT_ERRORS.click();
            Error::from_transport(e, self.timeout_secs())
        })?;
        if !response.status().is_success() {
            REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait(?Send)]
impl ChatBackend for HttpBackend {
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse> {
        LOGIN_REQUESTS.click();
        tracing::debug!(
            url = %self.login_url,
            username = %credentials.username,
            "login request"
        );

        let request = LoginRequest::from(credentials);
        let response = self
            .post(&self.login_url, self.default_headers(), &request)
            .await?;
        response.json::<LoginResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse login response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn chat(&self, token: &SessionToken, message: &str) -> Result<ChatResponse> {
        CHAT_REQUESTS.click();
        tracing::debug!(url = %self.chat_url, len = message.len(), "chat request");

        let mut headers = self.default_headers();
        let authorization = HeaderValue::from_str(&token.bearer()).map_err(|_| {
            Error::validation(
                "session token is not a valid header value",
                Some("access_token".to_string()),
            )
        })?;
        headers.insert(header::AUTHORIZATION, authorization);

        let response = self
            .post(&self.chat_url, headers, &ChatRequest::new(message))
            .await?;
        response.json::<ChatResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse chat response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

/// Ensure the base URL ends with a slash so `Url::join` appends instead of
/// replacing the last path segment.
fn normalize_base(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}
