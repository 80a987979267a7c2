//! Authenticated HTTP session for the Lernzielplattform
//!
//! The session keeps cookies between requests, so a successful `login`
//! authenticates every later `get` and `post`. Requests are not retried:
//! any non-success status is returned to the caller as an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Url;
use scraper::Html;
use tracing::{debug, info};

use crate::error::{LernzielError, Result};

/// Base URL of the Lernzielplattform
pub const DEFAULT_BASE_URL: &str = "https://lernziele.charite.de/zend";

/// Path of the student login form
pub const LOGIN_PATH: &str = "/login/loginstudierende";

/// Text the login page shows when the credentials are rejected.
///
/// The site answers a failed login with a regular success status, so this
/// marker is the only signal. It will break silently if the wording changes.
pub const LOGIN_FAILURE_MARKER: &str = "Login fehlgeschlagen!";

/// Default User-Agent mimicking a desktop browser
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:69.0) Gecko/20100101 Firefox/69.0";

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const DEFAULT_ACCEPT_LANGUAGE: &str = "de-DE,de;q=0.8,en-US;q=0.5,en;q=0.3";

/// Configuration for the Lernzielplattform HTTP session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every path is appended to (default: [`DEFAULT_BASE_URL`])
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointing at a different base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP session with a persistent cookie store
///
/// One session serves one caller at a time; requests are issued strictly
/// one after another.
pub struct LernzielSession {
    /// Underlying HTTP client, holding the cookie jar
    client: reqwest::Client,
    base_url: String,
}

impl LernzielSession {
    /// Create a new session with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new session with custom configuration
    ///
    /// # Errors
    /// * `LernzielError::InvalidUrl` if `base_url` is not an absolute URL
    /// * `LernzielError::HttpError` if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| LernzielError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in with student credentials.
    ///
    /// Session cookies set by the response are reused by later requests.
    ///
    /// # Errors
    /// * `LernzielError::HttpError` - network error or non-success status
    /// * `LernzielError::AuthenticationFailed` - the response contains
    ///   [`LOGIN_FAILURE_MARKER`], whatever its status
    pub async fn login(&self, user: &str, password: &str) -> Result<()> {
        let url = self.url(LOGIN_PATH)?;
        debug!(%url, "Logging in");

        let form = [("user", user), ("pass", password), ("login", "Login")];
        let response = self
            .client
            .post(url.clone())
            .header(REFERER, url.as_str())
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        if body.contains(LOGIN_FAILURE_MARKER) {
            return Err(LernzielError::AuthenticationFailed(format!(
                "server rejected credentials for user '{}'",
                user
            )));
        }

        info!(user, "Logged in");
        Ok(())
    }

    /// Fetch `path` with query parameters and parse the response.
    ///
    /// # Errors
    /// * `LernzielError::HttpError` - network error or non-success status
    /// * `LernzielError::InvalidUrl` - `path` cannot be joined to the base URL
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Html> {
        let body = self.get_text(path, query).await?;
        Ok(Html::parse_document(&body))
    }

    /// Submit a form to `path` and parse the response.
    ///
    /// # Errors
    /// Same as [`LernzielSession::get`].
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Html> {
        let body = self.post_text(path, form).await?;
        Ok(Html::parse_document(&body))
    }

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path)?;
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_text(&self, path: &str, form: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path)?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Resolve a path relative to the base URL
    fn url(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') {
            return Err(LernzielError::InvalidUrl(format!(
                "path must start with '/': {}",
                path
            )));
        }

        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|e| LernzielError::InvalidUrl(format!("{}: {}", joined, e)))
    }
}
