//! The wrapped Reddit client: authentication plus the handful of delegate
//! calls the extension methods and filter demos need.

use crate::models::{ListingResponse, WikiRevision};
use log::debug;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use std::collections::HashMap;
use std::fmt;

// Define a custom error type for handling Reddit API errors
#[derive(Debug)]
pub enum RedditClientError {
    RequestError(ReqwestError),
    ApiError(String),
    ParseError(serde_json::Error),
    /// A wiki edit was rejected because the page moved past the revision
    /// the edit was based on. Carries the server's current content and
    /// revision id so the caller can retry against them.
    EditConflict {
        new_content: String,
        new_revision: String,
    },
}

impl fmt::Display for RedditClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RedditClientError::RequestError(err) => write!(f, "Request error: {}", err),
            RedditClientError::ApiError(msg) => write!(f, "Reddit API error: {}", msg),
            RedditClientError::ParseError(err) => write!(f, "Parse error: {}", err),
            RedditClientError::EditConflict { new_revision, .. } => write!(
                f,
                "Wiki edit conflict, page is now at revision {}",
                new_revision
            ),
        }
    }
}

impl std::error::Error for RedditClientError {}

impl From<ReqwestError> for RedditClientError {
    fn from(err: ReqwestError) -> Self {
        RedditClientError::RequestError(err)
    }
}

impl From<serde_json::Error> for RedditClientError {
    fn from(err: serde_json::Error) -> Self {
        RedditClientError::ParseError(err)
    }
}

/// The delegate calls the extension methods route to.
///
/// [`RedditClient`] is the real implementation; tests substitute a
/// recording mock.
#[allow(async_fn_in_trait)]
pub trait RedditApi {
    /// Send a private message. `to` is the already-resolved destination:
    /// a bare username, or a subreddit in `/r/name` form.
    async fn compose_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), RedditClientError>;

    /// Fetch the current revision of a wiki page.
    async fn wiki_page(
        &self,
        subreddit: &str,
        page: &str,
    ) -> Result<WikiRevision, RedditClientError>;

    /// Submit a wiki edit against a known previous revision. A stale
    /// `previous` surfaces as [`RedditClientError::EditConflict`].
    async fn edit_wiki_page(
        &self,
        subreddit: &str,
        page: &str,
        content: &str,
        reason: Option<&str>,
        previous: &str,
    ) -> Result<(), RedditClientError>;
}

pub struct RedditClient {
    client: Client,
    user_agent: String,
    access_token: Option<String>,
}

const DEFAULT_USER_AGENT: &str = "redditions/0.1 (extension utilities for the Reddit API)";

impl RedditClient {
    pub fn new() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT.to_string())
    }

    pub fn with_user_agent(user_agent: String) -> Self {
        Self {
            client: Self::get_client(&user_agent).unwrap(),
            user_agent,
            access_token: None,
        }
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        debug!(
            "Creating RedditClient with user_agent: {}",
            config.user_agent
        );
        Self::with_user_agent(config.user_agent.clone())
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn get_client(user_agent: &str) -> Result<Client, RedditClientError> {
        Ok(Client::builder().user_agent(user_agent).build()?)
    }

    fn bearer_token(&self) -> Result<&str, RedditClientError> {
        self.access_token.as_deref().ok_or_else(|| {
            RedditClientError::ApiError("No access token available. Authenticate first.".to_string())
        })
    }

    /// Get an application-only access token for reading public data.
    ///
    /// This token cannot be used for actions that require a user account
    /// like messaging or wiki edits.
    pub async fn get_access_token(&mut self, client_id: &str) -> Result<String, RedditClientError> {
        let params = [
            (
                "grant_type",
                "https://oauth.reddit.com/grants/installed_client",
            ),
            ("device_id", "DO_NOT_TRACK_THIS_DEVICE"),
        ];

        // No client secret: the authorization is the client_id followed by a colon.
        let auth = base64::encode(format!("{}:", client_id));

        let res = self
            .client
            .post("https://www.reddit.com/api/v1/access_token")
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        let json: serde_json::Value = res.json().await?;
        let token = json["access_token"]
            .as_str()
            .ok_or_else(|| {
                RedditClientError::ApiError(
                    "Failed to extract access token from response".to_string(),
                )
            })?
            .to_string();

        self.access_token = Some(token.clone());
        debug!("Application-only access token successfully obtained");

        Ok(token)
    }

    /// Authenticate using a script application's credentials (password grant).
    ///
    /// Works with any script-type Reddit app and grants the scopes needed
    /// for messaging and wiki edits.
    pub async fn authenticate_with_api_credentials(
        &mut self,
        client_id: &str,
        client_secret: &str,
        username: &str,
        password: &str,
    ) -> Result<String, RedditClientError> {
        let params = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
            ("scope", "identity read privatemessages wikiedit wikiread"),
        ];

        let auth = base64::encode(format!("{}:{}", client_id, client_secret));

        let res = self
            .client
            .post("https://www.reddit.com/api/v1/access_token")
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await?;
            return Err(RedditClientError::ApiError(format!(
                "Authentication failed: HTTP {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;

        if let Some(error) = json["error"].as_str() {
            return Err(RedditClientError::ApiError(format!(
                "Authentication failed: {}",
                error
            )));
        }

        let token = json["access_token"]
            .as_str()
            .ok_or_else(|| {
                RedditClientError::ApiError(
                    "Failed to extract access token from response".to_string(),
                )
            })?
            .to_string();

        self.access_token = Some(token.clone());
        debug!(
            "API authentication successful, token obtained with scopes: {:?}",
            json["scope"].as_str()
        );

        Ok(token)
    }

    /// Fetch the newest posts from a subreddit.
    pub async fn fetch_new_posts(
        &self,
        subreddit: &str,
        limit: i32,
    ) -> Result<ListingResponse, RedditClientError> {
        let subreddit = subreddit.strip_prefix("r/").unwrap_or(subreddit);
        let url = format!("{}/r/{}/new.json?limit={}", self.base_url(), subreddit, limit);
        self.fetch_listing(&url).await
    }

    /// Fetch the newest posts from the public frontpage.
    pub async fn fetch_public_new_posts(
        &self,
        limit: i32,
    ) -> Result<ListingResponse, RedditClientError> {
        let url = format!("{}/new.json?limit={}", self.base_url(), limit);
        self.fetch_listing(&url).await
    }

    fn base_url(&self) -> &'static str {
        // OAuth endpoint when authenticated, public endpoint otherwise
        if self.access_token.is_some() {
            "https://oauth.reddit.com"
        } else {
            "https://www.reddit.com"
        }
    }

    async fn fetch_listing(&self, url: &str) -> Result<ListingResponse, RedditClientError> {
        debug!("Fetching listing URL: {}", url);
        debug!("Using User-Agent: {}", self.user_agent);

        let mut req_builder = self.client.get(url);
        if let Some(token) = &self.access_token {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = req_builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(RedditClientError::ApiError(format!(
                "Server returned error status: {}",
                status
            )));
        }

        let body = response.text().await?;
        debug!("Response body length: {} bytes", body.len());

        match serde_json::from_str::<ListingResponse>(&body) {
            Ok(parsed) => {
                debug!("Successfully parsed {} posts", parsed.data.children.len());
                Ok(parsed)
            }
            Err(e) => {
                debug!("Error parsing listing: {}", e);
                debug!("First 100 chars: {}", &body[..body.len().min(100)]);
                Err(RedditClientError::ParseError(e))
            }
        }
    }

    fn check_json_errors(json: &serde_json::Value) -> Result<(), RedditClientError> {
        if let Some(errors) = json["json"]["errors"].as_array() {
            if !errors.is_empty() {
                return Err(RedditClientError::ApiError(format!(
                    "Reddit API returned an error: {:?}",
                    errors
                )));
            }
        }
        Ok(())
    }
}

impl Default for RedditClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RedditApi for RedditClient {
    async fn compose_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), RedditClientError> {
        let token = self.bearer_token()?;

        let mut params = HashMap::new();
        params.insert("api_type", "json");
        params.insert("to", to);
        params.insert("subject", subject);
        params.insert("text", body);

        let response = self
            .client
            .post("https://oauth.reddit.com/api/compose")
            .header("Authorization", format!("Bearer {}", token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(RedditClientError::ApiError(format!(
                "Failed to send message: HTTP {}: {}",
                status, text
            )));
        }

        let json: serde_json::Value = response.json().await?;
        debug!("Compose response: {:?}", json);
        Self::check_json_errors(&json)?;

        Ok(())
    }

    async fn wiki_page(
        &self,
        subreddit: &str,
        page: &str,
    ) -> Result<WikiRevision, RedditClientError> {
        let url = format!("{}/r/{}/wiki/{}.json", self.base_url(), subreddit, page);
        debug!("Fetching wiki page: {}", url);

        let mut req_builder = self.client.get(&url);
        if let Some(token) = &self.access_token {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = req_builder.send().await?;
        if !response.status().is_success() {
            return Err(RedditClientError::ApiError(format!(
                "Failed to fetch wiki page: HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await?;
        let content_md = json["data"]["content_md"]
            .as_str()
            .ok_or_else(|| {
                RedditClientError::ApiError(
                    "Wiki page response did not contain content_md".to_string(),
                )
            })?
            .to_string();
        let id = json["data"]["revision_id"]
            .as_str()
            .ok_or_else(|| {
                RedditClientError::ApiError(
                    "Wiki page response did not contain revision_id".to_string(),
                )
            })?
            .to_string();

        Ok(WikiRevision { id, content_md })
    }

    async fn edit_wiki_page(
        &self,
        subreddit: &str,
        page: &str,
        content: &str,
        reason: Option<&str>,
        previous: &str,
    ) -> Result<(), RedditClientError> {
        let token = self.bearer_token()?;

        let mut params = HashMap::new();
        params.insert("page", page);
        params.insert("content", content);
        params.insert("previous", previous);
        if let Some(reason) = reason {
            params.insert("reason", reason);
        }

        let url = format!("https://oauth.reddit.com/r/{}/api/wiki/edit", subreddit);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let json: serde_json::Value = response.json().await?;
            return Err(RedditClientError::EditConflict {
                new_content: json["newcontent"].as_str().unwrap_or_default().to_string(),
                new_revision: json["newrevision"].as_str().unwrap_or_default().to_string(),
            });
        }

        if !status.is_success() {
            let text = response.text().await?;
            return Err(RedditClientError::ApiError(format!(
                "Failed to edit wiki page: HTTP {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
