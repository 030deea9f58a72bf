//! HTTP client over the marketplace API surface

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::ClientError;

/// A listing as seen by the client; unknown fields are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: Uuid,
    pub host: Uuid,
    pub title: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub featured: bool,
    pub image_url: Vec<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub impressions: i64,
}

/// A comment as seen by the client
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub listing: Uuid,
    pub text: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    pub date: DateTime<Utc>,
}

/// Payload for posting a comment
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub listing: Uuid,
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

/// Client over the marketplace HTTP API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Create a new API client from the `API_BASE_URL` environment
    /// variable (default: http://localhost:3001)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
        Self::new(base_url)
    }

    /// Attach a bearer token for authenticated calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the bearer token, e.g. after login
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let status = res.status();
        if !status.is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.or(body.message))
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(res.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
        authenticated: bool,
    ) -> Result<T, ClientError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if authenticated {
            let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
            request = request.bearer_auth(token);
        }
        Self::parse(request.send().await?).await
    }

    /// Issue the atomic create request; requires a bearer token
    pub async fn create_listing(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ListingRecord, ClientError> {
        self.post_json("/api/listings/create", payload, true).await
    }

    /// Like a listing, returning the authoritative updated record
    pub async fn like(&self, listing_id: Uuid) -> Result<ListingRecord, ClientError> {
        self.post_json(
            "/api/listings/like",
            &serde_json::json!({ "listingId": listing_id }),
            false,
        )
        .await
    }

    /// Record one impression, returning the authoritative updated record
    pub async fn record_impression(&self, listing_id: Uuid) -> Result<ListingRecord, ClientError> {
        self.post_json(
            "/api/listings/record-impression",
            &serde_json::json!({ "listingId": listing_id }),
            false,
        )
        .await
    }

    /// Fetch all comments for a listing
    pub async fn comments(&self, listing_id: Uuid) -> Result<Vec<Comment>, ClientError> {
        let res = self
            .http
            .get(self.url("/api/listings/comments"))
            .query(&[("listing", listing_id)])
            .send()
            .await?;
        Self::parse(res).await
    }

    /// Post a comment, returning the stored record
    pub async fn post_comment(&self, comment: &NewComment) -> Result<Comment, ClientError> {
        self.post_json("/api/listings/comments", comment, false)
            .await
    }

    /// Log in, returning the issued bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body: TokenBody = self
            .post_json(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
                false,
            )
            .await?;
        Ok(body.token)
    }
}
