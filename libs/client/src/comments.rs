//! Comment thread under a listing
//!
//! A thread moves through loading, empty, and loaded states. Posting
//! trims and rejects empty text before any network call, falls back to
//! the Guest identity, and appends the stored comment on success; on
//! failure the caller keeps the typed text for a retry.

use tracing::error;
use uuid::Uuid;

use crate::api::{ApiClient, Comment, NewComment};
use crate::error::ClientError;

/// What the thread view shows
#[derive(Debug, Clone)]
pub enum ThreadState {
    Loading,
    Empty,
    Loaded(Vec<Comment>),
}

/// The comment thread under one listing
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub listing_id: Uuid,
    pub state: ThreadState,
    posting: bool,
}

impl CommentThread {
    pub fn new(listing_id: Uuid) -> Self {
        CommentThread {
            listing_id,
            state: ThreadState::Loading,
            posting: false,
        }
    }

    /// Fetch the thread; an empty result is the explicit empty state,
    /// never a loading spinner
    pub async fn open(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.state = ThreadState::Loading;
        match api.comments(self.listing_id).await {
            Ok(comments) if comments.is_empty() => {
                self.state = ThreadState::Empty;
                Ok(())
            }
            Ok(comments) => {
                self.state = ThreadState::Loaded(comments);
                Ok(())
            }
            Err(e) => {
                self.state = ThreadState::Empty;
                error!(listing_id = %self.listing_id, error = %e, "Loading comments failed");
                Err(e)
            }
        }
    }

    /// Post a comment; `identity` is the signed-in username, if any
    pub async fn post(
        &mut self,
        api: &ApiClient,
        text: &str,
        identity: Option<&str>,
    ) -> Result<(), ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::EmptyComment);
        }
        if self.posting {
            return Err(ClientError::RequestInFlight);
        }
        self.posting = true;

        let comment = NewComment {
            listing: self.listing_id,
            text: text.to_string(),
            username: identity.unwrap_or("Guest").to_string(),
            avatar: None,
        };
        let result = api.post_comment(&comment).await;
        self.posting = false;

        match result {
            Ok(stored) => {
                match &mut self.state {
                    ThreadState::Loaded(comments) => comments.push(stored),
                    _ => self.state = ThreadState::Loaded(vec![stored]),
                }
                Ok(())
            }
            Err(e) => {
                error!(listing_id = %self.listing_id, error = %e, "Posting comment failed");
                Err(e)
            }
        }
    }
}
