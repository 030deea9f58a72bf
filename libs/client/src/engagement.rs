//! Optimistic like and impression counters
//!
//! Counters shown next to a listing update immediately on interaction,
//! then reconcile against the record the server sends back. A failed
//! request rolls the local counter back to its pre-interaction value.

use tracing::error;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientError;

/// Per-listing engagement counters as displayed in the UI
#[derive(Debug, Clone)]
pub struct EngagementCounters {
    pub listing_id: Uuid,
    pub likes: i64,
    pub impressions: i64,
    impression_recorded: bool,
}

impl EngagementCounters {
    pub fn new(listing_id: Uuid, likes: i64, impressions: i64) -> Self {
        EngagementCounters {
            listing_id,
            likes,
            impressions,
            impression_recorded: false,
        }
    }

    /// Like the listing: bump the local count immediately, then settle
    /// on the server's count or roll back
    pub async fn like(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.likes += 1;
        match api.like(self.listing_id).await {
            Ok(listing) => {
                self.likes = listing.likes;
                self.impressions = listing.impressions;
                Ok(())
            }
            Err(e) => {
                self.likes -= 1;
                error!(listing_id = %self.listing_id, error = %e, "Like failed; rolled back");
                Err(e)
            }
        }
    }

    /// Record one impression for this view; later calls on the same
    /// counters are no-ops
    pub async fn record_impression(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        if self.impression_recorded {
            return Ok(());
        }
        self.impression_recorded = true;
        self.impressions += 1;
        match api.record_impression(self.listing_id).await {
            Ok(listing) => {
                self.likes = listing.likes;
                self.impressions = listing.impressions;
                Ok(())
            }
            Err(e) => {
                self.impressions -= 1;
                self.impression_recorded = false;
                error!(
                    listing_id = %self.listing_id,
                    error = %e,
                    "Impression failed; rolled back"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_json(id: Uuid, likes: i64, impressions: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "host": Uuid::new_v4(),
            "title": "2BR in Kilimani",
            "description": "Spacious two bedroom",
            "price": "KES 45,000",
            "imageUrl": ["https://res.cloudinary.com/demo/front.jpg"],
            "likes": likes,
            "impressions": impressions
        })
    }

    #[tokio::test]
    async fn test_like_settles_on_server_count() {
        let listing_id = Uuid::new_v4();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/listings/like"))
            .and(body_json(serde_json::json!({ "listingId": listing_id })))
            .respond_with(
                // Someone else liked concurrently; the server count wins.
                ResponseTemplate::new(200).set_body_json(listing_json(listing_id, 7, 40)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let mut counters = EngagementCounters::new(listing_id, 5, 40);
        counters.like(&api).await.unwrap();
        assert_eq!(counters.likes, 7);
    }

    #[tokio::test]
    async fn test_failed_like_rolls_back() {
        let listing_id = Uuid::new_v4();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/listings/like"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "Listing not found" })),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let mut counters = EngagementCounters::new(listing_id, 5, 40);
        let err = counters.like(&api).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(counters.likes, 5);
    }

    #[tokio::test]
    async fn test_impression_fires_once_per_view() {
        let listing_id = Uuid::new_v4();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/listings/record-impression"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing_json(listing_id, 5, 41)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let mut counters = EngagementCounters::new(listing_id, 5, 40);
        counters.record_impression(&api).await.unwrap();
        counters.record_impression(&api).await.unwrap();
        assert_eq!(counters.impressions, 41);
    }

    #[tokio::test]
    async fn test_failed_impression_can_retry() {
        let listing_id = Uuid::new_v4();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/listings/record-impression"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let mut counters = EngagementCounters::new(listing_id, 5, 40);
        assert!(counters.record_impression(&api).await.is_err());
        assert_eq!(counters.impressions, 40);

        // The guard was reset, so the next view attempt goes out again.
        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/api/listings/record-impression"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing_json(listing_id, 5, 41)),
            )
            .expect(1)
            .mount(&server)
            .await;
        counters.record_impression(&api).await.unwrap();
        assert_eq!(counters.impressions, 41);
    }
}
