//! Listing submission flow
//!
//! The form owns the draft and the staged images. Submission is a
//! single gate: required fields are checked before any network
//! traffic, images are uploaded in staging order, and the create
//! request carries the hosted URLs. A failure anywhere leaves the
//! draft and staged images intact so the user can retry.

use tracing::{error, info};

use crate::api::{ApiClient, ListingRecord};
use crate::draft::ListingDraft;
use crate::error::ClientError;
use crate::upload::{MediaUploader, StagedImage};

/// The listing submission form: draft plus staged images
#[derive(Default)]
pub struct ListingForm {
    pub draft: ListingDraft,
    images: Vec<StagedImage>,
    in_flight: bool,
}

impl ListingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage newly picked images after the ones already staged
    pub fn stage_images(&mut self, images: Vec<StagedImage>) {
        self.images.extend(images);
    }

    /// Remove one staged image by its position
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn staged_images(&self) -> &[StagedImage] {
        &self.images
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Required fields still absent, including the image requirement
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.draft.missing_fields();
        if self.images.is_empty() {
            missing.push("imageUrl");
        }
        missing
    }

    /// Run the whole submission: validate, upload images in order,
    /// issue the create request. On success the form resets to empty.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        uploader: &MediaUploader,
    ) -> Result<ListingRecord, ClientError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing));
        }
        if self.in_flight {
            return Err(ClientError::RequestInFlight);
        }
        self.in_flight = true;
        let result = self.run_submit(api, uploader).await;
        self.in_flight = false;

        match &result {
            Ok(listing) => {
                info!(listing_id = %listing.id, "Listing created");
                self.draft = ListingDraft::default();
                self.images.clear();
            }
            Err(e) => error!(error = %e, "Listing submission failed"),
        }
        result
    }

    async fn run_submit(
        &self,
        api: &ApiClient,
        uploader: &MediaUploader,
    ) -> Result<ListingRecord, ClientError> {
        let mut image_urls = Vec::with_capacity(self.images.len());
        for image in &self.images {
            image_urls.push(uploader.upload(image).await?);
        }
        let payload = self.draft.to_payload(&image_urls)?;
        api.create_listing(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{DraftField, FieldValue};
    use crate::places::{PlaceInput, PlaceSelection};
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn staged(name: &str) -> StagedImage {
        StagedImage {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn filled_form() -> ListingForm {
        let mut form = ListingForm::new();
        let d = &mut form.draft;
        d.set_field(DraftField::Title, FieldValue::Text("2BR in Kilimani".into()));
        d.set_field(
            DraftField::Description,
            FieldValue::Text("Spacious two bedroom".into()),
        );
        d.set_field(DraftField::Price, FieldValue::Text("KES 45,000".into()));
        d.set_field(DraftField::Category, FieldValue::Text("Apartment".into()));
        d.set_field(
            DraftField::ManagementType,
            FieldValue::Text("Landlord".into()),
        );
        d.set_field(DraftField::RentDeadline, FieldValue::Text("5".into()));
        d.set_field(
            DraftField::LocationSubCounty,
            FieldValue::Text("Dagoretti North".into()),
        );
        d.set_field(
            DraftField::PolicyCancellation,
            FieldValue::Text("Flexible".into()),
        );
        d.set_field(
            DraftField::PolicyHouseRules,
            FieldValue::Text("No smoking".into()),
        );
        d.set_field(DraftField::CapacityGuests, FieldValue::Text("4".into()));
        d.set_field(DraftField::CapacityBedrooms, FieldValue::Text("2".into()));
        d.set_field(DraftField::CapacityBeds, FieldValue::Text("2".into()));
        d.set_field(DraftField::CapacityBaths, FieldValue::Text("1".into()));
        d.apply_place(
            PlaceInput::Landmark,
            PlaceSelection {
                description: "Yaya Centre".into(),
                geometry: Some((36.7879, -1.2927)),
            },
        );
        d.apply_place(
            PlaceInput::HouseLocation,
            PlaceSelection {
                description: "Rose Avenue".into(),
                geometry: Some((36.79, -1.29)),
            },
        );
        form.stage_images(vec![staged("front.jpg")]);
        form
    }

    fn listing_json(title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": Uuid::new_v4(),
            "host": Uuid::new_v4(),
            "title": title,
            "description": "Spacious two bedroom",
            "price": "KES 45,000",
            "imageUrl": ["https://res.cloudinary.com/demo/front.jpg"],
            "likes": 0,
            "impressions": 0
        })
    }

    #[tokio::test]
    async fn test_incomplete_draft_makes_no_network_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).with_token("test-token");
        let uploader =
            MediaUploader::with_endpoint(format!("{}/image/upload", server.uri()), "unsigned");
        let mut form = ListingForm::new();
        form.stage_images(vec![staged("front.jpg")]);

        let err = form.submit(&api, &uploader).await.unwrap_err();
        match err {
            ClientError::MissingFields(fields) => assert!(fields.contains(&"title")),
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_images_blocks_submission() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).with_token("test-token");
        let uploader =
            MediaUploader::with_endpoint(format!("{}/image/upload", server.uri()), "unsigned");
        let mut form = filled_form();
        form.remove_image(0);

        let err = form.submit(&api, &uploader).await.unwrap_err();
        match err {
            ClientError::MissingFields(fields) => assert_eq!(fields, vec!["imageUrl"]),
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_successful_submission_uploads_then_creates_and_resets() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/front.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/listings/create"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(serde_json::json!({
                "title": "2BR in Kilimani",
                "imageUrl": ["https://res.cloudinary.com/demo/front.jpg"],
                "location": { "city": "Nairobi", "country": "Kenya" }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(listing_json("2BR in Kilimani")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).with_token("test-token");
        let uploader =
            MediaUploader::with_endpoint(format!("{}/image/upload", server.uri()), "unsigned");
        let mut form = filled_form();

        let listing = form.submit(&api, &uploader).await.unwrap();
        assert_eq!(listing.title, "2BR in Kilimani");
        // The form resets for the next listing.
        assert!(form.draft.title.is_empty());
        assert!(form.staged_images().is_empty());
        assert!(!form.is_in_flight());
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_before_create() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image/upload"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/listings/create"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri()).with_token("test-token");
        let uploader =
            MediaUploader::with_endpoint(format!("{}/image/upload", server.uri()), "unsigned");
        let mut form = filled_form();

        let err = form.submit(&api, &uploader).await.unwrap_err();
        assert!(matches!(err, ClientError::Upload(_)));
        // Draft and images survive for a retry.
        assert_eq!(form.draft.title, "2BR in Kilimani");
        assert_eq!(form.staged_images().len(), 1);
        assert!(!form.is_in_flight());
    }

    #[tokio::test]
    async fn test_without_token_nothing_is_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/front.jpg"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/listings/create"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let uploader =
            MediaUploader::with_endpoint(format!("{}/image/upload", server.uri()), "unsigned");
        let mut form = filled_form();

        let err = form.submit(&api, &uploader).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[test]
    fn test_staging_preserves_order_and_removal_is_positional() {
        let mut form = ListingForm::new();
        form.stage_images(vec![staged("a.jpg"), staged("b.jpg")]);
        form.stage_images(vec![staged("c.jpg")]);
        form.remove_image(1);

        let names: Vec<&str> = form
            .staged_images()
            .iter()
            .map(|i| i.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.jpg"]);
    }
}
