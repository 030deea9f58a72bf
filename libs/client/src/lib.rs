//! Browser-side flows of the Nyumbani rental marketplace
//!
//! This crate models the client-side behavior of the marketplace UI:
//! the listing submission flow (draft, image staging, place selection,
//! media upload, atomic create request) and the optimistic interaction
//! layer (like/impression counters with rollback, comment threads).
//!
//! Every network call goes through [`api::ApiClient`]; media uploads go
//! through [`upload::MediaUploader`]. Neither holds mutable global
//! state, so flows can be tested against a mock server.

pub mod api;
pub mod comments;
pub mod draft;
pub mod engagement;
pub mod error;
pub mod places;
pub mod submit;
pub mod upload;

pub use api::ApiClient;
pub use comments::{CommentThread, ThreadState};
pub use draft::{DraftField, FieldValue, GeoPoint, ListingDraft};
pub use engagement::EngagementCounters;
pub use error::ClientError;
pub use places::{PlaceInput, PlaceSelection};
pub use submit::ListingForm;
pub use upload::{MediaUploader, StagedImage};
