//! Listing record: the central entity of the marketplace
//!
//! The wire shape uses camelCase names. Nested sub-documents (location,
//! amenities, accessibility, policies, capacity, contact) are stored as
//! JSONB columns, so the serde shape here is also the stored shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GeoJSON Point: `{"type": "Point", "coordinates": [lng, lat]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub point_type: String,
    /// (longitude, latitude)
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GeoPoint {
            point_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn is_valid(&self) -> bool {
        let [lng, lat] = self.coordinates;
        self.point_type == "Point"
            && (-180.0..=180.0).contains(&lng)
            && (-90.0..=90.0).contains(&lat)
    }
}

/// Who manages the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagementType {
    Landlord,
    Agency,
}

impl ManagementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementType::Landlord => "Landlord",
            ManagementType::Agency => "Agency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Landlord" => Some(ManagementType::Landlord),
            "Agency" => Some(ManagementType::Agency),
            _ => None,
        }
    }
}

/// Parking availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parking {
    #[default]
    Limited,
    Medium,
    Enough,
}

/// Listing contact details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn default_city() -> String {
    "Nairobi".to_string()
}

fn default_country() -> String {
    "Kenya".to_string()
}

/// Listing location with derived geospatial points
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estate: Option<String>,
    pub landmark: String,
    pub landmark_coordinates: GeoPoint,
    pub sub_county: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub house_location: String,
    pub house_coordinates: GeoPoint,
}

/// Listing amenities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub parking: Parking,
    #[serde(default)]
    pub pets_allowed: bool,
}

/// Listing accessibility features
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Accessibility {
    #[serde(default)]
    pub wheelchair: bool,
    #[serde(default)]
    pub elevator: bool,
}

/// Listing policies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policies {
    pub cancellation: String,
    pub house_rules: String,
}

/// Listing capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capacity {
    pub guests: i32,
    pub bedrooms: i32,
    pub beds: i32,
    pub baths: i32,
}

fn default_availability() -> bool {
    true
}

/// A stored listing record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    /// Owning user; always set by the server from the authenticated caller
    pub host: Uuid,
    pub title: String,
    pub description: String,
    pub price: String,
    pub featured: bool,
    pub image_url: Vec<String>,
    pub category: Uuid,
    pub contact: Contact,
    pub management_type: ManagementType,
    pub rent_deadline: i32,
    pub location: Location,
    pub amenities: Amenities,
    pub accessibility: Accessibility,
    pub policies: Policies,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_person_fee: Option<f64>,
    pub capacity: Capacity,
    pub likes: i64,
    pub impressions: i64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied listing payload; `host` and counters are server-side
/// only, so any such fields in the request body are ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image_url: Vec<String>,
    pub category: Uuid,
    #[serde(default)]
    pub contact: Contact,
    pub management_type: ManagementType,
    pub rent_deadline: i32,
    pub location: Location,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub accessibility: Accessibility,
    pub policies: Policies,
    #[serde(default)]
    pub cleaning_fee: Option<f64>,
    #[serde(default)]
    pub deposit: Option<f64>,
    #[serde(default)]
    pub extra_person_fee: Option<f64>,
    pub capacity: Capacity,
    #[serde(default = "default_availability")]
    pub availability: bool,
}

impl NewListing {
    /// Validate the record invariants before persistence
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.price.trim().is_empty() {
            return Err("Price is required".to_string());
        }
        if self.image_url.is_empty() {
            return Err("At least one image is required".to_string());
        }
        if !(1..=15).contains(&self.rent_deadline) {
            return Err("Rent deadline must be between 1 and 15".to_string());
        }
        if self.location.landmark.trim().is_empty() {
            return Err("Landmark is required".to_string());
        }
        if self.location.sub_county.trim().is_empty() {
            return Err("Sub-county is required".to_string());
        }
        if self.location.house_location.trim().is_empty() {
            return Err("House location is required".to_string());
        }
        if !self.location.landmark_coordinates.is_valid() {
            return Err("Landmark coordinates are not a valid point".to_string());
        }
        if !self.location.house_coordinates.is_valid() {
            return Err("House coordinates are not a valid point".to_string());
        }
        if self.policies.cancellation.trim().is_empty() {
            return Err("Cancellation policy is required".to_string());
        }
        if self.policies.house_rules.trim().is_empty() {
            return Err("House rules are required".to_string());
        }
        let capacity = &self.capacity;
        for (value, name) in [
            (capacity.guests, "Guests"),
            (capacity.bedrooms, "Bedrooms"),
            (capacity.beds, "Beds"),
            (capacity.baths, "Baths"),
        ] {
            if value <= 0 {
                return Err(format!("{} must be a positive number", name));
            }
        }
        Ok(())
    }
}
