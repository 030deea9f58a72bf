//! In-memory listing draft
//!
//! The draft mirrors the listing record minus the server-assigned fields
//! (`host`, counters). Form inputs mutate it through [`DraftField`], a
//! tagged-union field path dispatched through one `match`, instead of
//! untyped dotted-path traversal: every field knows whether it takes a
//! text value or a checkbox state, and a mismatched assignment leaves
//! the draft untouched.

use serde::Serialize;
use tracing::debug;

/// GeoJSON Point: `{"type": "Point", "coordinates": [lng, lat]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
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
}

/// Value carried by a form input: text inputs send their raw string,
/// checkboxes send their checked state
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

/// Typed path to a draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Price,
    Featured,
    Category,
    ContactPhone,
    ContactEmail,
    ManagementType,
    RentDeadline,
    LocationEstate,
    LocationLandmark,
    LocationSubCounty,
    LocationCity,
    LocationCountry,
    LocationHouseLocation,
    AmenityWifi,
    AmenityParking,
    AmenityPetsAllowed,
    AccessibilityWheelchair,
    AccessibilityElevator,
    PolicyCancellation,
    PolicyHouseRules,
    CleaningFee,
    Deposit,
    ExtraPersonFee,
    CapacityGuests,
    CapacityBedrooms,
    CapacityBeds,
    CapacityBaths,
    Availability,
}

/// Draft location; coordinates are filled in by place selection, never
/// typed by hand
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estate: Option<String>,
    pub landmark: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark_coordinates: Option<GeoPoint>,
    pub sub_county: String,
    pub city: String,
    pub country: String,
    pub house_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_coordinates: Option<GeoPoint>,
}

impl Default for DraftLocation {
    fn default() -> Self {
        DraftLocation {
            estate: None,
            landmark: String::new(),
            landmark_coordinates: None,
            sub_county: String::new(),
            city: "Nairobi".to_string(),
            country: "Kenya".to_string(),
            house_location: String::new(),
            house_coordinates: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAmenities {
    pub wifi: bool,
    pub parking: String,
    pub pets_allowed: bool,
}

impl Default for DraftAmenities {
    fn default() -> Self {
        DraftAmenities {
            wifi: false,
            parking: "Limited".to_string(),
            pets_allowed: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftAccessibility {
    pub wheelchair: bool,
    pub elevator: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPolicies {
    pub cancellation: String,
    pub house_rules: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftCapacity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
}

/// In-memory listing draft mirroring the listing record shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub featured: bool,
    pub category: String,
    pub contact: DraftContact,
    pub management_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_deadline: Option<u32>,
    pub location: DraftLocation,
    pub amenities: DraftAmenities,
    pub accessibility: DraftAccessibility,
    pub policies: DraftPolicies,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_person_fee: Option<f64>,
    pub capacity: DraftCapacity,
    pub availability: bool,
}

impl Default for ListingDraft {
    fn default() -> Self {
        ListingDraft {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            featured: false,
            category: String::new(),
            contact: DraftContact::default(),
            management_type: String::new(),
            rent_deadline: None,
            location: DraftLocation::default(),
            amenities: DraftAmenities::default(),
            accessibility: DraftAccessibility::default(),
            policies: DraftPolicies::default(),
            cleaning_fee: None,
            deposit: None,
            extra_person_fee: None,
            capacity: DraftCapacity::default(),
            availability: true,
        }
    }
}

fn set_text(target: &mut String, value: FieldValue) {
    match value {
        FieldValue::Text(text) => *target = text,
        FieldValue::Checked(_) => debug!("Checkbox value sent to a text field; ignored"),
    }
}

fn set_optional_text(target: &mut Option<String>, value: FieldValue) {
    match value {
        FieldValue::Text(text) if text.is_empty() => *target = None,
        FieldValue::Text(text) => *target = Some(text),
        FieldValue::Checked(_) => debug!("Checkbox value sent to a text field; ignored"),
    }
}

fn set_flag(target: &mut bool, value: FieldValue) {
    match value {
        FieldValue::Checked(checked) => *target = checked,
        FieldValue::Text(_) => debug!("Text value sent to a checkbox field; ignored"),
    }
}

fn set_count(target: &mut Option<u32>, value: FieldValue) {
    match value {
        FieldValue::Text(text) => match text.trim().parse() {
            Ok(n) => *target = Some(n),
            Err(_) => debug!("Unparseable number {:?}; field left unchanged", text),
        },
        FieldValue::Checked(_) => debug!("Checkbox value sent to a numeric field; ignored"),
    }
}

fn set_amount(target: &mut Option<f64>, value: FieldValue) {
    match value {
        FieldValue::Text(text) if text.trim().is_empty() => *target = None,
        FieldValue::Text(text) => match text.trim().parse() {
            Ok(n) => *target = Some(n),
            Err(_) => debug!("Unparseable amount {:?}; field left unchanged", text),
        },
        FieldValue::Checked(_) => debug!("Checkbox value sent to a numeric field; ignored"),
    }
}

impl ListingDraft {
    /// Update exactly one field, leaving all siblings untouched
    pub fn set_field(&mut self, field: DraftField, value: FieldValue) {
        match field {
            DraftField::Title => set_text(&mut self.title, value),
            DraftField::Description => set_text(&mut self.description, value),
            DraftField::Price => set_text(&mut self.price, value),
            DraftField::Featured => set_flag(&mut self.featured, value),
            DraftField::Category => set_text(&mut self.category, value),
            DraftField::ContactPhone => set_optional_text(&mut self.contact.phone, value),
            DraftField::ContactEmail => set_optional_text(&mut self.contact.email, value),
            DraftField::ManagementType => set_text(&mut self.management_type, value),
            DraftField::RentDeadline => set_count(&mut self.rent_deadline, value),
            DraftField::LocationEstate => set_optional_text(&mut self.location.estate, value),
            DraftField::LocationLandmark => set_text(&mut self.location.landmark, value),
            DraftField::LocationSubCounty => set_text(&mut self.location.sub_county, value),
            DraftField::LocationCity => set_text(&mut self.location.city, value),
            DraftField::LocationCountry => set_text(&mut self.location.country, value),
            DraftField::LocationHouseLocation => {
                set_text(&mut self.location.house_location, value)
            }
            DraftField::AmenityWifi => set_flag(&mut self.amenities.wifi, value),
            DraftField::AmenityParking => set_text(&mut self.amenities.parking, value),
            DraftField::AmenityPetsAllowed => set_flag(&mut self.amenities.pets_allowed, value),
            DraftField::AccessibilityWheelchair => {
                set_flag(&mut self.accessibility.wheelchair, value)
            }
            DraftField::AccessibilityElevator => {
                set_flag(&mut self.accessibility.elevator, value)
            }
            DraftField::PolicyCancellation => set_text(&mut self.policies.cancellation, value),
            DraftField::PolicyHouseRules => set_text(&mut self.policies.house_rules, value),
            DraftField::CleaningFee => set_amount(&mut self.cleaning_fee, value),
            DraftField::Deposit => set_amount(&mut self.deposit, value),
            DraftField::ExtraPersonFee => set_amount(&mut self.extra_person_fee, value),
            DraftField::CapacityGuests => set_count(&mut self.capacity.guests, value),
            DraftField::CapacityBedrooms => set_count(&mut self.capacity.bedrooms, value),
            DraftField::CapacityBeds => set_count(&mut self.capacity.beds, value),
            DraftField::CapacityBaths => set_count(&mut self.capacity.baths, value),
            DraftField::Availability => set_flag(&mut self.availability, value),
        }
    }

    /// Required fields still absent from the draft; staged images are
    /// checked by the owning form
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.category.is_empty() {
            missing.push("category");
        }
        if self.price.trim().is_empty() {
            missing.push("price");
        }
        if self.management_type.is_empty() {
            missing.push("managementType");
        }
        if self.rent_deadline.is_none() {
            missing.push("rentDeadline");
        }
        if self.location.landmark.trim().is_empty() || self.location.landmark_coordinates.is_none()
        {
            missing.push("location.landmark");
        }
        if self.location.sub_county.trim().is_empty() {
            missing.push("location.subCounty");
        }
        if self.location.house_location.trim().is_empty()
            || self.location.house_coordinates.is_none()
        {
            missing.push("location.houseLocation");
        }
        if self.policies.cancellation.trim().is_empty() {
            missing.push("policies.cancellation");
        }
        if self.policies.house_rules.trim().is_empty() {
            missing.push("policies.houseRules");
        }
        if self.capacity.guests.is_none() {
            missing.push("capacity.guests");
        }
        if self.capacity.bedrooms.is_none() {
            missing.push("capacity.bedrooms");
        }
        if self.capacity.beds.is_none() {
            missing.push("capacity.beds");
        }
        if self.capacity.baths.is_none() {
            missing.push("capacity.baths");
        }
        missing
    }

    /// Build the create-request body, with `imageUrl` replaced by the
    /// uploaded URL list
    pub fn to_payload(&self, image_urls: &[String]) -> Result<serde_json::Value, serde_json::Error> {
        let mut payload = serde_json::to_value(self)?;
        payload["imageUrl"] = serde_json::json!(image_urls);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_set_leaves_siblings_untouched() {
        let mut draft = ListingDraft::default();
        draft.set_field(
            DraftField::LocationEstate,
            FieldValue::Text("Kilimani".to_string()),
        );
        draft.set_field(
            DraftField::LocationSubCounty,
            FieldValue::Text("Dagoretti North".to_string()),
        );

        assert_eq!(draft.location.estate.as_deref(), Some("Kilimani"));
        assert_eq!(draft.location.sub_county, "Dagoretti North");
        // Siblings keep their defaults.
        assert_eq!(draft.location.city, "Nairobi");
        assert_eq!(draft.location.country, "Kenya");
        assert!(draft.location.landmark.is_empty());
    }

    #[test]
    fn test_checkbox_fields_take_checked_state() {
        let mut draft = ListingDraft::default();
        draft.set_field(DraftField::AmenityWifi, FieldValue::Checked(true));
        draft.set_field(DraftField::Featured, FieldValue::Checked(true));
        draft.set_field(DraftField::Featured, FieldValue::Checked(false));

        assert!(draft.amenities.wifi);
        assert!(!draft.featured);
    }

    #[test]
    fn test_type_mismatch_leaves_draft_unchanged() {
        let mut draft = ListingDraft::default();
        draft.set_field(DraftField::Title, FieldValue::Checked(true));
        draft.set_field(DraftField::AmenityWifi, FieldValue::Text("yes".to_string()));
        draft.set_field(
            DraftField::CapacityGuests,
            FieldValue::Text("many".to_string()),
        );

        assert!(draft.title.is_empty());
        assert!(!draft.amenities.wifi);
        assert!(draft.capacity.guests.is_none());
    }

    #[test]
    fn test_numeric_fields_parse_from_text() {
        let mut draft = ListingDraft::default();
        draft.set_field(DraftField::RentDeadline, FieldValue::Text("5".to_string()));
        draft.set_field(DraftField::Deposit, FieldValue::Text("45000".to_string()));
        draft.set_field(DraftField::CapacityBaths, FieldValue::Text("1".to_string()));

        assert_eq!(draft.rent_deadline, Some(5));
        assert_eq!(draft.deposit, Some(45000.0));
        assert_eq!(draft.capacity.baths, Some(1));
    }

    #[test]
    fn test_payload_carries_uploaded_urls() {
        let draft = ListingDraft::default();
        let urls = vec!["https://cdn.example.com/a.jpg".to_string()];
        let payload = draft.to_payload(&urls).unwrap();

        assert_eq!(
            payload["imageUrl"],
            serde_json::json!(["https://cdn.example.com/a.jpg"])
        );
        assert_eq!(payload["location"]["city"], "Nairobi");
        // Server-assigned fields never appear in the payload.
        assert!(payload.get("host").is_none());
        assert!(payload.get("likes").is_none());
    }

    #[test]
    fn test_missing_fields_on_empty_draft() {
        let missing = ListingDraft::default().missing_fields();
        assert!(missing.contains(&"title"));
        assert!(missing.contains(&"managementType"));
        assert!(missing.contains(&"capacity.baths"));
    }
}
