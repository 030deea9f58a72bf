//! Place autocomplete selection
//!
//! Landmark and house-location inputs are backed by a place
//! autocomplete service. A confirmed suggestion carries a description
//! and, usually, point geometry; a selection without geometry is
//! ignored rather than producing a half-filled location.

use tracing::debug;

use crate::draft::{GeoPoint, ListingDraft};

/// Which of the two place-backed inputs a selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceInput {
    Landmark,
    HouseLocation,
}

/// A confirmed autocomplete suggestion
#[derive(Debug, Clone)]
pub struct PlaceSelection {
    pub description: String,
    /// (longitude, latitude), absent when the service returned no geometry
    pub geometry: Option<(f64, f64)>,
}

impl ListingDraft {
    /// Apply a confirmed place selection to the draft: sets the text
    /// and coordinates of the targeted input together, or neither
    pub fn apply_place(&mut self, input: PlaceInput, selection: PlaceSelection) {
        let Some((longitude, latitude)) = selection.geometry else {
            debug!(
                description = %selection.description,
                "Place selection without geometry; ignored"
            );
            return;
        };
        let point = GeoPoint::new(longitude, latitude);
        match input {
            PlaceInput::Landmark => {
                self.location.landmark = selection.description;
                self.location.landmark_coordinates = Some(point);
            }
            PlaceInput::HouseLocation => {
                self.location.house_location = selection.description;
                self.location.house_coordinates = Some(point);
            }
        }
    }
}
