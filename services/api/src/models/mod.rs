//! Data models for the API service

mod category;
mod comment;
mod listing;

pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use listing::{
    Accessibility, Amenities, Capacity, Contact, GeoPoint, Listing, Location, ManagementType,
    NewListing, Parking, Policies,
};
