//! Listing repository for database operations
//!
//! Nested sub-documents are stored as JSONB; engagement counters are
//! plain integer columns. Counter bumps are single atomic UPDATE
//! statements, never read-modify-write in application code, so
//! concurrent likes cannot lose updates.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Listing, ManagementType, NewListing};

const LISTING_COLUMNS: &str = "id, host, title, description, price, featured, image_url, \
                               category, contact, management_type, rent_deadline, location, \
                               amenities, accessibility, policies, cleaning_fee, deposit, \
                               extra_person_fee, capacity, likes, impressions, availability, \
                               created_at, updated_at";

fn listing_from_row(row: &PgRow) -> Result<Listing> {
    let management_type: String = row.get("management_type");
    let management_type = ManagementType::parse(&management_type)
        .ok_or_else(|| anyhow::anyhow!("Unknown management type: {}", management_type))?;

    Ok(Listing {
        id: row.get("id"),
        host: row.get("host"),
        title: row.get("title"),
        description: row.get("description"),
        price: row.get("price"),
        featured: row.get("featured"),
        image_url: serde_json::from_value(row.get("image_url"))?,
        category: row.get("category"),
        contact: serde_json::from_value(row.get("contact"))?,
        management_type,
        rent_deadline: row.get("rent_deadline"),
        location: serde_json::from_value(row.get("location"))?,
        amenities: serde_json::from_value(row.get("amenities"))?,
        accessibility: serde_json::from_value(row.get("accessibility"))?,
        policies: serde_json::from_value(row.get("policies"))?,
        cleaning_fee: row.get("cleaning_fee"),
        deposit: row.get("deposit"),
        extra_person_fee: row.get("extra_person_fee"),
        capacity: serde_json::from_value(row.get("capacity"))?,
        likes: row.get("likes"),
        impressions: row.get("impressions"),
        availability: row.get("availability"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Listing repository
#[derive(Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    /// Create a new listing repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new listing owned by `host`
    pub async fn create(&self, host: Uuid, new_listing: &NewListing) -> Result<Listing> {
        info!("Creating listing for host {}", host);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO listings (host, title, description, price, featured, image_url,
                                  category, contact, management_type, rent_deadline, location,
                                  amenities, accessibility, policies, cleaning_fee, deposit,
                                  extra_person_fee, capacity, availability)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19)
            RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(host)
        .bind(&new_listing.title)
        .bind(&new_listing.description)
        .bind(&new_listing.price)
        .bind(new_listing.featured)
        .bind(serde_json::to_value(&new_listing.image_url)?)
        .bind(new_listing.category)
        .bind(serde_json::to_value(&new_listing.contact)?)
        .bind(new_listing.management_type.as_str())
        .bind(new_listing.rent_deadline)
        .bind(serde_json::to_value(&new_listing.location)?)
        .bind(serde_json::to_value(&new_listing.amenities)?)
        .bind(serde_json::to_value(&new_listing.accessibility)?)
        .bind(serde_json::to_value(&new_listing.policies)?)
        .bind(new_listing.cleaning_fee)
        .bind(new_listing.deposit)
        .bind(new_listing.extra_person_fee)
        .bind(serde_json::to_value(&new_listing.capacity)?)
        .bind(new_listing.availability)
        .fetch_one(&self.pool)
        .await?;

        listing_from_row(&row)
    }

    /// Find a listing by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>> {
        let row = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(listing_from_row).transpose()
    }

    /// All listings, newest first
    pub async fn get_all(&self) -> Result<Vec<Listing>> {
        let rows = sqlx::query(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(listing_from_row).collect()
    }

    /// Replace the mutable fields of a listing; counters and ownership
    /// stay untouched
    pub async fn update(&self, id: Uuid, listing: &NewListing) -> Result<Option<Listing>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE listings
            SET title = $2, description = $3, price = $4, featured = $5, image_url = $6,
                category = $7, contact = $8, management_type = $9, rent_deadline = $10,
                location = $11, amenities = $12, accessibility = $13, policies = $14,
                cleaning_fee = $15, deposit = $16, extra_person_fee = $17, capacity = $18,
                availability = $19, updated_at = NOW()
            WHERE id = $1
            RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.price)
        .bind(listing.featured)
        .bind(serde_json::to_value(&listing.image_url)?)
        .bind(listing.category)
        .bind(serde_json::to_value(&listing.contact)?)
        .bind(listing.management_type.as_str())
        .bind(listing.rent_deadline)
        .bind(serde_json::to_value(&listing.location)?)
        .bind(serde_json::to_value(&listing.amenities)?)
        .bind(serde_json::to_value(&listing.accessibility)?)
        .bind(serde_json::to_value(&listing.policies)?)
        .bind(listing.cleaning_fee)
        .bind(listing.deposit)
        .bind(listing.extra_person_fee)
        .bind(serde_json::to_value(&listing.capacity)?)
        .bind(listing.availability)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(listing_from_row).transpose()
    }

    /// Delete a listing by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump the like counter and return the updated record
    pub async fn increment_likes(&self, id: Uuid) -> Result<Option<Listing>> {
        let row = sqlx::query(&format!(
            "UPDATE listings SET likes = likes + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(listing_from_row).transpose()
    }

    /// Atomically bump the impression counter and return the updated record
    pub async fn increment_impressions(&self, id: Uuid) -> Result<Option<Listing>> {
        let row = sqlx::query(&format!(
            "UPDATE listings SET impressions = impressions + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(listing_from_row).transpose()
    }
}
