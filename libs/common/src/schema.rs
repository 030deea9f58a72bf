//! Idempotent schema bootstrap for the marketplace database
//!
//! Every service runs `ensure_schema` at startup. All statements use
//! `IF NOT EXISTS` so concurrent or repeated startups are harmless.
//!
//! Both listing coordinate fields carry GiST point indexes so the store
//! can answer proximity queries against landmarks and house locations.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        phone_number TEXT UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'customer',
        referral_code TEXT NOT NULL,
        unique_id UUID NOT NULL UNIQUE,
        otp TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        image_url TEXT NOT NULL DEFAULT '',
        created_by UUID NOT NULL REFERENCES users (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS listings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        host UUID NOT NULL REFERENCES users (id),
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        price TEXT NOT NULL,
        featured BOOLEAN NOT NULL DEFAULT FALSE,
        image_url JSONB NOT NULL,
        category UUID NOT NULL,
        contact JSONB NOT NULL DEFAULT '{}',
        management_type TEXT NOT NULL,
        rent_deadline INTEGER NOT NULL CHECK (rent_deadline BETWEEN 1 AND 15),
        location JSONB NOT NULL,
        amenities JSONB NOT NULL,
        accessibility JSONB NOT NULL,
        policies JSONB NOT NULL,
        cleaning_fee DOUBLE PRECISION,
        deposit DOUBLE PRECISION,
        extra_person_fee DOUBLE PRECISION,
        capacity JSONB NOT NULL,
        likes BIGINT NOT NULL DEFAULT 0,
        impressions BIGINT NOT NULL DEFAULT 0,
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS listings_landmark_point_idx
    ON listings USING gist ((point(
        (location -> 'landmarkCoordinates' -> 'coordinates' ->> 0)::float8,
        (location -> 'landmarkCoordinates' -> 'coordinates' ->> 1)::float8
    )))
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS listings_house_point_idx
    ON listings USING gist ((point(
        (location -> 'houseCoordinates' -> 'coordinates' ->> 0)::float8,
        (location -> 'houseCoordinates' -> 'coordinates' ->> 1)::float8
    )))
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        listing UUID NOT NULL REFERENCES listings (id),
        text TEXT NOT NULL,
        username TEXT NOT NULL,
        avatar TEXT,
        likes BIGINT NOT NULL DEFAULT 0,
        dislikes BIGINT NOT NULL DEFAULT 0,
        date TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS comments_listing_idx ON comments (listing)
    "#,
];

/// Create the marketplace tables and indexes if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(DatabaseError::Schema)?;
    }

    info!("Database schema is up to date");
    Ok(())
}
