//! End-to-end tests for the listings API
//!
//! These tests talk to a running API service over HTTP and verify stored
//! state directly against PostgreSQL, so they are ignored by default.
//!
//! Environment:
//! - `API_BASE_URL` (default: http://localhost:3001)
//! - `DATABASE_URL`
//! - `JWT_SECRET` (must match the running service)

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use sqlx::{PgPool, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

async fn pool() -> PgPool {
    let config = common::database::DatabaseConfig::from_env().unwrap();
    common::database::init_pool(&config).await.unwrap()
}

/// Insert a user row directly; the API service only checks existence.
async fn create_user(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, username, email, phone_number, password_hash, referral_code, unique_id)
         VALUES ($1, $2, $3, $4, 'x', 'x', $5)",
    )
    .bind(id)
    .bind(format!("user-{id}"))
    .bind(format!("{id}@example.com"))
    .bind(format!("2547{}", id.as_u128() % 100_000_000))
    .bind(Uuid::new_v4())
    .execute(pool)
    .await
    .unwrap();
    id
}

#[derive(Serialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: Uuid,
    iat: u64,
    exp: u64,
}

fn sign_token(user_id: Uuid) -> String {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET not set");
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    encode(
        &Header::default(),
        &Claims {
            user_id,
            iat: now,
            exp: now + 3600,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn listing_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "Bright apartment with balcony",
        "price": "45000",
        "imageUrl": ["https://cdn.example.com/a.jpg"],
        "category": Uuid::new_v4(),
        "managementType": "Landlord",
        "rentDeadline": 5,
        "location": {
            "landmark": "Yaya Centre",
            "landmarkCoordinates": {"type": "Point", "coordinates": [36.788, -1.2921]},
            "subCounty": "Dagoretti North",
            "houseLocation": "Argwings Kodhek Rd",
            "houseCoordinates": {"type": "Point", "coordinates": [36.7901, -1.2935]},
        },
        "policies": {"cancellation": "Flexible", "houseRules": "No smoking"},
        "capacity": {"guests": 4, "bedrooms": 2, "beds": 2, "baths": 1},
    })
}

async fn count_listings_titled(pool: &PgPool, title: &str) -> i64 {
    sqlx::query("SELECT COUNT(*) AS n FROM listings WHERE title = $1")
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
        .get("n")
}

#[tokio::test]
#[ignore = "requires a running API service and PostgreSQL"]
async fn test_create_without_token_is_rejected_and_nothing_persisted() {
    let pool = pool().await;
    let http = reqwest::Client::new();
    let title = format!("no-token-{}", Uuid::new_v4());

    let res = http
        .post(format!("{}/api/listings/create", base_url()))
        .json(&listing_body(&title))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "No token provided.");
    assert_eq!(count_listings_titled(&pool, &title).await, 0);
}

#[tokio::test]
#[ignore = "requires a running API service and PostgreSQL"]
async fn test_create_with_deleted_user_token_is_rejected() {
    let pool = pool().await;
    let http = reqwest::Client::new();

    let user_id = create_user(&pool).await;
    let token = sign_token(user_id);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let title = format!("deleted-user-{}", Uuid::new_v4());
    let res = http
        .post(format!("{}/api/listings/create", base_url()))
        .bearer_auth(&token)
        .json(&listing_body(&title))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(count_listings_titled(&pool, &title).await, 0);
}

#[tokio::test]
#[ignore = "requires a running API service and PostgreSQL"]
async fn test_create_sets_host_from_token_not_body() {
    let pool = pool().await;
    let http = reqwest::Client::new();

    let user_id = create_user(&pool).await;
    let token = sign_token(user_id);

    let title = format!("host-{}", Uuid::new_v4());
    let mut body = listing_body(&title);
    body["host"] = serde_json::json!(Uuid::new_v4());

    let res = http
        .post(format!("{}/api/listings/create", base_url()))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let listing: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listing["host"], serde_json::json!(user_id));
    assert_eq!(
        listing["imageUrl"],
        serde_json::json!(["https://cdn.example.com/a.jpg"])
    );
    assert_eq!(listing["likes"], 0);
    assert_eq!(listing["impressions"], 0);
}

#[tokio::test]
#[ignore = "requires a running API service and PostgreSQL"]
async fn test_concurrent_likes_are_atomic() {
    let pool = pool().await;
    let http = reqwest::Client::new();

    let user_id = create_user(&pool).await;
    let token = sign_token(user_id);

    let res = http
        .post(format!("{}/api/listings/create", base_url()))
        .bearer_auth(&token)
        .json(&listing_body(&format!("likes-{}", Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let listing: serde_json::Value = res.json().await.unwrap();
    let id: Uuid = serde_json::from_value(listing["id"].clone()).unwrap();
    let before = listing["likes"].as_i64().unwrap();

    const N: usize = 25;
    let mut handles = Vec::with_capacity(N);
    for _ in 0..N {
        let http = http.clone();
        handles.push(tokio::spawn(async move {
            http.post(format!("{}/api/listings/like", base_url()))
                .json(&serde_json::json!({"listingId": id}))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }

    let res = http
        .get(format!("{}/api/listings/{}", base_url(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["likes"].as_i64().unwrap(), before + N as i64);
}

#[tokio::test]
#[ignore = "requires a running API service and PostgreSQL"]
async fn test_comment_round_trip() {
    let pool = pool().await;
    let http = reqwest::Client::new();

    let user_id = create_user(&pool).await;
    let token = sign_token(user_id);

    let res = http
        .post(format!("{}/api/listings/create", base_url()))
        .bearer_auth(&token)
        .json(&listing_body(&format!("comments-{}", Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    let listing: serde_json::Value = res.json().await.unwrap();
    let id: Uuid = serde_json::from_value(listing["id"].clone()).unwrap();

    // Whitespace-only text is rejected.
    let res = http
        .post(format!("{}/api/listings/comments", base_url()))
        .json(&serde_json::json!({"listing": id, "text": "   ", "username": "Guest"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    // Surrounding whitespace is stripped before storage.
    let res = http
        .post(format!("{}/api/listings/comments", base_url()))
        .json(
            &serde_json::json!({"listing": id, "text": "  Still available?  ", "username": "Amina"}),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let stored: serde_json::Value = res.json().await.unwrap();
    assert_eq!(stored["text"], "Still available?");

    let res = http
        .get(format!("{}/api/listings/comments?listing={}", base_url(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let comments: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "Still available?");
    assert_eq!(comments[0]["username"], "Amina");
}
