//! Generated signup credentials
//!
//! New accounts get an auto-generated username, referral code, and a
//! 6-digit OTP. Usernames are adjective + noun + number, which keeps them
//! readable while the uniqueness constraint on `users.username` catches
//! the rare collision.

use rand::Rng;

const ADJECTIVES: &[&str] = &["Adorable", "Brave", "Calm"];
const NOUNS: &[&str] = &["Panda", "Lion", "Eagle"];

/// Generate a random human-readable username
pub fn generate_username() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let number: u32 = rng.gen_range(0..1000);

    format!("{}{}{}", adjective, noun, number)
}

/// Generate a referral code: 8 random bytes, hex-encoded
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 8] = rng.r#gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Generate a 6-digit one-time password
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(100_000..1_000_000).to_string()
}
