use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::ClientId;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Lucky", "Silent", "Golden", "Wild", "Noble",
    "Jolly", "Gentle", "Quick", "Wise", "Bold", "Proud", "Sunny", "Sly",
];

const NOUNS: &[&str] = &[
    "Falcon", "Bear", "Tiger", "Wolf", "Eagle", "Otter", "Lion", "Panther",
    "Hawk", "Fox", "Raven", "Badger", "Heron", "Phoenix", "Lynx", "Marten",
];

static NEXT_CONNECTION: AtomicU64 = AtomicU64::new(1);

/// Ephemeral id for a freshly accepted connection. The counter keeps ids unique
/// for the life of the process; the words only make logs easier to follow.
pub fn generate_connection_id() -> ClientId {
    let sequence = NEXT_CONNECTION.fetch_add(1, Ordering::Relaxed);
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    ClientId::new(format!("{}{}-{}", adjective, noun, sequence))
}
