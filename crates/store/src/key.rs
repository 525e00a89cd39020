use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A token the store uses to recognize a retried write.
///
/// Generate a fresh key for every logically distinct write and reuse it only
/// when retrying that same write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    /// A random (version 4) key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a key previously rendered with `Display`.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for IdempotencyKey {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_random_uuid() {
        let key = IdempotencyKey::generate();
        assert_eq!(key.as_uuid().get_version(), Some(uuid::Version::Random));
        let text = key.to_string();
        let groups: Vec<usize> = text.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    }

    #[test]
    fn test_keys_are_fresh() {
        assert_ne!(IdempotencyKey::generate(), IdempotencyKey::generate());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let text = "550e8400-e29b-41d4-a716-446655440000";
        let key = IdempotencyKey::parse(text).unwrap();
        assert_eq!(key.to_string(), text);
        assert!(IdempotencyKey::parse("k-1").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let key = IdempotencyKey::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            serde_json::to_value(key).unwrap(),
            serde_json::json!("550e8400-e29b-41d4-a716-446655440000")
        );
    }
}
