//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Every simulation run ("world") gets a [`WorldId`] at startup. The run's
//! log file name is derived from it, and the analyze command resolves runs
//! by it. IDs use UUID v7 (time-ordered) so the log directory lists runs in
//! chronological order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one simulation run and its log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for WorldId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WorldId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<WorldId> for Uuid {
    fn from(id: WorldId) -> Self {
        id.0
    }
}

impl core::str::FromStr for WorldId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn id_display_matches_uuid() {
        let id = WorldId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = WorldId::new();
        let json = serde_json::to_string(&original).unwrap();
        let restored: WorldId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn id_parses_from_display_form() {
        let id = WorldId::new();
        let parsed: WorldId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn garbage_does_not_parse() {
        let parsed: Result<WorldId, _> = "not-a-world-id".parse();
        assert!(parsed.is_err());
    }
}
