use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TallyError;

/// Identifier minted once per rule at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RuleId {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(RuleId)
            .map_err(|e| TallyError::InvalidId(format!("'{s}': {e}")))
    }
}

/// Source of fresh rule identifiers.
///
/// Implementations must never hand out the same id twice over their lifetime.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> RuleId;
}

/// Random v4 UUIDs. Holds no state, so every instance is interchangeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> RuleId {
        RuleId::from_uuid(Uuid::new_v4())
    }
}

/// Monotonic counter ids (`00000000-...-0001`, `...-0002`, ...).
///
/// Unique per instance only; share one instance when determinism matters.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start` (the first id handed out is `start + 1`).
    pub fn starting_after(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> RuleId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        RuleId::from_uuid(Uuid::from_u128(u128::from(n)))
    }
}
