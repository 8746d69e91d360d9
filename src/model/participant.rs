use serde::{Deserialize, Serialize};

pub const ENVELOPE: &str = "*envelope*";

/// Anyone who can hold cards: a player at the table, or the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn envelope() -> Self {
        Self(ENVELOPE.to_string())
    }

    pub fn is_envelope(&self) -> bool {
        self.0 == ENVELOPE
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
