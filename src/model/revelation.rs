use serde::{Deserialize, Serialize};

use super::{Card, Participant};

/// A participant showing a card in response to a suggestion.
///
/// `card` is only known to whoever the card was shown to; everyone else sees
/// that `participant` answered, but not with what.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Revelation {
    pub participant: Participant,
    #[serde(default)]
    pub card: Option<Card>,
}

impl Revelation {
    pub fn new(participant: impl Into<Participant>, card: Option<Card>) -> Self {
        Self {
            participant: participant.into(),
            card,
        }
    }

    pub fn shown(participant: impl Into<Participant>, card: Card) -> Self {
        Self::new(participant, Some(card))
    }

    pub fn hidden(participant: impl Into<Participant>) -> Self {
        Self::new(participant, None)
    }
}

impl std::fmt::Display for Revelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.card {
            Some(card) => write!(f, "{} showed {}", self.participant, card),
            None => write!(f, "{} showed a card", self.participant),
        }
    }
}
