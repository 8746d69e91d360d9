use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, Participant};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Suggestion {
    pub suggester: Participant,
    pub cards: BTreeSet<Card>,
}

impl Suggestion {
    pub fn new(suggester: impl Into<Participant>, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            suggester: suggester.into(),
            cards: cards.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} suggested {}",
            self.suggester,
            self.cards.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_cards_collapse() {
        let suggestion = Suggestion::new(
            "dad",
            vec![
                Card::new("weapon", "Rope"),
                Card::new("room", "Gazebo"),
                Card::new("weapon", "Rope"),
            ],
        );
        assert_eq!(suggestion.cards.len(), 2);
        assert_eq!(suggestion.to_string(), "dad suggested Gazebo, Rope");
    }
}
