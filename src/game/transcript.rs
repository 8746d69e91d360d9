use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    model::{Card, Participant, Revelation, Suggestion},
    solver::{ClueSolver, SolverError},
};

use super::Deck;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("unknown deck preset: {0}")]
    UnknownDeck(String),

    #[error("malformed transcript: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("event {index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: SolverError,
    },

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Either the name of a preset deck or the cards themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckSource {
    Preset(String),
    Cards(Vec<Card>),
}

impl DeckSource {
    pub fn resolve(&self) -> Result<Deck, TranscriptError> {
        match self {
            DeckSource::Preset(name) => {
                Deck::preset(name).ok_or_else(|| TranscriptError::UnknownDeck(name.clone()))
            }
            DeckSource::Cards(cards) => Ok(Deck::new(cards.iter().cloned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub participant: Participant,
    pub cards: BTreeSet<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Suggestion {
        suggester: Participant,
        cards: BTreeSet<Card>,
        #[serde(default)]
        revelations: Vec<Revelation>,
    },
    Revelation(Revelation),
}

/// A game as one player observed it, in the order things happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub players: Vec<Participant>,
    pub deck: DeckSource,
    #[serde(default)]
    pub hand: Option<Hand>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Transcript {
    pub fn parse(input: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Builds a solver for the transcript's table and applies every event.
    pub fn replay(&self) -> Result<ClueSolver, TranscriptError> {
        let deck = self.deck.resolve()?;
        let mut solver = ClueSolver::new(self.players.iter().cloned(), deck.cards().cloned())?;

        if let Some(hand) = &self.hand {
            solver.add_entire_hand(&hand.participant, &hand.cards)?;
        }

        for (index, event) in self.events.iter().enumerate() {
            Self::apply(&mut solver, event)
                .map_err(|source| TranscriptError::Event { index, source })?;
        }
        debug!(
            target: "transcript",
            "Replayed {} events, solved: {}",
            self.events.len(),
            solver.is_solved()
        );
        Ok(solver)
    }

    fn apply(solver: &mut ClueSolver, event: &Event) -> Result<(), SolverError> {
        match event {
            Event::Suggestion {
                suggester,
                cards,
                revelations,
            } => {
                let suggestion = Suggestion::new(suggester.clone(), cards.iter().cloned());
                solver.add_suggestion_results(&suggestion, revelations)?;
                for revelation in revelations {
                    solver.add_revelation(revelation)?;
                }
                Ok(())
            }
            Event::Revelation(revelation) => solver.add_revelation(revelation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = r#"{
        "players": ["mom", "dad", "brynn"],
        "deck": [
            {"category": "room", "name": "Gazebo"},
            {"category": "room", "name": "Studio"},
            {"category": "weapon", "name": "Knife"},
            {"category": "weapon", "name": "Rope"}
        ],
        "hand": {
            "participant": "mom",
            "cards": [{"category": "room", "name": "Gazebo"}]
        },
        "events": [
            {"suggestion": {
                "suggester": "mom",
                "cards": [
                    {"category": "room", "name": "Studio"},
                    {"category": "weapon", "name": "Knife"}
                ]
            }},
            {"revelation": {
                "participant": "dad",
                "card": {"category": "weapon", "name": "Rope"}
            }}
        ]
    }"#;

    #[test]
    fn test_replay() {
        let transcript = Transcript::parse(TRANSCRIPT).unwrap();
        assert_eq!(transcript.events.len(), 2);

        let solver = transcript.replay().unwrap();
        assert!(solver.is_solved());
        let solution: Vec<Card> = solver.envelope_solution().into_values().flatten().collect();
        assert_eq!(
            solution,
            vec![Card::new("room", "Studio"), Card::new("weapon", "Knife")]
        );
    }

    #[test]
    fn test_preset_deck() {
        let transcript =
            Transcript::parse(r#"{"players": ["mom", "dad"], "deck": "master_detective"}"#)
                .unwrap();
        assert_eq!(transcript.deck, DeckSource::Preset("master_detective".to_string()));
        let solver = transcript.replay().unwrap();
        assert_eq!(solver.all_cards().count(), 30);
        assert_eq!(solver.participants().len(), 3);
    }

    #[test]
    fn test_unknown_preset() {
        let transcript =
            Transcript::parse(r#"{"players": ["mom"], "deck": "cluedo"}"#).unwrap();
        assert!(matches!(
            transcript.replay(),
            Err(TranscriptError::UnknownDeck(name)) if name == "cluedo"
        ));
    }

    #[test]
    fn test_bad_event_reports_its_index() {
        let mut transcript = Transcript::parse(TRANSCRIPT).unwrap();
        transcript.events.push(Event::Revelation(Revelation::shown(
            "autumn",
            Card::new("room", "Studio"),
        )));

        match transcript.replay() {
            Err(TranscriptError::Event { index, source }) => {
                assert_eq!(index, 2);
                assert_eq!(source, SolverError::UnknownParticipant("autumn".into()));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_demo_transcript() {
        let transcript =
            Transcript::parse(include_str!("../../demos/master_detective.json")).unwrap();
        let solver = transcript.replay().unwrap();

        // james and brynn answered the first suggestion but not the second
        let mustard = Card::new("suspect", "Col. Mustard");
        assert_eq!(solver.holder(&mustard).unwrap(), Some(&Participant::from("mom")));

        let candlestick = Card::new("weapon", "Candlestick");
        let holders: Vec<String> = solver
            .potential_holders(&candlestick)
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(holders, vec!["brynn", "james", "mom"]);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            Transcript::parse(r#"{"players": "mom"}"#),
            Err(TranscriptError::Parse(_))
        ));
    }
}
