use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use rand::{
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
    SeedableRng,
};

use crate::model::{Card, Participant, Revelation, Suggestion};

use super::Deck;

/// The game being played: who sits at the table, what they hold, and how
/// suggestions get answered. The solver never looks behind this interface; it
/// only sees the suggestions and revelations that come out of it.
pub trait Table {
    fn deck(&self) -> &Deck;

    fn envelope(&self) -> &Participant;

    /// Players in seating order. Does not include the envelope.
    fn players(&self) -> &[Participant];

    fn hand(&self, participant: &Participant) -> Option<&BTreeSet<Card>>;

    fn suggestions(&self) -> &[Suggestion];

    /// Puts `suggestion` to the table and returns the answers as seen by
    /// `observer`.
    fn make_suggestion(
        &mut self,
        suggestion: Suggestion,
        observer: &Participant,
    ) -> Vec<Revelation>;

    fn cards_by_category(&self) -> &BTreeMap<String, BTreeSet<Card>> {
        self.deck().cards_by_category()
    }
}

/// A table dealt from a seeded shuffle.
#[derive(Debug, Clone)]
pub struct DealtTable {
    deck: Deck,
    envelope: Participant,
    players: Vec<Participant>,
    hands: BTreeMap<Participant, BTreeSet<Card>>,
    suggestions: Vec<Suggestion>,
}

impl DealtTable {
    /// Puts one random card of every category in the envelope and deals the
    /// rest round-robin, starting with the first player.
    pub fn deal(players: Vec<Participant>, deck: Deck, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let envelope = Participant::envelope();

        let mut hands: BTreeMap<Participant, BTreeSet<Card>> = players
            .iter()
            .chain(std::iter::once(&envelope))
            .map(|participant| (participant.clone(), BTreeSet::new()))
            .collect();

        let mut remaining = Vec::new();
        for cards in deck.cards_by_category().values() {
            let cards: Vec<&Card> = cards.iter().collect();
            let Some(solution) = cards.choose(&mut rng).copied() else {
                continue;
            };
            hands.entry(envelope.clone()).or_default().insert(solution.clone());
            remaining.extend(cards.into_iter().filter(|card| *card != solution).cloned());
        }

        remaining.shuffle(&mut rng);
        if !players.is_empty() {
            for (i, card) in remaining.into_iter().enumerate() {
                let player = &players[i % players.len()];
                hands.entry(player.clone()).or_default().insert(card);
            }
        }

        debug!(target: "table", "Dealt {} players with seed {}", players.len(), seed);
        trace!(target: "table", "Hands: {:?}", hands);
        Self {
            deck,
            envelope,
            players,
            hands,
            suggestions: Vec::new(),
        }
    }

    /// Players after `suggester`, in seating order, wrapping around.
    fn answer_order(&self, suggester: &Participant) -> Vec<&Participant> {
        let start = self
            .players
            .iter()
            .position(|player| player == suggester)
            .map_or(0, |i| i + 1);
        self.players
            .iter()
            .cycle()
            .skip(start)
            .take(self.players.len())
            .filter(|player| *player != suggester)
            .collect()
    }
}

impl Table for DealtTable {
    fn deck(&self) -> &Deck {
        &self.deck
    }

    fn envelope(&self) -> &Participant {
        &self.envelope
    }

    fn players(&self) -> &[Participant] {
        &self.players
    }

    fn hand(&self, participant: &Participant) -> Option<&BTreeSet<Card>> {
        self.hands.get(participant)
    }

    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Every player holding a suggested card answers with one of them. The card
    /// is only visible when `observer` made the suggestion.
    fn make_suggestion(
        &mut self,
        suggestion: Suggestion,
        observer: &Participant,
    ) -> Vec<Revelation> {
        let revelations: Vec<Revelation> = self
            .answer_order(&suggestion.suggester)
            .into_iter()
            .filter_map(|player| {
                let shown = self
                    .hands
                    .get(player)?
                    .intersection(&suggestion.cards)
                    .next()?;
                let card = (observer == &suggestion.suggester).then(|| shown.clone());
                Some(Revelation::new(player.clone(), card))
            })
            .collect();

        trace!(target: "table", "{} -> {:?}", suggestion, revelations);
        self.suggestions.push(suggestion);
        revelations
    }
}
