use std::collections::{BTreeMap, BTreeSet};

use crate::model::Card;

pub const CATEGORY_ROOM: &str = "room";
pub const CATEGORY_SUSPECT: &str = "suspect";
pub const CATEGORY_WEAPON: &str = "weapon";

const MASTER_DETECTIVE_ROOMS: [&str; 12] = [
    "Billiard Room",
    "Carriage House",
    "Conservatory",
    "Courtyard",
    "Dining Room",
    "Drawing Room",
    "Fountain",
    "Gazebo",
    "Kitchen",
    "Library",
    "Studio",
    "Trophy Room",
];

const MASTER_DETECTIVE_SUSPECTS: [&str; 10] = [
    "Col. Mustard",
    "M. Brunette",
    "Miss Peach",
    "Miss Scarlet",
    "Mme. Rose",
    "Mr. Green",
    "Mrs. Peacock",
    "Mrs. White",
    "Prof. Plum",
    "Sgt. Gray",
];

const MASTER_DETECTIVE_WEAPONS: [&str; 8] = [
    "Candlestick",
    "Horseshoe",
    "Knife",
    "Lead Pipe",
    "Poison",
    "Revolver",
    "Rope",
    "Wrench",
];

/// The full set of cards in play, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deck {
    cards_by_category: BTreeMap<String, BTreeSet<Card>>,
}

impl Deck {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards_by_category: BTreeMap<String, BTreeSet<Card>> = BTreeMap::new();
        for card in cards {
            cards_by_category
                .entry(card.category.clone())
                .or_default()
                .insert(card);
        }
        Self { cards_by_category }
    }

    /// Clue: Master Detective. 12 rooms, 10 suspects, 8 weapons.
    pub fn master_detective() -> Self {
        let rooms = MASTER_DETECTIVE_ROOMS
            .iter()
            .map(|name| Card::new(CATEGORY_ROOM, *name));
        let suspects = MASTER_DETECTIVE_SUSPECTS
            .iter()
            .map(|name| Card::new(CATEGORY_SUSPECT, *name));
        let weapons = MASTER_DETECTIVE_WEAPONS
            .iter()
            .map(|name| Card::new(CATEGORY_WEAPON, *name));
        Self::new(rooms.chain(suspects).chain(weapons))
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "master_detective" => Some(Self::master_detective()),
            _ => None,
        }
    }

    pub fn cards_by_category(&self) -> &BTreeMap<String, BTreeSet<Card>> {
        &self.cards_by_category
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_by_category.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.cards_by_category.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards_by_category
            .get(&card.category)
            .is_some_and(|cards| cards.contains(card))
    }
}
