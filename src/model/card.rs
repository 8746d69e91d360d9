use serde::{Deserialize, Serialize};

/// A single card: a category (room, suspect, weapon, ...) and the name printed on it.
///
/// Cards order by category first, then by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Card {
    pub category: String,
    pub name: String,
}

impl Card {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    #[cfg(test)]
    /// Parse a card from a string of the form "room:Library"
    pub fn parse(s: &str) -> Self {
        let (category, name) = s.split_once(':').unwrap();
        Self::new(category, name)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_category_then_name() {
        let mut cards = vec![
            Card::parse("weapon:Knife"),
            Card::parse("room:Studio"),
            Card::parse("room:Library"),
            Card::parse("suspect:Mr. Green"),
        ];
        cards.sort();

        assert_eq!(
            cards,
            vec![
                Card::parse("room:Library"),
                Card::parse("room:Studio"),
                Card::parse("suspect:Mr. Green"),
                Card::parse("weapon:Knife"),
            ]
        );
    }

    #[test]
    fn test_equality_needs_both_fields() {
        assert_eq!(Card::new("room", "Library"), Card::parse("room:Library"));
        assert_ne!(Card::new("room", "Rope"), Card::new("weapon", "Rope"));
    }

    #[test]
    fn test_display_is_name_only() {
        assert_eq!(Card::new("room", "Trophy Room").to_string(), "Trophy Room");
    }
}
