mod deck;
pub mod settings;
pub mod table;
pub mod transcript;

pub use deck::{Deck, CATEGORY_ROOM, CATEGORY_SUSPECT, CATEGORY_WEAPON};
pub use settings::Settings;
pub use table::{DealtTable, Table};
pub use transcript::{DeckSource, Event, Hand, Transcript, TranscriptError};
