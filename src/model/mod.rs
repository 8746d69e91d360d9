mod card;
mod participant;
mod revelation;
mod suggestion;

pub use card::Card;
pub use participant::{Participant, ENVELOPE};
pub use revelation::Revelation;
pub use suggestion::Suggestion;
