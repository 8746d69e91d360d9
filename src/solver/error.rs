use thiserror::Error;

use crate::model::{Card, Participant};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("constraint for {owner} requires {required} of only {candidates} candidates")]
    InvalidConstraint {
        owner: String,
        required: usize,
        candidates: usize,
    },

    #[error("unknown card: {0:?}")]
    UnknownCard(Card),

    #[error("unknown participant: {0}")]
    UnknownParticipant(Participant),
}
