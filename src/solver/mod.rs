mod clue_solver;
mod constraint;
mod error;
mod report;

pub use clue_solver::{CardConstraint, ClueSolver, ParticipantConstraint};
pub use constraint::Constraint;
pub use error::SolverError;
pub use report::SolverReport;
