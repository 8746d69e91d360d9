use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;
use log::{debug, trace, warn};

use super::SolverError;

/// `owner` holds exactly `required` of the items left in `candidates`.
///
/// Candidates only ever shrink. Once `candidates.len() == required` the
/// constraint is solved: every remaining candidate is certainly owned, and the
/// candidate set is frozen from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint<O, I> {
    owner: O,
    candidates: BTreeSet<I>,
    required: usize,
}

impl<O: Display, I: Ord + Display> Constraint<O, I> {
    pub fn new(
        owner: O,
        candidates: impl IntoIterator<Item = I>,
        required: usize,
    ) -> Result<Self, SolverError> {
        let candidates: BTreeSet<I> = candidates.into_iter().collect();
        if required > candidates.len() {
            warn!(
                target: "constraint",
                "{} cannot hold {} of [{}]",
                owner,
                required,
                candidates.iter().join(", ")
            );
            return Err(SolverError::InvalidConstraint {
                owner: owner.to_string(),
                required,
                candidates: candidates.len(),
            });
        }
        Ok(Self {
            owner,
            candidates,
            required,
        })
    }

    /// Removes `item` from the candidates.
    ///
    /// Returns `true` only for the removal that transitions the constraint to
    /// solved, so callers observe the transition exactly once. Removing an
    /// absent item, or removing anything from a solved constraint, is a no-op.
    pub fn remove_candidate(&mut self, item: &I) -> bool {
        if self.is_solved() || !self.candidates.remove(item) {
            return false;
        }
        trace!(target: "constraint", "{}: removed {}", self.owner, item);
        if self.is_solved() {
            debug!(target: "constraint", "Solved: {}", self);
            return true;
        }
        false
    }
}

impl<O, I: Ord> Constraint<O, I> {
    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn candidates(&self) -> &BTreeSet<I> {
        &self.candidates
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn contains(&self, item: &I) -> bool {
        self.candidates.contains(item)
    }

    pub fn is_solved(&self) -> bool {
        self.candidates.len() == self.required
    }
}

impl<O: Display, I: Display> Display for Constraint<O, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} holds {} of [{}]",
            self.owner,
            self.required,
            self.candidates.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(
        candidates: &[&'static str],
        required: usize,
    ) -> Constraint<&'static str, &'static str> {
        Constraint::new("mom", candidates.iter().copied(), required).unwrap()
    }

    #[test]
    fn test_rejects_required_above_candidates() {
        let result = Constraint::new("mom", ["rope"], 2);
        assert_eq!(
            result,
            Err(SolverError::InvalidConstraint {
                owner: "mom".to_string(),
                required: 2,
                candidates: 1,
            })
        );
    }

    #[test]
    fn test_solved_at_construction() {
        let c = constraint(&["rope"], 1);
        assert!(c.is_solved());

        let c = constraint(&[], 0);
        assert!(c.is_solved());
    }

    #[test]
    fn test_reports_solved_transition_once() {
        let mut c = constraint(&["rope", "knife", "wrench"], 1);
        assert!(!c.remove_candidate(&"rope"));
        assert!(!c.is_solved());
        assert!(c.remove_candidate(&"knife"));
        assert!(c.is_solved());

        // frozen once solved
        assert!(!c.remove_candidate(&"wrench"));
        assert_eq!(c.candidates().iter().copied().collect::<Vec<_>>(), vec!["wrench"]);
    }

    #[test]
    fn test_removing_absent_item_is_noop() {
        let mut c = constraint(&["rope", "knife"], 1);
        assert!(!c.remove_candidate(&"poison"));
        assert_eq!(c.candidates().len(), 2);
        assert!(!c.is_solved());
    }

    #[test]
    fn test_required_above_one() {
        let mut c = constraint(&["rope", "knife", "wrench", "poison"], 2);
        assert!(!c.remove_candidate(&"rope"));
        assert!(c.remove_candidate(&"poison"));
        assert!(!c.remove_candidate(&"knife"));
        assert_eq!(c.candidates().len(), c.required());
    }

    #[test]
    fn test_display() {
        let c = constraint(&["rope", "knife"], 1);
        assert_eq!(c.to_string(), "mom holds 1 of [knife, rope]");
    }
}
