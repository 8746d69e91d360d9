use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use log::{debug, trace};

use crate::model::{Card, Participant, Revelation, Suggestion};

use super::{Constraint, SolverError};

pub type CardConstraint = Constraint<Card, Participant>;
pub type ParticipantConstraint = Constraint<Participant, Card>;

/// A constraint that has just become solved and whose consequences have not
/// been propagated yet.
#[derive(Debug, Clone)]
enum WorkItem {
    Card(Card),
    Participant {
        participant: Participant,
        index: usize,
    },
}

/// Deduces who may hold which card from suggestions and revelations.
///
/// Two views are kept over the same (participant, card) pairs:
/// - `card_constraints`: for every card, the participants that may still hold it
///   (exactly one of them does).
/// - `participant_constraints`: for every participant, a growing list of
///   "holds `required` of these cards" constraints. Constraints are never
///   removed, so an index into the list identifies a constraint for good.
///
/// Every elimination goes through `eliminate`, which updates both
/// views and queues any constraint it solves. Public operations drain the
/// worklist before returning, so each call leaves the solver at a fixpoint.
#[derive(Debug, Clone)]
pub struct ClueSolver {
    envelope: Participant,
    participants: BTreeSet<Participant>,
    cards_by_category: BTreeMap<String, BTreeSet<Card>>,
    card_constraints: BTreeMap<Card, CardConstraint>,
    participant_constraints: BTreeMap<Participant, Vec<ParticipantConstraint>>,
    worklist: Vec<WorkItem>,
}

impl ClueSolver {
    /// Sets up a solver for a fixed set of players and cards. The envelope is
    /// added to the participants if `players` does not already name it.
    pub fn new(
        players: impl IntoIterator<Item = Participant>,
        cards: impl IntoIterator<Item = Card>,
    ) -> Result<Self, SolverError> {
        let envelope = Participant::envelope();
        let mut participants: BTreeSet<Participant> = players.into_iter().collect();
        participants.insert(envelope.clone());

        let mut cards_by_category: BTreeMap<String, BTreeSet<Card>> = BTreeMap::new();
        let mut card_constraints = BTreeMap::new();
        for card in cards {
            cards_by_category
                .entry(card.category.clone())
                .or_default()
                .insert(card.clone());
            let constraint = Constraint::new(card.clone(), participants.iter().cloned(), 1)?;
            card_constraints.insert(card, constraint);
        }

        let participant_constraints = participants
            .iter()
            .map(|participant| (participant.clone(), Vec::new()))
            .collect();

        let mut solver = Self {
            envelope: envelope.clone(),
            participants,
            cards_by_category,
            card_constraints,
            participant_constraints,
            worklist: Vec::new(),
        };

        // the envelope holds exactly one card of each category
        let categories: Vec<BTreeSet<Card>> = solver.cards_by_category.values().cloned().collect();
        for cards in &categories {
            solver.add_participant_constraint(&envelope, cards, 1)?;
        }

        debug!(
            target: "clue_solver",
            "New solver: {} participants, {} cards in {} categories",
            solver.participants.len(),
            solver.card_constraints.len(),
            solver.cards_by_category.len()
        );
        Ok(solver)
    }

    pub fn envelope(&self) -> &Participant {
        &self.envelope
    }

    pub fn participants(&self) -> &BTreeSet<Participant> {
        &self.participants
    }

    pub fn cards_by_category(&self) -> &BTreeMap<String, BTreeSet<Card>> {
        &self.cards_by_category
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.card_constraints.keys()
    }

    pub fn potential_holders(&self, card: &Card) -> Result<&BTreeSet<Participant>, SolverError> {
        Ok(self.card_constraint(card)?.candidates())
    }

    pub fn participant_constraints(
        &self,
        participant: &Participant,
    ) -> Result<&[ParticipantConstraint], SolverError> {
        self.participant_constraints
            .get(participant)
            .map(Vec::as_slice)
            .ok_or_else(|| SolverError::UnknownParticipant(participant.clone()))
    }

    /// The certain holder of `card`, once every other participant is ruled out.
    pub fn holder(&self, card: &Card) -> Result<Option<&Participant>, SolverError> {
        let constraint = self.card_constraint(card)?;
        if constraint.is_solved() {
            Ok(constraint.candidates().iter().next())
        } else {
            Ok(None)
        }
    }

    /// Cards proven to be held by `participant`.
    pub fn known_cards(&self, participant: &Participant) -> Result<BTreeSet<Card>, SolverError> {
        self.check_participant(participant)?;
        Ok(self
            .card_constraints
            .iter()
            .filter(|(_, constraint)| constraint.is_solved() && constraint.contains(participant))
            .map(|(card, _)| card.clone())
            .collect())
    }

    /// For every category, the card proven to be in the envelope, if any.
    pub fn envelope_solution(&self) -> BTreeMap<String, Option<Card>> {
        self.cards_by_category
            .iter()
            .map(|(category, cards)| {
                let proven = cards.iter().find(|card| {
                    self.card_constraints
                        .get(*card)
                        .is_some_and(|c| c.is_solved() && c.contains(&self.envelope))
                });
                (category.clone(), proven.cloned())
            })
            .collect()
    }

    /// True once the envelope's card is proven in every category.
    pub fn is_solved(&self) -> bool {
        self.envelope_solution().values().all(Option::is_some)
    }

    /// Rules out every participant in `participants` as a holder of every card
    /// in `cards`, then propagates. Pairs already ruled out are skipped.
    pub fn remove_possibility<'a>(
        &mut self,
        cards: impl IntoIterator<Item = &'a Card>,
        participants: impl IntoIterator<Item = &'a Participant>,
    ) -> Result<(), SolverError> {
        let cards = self.known(cards)?;
        let participants = participants
            .into_iter()
            .map(|p| self.check_participant(p).map(|_| p.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        self.eliminate_all(&cards, &participants);
        self.propagate();
        Ok(())
    }

    /// Records that `owner` holds exactly `required` of `cards`.
    ///
    /// Cards already ruled out for `owner` are dropped first. The constraint is
    /// kept even when that leaves it solved, in which case its consequences are
    /// propagated immediately.
    pub fn add_participant_constraint<'a>(
        &mut self,
        owner: &Participant,
        cards: impl IntoIterator<Item = &'a Card>,
        required: usize,
    ) -> Result<(), SolverError> {
        self.check_participant(owner)?;
        let candidates: Vec<Card> = self
            .known(cards)?
            .into_iter()
            .filter(|card| {
                self.card_constraints
                    .get(card)
                    .is_some_and(|c| c.contains(owner))
            })
            .collect();

        let constraint = Constraint::new(owner.clone(), candidates, required)?;
        trace!(target: "clue_solver", "Adding constraint: {}", constraint);
        let solved = constraint.is_solved();

        let constraints = self.participant_constraints.entry(owner.clone()).or_default();
        constraints.push(constraint);
        if solved {
            self.worklist.push(WorkItem::Participant {
                participant: owner.clone(),
                index: constraints.len() - 1,
            });
        }
        self.propagate();
        Ok(())
    }

    /// A revelation naming a card proves its holder. One without a card says
    /// nothing on its own; it only counts towards a suggestion's helpers.
    pub fn add_revelation(&mut self, revelation: &Revelation) -> Result<(), SolverError> {
        self.check_participant(&revelation.participant)?;
        let Some(card) = &revelation.card else {
            trace!(target: "clue_solver", "Nothing to learn from: {}", revelation);
            return Ok(());
        };
        self.check_card(card)?;
        debug!(target: "clue_solver", "Revelation: {}", revelation);

        let others = self.others(&revelation.participant);
        self.eliminate_all(std::slice::from_ref(card), &others);
        self.propagate();
        self.add_participant_constraint(&revelation.participant, [card], 1)
    }

    /// Applies what everyone at the table learns from a suggestion: who
    /// answered it (`revelations`) and, by omission, who could not.
    ///
    /// Cards named by the revelations are not applied here; pass those to
    /// [`ClueSolver::add_revelation`].
    pub fn add_suggestion_results(
        &mut self,
        suggestion: &Suggestion,
        revelations: &[Revelation],
    ) -> Result<(), SolverError> {
        self.check_participant(&suggestion.suggester)?;
        let cards = self.known(&suggestion.cards)?;
        let helpers: BTreeSet<Participant> = revelations
            .iter()
            .map(|revelation| revelation.participant.clone())
            .collect();
        for helper in &helpers {
            self.check_participant(helper)?;
        }
        debug!(
            target: "clue_solver",
            "{}; answered by [{}]",
            suggestion,
            helpers.iter().join(", ")
        );

        let mut non_helpers: BTreeSet<Participant> =
            self.participants.difference(&helpers).cloned().collect();

        // With fewer answers than cards, an unseen helper may hold several of
        // them, and the suggester may hold one without answering. Neither the
        // envelope nor the suggester can be ruled out.
        if helpers.len() < cards.len() {
            non_helpers.remove(&self.envelope);
            non_helpers.remove(&suggestion.suggester);
        }

        let non_helpers: Vec<Participant> = non_helpers.into_iter().collect();
        self.eliminate_all(&cards, &non_helpers);
        self.propagate();

        for helper in &helpers {
            self.add_participant_constraint(helper, &cards, 1)?;
        }
        Ok(())
    }

    /// Records the complete hand of `participant`: every card in it is proven,
    /// and every card outside it is ruled out for them.
    pub fn add_entire_hand<'a>(
        &mut self,
        participant: &Participant,
        cards: impl IntoIterator<Item = &'a Card>,
    ) -> Result<(), SolverError> {
        self.check_participant(participant)?;
        let hand: BTreeSet<Card> = self.known(cards)?.into_iter().collect();

        for card in &hand {
            self.add_revelation(&Revelation::shown(participant.clone(), card.clone()))?;
        }

        let other_cards: Vec<Card> = self
            .card_constraints
            .keys()
            .filter(|card| !hand.contains(*card))
            .cloned()
            .collect();
        self.eliminate_all(&other_cards, std::slice::from_ref(participant));
        self.propagate();
        Ok(())
    }

    fn eliminate_all(&mut self, cards: &[Card], participants: &[Participant]) {
        for (participant, card) in participants.iter().cartesian_product(cards) {
            self.eliminate(card, participant);
        }
    }

    /// Rules out `participant` holding `card` in both views.
    fn eliminate(&mut self, card: &Card, participant: &Participant) {
        if let Some(constraint) = self.card_constraints.get_mut(card) {
            if constraint.remove_candidate(participant) {
                self.worklist.push(WorkItem::Card(card.clone()));
            }
        }
        self.remove_from_participant_constraints(participant, card);
    }

    fn remove_from_participant_constraints(&mut self, participant: &Participant, card: &Card) {
        let Some(constraints) = self.participant_constraints.get_mut(participant) else {
            return;
        };
        for (index, constraint) in constraints.iter_mut().enumerate() {
            if constraint.remove_candidate(card) {
                self.worklist.push(WorkItem::Participant {
                    participant: participant.clone(),
                    index,
                });
            }
        }
    }

    fn propagate(&mut self) {
        while let Some(item) = self.worklist.pop() {
            trace!(target: "clue_solver", "Processing item: {:?}", item);
            match item {
                WorkItem::Card(card) => self.handle_solved_card(&card),
                WorkItem::Participant { participant, index } => {
                    self.handle_solved_participant(&participant, index)
                }
            }
        }
    }

    /// `card` has exactly one possible holder left.
    fn handle_solved_card(&mut self, card: &Card) {
        let Some(holder) = self
            .card_constraints
            .get(card)
            .and_then(|constraint| constraint.candidates().iter().next().cloned())
        else {
            return;
        };
        debug!(target: "clue_solver", "{} holds {}", holder, card);

        for other in self.others(&holder) {
            self.remove_from_participant_constraints(&other, card);
        }

        // one card per category in the envelope
        if holder.is_envelope() {
            let rest: Vec<Card> = self
                .cards_by_category
                .get(&card.category)
                .into_iter()
                .flatten()
                .filter(|other| *other != card)
                .cloned()
                .collect();
            let envelope = [self.envelope.clone()];
            self.eliminate_all(&rest, &envelope);
        }
    }

    /// Every remaining candidate of the constraint is held by `participant`.
    fn handle_solved_participant(&mut self, participant: &Participant, index: usize) {
        let Some(constraint) = self
            .participant_constraints
            .get(participant)
            .and_then(|constraints| constraints.get(index))
        else {
            return;
        };
        let cards: Vec<Card> = constraint.candidates().iter().cloned().collect();
        let others = self.others(participant);
        self.eliminate_all(&cards, &others);
    }

    fn others(&self, participant: &Participant) -> Vec<Participant> {
        self.participants
            .iter()
            .filter(|p| *p != participant)
            .cloned()
            .collect()
    }

    fn card_constraint(&self, card: &Card) -> Result<&CardConstraint, SolverError> {
        self.card_constraints
            .get(card)
            .ok_or_else(|| SolverError::UnknownCard(card.clone()))
    }

    fn check_card(&self, card: &Card) -> Result<(), SolverError> {
        self.card_constraint(card).map(|_| ())
    }

    fn check_participant(&self, participant: &Participant) -> Result<(), SolverError> {
        if self.participants.contains(participant) {
            Ok(())
        } else {
            Err(SolverError::UnknownParticipant(participant.clone()))
        }
    }

    /// Clones `cards` after checking each belongs to the game.
    fn known<'a>(
        &self,
        cards: impl IntoIterator<Item = &'a Card>,
    ) -> Result<Vec<Card>, SolverError> {
        cards
            .into_iter()
            .map(|card| self.check_card(card).map(|_| card.clone()))
            .collect()
    }
}
