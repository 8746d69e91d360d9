use std::fmt::{self, Display};

use itertools::Itertools;

use crate::game::settings::Settings;

use super::ClueSolver;

/// Plain-text rendering of what a [`ClueSolver`] currently knows.
pub struct SolverReport<'a> {
    solver: &'a ClueSolver,
    settings: &'a Settings,
}

impl<'a> SolverReport<'a> {
    pub fn new(solver: &'a ClueSolver, settings: &'a Settings) -> Self {
        Self { solver, settings }
    }

    fn write_cards(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BY CARD")?;
        writeln!(f, "{}", "-".repeat(20))?;
        for (category, cards) in self.solver.cards_by_category() {
            writeln!(f)?;
            writeln!(f, "{}", category.to_uppercase())?;
            for card in cards {
                let holders = self
                    .solver
                    .potential_holders(card)
                    .map_err(|_| fmt::Error)?;
                writeln!(
                    f,
                    "{:<width$}{}",
                    format!("{}:", card),
                    holders.iter().join(", "),
                    width = self.settings.column_width
                )?;
            }
        }
        Ok(())
    }

    fn write_participants(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BY PLAYER")?;
        writeln!(f, "{}", "-".repeat(20))?;
        for participant in self.solver.participants() {
            writeln!(f)?;
            writeln!(f, "{}", participant)?;
            let constraints = self
                .solver
                .participant_constraints(participant)
                .map_err(|_| fmt::Error)?;
            for constraint in constraints {
                if constraint.is_solved() && !self.settings.show_solved_constraints {
                    continue;
                }
                writeln!(
                    f,
                    "{:<10}{}",
                    format!("   {}:", constraint.required()),
                    constraint.candidates().iter().join(", ")
                )?;
            }
        }
        Ok(())
    }
}

impl Display for SolverReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_cards(f)?;
        if self.settings.show_participants {
            writeln!(f)?;
            self.write_participants(f)?;
        }

        let solution = self.solver.envelope_solution();
        writeln!(f)?;
        writeln!(f, "ENVELOPE")?;
        writeln!(f, "{}", "-".repeat(20))?;
        for (category, card) in solution {
            let card = card.map_or_else(|| "?".to_string(), |card| card.to_string());
            writeln!(
                f,
                "{:<width$}{}",
                format!("{}:", category),
                card,
                width = self.settings.column_width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Card, Participant, Revelation};

    use super::*;

    fn solver() -> ClueSolver {
        let mut solver = ClueSolver::new(
            ["mom", "dad"].map(Participant::from),
            ["room:Gazebo", "room:Studio", "weapon:Knife", "weapon:Rope"].map(Card::parse),
        )
        .unwrap();
        solver
            .add_revelation(&Revelation::shown("mom", Card::parse("room:Gazebo")))
            .unwrap();
        solver
    }

    #[test]
    fn test_report_lists_holders_and_solution() {
        let solver = solver();
        let settings = Settings::default();
        let report = SolverReport::new(&solver, &settings).to_string();

        let expected = "\
BY CARD
--------------------

ROOM
Gazebo:             mom
Studio:             *envelope*

WEAPON
Knife:              *envelope*, dad, mom
Rope:               *envelope*, dad, mom

BY PLAYER
--------------------

*envelope*
   1:     Studio
   1:     Knife, Rope

dad

mom
   1:     Gazebo

ENVELOPE
--------------------
room:               Studio
weapon:             ?
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_honors_settings() {
        let solver = solver();
        let mut settings = Settings::default();
        settings.column_width = 10;
        settings.show_participants = false;
        let report = SolverReport::new(&solver, &settings).to_string();

        assert!(!report.contains("BY PLAYER"));
        assert!(report.contains("Gazebo:   mom\n"));
        assert!(report.contains("weapon:   ?\n"));
    }

    #[test]
    fn test_report_can_hide_solved_constraints() {
        let solver = solver();
        let mut settings = Settings::default();
        settings.show_solved_constraints = false;
        let report = SolverReport::new(&solver, &settings).to_string();

        assert!(report.contains("mom\n\nENVELOPE"));
        assert!(report.contains("   1:     Knife, Rope\n"));
    }
}
