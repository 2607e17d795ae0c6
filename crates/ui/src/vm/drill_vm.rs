use drill_core::model::{MistakeRecord, Outcome};
use services::DrillSession;

use super::time_fmt::format_clock;
use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillIntent {
    Input(String),
    Submit,
    Skip,
    Requeue(usize),
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MistakeStatus {
    Open,
    Repeating,
    Corrected,
}

impl MistakeStatus {
    fn of(record: &MistakeRecord) -> Self {
        if record.is_corrected() {
            Self::Corrected
        } else if record.is_repeat_in_progress() {
            Self::Repeating
        } else {
            Self::Open
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Tap to retry",
            Self::Repeating => "Retrying...",
            Self::Corrected => "Fixed",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "mistake mistake--open",
            Self::Repeating => "mistake mistake--repeating",
            Self::Corrected => "mistake mistake--corrected",
        }
    }
}

/// One row of the mistake list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MistakeRowVm {
    /// Ledger index, used to requeue the record.
    pub index: usize,
    pub key: u32,
    pub task_label: String,
    pub given_label: String,
    pub status: MistakeStatus,
}

pub struct DrillVm {
    session: DrillSession,
}

impl DrillVm {
    #[must_use]
    pub fn new(session: DrillSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &DrillSession {
        &self.session
    }

    /// Apply one intent from the view.
    ///
    /// Returns the scoring outcome for `Submit`, `None` for everything else.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::MistakeNotFound` when requeueing a missing row.
    pub fn apply(&mut self, intent: DrillIntent) -> Result<Option<Outcome>, ViewError> {
        match intent {
            DrillIntent::Input(text) => self.session.set_pending_input(text),
            DrillIntent::Submit => return Ok(Some(self.session.submit_pending())),
            DrillIntent::Skip => {
                self.session.request_new_problem();
            }
            DrillIntent::Requeue(index) => {
                self.session
                    .requeue_mistake(index)
                    .map_err(|_| ViewError::MistakeNotFound)?;
            }
            DrillIntent::Tick => {
                self.session.tick();
            }
        }
        Ok(None)
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("Problem {}", self.session.progress().problem_number)
    }

    #[must_use]
    pub fn problem_label(&self) -> String {
        format!("{} = ?", self.session.current_problem())
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        self.session.pending_input()
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_clock(self.session.elapsed_seconds())
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.session.correct_count()
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.session.wrong_count()
    }

    #[must_use]
    pub fn total_label(&self) -> String {
        format!("Total: {}", self.session.total_attempts())
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.session.progress().accuracy_percent()
    }

    #[must_use]
    pub fn accuracy_label(&self) -> String {
        format!("Accuracy: {}%", self.accuracy())
    }

    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.session.is_celebrating()
    }

    /// Mistake rows, most recent first.
    #[must_use]
    pub fn mistake_rows(&self) -> Vec<MistakeRowVm> {
        self.session
            .mistakes()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, record)| {
                let problem = record.problem();
                MistakeRowVm {
                    index,
                    key: record.id().value(),
                    task_label: format!("{problem} = {}", problem.expected()),
                    given_label: format!("Your answer: {}", record.given_answer()),
                    status: MistakeStatus::of(record),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::ScriptedRandom;
    use drill_core::model::{Operator, Problem};
    use drill_core::time::fixed_now;
    use services::{Clock, DrillSettings};

    fn vm_with(problems: &[Problem]) -> DrillVm {
        let settings = DrillSettings::default();
        let source = ScriptedRandom::replaying(settings.operators(), problems);
        DrillVm::new(DrillSession::start(
            settings,
            Clock::fixed(fixed_now()),
            Box::new(source),
        ))
    }

    #[test]
    fn labels_reflect_current_problem() {
        let vm = vm_with(&[Problem::new(7, 3, Operator::Subtract).unwrap()]);
        assert_eq!(vm.heading(), "Problem 1");
        assert_eq!(vm.problem_label(), "7 - 3 = ?");
        assert_eq!(vm.timer_label(), "00:00");
        assert_eq!(vm.accuracy_label(), "Accuracy: 0%");
    }

    #[test]
    fn submit_flows_through_pending_input() {
        let mut vm = vm_with(&[Problem::new(7, 3, Operator::Subtract).unwrap()]);
        vm.apply(DrillIntent::Input("5".into())).unwrap();
        let outcome = vm.apply(DrillIntent::Submit).unwrap();
        assert_eq!(outcome, Some(Outcome::Incorrect));
        assert_eq!(vm.wrong(), 1);
        assert_eq!(vm.heading(), "Problem 2");
        assert_eq!(vm.total_label(), "Total: 1");

        let rows = vm.mistake_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].task_label, "7 - 3 = 4");
        assert_eq!(rows[0].given_label, "Your answer: 5");
        assert_eq!(rows[0].status, MistakeStatus::Open);
    }

    #[test]
    fn rows_are_newest_first_and_track_status() {
        let mut vm = vm_with(&[
            Problem::new(7, 3, Operator::Subtract).unwrap(),
            Problem::new(2, 3, Operator::Multiply).unwrap(),
        ]);
        vm.apply(DrillIntent::Input("1".into())).unwrap();
        vm.apply(DrillIntent::Submit).unwrap();
        vm.apply(DrillIntent::Input("1".into())).unwrap();
        vm.apply(DrillIntent::Submit).unwrap();

        let rows = vm.mistake_rows();
        assert_eq!(rows[0].task_label, "2 × 3 = 6");
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].index, 0);

        vm.apply(DrillIntent::Requeue(0)).unwrap();
        assert_eq!(vm.mistake_rows()[1].status, MistakeStatus::Repeating);
        vm.apply(DrillIntent::Input("4".into())).unwrap();
        assert_eq!(vm.apply(DrillIntent::Submit).unwrap(), Some(Outcome::Correct));
        assert_eq!(vm.mistake_rows()[1].status, MistakeStatus::Corrected);
        assert!(vm.is_celebrating());
    }

    #[test]
    fn requeue_of_missing_row_is_a_view_error() {
        let mut vm = vm_with(&[Problem::new(1, 1, Operator::Add).unwrap()]);
        assert_eq!(
            vm.apply(DrillIntent::Requeue(3)),
            Err(ViewError::MistakeNotFound)
        );
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut vm = vm_with(&[Problem::new(1, 1, Operator::Add).unwrap()]);
        assert_eq!(vm.apply(DrillIntent::Submit).unwrap(), Some(Outcome::Ignored));
        assert_eq!(vm.heading(), "Problem 1");
    }
}
