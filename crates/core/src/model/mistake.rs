use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::MistakeId;
use crate::model::problem::Problem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no mistake at index {index} (ledger has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// How wrong answers are added to the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MistakePolicy {
    /// Skip the append while the same problem is being repeated.
    #[default]
    DedupeRepeats,
    /// Append every wrong answer.
    AppendAlways,
}

/// A wrongly answered problem and the answer that was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeRecord {
    id: MistakeId,
    problem: Problem,
    given_answer: String,
    repeat_in_progress: bool,
    corrected: bool,
}

impl MistakeRecord {
    #[must_use]
    pub fn id(&self) -> MistakeId {
        self.id
    }

    #[must_use]
    pub fn problem(&self) -> Problem {
        self.problem
    }

    #[must_use]
    pub fn given_answer(&self) -> &str {
        &self.given_answer
    }

    #[must_use]
    pub fn is_repeat_in_progress(&self) -> bool {
        self.repeat_in_progress
    }

    #[must_use]
    pub fn is_corrected(&self) -> bool {
        self.corrected
    }
}

/// Ordered record of missed problems.
///
/// Records are only ever appended; the repeat and corrected flags are the only
/// fields that change afterwards.
#[derive(Debug, Clone, Default)]
pub struct MistakeLedger {
    records: Vec<MistakeRecord>,
    policy: MistakePolicy,
}

impl MistakeLedger {
    #[must_use]
    pub fn new(policy: MistakePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> MistakePolicy {
        self.policy
    }

    #[must_use]
    pub fn records(&self) -> &[MistakeRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MistakeRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that have not been answered correctly on a repeat.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.records.iter().filter(|r| !r.corrected).count()
    }

    fn has_repeat_in_progress(&self, problem: &Problem) -> bool {
        self.records
            .iter()
            .any(|r| r.repeat_in_progress && r.problem == *problem)
    }

    /// Record a wrong answer for `problem`.
    ///
    /// Returns the id of the appended record, or `None` when the policy skipped it.
    pub fn record_miss(&mut self, problem: Problem, given_answer: &str) -> Option<MistakeId> {
        if self.policy == MistakePolicy::DedupeRepeats && self.has_repeat_in_progress(&problem) {
            return None;
        }

        let next = u32::try_from(self.records.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        let id = MistakeId::new(next);
        self.records.push(MistakeRecord {
            id,
            problem,
            given_answer: given_answer.to_string(),
            repeat_in_progress: false,
            corrected: false,
        });
        Some(id)
    }

    /// Mark the record at `index` as being repeated and return its problem.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::IndexOutOfRange` if no record exists at `index`.
    pub fn begin_repeat(&mut self, index: usize) -> Result<Problem, LedgerError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        record.repeat_in_progress = true;
        Ok(record.problem)
    }

    /// Close every repeat in progress for `problem`, marking it corrected.
    ///
    /// Returns the number of records that changed.
    pub fn resolve(&mut self, problem: &Problem) -> usize {
        let mut changed = 0;
        for record in &mut self.records {
            if record.repeat_in_progress && record.problem == *problem {
                record.repeat_in_progress = false;
                record.corrected = true;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Operator;

    fn sub(a: u32, b: u32) -> Problem {
        Problem::new(a, b, Operator::Subtract).unwrap()
    }

    #[test]
    fn misses_get_sequential_ids() {
        let mut ledger = MistakeLedger::default();
        assert_eq!(ledger.record_miss(sub(7, 3), "5"), Some(MistakeId::new(1)));
        assert_eq!(ledger.record_miss(sub(9, 1), "7"), Some(MistakeId::new(2)));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].given_answer(), "5");
    }

    #[test]
    fn repeat_in_progress_suppresses_duplicates() {
        let mut ledger = MistakeLedger::new(MistakePolicy::DedupeRepeats);
        ledger.record_miss(sub(7, 3), "5");
        assert_eq!(ledger.begin_repeat(0).unwrap(), sub(7, 3));

        assert_eq!(ledger.record_miss(sub(7, 3), "6"), None);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.records()[0].is_repeat_in_progress());
    }

    #[test]
    fn same_problem_without_repeat_is_appended_again() {
        let mut ledger = MistakeLedger::default();
        ledger.record_miss(sub(7, 3), "5");
        assert!(ledger.record_miss(sub(7, 3), "2").is_some());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn append_always_ignores_repeats() {
        let mut ledger = MistakeLedger::new(MistakePolicy::AppendAlways);
        ledger.record_miss(sub(7, 3), "5");
        ledger.begin_repeat(0).unwrap();
        assert!(ledger.record_miss(sub(7, 3), "6").is_some());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn resolve_marks_corrected_and_clears_repeat() {
        let mut ledger = MistakeLedger::default();
        ledger.record_miss(sub(7, 3), "5");
        ledger.record_miss(sub(8, 2), "1");
        ledger.begin_repeat(0).unwrap();

        assert_eq!(ledger.resolve(&sub(7, 3)), 1);
        let record = &ledger.records()[0];
        assert!(record.is_corrected());
        assert!(!record.is_repeat_in_progress());
        assert!(!ledger.records()[1].is_corrected());
        assert_eq!(ledger.open_count(), 1);
    }

    #[test]
    fn resolve_without_repeat_changes_nothing() {
        let mut ledger = MistakeLedger::default();
        ledger.record_miss(sub(7, 3), "5");
        assert_eq!(ledger.resolve(&sub(7, 3)), 0);
        assert!(!ledger.records()[0].is_corrected());
    }

    #[test]
    fn begin_repeat_out_of_range_errors() {
        let mut ledger = MistakeLedger::default();
        let err = ledger.begin_repeat(2).unwrap_err();
        assert_eq!(err, LedgerError::IndexOutOfRange { index: 2, len: 0 });
    }
}
