use chrono::{DateTime, Duration, Utc};
use drill_core::model::{AnswerInput, MistakeLedger, MistakeRecord, Outcome, Problem, parse_answer};
use drill_core::time::whole_seconds_between;
use drill_core::{Clock, ProblemGenerator, RandomSource};
use tracing::{debug, info, trace};

use super::progress::DrillProgress;
use crate::error::DrillError;
use crate::settings::DrillSettings;

/// In-memory drill session.
///
/// Owns every piece of session state and advances through an endless loop of
/// awaiting an answer, scoring it and drawing the next problem. There is no
/// terminal state.
pub struct DrillSession {
    settings: DrillSettings,
    generator: ProblemGenerator,
    source: Box<dyn RandomSource>,
    clock: Clock,
    current: Problem,
    pending_input: String,
    correct: u32,
    total: u32,
    ledger: MistakeLedger,
    started_at: DateTime<Utc>,
    elapsed_secs: u64,
    last_correct_at: Option<DateTime<Utc>>,
}

impl DrillSession {
    /// Start a session and draw its first problem.
    ///
    /// The start time is read from `clock` once and never changes.
    #[must_use]
    pub fn start(settings: DrillSettings, clock: Clock, mut source: Box<dyn RandomSource>) -> Self {
        let generator = ProblemGenerator::new(settings.operators());
        let current = generator.generate(source.as_mut());
        let started_at = clock.now();
        info!(
            operators = ?settings.operators(),
            policy = ?settings.mistake_policy(),
            %started_at,
            "drill session started"
        );

        Self {
            settings,
            generator,
            source,
            clock,
            current,
            pending_input: String::new(),
            correct: 0,
            total: 0,
            ledger: MistakeLedger::new(settings.mistake_policy()),
            started_at,
            elapsed_secs: 0,
            last_correct_at: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    #[must_use]
    pub fn current_problem(&self) -> Problem {
        self.current
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn mistakes(&self) -> &[MistakeRecord] {
        self.ledger.records()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed whole seconds as of the last `tick`.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn progress(&self) -> DrillProgress {
        DrillProgress {
            correct: self.correct,
            total: self.total,
            wrong: self.wrong_count(),
            problem_number: self.total.saturating_add(1),
            elapsed_secs: self.elapsed_secs,
            open_mistakes: self.ledger.open_count(),
        }
    }

    /// Replace the current problem with a fresh draw and clear the pending input.
    pub fn generate_problem(&mut self) -> Problem {
        self.current = self.generator.generate(self.source.as_mut());
        self.pending_input.clear();
        self.current
    }

    /// Skip the current problem without scoring it.
    pub fn request_new_problem(&mut self) -> Problem {
        let skipped = self.current;
        let next = self.generate_problem();
        debug!(%skipped, %next, "problem skipped");
        next
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Score `raw` against the current problem.
    ///
    /// Blank input is ignored and leaves the session untouched. Any other input
    /// counts as an attempt and moves the session to a new problem.
    pub fn evaluate(&mut self, raw: &str) -> Outcome {
        let expected = self.current.expected();
        let matched = match parse_answer(raw) {
            AnswerInput::Blank => {
                trace!("blank submission ignored");
                return Outcome::Ignored;
            }
            AnswerInput::Value(value) => value == expected,
            AnswerInput::Unparsable => false,
        };

        self.total = self.total.saturating_add(1);
        let outcome = if matched {
            self.correct = self.correct.saturating_add(1);
            let resolved = self.ledger.resolve(&self.current);
            self.last_correct_at = Some(self.clock.now());
            debug!(problem = %self.current, resolved, "answer correct");
            Outcome::Correct
        } else {
            let recorded = self.ledger.record_miss(self.current, raw);
            debug!(
                problem = %self.current,
                given = raw,
                expected,
                recorded = ?recorded,
                "answer incorrect"
            );
            Outcome::Incorrect
        };

        self.generate_problem();
        outcome
    }

    /// Score the pending input.
    pub fn submit_pending(&mut self) -> Outcome {
        let raw = std::mem::take(&mut self.pending_input);
        let outcome = self.evaluate(&raw);
        if outcome == Outcome::Ignored {
            self.pending_input = raw;
        }
        outcome
    }

    /// Present the mistake at `index` again as the current problem.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::Ledger` if `index` is out of range; the session is unchanged.
    pub fn requeue_mistake(&mut self, index: usize) -> Result<Problem, DrillError> {
        let problem = self.ledger.begin_repeat(index)?;
        self.current = problem;
        self.pending_input.clear();
        debug!(index, %problem, "mistake requeued");
        Ok(problem)
    }

    /// Recompute elapsed seconds from the session clock.
    pub fn tick(&mut self) -> u64 {
        self.tick_at(self.clock.now())
    }

    /// Recompute elapsed seconds as of `now`.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> u64 {
        self.elapsed_secs = whole_seconds_between(self.started_at, now);
        self.elapsed_secs
    }

    /// Whether the last correct answer is recent enough to celebrate.
    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.is_celebrating_at(self.clock.now())
    }

    #[must_use]
    pub fn is_celebrating_at(&self, now: DateTime<Utc>) -> bool {
        let Some(at) = self.last_correct_at else {
            return false;
        };
        let window = Duration::from_std(self.settings.celebration()).unwrap_or(Duration::zero());
        now >= at && now < at + window
    }
}
