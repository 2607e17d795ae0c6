use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::model::{ADD_SUB_MAX, MUL_MAX, Operator, Problem};

//
// ─── RANDOM SOURCE ─────────────────────────────────────────────────────────────
//

/// Source of uniform draws in `[0, 1)`.
///
/// Problem generation only ever asks for unit draws, which keeps test doubles
/// trivial: a script of floats fully determines the generated problems.
pub trait RandomSource {
    fn unit(&mut self) -> f64;
}

/// Adapter that turns any `rand::Rng` into a `RandomSource`.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it reaches the end.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }

    /// Script the draws that make `ProblemGenerator` produce `problems` in order.
    ///
    /// Every problem's operator must belong to `operators`.
    #[must_use]
    pub fn replaying(operators: OperatorSet, problems: &[Problem]) -> Self {
        let mut draws = Vec::with_capacity(problems.len() * 3);
        for problem in problems {
            draws.push(operators.draw_for(problem.operator()));
            let (a_max, b_max) = match problem.operator() {
                Operator::Add => (ADD_SUB_MAX, ADD_SUB_MAX),
                Operator::Subtract => (ADD_SUB_MAX, problem.a()),
                Operator::Multiply => (MUL_MAX, MUL_MAX),
            };
            draws.push(centered_draw(problem.a(), a_max));
            draws.push(centered_draw(problem.b(), b_max));
        }
        Self::new(draws)
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.next % self.draws.len()];
        self.next = (self.next + 1) % self.draws.len();
        value
    }
}

/// Draw that `draw_inclusive(_, max)` maps back to `value`.
fn centered_draw(value: u32, max: u32) -> f64 {
    (f64::from(value) + 0.5) / (f64::from(max) + 1.0)
}

/// Uniform integer in `[0, max]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_inclusive(source: &mut dyn RandomSource, max: u32) -> u32 {
    let span = f64::from(max) + 1.0;
    let picked = (source.unit().clamp(0.0, 1.0) * span).floor() as u32;
    picked.min(max)
}

//
// ─── OPERATOR SET ──────────────────────────────────────────────────────────────
//

/// Operators a drill draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorSet {
    /// Addition and subtraction, each with probability 1/2.
    AddSubtract,
    /// Addition, subtraction and multiplication, each with probability 1/3.
    #[default]
    AddSubtractMultiply,
}

impl OperatorSet {
    #[must_use]
    pub fn operators(self) -> &'static [Operator] {
        match self {
            OperatorSet::AddSubtract => &[Operator::Add, Operator::Subtract],
            OperatorSet::AddSubtractMultiply => {
                &[Operator::Add, Operator::Subtract, Operator::Multiply]
            }
        }
    }

    #[must_use]
    pub fn contains(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    /// Split a unit draw into equal partitions, one per operator.
    #[must_use]
    pub fn pick(self, unit: f64) -> Operator {
        match self {
            OperatorSet::AddSubtract => {
                if unit < 0.5 {
                    Operator::Add
                } else {
                    Operator::Subtract
                }
            }
            OperatorSet::AddSubtractMultiply => {
                if unit < 1.0 / 3.0 {
                    Operator::Add
                } else if unit < 2.0 / 3.0 {
                    Operator::Subtract
                } else {
                    Operator::Multiply
                }
            }
        }
    }

    fn draw_for(self, operator: Operator) -> f64 {
        let ops = self.operators();
        let index = ops.iter().position(|op| *op == operator).unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let width = 1.0 / ops.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let start = index as f64 * width;
        start + width / 2.0
    }
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Draws random problems.
///
/// # Examples
///
/// ```
/// # use drill_core::generator::{OperatorSet, ProblemGenerator, ScriptedRandom};
/// # use drill_core::model::Operator;
/// let generator = ProblemGenerator::new(OperatorSet::AddSubtractMultiply);
/// let mut source = ScriptedRandom::new([0.9, 0.75, 0.05]);
/// let problem = generator.generate(&mut source);
/// assert_eq!(problem.operator(), Operator::Multiply);
/// assert_eq!((problem.a(), problem.b()), (7, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemGenerator {
    operators: OperatorSet,
}

impl ProblemGenerator {
    #[must_use]
    pub fn new(operators: OperatorSet) -> Self {
        Self { operators }
    }

    #[must_use]
    pub fn operators(&self) -> OperatorSet {
        self.operators
    }

    /// Draw the next problem.
    ///
    /// Subtraction draws the subtrahend from `[0, a]`, so the difference is never
    /// negative and no draw is ever rejected.
    pub fn generate(&self, source: &mut dyn RandomSource) -> Problem {
        let operator = self.operators.pick(source.unit());
        let (a, b) = match operator {
            Operator::Add => {
                let a = draw_inclusive(source, ADD_SUB_MAX);
                (a, draw_inclusive(source, ADD_SUB_MAX))
            }
            Operator::Subtract => {
                let a = draw_inclusive(source, ADD_SUB_MAX);
                (a, draw_inclusive(source, a))
            }
            Operator::Multiply => {
                let a = draw_inclusive(source, MUL_MAX);
                (a, draw_inclusive(source, MUL_MAX))
            }
        };
        Problem::from_draws(a, b, operator)
    }
}
