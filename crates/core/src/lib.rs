#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod time;

pub use generator::{OperatorSet, ProblemGenerator, RandomSource, RngSource, ScriptedRandom};
pub use time::Clock;
