mod answer;
mod ids;
mod mistake;
mod problem;

pub use answer::{AnswerInput, Outcome, parse_answer};
pub use ids::MistakeId;
pub use mistake::{LedgerError, MistakeLedger, MistakePolicy, MistakeRecord};
pub use problem::{ADD_SUB_MAX, MUL_MAX, Operator, Problem, ProblemError};
