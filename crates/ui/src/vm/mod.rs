mod drill_vm;
mod time_fmt;

pub use drill_vm::{DrillIntent, DrillVm, MistakeRowVm, MistakeStatus};
pub use time_fmt::format_clock;
