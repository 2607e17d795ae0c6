mod progress;
mod service;

// Public API of the drill session subsystem.
pub use crate::error::DrillError;
pub use progress::DrillProgress;
pub use service::DrillSession;
