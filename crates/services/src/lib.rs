#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod settings;

pub use drill_core::Clock;

pub use error::{DrillError, SettingsError};
pub use sessions::{DrillProgress, DrillSession};
pub use settings::{DrillSettings, DrillSettingsDraft};
