use std::sync::Arc;

use drill_core::RandomSource;
use services::{Clock, DrillSession, DrillSettings};

pub trait UiApp: Send + Sync {
    fn settings(&self) -> DrillSettings;
    fn clock(&self) -> Clock;

    /// Fresh random source for a new session.
    fn random_source(&self) -> Box<dyn RandomSource>;
}

#[derive(Clone)]
pub struct AppContext {
    settings: DrillSettings,
    clock: Clock,
    app: Arc<dyn UiApp>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            settings: app.settings(),
            clock: app.clock(),
            app: Arc::clone(app),
        }
    }

    #[must_use]
    pub fn settings(&self) -> DrillSettings {
        self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn start_session(&self) -> DrillSession {
        DrillSession::start(self.settings, self.clock, self.app.random_source())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
