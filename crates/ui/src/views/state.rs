#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    MistakeNotFound,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::MistakeNotFound => "That mistake is no longer available.",
        }
    }
}
