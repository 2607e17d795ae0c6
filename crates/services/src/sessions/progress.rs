/// Aggregated view of drill progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillProgress {
    pub correct: u32,
    pub total: u32,
    pub wrong: u32,
    /// 1-based number of the problem currently shown.
    pub problem_number: u32,
    pub elapsed_secs: u64,
    /// Mistakes not yet answered correctly on a repeat.
    pub open_mistakes: usize,
}

impl DrillProgress {
    /// Share of correct answers as a whole percentage, rounded half up.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let scaled = u64::from(self.correct) * 200 + u64::from(self.total);
        let percent = scaled / (u64::from(self.total) * 2);
        u32::try_from(percent).unwrap_or(100)
    }
}
