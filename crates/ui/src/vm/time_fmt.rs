/// Render elapsed seconds as zero-padded `mm:ss`. Minutes are not capped at 59.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}
