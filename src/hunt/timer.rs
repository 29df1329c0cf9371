//! Elapsed-time display and best-time tracking.

/// Format a millisecond duration as zero-padded `mm:ss`, truncated to whole
/// seconds.
pub fn format_elapsed(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Best-time improvement rule: a run only replaces the stored time when it
/// is strictly faster (or when nothing is stored yet).
pub fn improves_best(stored: Option<u64>, elapsed_ms: u64) -> bool {
    match stored {
        Some(best) => elapsed_ms < best,
        None => true,
    }
}
