//! Time formatting helpers.

/// Format a duration in seconds as a short human-readable string.
///
/// Spans of a year or more (365 days) are shown in years and days, which
/// is how stake lock periods read most naturally.
pub fn format_duration(secs: u64) -> String {
    const YEAR: u64 = 365 * 86_400;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86_400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs < YEAR {
        format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3600)
    } else {
        format!("{}y {}d", secs / YEAR, (secs % YEAR) / 86_400)
    }
}
