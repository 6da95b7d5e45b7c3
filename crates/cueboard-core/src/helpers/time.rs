// crates/cueboard-core/src/helpers/time.rs
//
// Shared time-formatting utilities used by cueboard-ui.

/// Format a clip offset the way the handle labels show it: tenths of a
/// second with an `s` suffix.
///
/// ```
/// use cueboard_core::helpers::time::format_offset;
/// assert_eq!(format_offset(0.0),  "0.0s");
/// assert_eq!(format_offset(2.97), "3.0s");
/// ```
pub fn format_offset(secs: f64) -> String {
    format!("{secs:.1}s")
}

/// Format a duration in seconds as a compact human-readable string.
///
/// | Range         | Format       | Example   |
/// |---------------|--------------|-----------|
/// | ≥ 60 s        | `M:SS`       | `3:07`    |
/// | < 60 s        | `S.Xs`       | `4.2s`    |
///
/// ```
/// use cueboard_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),   "4.2s");
/// assert_eq!(format_duration(187.0), "3:07");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        format!("{}:{:02}", secs as u64 / 60, secs as u64 % 60)
    } else {
        format!("{secs:.1}s")
    }
}
