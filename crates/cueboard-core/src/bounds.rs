// crates/cueboard-core/src/bounds.rs
//
// ClipBounds: the authoritative (start, end, duration) triple for one clip.
// Fields are private — every mutation goes through set_start/set_end so the
// ordering invariant (0 ≤ start ≤ end - MIN_SPAN ≤ end ≤ duration) can never
// be broken, not even transiently mid-drag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum selectable span in seconds. Keeps the crop from collapsing to a
/// zero-length selection the playback side couldn't meaningfully honor.
pub const MIN_SPAN: f64 = 0.1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// The metadata probe reported a duration no clip can have. The editor
    /// refuses to open the crop track for such a file.
    #[error("invalid clip duration: {0}")]
    InvalidDuration(f64),
}

/// Selected sub-range of an audio clip.
///
/// Constructed once the probed duration is known (selection starts as the
/// full clip), mutated only while the crop editor is open, then attached to a
/// saved Sound and treated as immutable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    duration: f64,
    start:    f64,
    end:      f64,
}

impl ClipBounds {
    /// Full-clip selection over `duration` seconds.
    pub fn new(duration: f64) -> Result<Self, BoundsError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(BoundsError::InvalidDuration(duration));
        }
        Ok(Self { duration, start: 0.0, end: duration })
    }

    /// Move the start handle. Out-of-range input is normal (the pointer can
    /// leave the track mid-drag) and is clamped, not rejected — the handle
    /// sticks at `end - MIN_SPAN` rather than crossing its partner.
    pub fn set_start(&mut self, t: f64) {
        if !t.is_finite() { return; }
        self.start = t.min(self.end - MIN_SPAN).max(0.0);
    }

    /// Move the end handle. Clamped symmetrically to
    /// `[start + MIN_SPAN, duration]`.
    pub fn set_end(&mut self, t: f64) {
        if !t.is_finite() { return; }
        self.end = t.max(self.start + MIN_SPAN).min(self.duration);
    }

    pub fn duration(&self) -> f64 { self.duration }
    pub fn start(&self)    -> f64 { self.start }
    pub fn end(&self)      -> f64 { self.end }

    /// Length of the selected range in seconds.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Start offset as a fraction of the full clip, for track rendering.
    /// Zero when duration is zero so layout math never divides by zero.
    pub fn start_fraction(&self) -> f32 {
        if self.duration <= 0.0 { 0.0 } else { (self.start / self.duration) as f32 }
    }

    /// End offset as a fraction of the full clip.
    pub fn end_fraction(&self) -> f32 {
        if self.duration <= 0.0 { 0.0 } else { (self.end / self.duration) as f32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(duration: f64) -> ClipBounds {
        ClipBounds::new(duration).expect("valid duration")
    }

    #[test]
    fn new_selects_full_clip() {
        let b = bounds(8.0);
        assert_eq!(b.start(), 0.0);
        assert_eq!(b.end(), 8.0);
        assert_eq!(b.span(), 8.0);
    }

    #[test]
    fn new_rejects_bad_durations() {
        assert!(matches!(ClipBounds::new(0.0),  Err(BoundsError::InvalidDuration(_))));
        assert!(matches!(ClipBounds::new(-1.0), Err(BoundsError::InvalidDuration(_))));
        assert!(ClipBounds::new(f64::NAN).is_err());
        assert!(ClipBounds::new(f64::INFINITY).is_err());
    }

    #[test]
    fn set_start_clamps_below_zero() {
        let mut b = bounds(8.0);
        b.set_start(-3.0);
        assert_eq!(b.start(), 0.0);
    }

    #[test]
    fn set_start_sticks_at_min_span_before_end() {
        let mut b = bounds(8.0);
        b.set_end(3.0);
        b.set_start(3.2);
        assert!((b.start() - 2.9).abs() < 1e-9);
        assert_eq!(b.end(), 3.0);
    }

    #[test]
    fn set_end_sticks_at_min_span_after_start() {
        let mut b = bounds(8.0);
        b.set_start(5.0);
        b.set_end(4.0);
        assert!((b.end() - 5.1).abs() < 1e-9);
    }

    #[test]
    fn set_end_clamps_to_duration() {
        let mut b = bounds(8.0);
        b.set_end(20.0);
        assert_eq!(b.end(), 8.0);
    }

    #[test]
    fn invariant_holds_for_any_input() {
        let mut b = bounds(10.0);
        for t in [-100.0, -0.1, 0.0, 4.9999, 5.0, 9.95, 10.0, 1e9] {
            b.set_start(t);
            assert!(b.start() >= 0.0);
            assert!(b.start() <= b.end() - MIN_SPAN + 1e-9);
            b.set_end(t);
            assert!(b.end() <= b.duration());
            assert!(b.end() >= b.start() + MIN_SPAN - 1e-9);
        }
    }

    #[test]
    fn clamping_is_idempotent() {
        let mut a = bounds(8.0);
        a.set_end(3.0);
        a.set_start(3.2);
        let mut b = a;
        b.set_start(b.start());
        b.set_end(b.end());
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut b = bounds(8.0);
        b.set_start(2.0);
        b.set_start(f64::NAN);
        assert_eq!(b.start(), 2.0);
        b.set_end(f64::INFINITY);
        assert_eq!(b.end(), 8.0);
    }

    #[test]
    fn fractions_track_the_selection() {
        let mut b = bounds(10.0);
        b.set_start(2.5);
        b.set_end(7.5);
        assert!((b.start_fraction() - 0.25).abs() < 1e-6);
        assert!((b.end_fraction() - 0.75).abs() < 1e-6);
    }
}
