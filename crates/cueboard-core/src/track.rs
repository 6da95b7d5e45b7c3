// crates/cueboard-core/src/track.rs
//
// Pointer-to-time mapping for the crop track. Pure functions — the UI layer
// feeds in whatever rectangle it allocated this frame and gets back a time
// offset into the clip.

/// Horizontal extent of the crop track in screen coordinates, captured by the
/// UI each frame. `Default` (zero width) is the legitimate pre-first-layout
/// state, not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackGeometry {
    pub left:  f32,
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// Map a pointer x-coordinate over `track` to a time offset in `[0, duration]`.
///
/// Monotonic non-decreasing in `x` and idempotent — the same pointer position
/// always yields the same time. Degenerate geometry (zero/negative width,
/// non-finite values) maps everything to 0.0.
pub fn map_to_time(x: f32, track: TrackGeometry, duration: f64) -> f64 {
    if !track.width.is_finite() || !track.left.is_finite() || track.width <= 0.0 {
        return 0.0;
    }
    if !x.is_finite() || !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }
    let fraction = ((x - track.left) / track.width).clamp(0.0, 1.0);
    fraction as f64 * duration
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: TrackGeometry = TrackGeometry { left: 40.0, width: 200.0 };

    #[test]
    fn track_edges_map_to_clip_edges() {
        assert_eq!(map_to_time(40.0, TRACK, 8.0), 0.0);
        assert_eq!(map_to_time(240.0, TRACK, 8.0), 8.0);
    }

    #[test]
    fn midpoint_maps_to_half_duration() {
        let t = map_to_time(140.0, TRACK, 8.0);
        assert!((t - 4.0).abs() < 1e-6);
    }

    #[test]
    fn outside_the_track_clamps_to_edges() {
        assert_eq!(map_to_time(-500.0, TRACK, 8.0), 0.0);
        assert_eq!(map_to_time(5000.0, TRACK, 8.0), 8.0);
    }

    #[test]
    fn monotonic_non_decreasing_in_x() {
        let mut last = f64::NEG_INFINITY;
        for px in 0..300 {
            let t = map_to_time(px as f32, TRACK, 8.0);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn idempotent_for_repeated_calls() {
        let a = map_to_time(97.5, TRACK, 8.0);
        let b = map_to_time(97.5, TRACK, 8.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_width_track_yields_zero() {
        let track = TrackGeometry::default();
        assert_eq!(map_to_time(123.0, track, 8.0), 0.0);
    }

    #[test]
    fn degenerate_inputs_yield_zero() {
        assert_eq!(map_to_time(f32::NAN, TRACK, 8.0), 0.0);
        assert_eq!(map_to_time(100.0, TRACK, f64::NAN), 0.0);
        assert_eq!(map_to_time(100.0, TrackGeometry::new(f32::NAN, 200.0), 8.0), 0.0);
        assert_eq!(map_to_time(100.0, TrackGeometry::new(0.0, -5.0), 8.0), 0.0);
    }
}
