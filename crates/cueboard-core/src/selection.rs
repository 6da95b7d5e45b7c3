// crates/cueboard-core/src/selection.rs
//
// Drag-session state machine for the two crop handles.
//
// One controller lives inside each EditSession. The UI reports raw pointer
// events (press on a handle, move, release); the controller decides what they
// mean and routes mapped times into ClipBounds. Release is unconditional and
// is also invoked from session teardown, so a drag can never outlive the
// editor that started it.

use crate::bounds::ClipBounds;
use crate::track::{map_to_time, TrackGeometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    Start,
    End,
}

/// Which handle, if any, currently tracks the pointer. Exists only between a
/// press on a handle and the matching release; never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(Handle),
}

#[derive(Debug, Default)]
pub struct SelectionController {
    session: DragSession,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press on a handle. Returns true when a new drag session starts.
    /// A press while another handle is already dragging is ignored — the
    /// session that started first owns the pointer exclusively.
    pub fn begin(&mut self, handle: Handle) -> bool {
        match self.session {
            DragSession::Idle => {
                self.session = DragSession::Dragging(handle);
                true
            }
            DragSession::Dragging(_) => false,
        }
    }

    /// Pointer moved to `x` while dragging. Maps the coordinate to a time and
    /// applies it to the active handle; ClipBounds does the clamping, so a
    /// handle dragged past its partner sticks instead of swapping roles.
    /// No-op while idle.
    pub fn drag_to(&mut self, x: f32, track: TrackGeometry, bounds: &mut ClipBounds) {
        let t = map_to_time(x, track, bounds.duration());
        match self.session {
            DragSession::Dragging(Handle::Start) => bounds.set_start(t),
            DragSession::Dragging(Handle::End)   => bounds.set_end(t),
            DragSession::Idle => {}
        }
    }

    /// Pointer released — anywhere, not just over the track — or the owning
    /// editor is tearing down. Always returns the controller to Idle.
    pub fn release(&mut self) {
        self.session = DragSession::Idle;
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.session {
            DragSession::Idle => None,
            DragSession::Dragging(h) => Some(h),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session != DragSession::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::MIN_SPAN;

    const TRACK: TrackGeometry = TrackGeometry { left: 0.0, width: 100.0 };

    fn bounds(duration: f64) -> ClipBounds {
        ClipBounds::new(duration).expect("valid duration")
    }

    #[test]
    fn begin_only_from_idle() {
        let mut sel = SelectionController::new();
        assert!(sel.begin(Handle::Start));
        assert!(!sel.begin(Handle::End));
        assert_eq!(sel.active_handle(), Some(Handle::Start));
    }

    #[test]
    fn release_always_returns_to_idle() {
        let mut sel = SelectionController::new();
        sel.release();
        assert!(!sel.is_dragging());
        sel.begin(Handle::End);
        sel.release();
        assert!(!sel.is_dragging());
        assert!(sel.begin(Handle::Start));
    }

    #[test]
    fn drag_moves_only_the_active_handle() {
        let mut sel = SelectionController::new();
        let mut b = bounds(8.0);
        sel.begin(Handle::End);
        sel.drag_to(37.5, TRACK, &mut b); // 37.5% of 8.0 = 3.0
        assert!((b.end() - 3.0).abs() < 1e-6);
        assert_eq!(b.start(), 0.0);
    }

    #[test]
    fn drag_while_idle_is_a_no_op() {
        let mut sel = SelectionController::new();
        let mut b = bounds(8.0);
        sel.drag_to(50.0, TRACK, &mut b);
        assert_eq!(b.start(), 0.0);
        assert_eq!(b.end(), 8.0);
    }

    #[test]
    fn start_handle_sticks_short_of_end_handle() {
        let mut sel = SelectionController::new();
        let mut b = bounds(8.0);

        sel.begin(Handle::End);
        sel.drag_to(37.5, TRACK, &mut b); // end → 3.0
        sel.release();

        sel.begin(Handle::Start);
        sel.drag_to(40.0, TRACK, &mut b); // maps to 3.2, past the end handle
        sel.release();

        assert!((b.start() - (3.0 - MIN_SPAN)).abs() < 1e-6);
        assert!((b.end() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_leaving_the_track_keeps_dragging() {
        let mut sel = SelectionController::new();
        let mut b = bounds(8.0);
        sel.begin(Handle::Start);
        sel.drag_to(-400.0, TRACK, &mut b);
        assert!(sel.is_dragging());
        assert_eq!(b.start(), 0.0);
        sel.drag_to(25.0, TRACK, &mut b);
        assert!((b.start() - 2.0).abs() < 1e-6);
    }
}
