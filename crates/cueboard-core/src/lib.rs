// crates/cueboard-core/src/lib.rs
//
// Pure data model and state machines for CueBoard. No egui, no rodio —
// everything here is testable without a window or an audio device.

pub mod audio_types;
pub mod bounds;
pub mod commands;
pub mod helpers;
pub mod selection;
pub mod state;
pub mod track;

// Re-export the types that cross crate boundaries constantly so imports in
// cueboard-audio / cueboard-ui stay short.
pub use audio_types::ProbeResult;
pub use bounds::{BoundsError, ClipBounds, MIN_SPAN};
pub use commands::BoardCommand;
pub use selection::{DragSession, Handle, SelectionController};
pub use state::{BoardPrefs, BoardState, EditSession, Sound};
pub use track::{map_to_time, TrackGeometry};
