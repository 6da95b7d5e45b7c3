// crates/cueboard-core/src/commands.rs
//
// Every user action in CueBoard is expressed as a BoardCommand.
// Modules emit these; app.rs processes them after the UI pass, in emission
// order — each command fully updates state before the next one runs.
// Adding a new feature = add a variant here + one match arm in app.rs.

use std::path::PathBuf;
use uuid::Uuid;
use crate::selection::Handle;
use crate::track::TrackGeometry;

#[derive(Debug, Clone)]
pub enum BoardCommand {
    // ── Intake ───────────────────────────────────────────────────────────────
    /// Open the crop editor for a picked/dropped file and queue its probe.
    ImportFile(PathBuf),

    // ── Crop editor ──────────────────────────────────────────────────────────
    SetLabel(String),
    /// Pointer pressed on a crop handle. Ignored while another handle drags.
    CropDragStarted(Handle),
    /// Pointer moved during a drag. `track` is the rectangle the editor
    /// allocated this frame; the mapper turns `x` into a clip offset.
    CropDragMoved { x: f32, track: TrackGeometry },
    /// Pointer released — anywhere, not just over the track.
    CropDragEnded,
    /// Preview the current selection; stops if the preview is already playing.
    TogglePreview,
    SaveSound,
    CancelEdit,

    // ── Board ────────────────────────────────────────────────────────────────
    /// Fire a saved pad (bounded one-shot; overlapping triggers allowed).
    TriggerSound(Uuid),
    DeleteSound(Uuid),

    // ── Transport ────────────────────────────────────────────────────────────
    SetVolume(f32),
    ToggleMute,
}
