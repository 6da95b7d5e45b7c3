// crates/cueboard-core/src/audio_types.rs
//
// Types that flow across the channel between cueboard-audio and cueboard-ui.
// No egui, no rodio — just plain data.

use uuid::Uuid;

/// Results sent from the AudioWorker probe threads to the UI.
pub enum ProbeResult {
    /// Metadata for one source file: total length plus normalized waveform
    /// peaks for the crop track background.
    Ready  { id: Uuid, seconds: f64, peaks: Vec<f32> },
    /// The source could not be opened or decoded, or reported no usable
    /// duration. The editor shows the message and keeps the crop UI closed.
    Failed { id: Uuid, msg: String },
}
