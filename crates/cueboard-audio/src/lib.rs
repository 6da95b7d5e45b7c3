// crates/cueboard-audio/src/lib.rs
//
// Audio runtime for CueBoard: off-thread metadata probing and the bounded
// playback controllers. No egui dependency — talks to cueboard-ui through
// the ProbeResult channel and plain method calls.

pub mod playback;
pub mod probe;
pub mod worker;

pub use playback::{PadPlayer, PlaybackError, PreviewPlayer};
pub use worker::AudioWorker;
