// crates/cueboard-ui/src/context.rs
//
// AppContext owns every runtime handle that is NOT part of BoardState:
//
//   AppContext
//     ├── worker       — probe threads + result channel
//     ├── audio_stream — rodio OutputStream (must outlive all sinks)
//     ├── preview      — the editor's single-flight bounded player
//     └── pads         — fire-and-forget bounded one-shots for the grid
//
// Modules never touch these; commands and the audio tick do.

use std::path::Path;
use uuid::Uuid;

use cueboard_audio::{AudioWorker, PadPlayer, PlaybackError, PreviewPlayer};
use cueboard_core::{BoardState, ClipBounds, ProbeResult, Sound};
use eframe::egui;
use rodio::OutputStream;

pub struct AppContext {
    pub worker: AudioWorker,

    /// Opened lazily on the first play request — there is nothing to hear
    /// before that, and a machine without an output device should still let
    /// the user crop and save.
    audio_stream: Option<OutputStream>,
    /// True once stream setup has failed and been logged; keeps retries from
    /// spamming a warning per trigger.
    stream_warned: bool,

    pub preview: PreviewPlayer,
    pub pads:    PadPlayer,
}

impl AppContext {
    pub fn new(worker: AudioWorker) -> Self {
        Self {
            worker,
            audio_stream:  None,
            stream_warned: false,
            preview:       PreviewPlayer::new(),
            pads:          PadPlayer::new(),
        }
    }

    fn open_stream_if_needed(&mut self) {
        if self.audio_stream.is_some() {
            return;
        }
        match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(stream) => {
                log::info!("[audio] output stream ready");
                self.audio_stream = Some(stream);
                self.stream_warned = false;
            }
            Err(e) => {
                if !self.stream_warned {
                    log::warn!("[audio] no output stream: {e}");
                    self.stream_warned = true;
                }
            }
        }
    }

    /// Toggle the editor preview for `key`. Returns whether audio is playing
    /// after the call.
    pub fn toggle_preview(
        &mut self,
        key:    Uuid,
        path:   &Path,
        bounds: &ClipBounds,
        volume: f32,
    ) -> Result<bool, PlaybackError> {
        self.open_stream_if_needed();
        let Some(stream) = self.audio_stream.as_ref() else {
            return Err(PlaybackError::Unavailable("no output stream".into()));
        };
        self.preview.toggle(stream.mixer(), key, path, Some(bounds), volume)
    }

    /// Fire a pad one-shot for `sound`.
    pub fn trigger_pad(&mut self, sound: &Sound, volume: f32) -> Result<(), PlaybackError> {
        self.open_stream_if_needed();
        let Some(stream) = self.audio_stream.as_ref() else {
            return Err(PlaybackError::Unavailable("no output stream".into()));
        };
        self.pads.trigger(stream.mixer(), sound, volume)
    }

    pub fn audio_online(&self) -> bool {
        self.audio_stream.is_some()
    }

    /// Drain the probe result channel into state. Called once per frame,
    /// before the UI pass, so the editor sees fresh metadata immediately.
    pub fn ingest_probe_results(&mut self, state: &mut BoardState, ctx: &egui::Context) {
        while let Ok(result) = self.worker.rx.try_recv() {
            match result {
                ProbeResult::Ready { id, seconds, peaks } => {
                    state.apply_probe(id, seconds, peaks);
                    ctx.request_repaint();
                }
                ProbeResult::Failed { id, msg } => {
                    log::warn!("[probe] {id}: {msg}");
                    state.probe_failed(id, msg);
                    ctx.request_repaint();
                }
            }
        }
    }
}
