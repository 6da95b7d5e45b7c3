// crates/cueboard-audio/src/playback.rs
//
// Bounded playback: sinks that start at a clip's selected start offset and
// are stopped the moment the reported position reaches the end offset.
//
// Two controllers share the same open/seek/poll plumbing:
//   · PreviewPlayer — the crop editor's preview. Single-flight: at most one
//     sink, toggle-off when the same key is requested again, replace when a
//     different key arrives.
//   · PadPlayer — grid one-shots. Fire-and-forget: every trigger owns its
//     own sink and end bound, overlapping triggers are fine.
//
// The stop condition is cooperative: tick() is called once per UI frame and
// polls Sink::get_pos() — no timer thread. Position granularity is whatever
// the output stream reports, which is plenty for a 0.1 s minimum span.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink};
use thiserror::Error;
use uuid::Uuid;

use cueboard_core::{ClipBounds, Sound};

#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The source could not be opened/decoded or the output rejected it.
    /// Callers log this and stay stopped — a dead preview must never block
    /// saving a clip.
    #[error("audio playback unavailable: {0}")]
    Unavailable(String),
}

/// Minimum elapsed time before sink.empty() is trusted as "drained".
/// rodio fills its decode buffer asynchronously; right after creation
/// empty() can read true for a frame or two even though playback is fine.
const MIN_PLAY_SECS: f64 = 1.5;

// ── Shared plumbing ───────────────────────────────────────────────────────────

/// True once a reported position has reached the monitored end offset.
/// No end bound ⇒ the sound runs to its natural end.
fn reached_end(pos_secs: f64, end: Option<f64>) -> bool {
    match end {
        Some(end) => pos_secs >= end,
        None      => false,
    }
}

/// What a start request means given what is currently playing.
#[derive(Debug, PartialEq, Eq)]
enum ToggleAction {
    Start,
    Stop,
    Replace,
}

fn classify_toggle(active: Option<Uuid>, requested: Uuid) -> ToggleAction {
    match active {
        None                       => ToggleAction::Start,
        Some(k) if k == requested  => ToggleAction::Stop,
        Some(_)                    => ToggleAction::Replace,
    }
}

/// Open `path`, seek to the selection start and begin playing on `mixer`.
fn open_bounded_sink(
    mixer:  &Mixer,
    path:   &Path,
    bounds: Option<&ClipBounds>,
    volume: f32,
) -> Result<Sink, PlaybackError> {
    let file = File::open(path)
        .map_err(|e| PlaybackError::Unavailable(format!("{}: {e}", path.display())))?;
    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::Unavailable(format!("{}: {e}", path.display())))?;

    let sink = Sink::connect_new(mixer);
    sink.append(decoder);
    if let Some(b) = bounds {
        // Seek failure (a codec without coarse seek) degrades to
        // play-from-zero; the end monitor still stops at the right offset.
        if let Err(e) = sink.try_seek(Duration::from_secs_f64(b.start())) {
            log::warn!("[playback] seek to {:.2}s failed: {e}", b.start());
        }
    }
    sink.set_volume(volume);
    sink.play();
    Ok(sink)
}

struct BoundedSink {
    end:     Option<f64>,
    created: Instant,
    sink:    Sink,
}

impl BoundedSink {
    fn open(
        mixer:  &Mixer,
        path:   &Path,
        bounds: Option<&ClipBounds>,
        volume: f32,
    ) -> Result<Self, PlaybackError> {
        Ok(Self {
            end:     bounds.map(|b| b.end()),
            created: Instant::now(),
            sink:    open_bounded_sink(mixer, path, bounds, volume)?,
        })
    }

    /// Finished, either by reaching the monitored end offset or by draining
    /// naturally (the empty() read is only trusted past the warmup window).
    fn finished(&self) -> bool {
        if reached_end(self.sink.get_pos().as_secs_f64(), self.end) {
            return true;
        }
        self.sink.empty() && self.created.elapsed().as_secs_f64() >= MIN_PLAY_SECS
    }

    fn stop(self) {
        self.sink.stop();
    }
}

// ── PreviewPlayer ─────────────────────────────────────────────────────────────

/// The crop editor's preview channel. At most one sound plays at a time;
/// requesting the playing key again stops it instead of restarting.
#[derive(Default)]
pub struct PreviewPlayer {
    active: Option<(Uuid, BoundedSink)>,
}

impl PreviewPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Start, stop or switch the preview. Returns whether audio is playing
    /// after the call. The previous sink is always released before a new one
    /// opens — there is never a moment with two preview sinks alive.
    pub fn toggle(
        &mut self,
        mixer:  &Mixer,
        key:    Uuid,
        path:   &Path,
        bounds: Option<&ClipBounds>,
        volume: f32,
    ) -> Result<bool, PlaybackError> {
        match classify_toggle(self.active.as_ref().map(|(k, _)| *k), key) {
            ToggleAction::Stop => {
                self.stop();
                Ok(false)
            }
            ToggleAction::Start | ToggleAction::Replace => {
                self.stop();
                let bounded = BoundedSink::open(mixer, path, bounds, volume)?;
                self.active = Some((key, bounded));
                Ok(true)
            }
        }
    }

    /// Immediate, position-independent stop. Tears the sink down so the
    /// position poll cannot fire again for this playback.
    pub fn stop(&mut self) {
        if let Some((_, bounded)) = self.active.take() {
            bounded.stop();
        }
    }

    /// Per-frame position poll. Stops the sink once it reaches its end bound.
    pub fn tick(&mut self) {
        if self.active.as_ref().is_some_and(|(_, b)| b.finished()) {
            self.stop();
        }
    }

    pub fn set_volume(&self, volume: f32) {
        if let Some((_, bounded)) = &self.active {
            bounded.sink.set_volume(volume);
        }
    }
}

// ── PadPlayer ─────────────────────────────────────────────────────────────────

/// Fire-and-forget bounded one-shots for the button grid. Each trigger owns
/// its own sink and stop bound; rapid or overlapping triggers all play.
#[derive(Default)]
pub struct PadPlayer {
    shots: Vec<(Uuid, BoundedSink)>,
}

impl PadPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `sound`. Stored bounds select the sub-range; a sound without
    /// bounds runs to its natural end with no monitored stop.
    pub fn trigger(
        &mut self,
        mixer:  &Mixer,
        sound:  &Sound,
        volume: f32,
    ) -> Result<(), PlaybackError> {
        let bounded = BoundedSink::open(mixer, &sound.path, sound.bounds.as_ref(), volume)?;
        self.shots.push((sound.id, bounded));
        Ok(())
    }

    /// Per-frame poll: stop shots that reached their end bound, reap shots
    /// that drained naturally.
    pub fn tick(&mut self) {
        let mut kept = Vec::with_capacity(self.shots.len());
        for (id, bounded) in self.shots.drain(..) {
            if bounded.finished() {
                bounded.stop();
            } else {
                kept.push((id, bounded));
            }
        }
        self.shots = kept;
    }

    /// Cull every shot of one sound — used when its pad is deleted mid-play.
    pub fn stop_sound(&mut self, id: Uuid) {
        let mut kept = Vec::with_capacity(self.shots.len());
        for (sid, bounded) in self.shots.drain(..) {
            if sid == id {
                bounded.stop();
            } else {
                kept.push((sid, bounded));
            }
        }
        self.shots = kept;
    }

    pub fn stop_all(&mut self) {
        for (_, bounded) in self.shots.drain(..) {
            bounded.stop();
        }
    }

    pub fn set_volume(&self, volume: f32) {
        for (_, bounded) in &self.shots {
            bounded.sink.set_volume(volume);
        }
    }

    pub fn active_count(&self) -> usize {
        self.shots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_bound_fires_at_and_past_the_offset() {
        assert!(!reached_end(4.99, Some(5.0)));
        assert!(reached_end(5.0, Some(5.0)));
        assert!(reached_end(5.2, Some(5.0)));
    }

    #[test]
    fn missing_end_bound_never_fires() {
        assert!(!reached_end(0.0, None));
        assert!(!reached_end(1e9, None));
    }

    #[test]
    fn toggle_starts_when_idle() {
        let key = Uuid::new_v4();
        assert_eq!(classify_toggle(None, key), ToggleAction::Start);
    }

    #[test]
    fn toggle_stops_the_same_key() {
        let key = Uuid::new_v4();
        assert_eq!(classify_toggle(Some(key), key), ToggleAction::Stop);
    }

    #[test]
    fn toggle_replaces_a_different_key() {
        assert_eq!(
            classify_toggle(Some(Uuid::new_v4()), Uuid::new_v4()),
            ToggleAction::Replace,
        );
    }
}
