// crates/cueboard-core/src/state.rs
//
// Pure board data — no egui, no rodio, no runtime handles.
// Mutated only by CueBoardApp::process_command and by probe-result ingestion.

use std::path::PathBuf;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::bounds::ClipBounds;
use crate::selection::SelectionController;

/// Longest allowed pad label. Labels are console-style uppercase and have to
/// fit a fixed-width grid button.
pub const MAX_LABEL_LEN: usize = 15;

/// A saved pad on the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sound {
    pub id:     Uuid,
    pub label:  String,
    pub path:   PathBuf,
    /// None ⇒ play the whole file, no monitored stop.
    pub bounds: Option<ClipBounds>,
}

/// One open crop-editor session. Owns its own bounds and drag state; nothing
/// outside the session mutates either.
#[derive(Debug)]
pub struct EditSession {
    /// Correlates probe results arriving on the worker channel.
    pub id:          Uuid,
    pub path:        PathBuf,
    pub label:       String,
    /// None until the probe reports a usable duration.
    pub bounds:      Option<ClipBounds>,
    /// Normalized waveform peaks for the track background. Empty until probed.
    pub peaks:       Vec<f32>,
    pub selection:   SelectionController,
    /// Set when the probe fails — the crop UI stays closed and only Cancel
    /// remains available.
    pub probe_error: Option<String>,
}

impl EditSession {
    fn new(path: PathBuf) -> Self {
        let label = derive_label(&path);
        Self {
            id: Uuid::new_v4(),
            path,
            label,
            bounds:      None,
            peaks:       Vec::new(),
            selection:   SelectionController::new(),
            probe_error: None,
        }
    }
}

/// User preferences persisted across runs via eframe storage. The sound list
/// itself is deliberately session-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardPrefs {
    pub volume: f32,
    pub muted:  bool,
}

impl Default for BoardPrefs {
    fn default() -> Self {
        Self { volume: 0.5, muted: false }
    }
}

#[derive(Debug)]
pub struct BoardState {
    pub sounds:  Vec<Sound>,
    pub editing: Option<EditSession>,

    pub volume: f32,
    pub muted:  bool,

    /// Mirrors the preview player each frame so modules (which read state
    /// only) can render the play/stop button without touching audio handles.
    pub preview_playing: bool,

    /// Probe requests queued by open_editor, drained by the app each frame
    /// and handed to the AudioWorker.
    pub pending_probes: Vec<(Uuid, PathBuf)>,

    /// Last noteworthy event, shown in the footer console line.
    pub status: Option<String>,
}

impl Default for BoardState {
    fn default() -> Self {
        let prefs = BoardPrefs::default();
        Self::with_prefs(&prefs)
    }
}

impl BoardState {
    pub fn with_prefs(prefs: &BoardPrefs) -> Self {
        Self {
            sounds:          Vec::new(),
            editing:         None,
            volume:          prefs.volume.clamp(0.0, 1.0),
            muted:           prefs.muted,
            preview_playing: false,
            pending_probes:  Vec::new(),
            status:          None,
        }
    }

    pub fn prefs(&self) -> BoardPrefs {
        BoardPrefs { volume: self.volume, muted: self.muted }
    }

    /// Open a crop-editor session for `path` and queue its metadata probe.
    /// Ignored while another session is open (the editor is modal); returns
    /// the session id when one was created.
    pub fn open_editor(&mut self, path: PathBuf) -> Option<Uuid> {
        if self.editing.is_some() {
            return None;
        }
        let session = EditSession::new(path.clone());
        let id = session.id;
        self.pending_probes.push((id, path));
        self.editing = Some(session);
        Some(id)
    }

    /// Probe finished for `id`. Initializes the session's bounds to the full
    /// clip; a duration the bounds model rejects is recorded as a probe
    /// failure instead, leaving no partially-initialized selection behind.
    pub fn apply_probe(&mut self, id: Uuid, seconds: f64, peaks: Vec<f32>) {
        let Some(session) = self.editing.as_mut().filter(|s| s.id == id) else {
            return; // stale result from a cancelled session
        };
        match ClipBounds::new(seconds) {
            Ok(bounds) => {
                session.bounds = Some(bounds);
                session.peaks  = peaks;
            }
            Err(e) => session.probe_error = Some(e.to_string()),
        }
    }

    /// Probe failed for `id`.
    pub fn probe_failed(&mut self, id: Uuid, msg: String) {
        if let Some(session) = self.editing.as_mut().filter(|s| s.id == id) {
            session.probe_error = Some(msg);
        }
    }

    /// Confirm the open session: commit `{label, path, bounds}` to the board
    /// and close the editor. Returns the new sound's id, or None when there
    /// is no session or its bounds never initialized.
    pub fn commit_editing(&mut self) -> Option<Uuid> {
        let session = self.editing.take()?;
        let Some(bounds) = session.bounds else {
            // Probe never delivered a duration — keep the session open so the
            // user sees why, instead of silently dropping their file.
            self.editing = Some(session);
            return None;
        };
        let id = Uuid::new_v4();
        let label = if session.label.trim().is_empty() {
            derive_label(&session.path)
        } else {
            session.label.clone()
        };
        self.sounds.push(Sound {
            id,
            label: label.clone(),
            path: session.path,
            bounds: Some(bounds),
        });
        self.status = Some(format!("SAVED: {label}"));
        Some(id)
    }

    /// Discard the open session. Any active drag dies with it.
    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    pub fn delete_sound(&mut self, id: Uuid) {
        if let Some(sound) = self.sounds.iter().find(|s| s.id == id) {
            self.status = Some(format!("REMOVED: {}", sound.label));
        }
        self.sounds.retain(|s| s.id != id);
    }

    pub fn sound(&self, id: Uuid) -> Option<&Sound> {
        self.sounds.iter().find(|s| s.id == id)
    }
}

/// Console-style pad label from a file path: stem, uppercased, capped at
/// MAX_LABEL_LEN characters (character count, so multibyte stems never split).
pub fn derive_label(path: &std::path::Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .chars()
        .take(MAX_LABEL_LEN)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BoardState {
        BoardState::default()
    }

    #[test]
    fn open_editor_queues_a_probe() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/airhorn.wav")).expect("session opens");
        assert_eq!(s.pending_probes.len(), 1);
        assert_eq!(s.pending_probes[0].0, id);
        let session = s.editing.as_ref().expect("session exists");
        assert_eq!(session.label, "AIRHORN");
        assert!(session.bounds.is_none());
    }

    #[test]
    fn second_import_is_ignored_while_editing() {
        let mut s = state();
        s.open_editor(PathBuf::from("/tmp/a.wav")).expect("first session");
        assert!(s.open_editor(PathBuf::from("/tmp/b.wav")).is_none());
        assert_eq!(s.pending_probes.len(), 1);
    }

    #[test]
    fn probe_result_initializes_full_clip_bounds() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/a.wav")).unwrap();
        s.apply_probe(id, 8.0, vec![0.5; 16]);
        let b = s.editing.as_ref().unwrap().bounds.expect("bounds set");
        assert_eq!(b.start(), 0.0);
        assert_eq!(b.end(), 8.0);
    }

    #[test]
    fn bad_duration_leaves_no_partial_bounds() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/a.wav")).unwrap();
        s.apply_probe(id, -1.0, Vec::new());
        let session = s.editing.as_ref().unwrap();
        assert!(session.bounds.is_none());
        assert!(session.probe_error.is_some());
    }

    #[test]
    fn stale_probe_result_is_dropped() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/a.wav")).unwrap();
        s.cancel_editing();
        s.apply_probe(id, 8.0, Vec::new());
        assert!(s.editing.is_none());
    }

    #[test]
    fn commit_moves_the_session_onto_the_board() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/gong.wav")).unwrap();
        s.apply_probe(id, 8.0, Vec::new());
        if let Some(session) = s.editing.as_mut() {
            if let Some(b) = session.bounds.as_mut() {
                b.set_end(3.0);
            }
        }
        let sound_id = s.commit_editing().expect("commit succeeds");
        assert!(s.editing.is_none());
        let sound = s.sound(sound_id).expect("saved");
        assert_eq!(sound.label, "GONG");
        let b = sound.bounds.expect("bounds attached");
        assert_eq!(b.start(), 0.0);
        assert!((b.end() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn commit_without_probed_bounds_is_refused() {
        let mut s = state();
        s.open_editor(PathBuf::from("/tmp/a.wav")).unwrap();
        assert!(s.commit_editing().is_none());
        assert!(s.editing.is_some());
    }

    #[test]
    fn delete_removes_the_sound() {
        let mut s = state();
        let id = s.open_editor(PathBuf::from("/tmp/a.wav")).unwrap();
        s.apply_probe(id, 2.0, Vec::new());
        let sound_id = s.commit_editing().unwrap();
        s.delete_sound(sound_id);
        assert!(s.sounds.is_empty());
    }

    #[test]
    fn labels_are_uppercased_and_capped() {
        assert_eq!(derive_label(&PathBuf::from("/x/welcome jingle extended.mp3")),
                   "WELCOME JINGLE ");
        assert_eq!(derive_label(&PathBuf::from("/x/gong.wav")), "GONG");
    }
}
