// crates/cueboard-ui/src/app.rs
use cueboard_audio::AudioWorker;
use cueboard_core::{BoardCommand, BoardPrefs, BoardState};
use crate::context::AppContext;
use crate::helpers::format::{is_audio_file, AUDIO_EXTENSIONS};
use crate::theme::{configure_style, ACCENT, DARK_TEXT_DIM, SECONDARY};
use crate::modules::{
    audio_module::AudioModule,
    editor::EditorModule,
    grid::GridModule,
    BoardModule,
};
use eframe::egui;
use egui::RichText;
use rfd::FileDialog;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct AppStorage {
    prefs: BoardPrefs,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct CueBoardApp {
    state:   BoardState,
    context: AppContext,
    // Panel modules as concrete types — typos become compile errors instead
    // of a silently blank panel.
    grid:    GridModule,
    editor:  EditorModule,
    /// Stored separately so tick() calls the concrete method, not a trait no-op.
    audio:   AudioModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<BoardCommand>,
}

impl CueBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode — prevents egui overwriting the theme on OS
        // light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let prefs = cc.storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .map(|d| d.prefs)
            .unwrap_or_default();

        Self {
            state:        BoardState::with_prefs(&prefs),
            context:      AppContext::new(AudioWorker::new()),
            grid:         GridModule::new(),
            editor:       EditorModule::new(),
            audio:        AudioModule::new(),
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: BoardCommand) {
        match cmd {
            // ── Intake ───────────────────────────────────────────────────────
            BoardCommand::ImportFile(path) => {
                if self.state.open_editor(path).is_none() {
                    log::debug!("[app] import ignored — editor already open");
                }
            }

            // ── Crop editor ──────────────────────────────────────────────────
            BoardCommand::SetLabel(label) => {
                if let Some(session) = self.state.editing.as_mut() {
                    session.label = label;
                }
            }
            BoardCommand::CropDragStarted(handle) => {
                if let Some(session) = self.state.editing.as_mut() {
                    session.selection.begin(handle);
                }
            }
            BoardCommand::CropDragMoved { x, track } => {
                if let Some(session) = self.state.editing.as_mut() {
                    if let Some(bounds) = session.bounds.as_mut() {
                        session.selection.drag_to(x, track, bounds);
                    }
                }
            }
            BoardCommand::CropDragEnded => {
                if let Some(session) = self.state.editing.as_mut() {
                    session.selection.release();
                }
            }
            BoardCommand::TogglePreview => {
                let Some(session) = self.state.editing.as_ref() else { return };
                let Some(bounds) = session.bounds else { return };
                let key    = session.id;
                let path   = session.path.clone();
                let volume = if self.state.muted { 0.0 } else { self.state.volume };
                match self.context.toggle_preview(key, &path, &bounds, volume) {
                    Ok(playing) => self.state.preview_playing = playing,
                    // A dead preview must not block cropping or saving —
                    // warn and stay stopped.
                    Err(e) => log::warn!("[audio] preview unavailable: {e}"),
                }
            }
            BoardCommand::SaveSound => {
                self.close_editor_session();
                self.state.commit_editing();
            }
            BoardCommand::CancelEdit => {
                self.close_editor_session();
                self.state.cancel_editing();
            }

            // ── Board ────────────────────────────────────────────────────────
            BoardCommand::TriggerSound(id) => {
                let Some(sound) = self.state.sound(id).cloned() else { return };
                let volume = if self.state.muted { 0.0 } else { self.state.volume };
                match self.context.trigger_pad(&sound, volume) {
                    Ok(()) => {
                        self.state.status = Some(format!("FIRED: {}", sound.label));
                    }
                    Err(e) => {
                        log::warn!("[audio] pad unavailable: {e}");
                        self.state.status = Some(format!("AUDIO OFFLINE: {}", sound.label));
                    }
                }
            }
            BoardCommand::DeleteSound(id) => {
                self.context.pads.stop_sound(id);
                self.state.delete_sound(id);
            }

            // ── Transport ────────────────────────────────────────────────────
            BoardCommand::SetVolume(v) => {
                self.state.volume = v.clamp(0.0, 1.0);
            }
            BoardCommand::ToggleMute => {
                self.state.muted = !self.state.muted;
            }
        }
    }

    /// Single teardown path for the open session's runtime resources: the
    /// preview sink and any in-flight handle drag are released no matter how
    /// the editor closes.
    fn close_editor_session(&mut self) {
        self.context.preview.stop();
        self.state.preview_playing = false;
        if let Some(session) = self.state.editing.as_mut() {
            session.selection.release();
        }
    }

    fn poll_audio(&mut self, ctx: &egui::Context) {
        let pending: Vec<_> = self.state.pending_probes.drain(..).collect();
        for (id, path) in pending {
            self.context.worker.probe(id, path);
        }
        self.context.ingest_probe_results(&mut self.state, ctx);
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in files {
            if let Some(path) = file.path {
                if is_audio_file(&path) {
                    self.pending_cmds.push(BoardCommand::ImportFile(path));
                } else {
                    log::debug!("[app] ignoring non-audio drop: {}", path.display());
                }
            }
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for CueBoardApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Only transport prefs persist — the sound list is session-only.
        eframe::set_value(storage, eframe::APP_KEY, &AppStorage { prefs: self.state.prefs() });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.worker.shutdown();
        self.context.preview.stop();
        self.context.pads.stop_all();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.poll_audio(ctx);

        // Mirror the preview player into state before the UI pass so modules
        // render the current play/stop reality.
        self.state.preview_playing = self.context.preview.is_playing();

        egui::TopBottomPanel::top("top_panel")
            .exact_height(40.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new("◢ CUEBOARD").strong().size(15.0).color(ACCENT));
                    ui.label(RichText::new("v0.1").size(9.0).color(DARK_TEXT_DIM));
                    ui.separator();

                    let can_import = self.state.editing.is_none();
                    if ui.add_enabled(can_import, egui::Button::new(RichText::new("＋ IMPORT").size(11.0)))
                        .on_hover_text("Pick an audio file to crop")
                        .clicked()
                    {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Audio", AUDIO_EXTENSIONS)
                            .pick_file()
                        {
                            self.pending_cmds.push(BoardCommand::ImportFile(path));
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let online = self.context.audio_online();
                        ui.label(
                            RichText::new(if online { "ONLINE" } else { "STANDBY" })
                                .monospace()
                                .size(10.0)
                                .color(if online { ACCENT } else { DARK_TEXT_DIM }),
                        );
                        ui.separator();

                        let mut volume = self.state.volume;
                        if ui.add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                            .changed()
                        {
                            self.pending_cmds.push(BoardCommand::SetVolume(volume));
                        }
                        let mute_icon = if self.state.muted { "🔇" } else { "🔊" };
                        if ui.button(mute_icon).clicked() {
                            self.pending_cmds.push(BoardCommand::ToggleMute);
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("status_panel")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let line = self.state.status.as_deref()
                        .unwrap_or("SYSTEM READY — AWAITING INPUT");
                    ui.label(RichText::new(line).monospace().size(9.0).color(DARK_TEXT_DIM));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let voices = self.context.pads.active_count()
                            + usize::from(self.context.preview.is_playing());
                        ui.label(
                            RichText::new(format!("VOICES {voices}"))
                                .monospace()
                                .size(9.0)
                                .color(if voices > 0 { SECONDARY } else { DARK_TEXT_DIM }),
                        );
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.editing.is_some() {
                self.editor.ui(ui, &self.state, &mut self.pending_cmds);
            } else {
                self.grid.ui(ui, &self.state, &mut self.pending_cmds);
            }
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<BoardCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Tick the non-rendering audio module ───────────────────────────────
        self.audio.tick(&self.state, &mut self.context);

        // Keep frames coming while anything plays so the position polls run
        // and bounded stops land on time.
        if self.context.preview.is_playing() || self.context.pads.active_count() > 0 {
            ctx.request_repaint();
        }
    }
}
