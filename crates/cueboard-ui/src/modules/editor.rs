// crates/cueboard-ui/src/modules/editor.rs
//
// The crop editor: title field, crop track with two drag handles, bounded
// preview, confirm/cancel. Shown in place of the grid while a session is
// open.
//
// The module never mutates the session directly — handle presses, pointer
// moves and releases all go out as commands and come back through the
// SelectionController, so the rendered handles always reflect the last
// processed event.

use super::BoardModule;
use crate::helpers::format::sanitize_label;
use crate::theme::{
    ACCENT, ACCENT_HOVER, DARK_BG_0, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, SECONDARY,
    WAVEFORM,
};
use cueboard_core::helpers::time::{format_duration, format_offset};
use cueboard_core::state::MAX_LABEL_LEN;
use cueboard_core::{BoardCommand, BoardState, ClipBounds, Handle, TrackGeometry};
use egui::{
    Align2, Color32, FontId, Id, Pos2, Rect, RichText, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use uuid::Uuid;

const EDITOR_WIDTH: f32 = 520.0;
const TRACK_HEIGHT: f32 = 56.0;
/// Interactive strip width around each handle. Wider than the painted bar so
/// the handles stay grabbable at small selections.
const HANDLE_GRIP: f32 = 12.0;

pub struct EditorModule {
    /// Local text-edit buffer, resynced whenever a new session opens.
    label_buf:     String,
    label_session: Option<Uuid>,
}

impl EditorModule {
    pub fn new() -> Self {
        Self { label_buf: String::new(), label_session: None }
    }
}

impl BoardModule for EditorModule {
    fn name(&self) -> &str { "Editor" }

    fn ui(&mut self, ui: &mut Ui, state: &BoardState, cmd: &mut Vec<BoardCommand>) {
        let Some(session) = &state.editing else { return };

        if self.label_session != Some(session.id) {
            self.label_session = Some(session.id);
            self.label_buf = session.label.clone();
        }

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            cmd.push(BoardCommand::CancelEdit);
        }

        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(EDITOR_WIDTH);

            egui::Frame::new()
                .fill(DARK_BG_2)
                .stroke(Stroke::new(1.0, DARK_BORDER))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    // ── Header ───────────────────────────────────────────────
                    ui.label(RichText::new("CONFIGURE SOUND").size(14.0).strong().color(ACCENT));
                    ui.label(
                        RichText::new(session.path.display().to_string())
                            .size(9.0)
                            .color(DARK_TEXT_DIM),
                    );
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);

                    // ── Title ────────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("TITLE").size(10.0).color(DARK_TEXT_DIM));
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.label_buf)
                                .char_limit(MAX_LABEL_LEN)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(220.0),
                        );
                        if resp.changed() {
                            self.label_buf = sanitize_label(&self.label_buf);
                            cmd.push(BoardCommand::SetLabel(self.label_buf.clone()));
                        }
                    });
                    ui.add_space(12.0);

                    // ── Crop region ──────────────────────────────────────────
                    ui.label(RichText::new("CROP REGION").size(10.0).color(DARK_TEXT_DIM));
                    ui.add_space(4.0);

                    if let Some(err) = &session.probe_error {
                        ui.add_space(8.0);
                        ui.label(RichText::new("SOURCE REJECTED").size(11.0).color(SECONDARY));
                        ui.label(RichText::new(err.as_str()).size(9.0).color(DARK_TEXT_DIM));
                        ui.add_space(8.0);
                    } else if let Some(bounds) = session.bounds {
                        self.crop_track(ui, session.id, &bounds, &session.peaks, cmd);
                        if session.selection.is_dragging() && !ui.input(|i| i.pointer.any_down()) {
                            // Release arrived without a drag-stop event on the
                            // handle (focus loss, window switch) — end the
                            // session anyway so the drag can't stick.
                            cmd.push(BoardCommand::CropDragEnded);
                        }
                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(format!(
                                "SELECTION {}   ·   SOURCE {}",
                                format_offset(bounds.span()),
                                format_duration(bounds.duration()),
                            ))
                            .size(10.0)
                            .monospace()
                            .color(DARK_TEXT_DIM),
                        );
                    } else {
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(
                                RichText::new("ANALYZING SOURCE…").size(10.0).color(DARK_TEXT_DIM),
                            );
                        });
                        ui.add_space(8.0);
                    }

                    ui.add_space(12.0);

                    // ── Preview ──────────────────────────────────────────────
                    let can_preview = session.bounds.is_some();
                    let preview_label = if state.preview_playing {
                        "⏹ STOP PREVIEW"
                    } else {
                        "▶ PREVIEW CLIP"
                    };
                    let preview_btn = egui::Button::new(
                        RichText::new(preview_label)
                            .size(11.0)
                            .color(if state.preview_playing { Color32::BLACK } else { ACCENT }),
                    )
                    .fill(if state.preview_playing { ACCENT } else { DARK_BG_0 })
                    .stroke(Stroke::new(1.0, ACCENT))
                    .min_size(egui::vec2(160.0, 28.0));
                    if ui.add_enabled(can_preview, preview_btn).clicked() {
                        cmd.push(BoardCommand::TogglePreview);
                    }

                    ui.add_space(14.0);
                    ui.separator();
                    ui.add_space(8.0);

                    // ── Actions ──────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        if ui
                            .add(egui::Button::new(RichText::new("CANCEL").size(11.0))
                                .min_size(egui::vec2(110.0, 26.0)))
                            .clicked()
                        {
                            cmd.push(BoardCommand::CancelEdit);
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let confirm = egui::Button::new(
                                RichText::new("CONFIRM").size(11.0).color(Color32::BLACK),
                            )
                            .fill(ACCENT)
                            .min_size(egui::vec2(110.0, 26.0));
                            if ui.add_enabled(can_preview, confirm).clicked() {
                                cmd.push(BoardCommand::SaveSound);
                            }
                        });
                    });
                });
        });
    }
}

impl EditorModule {
    /// Track background, waveform, shaded selection and the two drag handles.
    fn crop_track(
        &self,
        ui:         &mut Ui,
        session_id: Uuid,
        bounds:     &ClipBounds,
        peaks:      &[f32],
        cmd:        &mut Vec<BoardCommand>,
    ) {
        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, TRACK_HEIGHT), Sense::hover());
        // `.clone()` gives an owned Painter (egui Painter is Arc-backed) so ui
        // stays free for the interact calls below.
        let painter = ui.painter().clone();
        let track = TrackGeometry::new(rect.left(), rect.width());

        painter.rect_filled(rect, 3.0, DARK_BG_0);
        draw_waveform(&painter, rect, peaks);

        let start_x = rect.left() + bounds.start_fraction() * rect.width();
        let end_x   = rect.left() + bounds.end_fraction() * rect.width();

        // Shade the selected range, dim everything outside it.
        let selected = Rect::from_min_max(
            Pos2::new(start_x, rect.top()),
            Pos2::new(end_x, rect.bottom()),
        );
        painter.rect_filled(selected, 0.0, ACCENT.linear_multiply(0.15));
        for cut in [
            Rect::from_min_max(rect.min, Pos2::new(start_x, rect.bottom())),
            Rect::from_min_max(Pos2::new(end_x, rect.top()), rect.max),
        ] {
            painter.rect_filled(cut, 0.0, Color32::from_black_alpha(140));
        }
        painter.rect_stroke(rect, 3.0, Stroke::new(1.0, DARK_BORDER), StrokeKind::Inside);

        for (handle, x, salt, time) in [
            (Handle::Start, start_x, "crop_handle_l", bounds.start()),
            (Handle::End,   end_x,   "crop_handle_r", bounds.end()),
        ] {
            let grip = Rect::from_center_size(
                Pos2::new(x, rect.center().y),
                Vec2::new(HANDLE_GRIP, rect.height() + 10.0),
            );
            let resp = ui.interact(grip, Id::new((salt, session_id)), Sense::drag());

            let active = resp.dragged() || resp.hovered();
            let color = if active { ACCENT_HOVER } else { ACCENT };
            painter.rect_filled(
                Rect::from_center_size(grip.center(), Vec2::new(4.0, grip.height())),
                2.0,
                color,
            );
            painter.text(
                Pos2::new(x, rect.bottom() + 4.0),
                Align2::CENTER_TOP,
                format_offset(time),
                FontId::monospace(9.0),
                if active { ACCENT_HOVER } else { DARK_TEXT_DIM },
            );

            if resp.hovered() || resp.dragged() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            }
            if resp.drag_started() {
                cmd.push(BoardCommand::CropDragStarted(handle));
            }
            if resp.dragged() {
                if let Some(pointer) = resp.interact_pointer_pos() {
                    cmd.push(BoardCommand::CropDragMoved { x: pointer.x, track });
                }
            }
            if resp.drag_stopped() {
                cmd.push(BoardCommand::CropDragEnded);
            }
        }

        // Room for the time labels painted under the track.
        ui.add_space(16.0);
    }
}

fn draw_waveform(painter: &egui::Painter, rect: Rect, peaks: &[f32]) {
    if peaks.is_empty() {
        return;
    }
    let mid_y = rect.center().y;
    let visible = (rect.width() as usize).min(peaks.len()).max(1);
    let step = peaks.len() as f32 / visible as f32;
    for i in 0..visible {
        let idx = ((i as f32 * step) as usize).min(peaks.len() - 1);
        let half = peaks[idx] * (rect.height() * 0.44);
        let x = rect.left() + i as f32 * (rect.width() / visible as f32);
        painter.line_segment(
            [Pos2::new(x, mid_y - half), Pos2::new(x, mid_y + half)],
            Stroke::new(1.0, WAVEFORM),
        );
    }
}
