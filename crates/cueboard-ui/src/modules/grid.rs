// crates/cueboard-ui/src/modules/grid.rs
//
// The pad grid: one custom-painted button per saved sound. A press fires the
// sound and lights the pad for a short flash window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::BoardModule;
use crate::theme::{
    ACCENT, ACCENT_DIM, DARK_BORDER, DARK_TEXT_DIM, SECONDARY, SECONDARY_DIM,
};
use cueboard_core::helpers::time::format_duration;
use cueboard_core::{BoardCommand, BoardState};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

const COLUMNS: usize = 3;
const PAD_HEIGHT: f32 = 80.0;
const PAD_GAP: f32 = 12.0;

/// How long a pad stays lit after a trigger.
const FLASH_SECS: f64 = 0.5;

pub struct GridModule {
    /// Per-trigger flash start, keyed by sound id. A re-trigger overwrites
    /// the entry, so the latest press owns the whole flash window — expiry is
    /// decided per entry, never by comparing against a shared "active pad".
    flashes: HashMap<Uuid, Instant>,
}

impl GridModule {
    pub fn new() -> Self {
        Self { flashes: HashMap::new() }
    }

    fn flash_active(&self, id: Uuid) -> bool {
        self.flashes
            .get(&id)
            .is_some_and(|t| t.elapsed().as_secs_f64() < FLASH_SECS)
    }
}

impl BoardModule for GridModule {
    fn name(&self) -> &str { "Pads" }

    fn ui(&mut self, ui: &mut Ui, state: &BoardState, cmd: &mut Vec<BoardCommand>) {
        self.flashes.retain(|_, t| t.elapsed().as_secs_f64() < FLASH_SECS);
        if !self.flashes.is_empty() {
            // Keep repainting until the last flash decays.
            ui.ctx().request_repaint_after(Duration::from_millis(33));
        }

        if state.sounds.is_empty() {
            ui.add_space(60.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("◉").size(34.0).color(DARK_BORDER));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("NO SOUNDS ARMED\nDrop an audio file or use Import")
                        .size(11.0)
                        .color(DARK_TEXT_DIM),
                );
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(PAD_GAP);
            let pad_w = ((ui.available_width() - PAD_GAP * (COLUMNS - 1) as f32)
                / COLUMNS as f32)
                .max(120.0);

            let mut to_delete: Option<Uuid> = None;

            for (row_i, row) in state.sounds.chunks(COLUMNS).enumerate() {
                ui.horizontal(|ui| {
                    for (col_i, sound) in row.iter().enumerate() {
                        // Pads alternate between the two console accents.
                        let idx = row_i * COLUMNS + col_i;
                        let (accent, dim) = if idx % 2 == 0 {
                            (ACCENT, ACCENT_DIM)
                        } else {
                            (SECONDARY, SECONDARY_DIM)
                        };

                        let (rect, resp) = ui.allocate_exact_size(
                            Vec2::new(pad_w, PAD_HEIGHT),
                            Sense::click(),
                        );
                        let painter = ui.painter();

                        let lit = self.flash_active(sound.id);
                        let fill = if lit {
                            accent
                        } else if resp.hovered() {
                            accent.linear_multiply(0.12)
                        } else {
                            Color32::TRANSPARENT
                        };
                        painter.rect_filled(rect, 2.0, fill);
                        painter.rect_stroke(
                            rect,
                            2.0,
                            Stroke::new(1.0, if lit || resp.hovered() { accent } else { dim }),
                            egui::StrokeKind::Inside,
                        );

                        let text_color = if lit { Color32::BLACK } else { accent };
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            &sound.label,
                            FontId::monospace(13.0),
                            text_color,
                        );

                        // Span badge — how much of the clip this pad fires.
                        if let Some(b) = sound.bounds {
                            painter.text(
                                rect.right_bottom() - Vec2::new(6.0, 4.0),
                                Align2::RIGHT_BOTTOM,
                                format_duration(b.span()),
                                FontId::monospace(9.0),
                                if lit { Color32::BLACK } else { DARK_TEXT_DIM },
                            );
                        }

                        draw_corner_decor(painter, rect, text_color);

                        if resp.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if resp.clicked() {
                            self.flashes.insert(sound.id, Instant::now());
                            cmd.push(BoardCommand::TriggerSound(sound.id));
                        }

                        resp.context_menu(|ui| {
                            ui.set_min_width(140.0);
                            if ui.button("🗑  Remove pad").clicked() {
                                to_delete = Some(sound.id);
                                ui.close();
                            }
                            ui.separator();
                            ui.label(
                                RichText::new(sound.label.as_str())
                                    .size(10.0)
                                    .color(DARK_TEXT_DIM),
                            );
                            if let Some(b) = sound.bounds {
                                ui.label(
                                    RichText::new(format!(
                                        "{:.1}s – {:.1}s of {}",
                                        b.start(),
                                        b.end(),
                                        format_duration(b.duration()),
                                    ))
                                    .size(10.0)
                                    .color(DARK_TEXT_DIM),
                                );
                            }
                        });
                    }
                });
                ui.add_space(PAD_GAP);
            }

            if let Some(id) = to_delete {
                self.flashes.remove(&id);
                cmd.push(BoardCommand::DeleteSound(id));
            }
        });
    }
}

/// Two small L-shaped corner marks, top-left and bottom-right.
fn draw_corner_decor(painter: &egui::Painter, rect: Rect, color: Color32) {
    let len = 6.0;
    let inset = 4.0;
    let stroke = Stroke::new(1.0, color);

    let tl = rect.min + Vec2::splat(inset);
    painter.line_segment([tl, tl + Vec2::new(len, 0.0)], stroke);
    painter.line_segment([tl, tl + Vec2::new(0.0, len)], stroke);

    let br = rect.max - Vec2::splat(inset);
    painter.line_segment([br, br - Vec2::new(len, 0.0)], stroke);
    painter.line_segment([br, Pos2::new(br.x, br.y - len)], stroke);
}
