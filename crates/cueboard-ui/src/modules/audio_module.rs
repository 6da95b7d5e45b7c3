// crates/cueboard-ui/src/modules/audio_module.rs
//
// AudioModule owns the per-frame audio housekeeping.
// Non-rendering module — tick() is called every frame from app.rs after
// commands are processed. No egui panel is shown.

use super::BoardModule;
use crate::context::AppContext;
use cueboard_core::{BoardCommand, BoardState};
use egui::Ui;

pub struct AudioModule;

impl AudioModule {
    pub fn new() -> Self { Self }

    /// Called every frame after commands are processed. Syncs volume/mute
    /// onto live sinks, then polls both players' position monitors so
    /// bounded playback stops at its end offset.
    pub fn tick(&mut self, state: &BoardState, ctx: &mut AppContext) {
        let volume = if state.muted { 0.0 } else { state.volume };
        ctx.preview.set_volume(volume);
        ctx.pads.set_volume(volume);

        ctx.preview.tick();
        ctx.pads.tick();
    }
}

impl BoardModule for AudioModule {
    fn name(&self) -> &str { "Audio" }

    fn ui(&mut self, _ui: &mut Ui, _state: &BoardState, _cmd: &mut Vec<BoardCommand>) {
        // No UI panel — driven entirely by tick().
    }
}
