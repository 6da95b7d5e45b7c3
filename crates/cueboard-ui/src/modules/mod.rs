// crates/cueboard-ui/src/modules/mod.rs
//
// Module registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing BoardModule
//   2. Add `pub mod mypanel;` below
//   3. Call it from the layout in app.rs

pub mod audio_module;
pub mod editor;
pub mod grid;

use cueboard_core::{BoardCommand, BoardState};
use egui::Ui;

/// Every panel implements this trait.
/// Modules read state, emit commands — they never mutate state directly.
pub trait BoardModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &BoardState, cmd: &mut Vec<BoardCommand>);
}
