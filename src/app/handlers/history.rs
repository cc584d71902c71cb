//! Handler für Undo/Redo-Operationen.

use crate::app::history::Snapshot;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;

/// Führt einen Undo-Schritt aus; ohne History `NothingTo`.
pub fn undo(state: &mut AppState) -> Result<CommandReport, GraphError> {
    let current = Snapshot::from_state(state);
    let Some(prev) = state.history.pop_undo_with_current(current) else {
        log::debug!("Undo: nichts zu tun");
        return Err(GraphError::NothingTo { action: "Undo" });
    };
    prev.apply_to(state);
    log::info!("Undo ausgeführt");
    Ok(CommandReport::new("Undo ausgeführt"))
}

/// Führt einen Redo-Schritt aus; ohne History `NothingTo`.
pub fn redo(state: &mut AppState) -> Result<CommandReport, GraphError> {
    let current = Snapshot::from_state(state);
    let Some(next) = state.history.pop_redo_with_current(current) else {
        log::debug!("Redo: nichts zu tun");
        return Err(GraphError::NothingTo { action: "Redo" });
    };
    next.apply_to(state);
    log::info!("Redo ausgeführt");
    Ok(CommandReport::new("Redo ausgeführt"))
}
