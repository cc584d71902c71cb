//! Handler für Selektions-Operationen.

use glam::DVec2;

use crate::app::use_cases;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;

/// Selektiert den nächsten Vertex oder die nächste Kante.
pub fn select(
    state: &mut AppState,
    point: DVec2,
    max_distance: f64,
    additive: bool,
) -> Result<CommandReport, GraphError> {
    use_cases::selection::select_at(state, point, max_distance, additive)
}

/// Hebt die aktuelle Selektion auf.
pub fn clear(state: &mut AppState) -> Result<CommandReport, GraphError> {
    Ok(use_cases::selection::clear_selection(state))
}
