//! Handler für strukturelle und geometrische Graph-Änderungen.

use glam::DVec2;

use crate::app::use_cases;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;
use crate::geometry::InsertionAnchor;

/// Fügt einen Vertex am Anker ein.
pub fn add(
    state: &mut AppState,
    anchor: InsertionAnchor,
    position: Option<DVec2>,
    color: Option<String>,
) -> Result<CommandReport, GraphError> {
    use_cases::editing::add_vertex(state, anchor, position, color)
}

/// Entfernt einen Vertex und schließt das Loch.
pub fn remove(state: &mut AppState, vertex_id: u64) -> Result<CommandReport, GraphError> {
    use_cases::editing::remove_vertex(state, vertex_id)
}

/// Lässt den Graphen an der Peripherie wachsen.
pub fn grow(state: &mut AppState, count: usize, seed: Option<u64>) -> Result<CommandReport, GraphError> {
    use_cases::editing::grow(state, count, seed)
}

/// Ersetzt den Graphen durch das Start-Dreieck.
pub fn start_triangle(state: &mut AppState) -> Result<CommandReport, GraphError> {
    use_cases::editing::start_triangle(state)
}

/// Globale Relaxation.
pub fn redraw(state: &mut AppState) -> Result<CommandReport, GraphError> {
    use_cases::editing::redraw(state)
}

/// Dreht und skaliert den Graphen.
pub fn transform(
    state: &mut AppState,
    rotation_deg: f64,
    scale: f64,
    center: Option<DVec2>,
) -> Result<CommandReport, GraphError> {
    use_cases::editing::transform(state, rotation_deg, scale, center)
}

/// Passt den Graphen in ein Rechteck ein.
pub fn fit_to_bounds(state: &mut AppState, min: DVec2, max: DVec2) -> Result<CommandReport, GraphError> {
    use_cases::editing::fit_to_bounds(state, min, max)
}

/// Färbt einen Vertex um.
pub fn color(state: &mut AppState, vertex_id: u64, color: String) -> Result<CommandReport, GraphError> {
    use_cases::editing::recolor_vertex(state, vertex_id, color)
}
