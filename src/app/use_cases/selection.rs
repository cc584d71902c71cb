//! Use-Case-Funktionen für Pick-Selektion. Lesend, verändert nur den Selektionszustand.

use glam::DVec2;

use crate::app::{AppState, CommandReport};
use crate::core::GraphError;
use crate::geometry::predicates::point_segment_distance;

/// Selektiert den nächsten Vertex oder, falls keiner im Radius liegt, die nächste Kante.
///
/// `additive` schaltet einen getroffenen Vertex in der bestehenden
/// Auswahl um; ohne Treffer bleibt die Auswahl dann erhalten.
pub fn select_at(
    state: &mut AppState,
    point: DVec2,
    max_distance: f64,
    additive: bool,
) -> Result<CommandReport, GraphError> {
    if !point.is_finite() {
        return Err(GraphError::InvalidParameter {
            name: "point",
            value: format!("{point:?}"),
        });
    }
    if max_distance.is_nan() || max_distance < 0.0 {
        return Err(GraphError::InvalidParameter {
            name: "max_distance",
            value: max_distance.to_string(),
        });
    }

    let graph = std::sync::Arc::clone(&state.graph);
    let selection = &mut state.selection;

    if let Some(hit) = graph
        .nearest_vertex(point)
        .filter(|m| m.distance <= max_distance)
    {
        let id = hit.vertex_id;
        if additive {
            if !selection.ids_mut().shift_remove(&id) {
                selection.ids_mut().insert(id);
            }
        } else {
            selection.clear();
            selection.ids_mut().insert(id);
        }
        log::debug!("Vertex {} gepickt (Abstand {:.2})", id, hit.distance);
        return Ok(CommandReport::new(format!("Vertex {} selektiert", id))
            .with_vertices(selection.selected_vertex_ids.iter().copied().collect()));
    }

    let nearest_edge = graph
        .edges()
        .filter_map(|e| {
            let distance = point_segment_distance(point, graph.position(e.u)?, graph.position(e.v)?);
            Some((e, distance))
        })
        .filter(|(_, d)| *d <= max_distance)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((edge, _)) = nearest_edge {
        if !additive {
            selection.clear();
        }
        selection.selected_edge = Some(edge.key());
        return Ok(CommandReport::new(format!("Kante {}–{} selektiert", edge.u, edge.v))
            .with_edges(vec![edge.id]));
    }

    if !additive {
        selection.clear();
    }
    Ok(CommandReport::new("Kein Treffer"))
}

/// Hebt die gesamte Selektion auf.
pub fn clear_selection(state: &mut AppState) -> CommandReport {
    state.selection.clear();
    CommandReport::new("Selektion aufgehoben")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::start_triangle;

    fn started() -> AppState {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        state
    }

    #[test]
    fn pick_selects_nearest_vertex() {
        let mut state = started();
        let target = state.graph.position(2).expect("Vertex 2 erwartet");

        select_at(&mut state, target + DVec2::new(3.0, -2.0), 20.0, false).expect("Pick erwartet");
        assert_eq!(state.selection.selected_vertex_ids.iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn additive_pick_toggles() {
        let mut state = started();
        let p1 = state.graph.position(1).expect("Vertex 1 erwartet");
        let p3 = state.graph.position(3).expect("Vertex 3 erwartet");

        select_at(&mut state, p1, 20.0, true).expect("Pick erwartet");
        select_at(&mut state, p3, 20.0, true).expect("Pick erwartet");
        assert_eq!(state.selection.selected_vertex_ids.len(), 2);

        select_at(&mut state, p1, 20.0, true).expect("Pick erwartet");
        assert_eq!(state.selection.selected_vertex_ids.iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn pick_on_edge_midpoint_selects_edge() {
        let mut state = started();
        let mid = (state.graph.position(1).expect("Vertex 1 erwartet")
            + state.graph.position(2).expect("Vertex 2 erwartet"))
            / 2.0;

        select_at(&mut state, mid, 5.0, false).expect("Pick erwartet");
        assert_eq!(state.selection.selected_edge, Some((1, 2)));
        assert!(state.selection.selected_vertex_ids.is_empty());
    }

    #[test]
    fn miss_clears_selection() {
        let mut state = started();
        state.selection.ids_mut().insert(1);

        select_at(&mut state, DVec2::new(-1.0e6, -1.0e6), 20.0, false).expect("Pick erwartet");
        assert!(state.selection.is_empty());
    }
}
