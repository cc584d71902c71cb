use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::{GraphError, PlanarGraph};
use crate::geometry::{initial_triangle, StartVertexStyle};

/// Ersetzt den Graphen durch das gleichseitige Start-Dreieck.
///
/// Die ID-Zähler laufen weiter; der vorherige Graph bleibt per Undo erreichbar.
pub fn start_triangle(state: &mut AppState) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "StartTriangle", |graph, ctx| {
        let (next_vertex_id, next_edge_id) = (graph.peek_next_vertex_id(), graph.peek_next_edge_id());
        *graph = PlanarGraph::new();
        graph.reserve_ids(next_vertex_id, next_edge_id);
        let options = ctx.options;
        let first_id = graph.peek_next_vertex_id();
        let styles = [0_u64, 1, 2].map(|offset| StartVertexStyle {
            color: options.palette_color(offset as usize),
            diameter: options.diameter_for_vertex(first_id + offset),
        });

        let ids = initial_triangle(
            graph,
            options.start_center(),
            options.geometry.default_edge_length,
            styles,
        )?;
        Ok(CommandReport::new("Start-Dreieck angelegt").with_vertices(ids.to_vec()))
    })
}
