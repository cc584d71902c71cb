use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;
use crate::geometry::remove_and_retriangulate;

/// Entfernt einen Vertex samt Kanten und trianguliert das Loch neu.
pub fn remove_vertex(state: &mut AppState, vertex_id: u64) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "Remove", |graph, ctx| {
        let eps = ctx.options.geometry.convexity_epsilon;
        let (hole, retriangulation) = remove_and_retriangulate(graph, vertex_id, eps)?;

        let removed_edges: Vec<u64> = hole.removed_edges.iter().map(|e| e.id).collect();
        let added_edges: Vec<u64> = retriangulation
            .added_edges
            .iter()
            .filter_map(|&(u, v)| graph.edge_between(u, v).map(|e| e.id))
            .collect();

        Ok(CommandReport::new(format!(
            "Vertex {} entfernt, {} Kanten neu",
            vertex_id,
            added_edges.len()
        ))
        .with_vertices(hole.ring.clone())
        .with_edges(added_edges)
        .with_removed(vec![vertex_id], removed_edges))
    })
}
