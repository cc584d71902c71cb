use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;
use crate::geometry::relax;

/// Relaxiert den gesamten Graphen (Redraw).
///
/// Konvergiert die Relaxation nicht, bleibt der Graph unverändert und der
/// Command scheitert mit `NonConvergent`.
pub fn redraw(state: &mut AppState) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "Redraw", |graph, ctx| {
        let report = relax(graph, &ctx.options.geometry)?;
        Ok(CommandReport::new(format!(
            "Relaxation: {} Schritte, {} Vertices verschoben",
            report.iterations,
            report.moved_vertices.len()
        ))
        .with_vertices(report.moved_vertices))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::start_triangle;

    #[test]
    fn balanced_triangle_stays_in_place() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        let before = state.graph.clone();

        let report = redraw(&mut state).expect("Redraw erwartet");

        assert!(report.affected_vertex_ids.is_empty());
        assert_eq!(*state.graph, *before);
    }
}
