use glam::DVec2;

use crate::app::transaction::{self, CommandContext};
use crate::app::{AppState, CommandReport};
use crate::core::{GraphError, PlanarGraph};
use crate::geometry::{
    apply_insertion, candidate_for_span, relax, resolve_anchor, validate_insertion,
    InsertionAnchor, InsertionOutcome,
};

/// Fügt einen Vertex am Anker ein (berechnete oder erzwungene Position).
pub fn add_vertex(
    state: &mut AppState,
    anchor: InsertionAnchor,
    position: Option<DVec2>,
    color: Option<String>,
) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "Add", |graph, ctx| {
        let outcome = insert_at_anchor(graph, ctx, &anchor, position, color)?;
        Ok(CommandReport::new(format!(
            "Vertex {} eingefügt",
            outcome.vertex_id
        ))
        .with_vertices(vec![outcome.vertex_id])
        .with_edges(outcome.edge_ids))
    })
}

/// Einfügen auf dem Scratch-Graphen; von Add und Grow genutzt.
pub(super) fn insert_at_anchor(
    graph: &mut PlanarGraph,
    ctx: &mut CommandContext<'_>,
    anchor: &InsertionAnchor,
    position: Option<DVec2>,
    color: Option<String>,
) -> Result<InsertionOutcome, GraphError> {
    let options = ctx.options;
    let limit = options.max_vertices;
    if graph.vertex_count() >= limit {
        return Err(GraphError::CapacityExceeded { limit });
    }

    let constraints = &options.geometry;
    let span = resolve_anchor(graph, anchor)?;
    let candidate = match position {
        Some(p) => p,
        None => candidate_for_span(graph, &span, constraints)?,
    };

    let deferred = match validate_insertion(graph, &span, candidate, constraints) {
        Ok(()) => None,
        Err(e @ GraphError::GeometryViolation(_)) if options.relax_on_add => Some(e),
        Err(e) => return Err(e),
    };

    let color = color.unwrap_or_else(|| ctx.random_palette_color());
    let diameter = options.diameter_for_vertex(graph.peek_next_vertex_id());
    let outcome = apply_insertion(graph, &span, candidate, color, diameter)?;

    if let Some(violation) = deferred {
        log::debug!("Einfügung verletzt Constraints, versuche Relaxation: {}", violation);
        // Scheitert die Relaxation, zählt die ursprüngliche Verletzung
        if let Err(nc) = relax(graph, constraints) {
            log::debug!("Relaxation gescheitert: {}", nc);
            return Err(violation);
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::start_triangle;
    use crate::core::GeometryViolationKind;
    use crate::shared::EditorOptions;
    use std::sync::Arc;

    fn started() -> AppState {
        let mut state = AppState::with_options(EditorOptions {
            rng_seed: Some(5),
            ..EditorOptions::default()
        });
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        state
    }

    #[test]
    fn add_on_periphery_edge_creates_apex() {
        let mut state = started();
        let report = add_vertex(
            &mut state,
            InsertionAnchor::Edge { u: 3, v: 2 },
            None,
            Some("#123456".into()),
        )
        .expect("Einfügung erwartet");

        assert_eq!(report.affected_vertex_ids, vec![4]);
        assert_eq!(report.affected_edge_ids.len(), 2);
        assert!(state.graph.has_edge(4, 2));
        assert!(state.graph.has_edge(4, 3));
        assert_eq!(state.graph.periphery_order().len(), 4);
        assert_eq!(state.graph.vertex(4).map(|v| v.color.as_str()), Some("#123456"));
    }

    #[test]
    fn forced_far_position_is_rejected_without_change() {
        let mut state = started();
        let before = Arc::clone(&state.graph);

        let result = add_vertex(
            &mut state,
            InsertionAnchor::Edge { u: 2, v: 3 },
            Some(DVec2::new(400.0, -5_000.0)),
            None,
        );

        let Err(GraphError::GeometryViolation(violation)) = &result else {
            panic!("Geometrie-Verletzung erwartet: {result:?}");
        };
        assert_eq!(violation.kind, GeometryViolationKind::AngleTooSmall);
        assert!(Arc::ptr_eq(&before, &state.graph));
        assert_eq!(state.history.undo_len(), 1);
    }

    #[test]
    fn unknown_anchor_vertex_is_not_found() {
        let mut state = started();
        assert!(matches!(
            add_vertex(&mut state, InsertionAnchor::Vertex { id: 99 }, None, None),
            Err(GraphError::NotFound { .. })
        ));
        assert_eq!(state.graph.vertex_count(), 3);
    }

    #[test]
    fn capacity_limit_is_enforced() {
        let mut state = AppState::with_options(EditorOptions {
            max_vertices: 3,
            ..EditorOptions::default()
        });
        start_triangle(&mut state).expect("Start-Dreieck erwartet");

        assert_eq!(
            add_vertex(&mut state, InsertionAnchor::Edge { u: 2, v: 3 }, None, None),
            Err(GraphError::CapacityExceeded { limit: 3 })
        );
    }
}
