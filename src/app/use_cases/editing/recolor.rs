use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;

/// Setzt die Anzeigefarbe eines Vertex. Geometrie bleibt unberührt.
pub fn recolor_vertex(state: &mut AppState, vertex_id: u64, color: String) -> Result<CommandReport, GraphError> {
    let color = color.trim().to_string();
    if color.is_empty() {
        return Err(GraphError::InvalidParameter {
            name: "color",
            value: color,
        });
    }

    transaction::execute(state, "Color", |graph, _| {
        graph.set_vertex_color(vertex_id, color.as_str())?;
        Ok(CommandReport::new(format!("Vertex {} eingefärbt ({})", vertex_id, color))
            .with_vertices(vec![vertex_id]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::start_triangle;

    #[test]
    fn recolor_keeps_geometry() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        let position = state.graph.position(2);

        let report = recolor_vertex(&mut state, 2, "  #00FF00 ".into()).expect("Farbe erwartet");

        assert_eq!(report.affected_vertex_ids, vec![2]);
        assert_eq!(state.graph.vertex(2).map(|v| v.color.as_str()), Some("#00FF00"));
        assert_eq!(state.graph.position(2), position);
    }

    #[test]
    fn blank_color_and_unknown_vertex_are_rejected() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");

        assert!(matches!(
            recolor_vertex(&mut state, 2, "   ".into()),
            Err(GraphError::InvalidParameter { name: "color", .. })
        ));
        assert!(matches!(
            recolor_vertex(&mut state, 9, "#000000".into()),
            Err(GraphError::NotFound { id: 9, .. })
        ));
    }
}
