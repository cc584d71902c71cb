//! Parser für das JSON-Graphformat.

use std::collections::{BTreeSet, HashSet};

use glam::DVec2;

use crate::core::{edge_key, Edge, GraphError, InvariantViolation, PlanarGraph, Vertex};
use crate::geometry::{check_global_invariants, GeometryConstraints};

use super::GraphDocument;

/// Parsed einen Graphen aus JSON und prüft alle globalen Invarianten.
pub fn parse_graph_json(json: &str) -> Result<PlanarGraph, GraphError> {
    parse_graph_json_with(json, &GeometryConstraints::default())
}

/// Wie [`parse_graph_json`], mit expliziten Constraint-Parametern.
pub fn parse_graph_json_with(
    json: &str,
    constraints: &GeometryConstraints,
) -> Result<PlanarGraph, GraphError> {
    let document: GraphDocument = serde_json::from_str(json).map_err(|e| GraphError::Parse {
        message: e.to_string(),
    })?;

    let violations = structural_violations(&document);
    if !violations.is_empty() {
        return Err(GraphError::Validation { violations });
    }

    let graph = build_graph(document)?;
    check_global_invariants(&graph, constraints)
        .map_err(|violations| GraphError::Validation { violations })?;

    log::info!(
        "Graph importiert: {} Vertices, {} Kanten",
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Strukturfehler, die den Aufbau des Graphen verhindern würden.
fn structural_violations(document: &GraphDocument) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let mut vertex_ids = BTreeSet::new();
    for vertex in &document.vertices {
        if !vertex_ids.insert(vertex.id) {
            violations.push(InvariantViolation::DuplicateVertexId { id: vertex.id });
        }
        if !vertex.x.is_finite() || !vertex.y.is_finite() {
            violations.push(InvariantViolation::NonFinitePosition { id: vertex.id });
        }
    }

    let mut edge_ids = HashSet::new();
    let mut pairs = HashSet::new();
    for edge in &document.edges {
        if !edge_ids.insert(edge.id) {
            violations.push(InvariantViolation::DuplicateEdgeId { id: edge.id });
        }
        if edge.u == edge.v {
            violations.push(InvariantViolation::SelfLoop {
                id: edge.id,
                vertex: edge.u,
            });
            continue;
        }
        if !vertex_ids.contains(&edge.u) || !vertex_ids.contains(&edge.v) {
            violations.push(InvariantViolation::UnknownEdgeEndpoint {
                u: edge.u,
                v: edge.v,
            });
            continue;
        }
        let (u, v) = edge_key(edge.u, edge.v);
        if !pairs.insert((u, v)) {
            violations.push(InvariantViolation::DuplicateEdge { u, v });
        }
    }

    violations
}

fn build_graph(document: GraphDocument) -> Result<PlanarGraph, GraphError> {
    let mut graph = PlanarGraph::new();
    for record in document.vertices {
        graph.restore_vertex(Vertex::new(
            record.id,
            DVec2::new(record.x, record.y),
            record.color,
            record.diameter,
        ))?;
    }
    for record in document.edges {
        graph.restore_edge(Edge::new(record.id, record.u, record.v))?;
    }
    graph.set_periphery(document.periphery);
    graph.ensure_spatial_index();
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r##"{
        "vertices": [
            {"id": 1, "x": 0.0, "y": 0.0, "color": "#FF6B6B", "diameter": 30.0},
            {"id": 2, "x": 80.0, "y": 0.0, "color": "#4ECDC4", "diameter": 30.0},
            {"id": 3, "x": 40.0, "y": 69.282, "color": "#45B7D1", "diameter": 30.0}
        ],
        "edges": [
            {"id": 1, "u": 1, "v": 2},
            {"id": 2, "u": 2, "v": 3},
            {"id": 3, "u": 3, "v": 1}
        ],
        "periphery": [1, 2, 3]
    }"##;

    #[test]
    fn parses_valid_triangle() {
        let graph = parse_graph_json(TRIANGLE).expect("Dreieck sollte gültig sein");

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.periphery_order(), &[1, 2, 3]);
        assert!(graph.vertex(1).is_some_and(|v| v.on_periphery));
        assert_eq!(graph.peek_next_vertex_id(), 4);
        assert_eq!(graph.peek_next_edge_id(), 4);
    }

    #[test]
    fn clockwise_periphery_is_validation_error() {
        let json = TRIANGLE.replace("[1, 2, 3]", "[3, 2, 1]");
        assert!(matches!(
            parse_graph_json(&json),
            Err(GraphError::Validation { .. })
        ));
    }

    #[test]
    fn structural_errors_are_collected() {
        let json = TRIANGLE
            .replace(r#"{"id": 3, "u": 3, "v": 1}"#, r#"{"id": 2, "u": 3, "v": 3}"#);
        let Err(GraphError::Validation { violations }) = parse_graph_json(&json) else {
            panic!("Validierungsfehler erwartet");
        };

        assert!(violations.contains(&InvariantViolation::DuplicateEdgeId { id: 2 }));
        assert!(violations.contains(&InvariantViolation::SelfLoop { id: 2, vertex: 3 }));
    }

    #[test]
    fn unknown_fields_and_bad_syntax_are_parse_errors() {
        let json = TRIANGLE.replace("\"periphery\"", "\"extra\": 1, \"periphery\"");
        assert!(matches!(parse_graph_json(&json), Err(GraphError::Parse { .. })));
        assert!(matches!(parse_graph_json("{"), Err(GraphError::Parse { .. })));
    }

    #[test]
    fn empty_document_is_empty_graph() {
        let graph = parse_graph_json(r#"{"vertices": [], "edges": [], "periphery": []}"#).unwrap();
        assert!(graph.is_empty());
    }
}
