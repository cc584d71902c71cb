//! Writer für das JSON-Graphformat.

use crate::core::{GraphError, PlanarGraph};

use super::{EdgeRecord, GraphDocument, VertexRecord};

/// Baut das serialisierbare Dokument (Vertices und Kanten nach ID sortiert).
pub fn graph_document(graph: &PlanarGraph) -> GraphDocument {
    let vertices = graph
        .vertices()
        .map(|v| VertexRecord {
            id: v.id,
            x: v.position.x,
            y: v.position.y,
            color: v.color.clone(),
            diameter: v.diameter,
        })
        .collect();

    let mut edges: Vec<EdgeRecord> = graph
        .edges()
        .map(|e| EdgeRecord {
            id: e.id,
            u: e.u,
            v: e.v,
        })
        .collect();
    edges.sort_unstable_by_key(|e| e.id);

    GraphDocument {
        vertices,
        edges,
        periphery: graph.periphery_order().to_vec(),
    }
}

/// Schreibt den Graphen als formatiertes JSON.
pub fn write_graph_json(graph: &PlanarGraph) -> Result<String, GraphError> {
    serde_json::to_string_pretty(&graph_document(graph)).map_err(|e| GraphError::Parse {
        message: e.to_string(),
    })
}
