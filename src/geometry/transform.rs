//! Globale Transformationen: Drehen, Skalieren, Einpassen, Start-Dreieck.

use glam::DVec2;

use crate::core::{GraphError, PlanarGraph};

/// Dreht um `rotation_deg` und skaliert um `scale` relativ zu `center`.
///
/// Alle Vertices werden verschoben; die Adjazenz wird je Vertex neu sortiert.
pub fn rotate_and_scale(
    graph: &mut PlanarGraph,
    rotation_deg: f64,
    scale: f64,
    center: DVec2,
) -> Result<(), GraphError> {
    if !rotation_deg.is_finite() {
        return Err(GraphError::InvalidParameter {
            name: "rotation_deg",
            value: rotation_deg.to_string(),
        });
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GraphError::InvalidParameter {
            name: "scale",
            value: scale.to_string(),
        });
    }
    if !center.is_finite() {
        return Err(GraphError::InvalidParameter {
            name: "center",
            value: format!("{center:?}"),
        });
    }

    let rotation = DVec2::from_angle(rotation_deg.to_radians());
    let moves: Vec<(u64, DVec2)> = graph
        .vertices()
        .map(|v| (v.id, center + rotation.rotate(v.position - center) * scale))
        .collect();
    apply_moves(graph, moves)
}

/// Skaliert und verschiebt den Graphen gleichmäßig in das Rechteck `min..max`.
///
/// `padding` ist der Anteil des Rechtecks, den die Bounding-Box danach
/// höchstens einnimmt.
pub fn fit_to_bounds(
    graph: &mut PlanarGraph,
    min: DVec2,
    max: DVec2,
    padding: f64,
) -> Result<(), GraphError> {
    let target = max - min;
    if !target.is_finite() || target.x <= 0.0 || target.y <= 0.0 {
        return Err(GraphError::InvalidParameter {
            name: "bounds",
            value: format!("{min:?}..{max:?}"),
        });
    }
    if !(padding > 0.0 && padding <= 1.0) {
        return Err(GraphError::InvalidParameter {
            name: "padding",
            value: padding.to_string(),
        });
    }
    let Some((box_min, box_max)) = graph.bounding_box() else {
        return Err(GraphError::Degenerate { vertex_count: 0 });
    };

    let extent = box_max - box_min;
    let box_center = (box_min + box_max) / 2.0;
    let target_center = (min + max) / 2.0;

    let scale_x = if extent.x > f64::EPSILON { target.x / extent.x } else { f64::INFINITY };
    let scale_y = if extent.y > f64::EPSILON { target.y / extent.y } else { f64::INFINITY };
    let mut scale = scale_x.min(scale_y) * padding;
    if !scale.is_finite() {
        scale = 1.0;
    }

    let moves: Vec<(u64, DVec2)> = graph
        .vertices()
        .map(|v| (v.id, target_center + (v.position - box_center) * scale))
        .collect();
    apply_moves(graph, moves)
}

fn apply_moves(graph: &mut PlanarGraph, moves: Vec<(u64, DVec2)>) -> Result<(), GraphError> {
    for (id, position) in moves {
        graph.set_vertex_position(id, position)?;
    }
    Ok(())
}

/// Darstellungsattribute eines Start-Vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct StartVertexStyle {
    /// Anzeigefarbe
    pub color: String,
    /// Anzeigedurchmesser
    pub diameter: f64,
}

/// Legt ein gleichseitiges Start-Dreieck mit Kantenlänge `edge_length` um `center` an.
///
/// Der Graph muss leer sein. Ecken bei 90°, 210° und 330°, Peripherie
/// gegen den Uhrzeigersinn.
pub fn initial_triangle(
    graph: &mut PlanarGraph,
    center: DVec2,
    edge_length: f64,
    styles: [StartVertexStyle; 3],
) -> Result<[u64; 3], GraphError> {
    if !graph.is_empty() {
        return Err(GraphError::InvalidParameter {
            name: "graph",
            value: format!("{} Vertices vorhanden", graph.vertex_count()),
        });
    }
    if !edge_length.is_finite() || edge_length <= 0.0 {
        return Err(GraphError::InvalidParameter {
            name: "edge_length",
            value: edge_length.to_string(),
        });
    }

    let radius = edge_length / 3.0_f64.sqrt();
    let mut ids = [0_u64; 3];
    for (slot, (angle_deg, style)) in ids.iter_mut().zip([90.0_f64, 210.0, 330.0].into_iter().zip(styles)) {
        let position = center + DVec2::from_angle(angle_deg.to_radians()) * radius;
        *slot = graph.add_vertex(position, style.color, style.diameter);
    }

    graph.add_edge(ids[0], ids[1])?;
    graph.add_edge(ids[1], ids[2])?;
    graph.add_edge(ids[2], ids[0])?;
    graph.set_periphery(ids.to_vec());
    Ok(ids)
}
