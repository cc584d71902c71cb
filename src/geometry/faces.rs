//! Flächen-Traversierung über die winkelsortierte Adjazenz.
//!
//! Nachfolger der Halbkante `u → v` ist `v → w`, wobei `w` der Vorgänger
//! von `u` in der Winkelreihenfolge um `v` ist. Beschränkte Flächen
//! werden so gegen den Uhrzeigersinn umlaufen (positive Fläche), die
//! äußere Fläche im Uhrzeigersinn.

use std::collections::BTreeSet;

use crate::core::PlanarGraph;

use super::predicates::{polygon_signed_area, triangle_angles};

/// Eine beim Umlauf gefundene Fläche.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertices in Umlaufreihenfolge
    pub vertices: Vec<u64>,
    /// Vorzeichenbehaftete Fläche (beschränkte Flächen positiv)
    pub signed_area: f64,
}

impl Face {
    /// Ist die Fläche beschränkt (positiv orientiert)?
    pub fn is_bounded(&self) -> bool {
        self.signed_area > 0.0
    }
}

/// Nachfolger der Halbkante `from → at`.
fn next_half_edge(graph: &PlanarGraph, from: u64, at: u64) -> Option<(u64, u64)> {
    let list = graph.adjacency(at);
    let index = list.iter().position(|e| e.neighbor == from)?;
    let pred = list[(index + list.len() - 1) % list.len()].neighbor;
    Some((at, pred))
}

/// Läuft alle Flächen ab. `None`, wenn die Adjazenz keinen geschlossenen Umlauf erlaubt.
pub fn walk_faces(graph: &PlanarGraph) -> Option<Vec<Face>> {
    let limit = 2 * graph.edge_count() + 1;
    let mut visited: BTreeSet<(u64, u64)> = BTreeSet::new();
    let mut faces = Vec::new();

    for edge in graph.edges() {
        for start in [(edge.u, edge.v), (edge.v, edge.u)] {
            if visited.contains(&start) {
                continue;
            }

            let mut vertices = Vec::new();
            let mut current = start;
            loop {
                if !visited.insert(current) || vertices.len() > limit {
                    return None;
                }
                vertices.push(current.0);
                current = next_half_edge(graph, current.0, current.1)?;
                if current == start {
                    break;
                }
            }

            let points: Option<Vec<_>> = vertices.iter().map(|&id| graph.position(id)).collect();
            faces.push(Face {
                signed_area: polygon_signed_area(&points?),
                vertices,
            });
        }
    }

    Some(faces)
}

/// Alle beschränkten Dreiecksflächen (gegen den Uhrzeigersinn).
pub fn bounded_triangles(graph: &PlanarGraph) -> Vec<[u64; 3]> {
    walk_faces(graph)
        .unwrap_or_default()
        .into_iter()
        .filter(|f| f.is_bounded() && f.vertices.len() == 3)
        .map(|f| [f.vertices[0], f.vertices[1], f.vertices[2]])
        .collect()
}

/// Kleinster Innenwinkel aller Dreiecksflächen in Radiant.
pub fn min_face_angle(graph: &PlanarGraph) -> Option<f64> {
    bounded_triangles(graph)
        .into_iter()
        .filter_map(|[a, b, c]| {
            let angles =
                triangle_angles(graph.position(a)?, graph.position(b)?, graph.position(c)?);
            Some(angles[0].min(angles[1]).min(angles[2]))
        })
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn triangle() -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(1.0, 0.0), "#FF6B6B", 30.0);
        let c = graph.add_vertex(DVec2::new(0.0, 1.0), "#FF6B6B", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);
        graph
    }

    #[test]
    fn triangle_has_one_bounded_and_one_outer_face() {
        let graph = triangle();
        let faces = walk_faces(&graph).expect("Umlauf erwartet");

        assert_eq!(faces.len(), 2);
        assert_eq!(faces.iter().filter(|f| f.is_bounded()).count(), 1);
        let outer = faces.iter().find(|f| !f.is_bounded()).unwrap();
        assert!((outer.signed_area + 0.5).abs() < 1e-12);
    }

    #[test]
    fn right_triangle_min_angle_is_45_degrees() {
        let graph = triangle();
        let min = min_face_angle(&graph).expect("Dreieck erwartet");
        assert!((min.to_degrees() - 45.0).abs() < 1e-9);
        assert_eq!(bounded_triangles(&graph).len(), 1);
    }

    #[test]
    fn empty_graph_has_no_faces() {
        let graph = PlanarGraph::new();
        assert_eq!(walk_faces(&graph), Some(Vec::new()));
        assert!(min_face_angle(&graph).is_none());
    }
}
