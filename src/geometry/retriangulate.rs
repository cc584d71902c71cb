//! Schließen des Lochs nach dem Entfernen eines Vertex.
//!
//! Innere Vertices: der Nachbarring ist ein sternförmiges Polygon, das
//! per Ear-Clipping trianguliert wird. Peripherie-Vertices: der Ring von
//! `next` bis `prev` wird durch eine konvexe Kette ersetzt; die dabei
//! entstehenden Taschen werden ebenfalls per Ear-Clipping gefüllt.

use glam::DVec2;

use crate::core::{GeometryViolation, GeometryViolationKind, GraphError, HoleBoundary, PlanarGraph};

use super::predicates::{point_in_triangle, triangle_angles, turn};

/// Ergebnis einer Re-Triangulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retriangulation {
    /// Neu eingefügte Kanten als Endpunkt-Paare
    pub added_edges: Vec<(u64, u64)>,
    /// Vertices, die durch das Entfernen auf die Peripherie gerückt sind
    pub new_periphery_vertices: Vec<u64>,
}

/// Entfernt einen Vertex und trianguliert das entstehende Loch neu.
pub fn remove_and_retriangulate(
    graph: &mut PlanarGraph,
    id: u64,
    convexity_epsilon: f64,
) -> Result<(HoleBoundary, Retriangulation), GraphError> {
    if !graph.contains_vertex(id) {
        return Err(GraphError::vertex_not_found(id));
    }
    if graph.vertex_count() <= 3 {
        return Err(GraphError::Degenerate {
            vertex_count: graph.vertex_count(),
        });
    }

    let hole = graph.remove_vertex(id)?;
    let result = retriangulate_hole(graph, &hole, convexity_epsilon)?;
    log::debug!(
        "Loch um Vertex {} geschlossen: {} neue Kanten",
        id,
        result.added_edges.len()
    );
    Ok((hole, result))
}

/// Trianguliert das von `remove_vertex` freigelegte Loch.
pub fn retriangulate_hole(
    graph: &mut PlanarGraph,
    hole: &HoleBoundary,
    convexity_epsilon: f64,
) -> Result<Retriangulation, GraphError> {
    match hole.periphery_neighbors {
        None => fill_interior_hole(graph, &hole.ring),
        Some((prev, next)) => close_periphery_gap(graph, &hole.ring, prev, next, convexity_epsilon),
    }
}

fn fill_interior_hole(graph: &mut PlanarGraph, ring: &[u64]) -> Result<Retriangulation, GraphError> {
    let mut added_edges = Vec::new();
    ear_clip(graph, ring.to_vec(), &mut added_edges)?;
    Ok(Retriangulation {
        added_edges,
        new_periphery_vertices: Vec::new(),
    })
}

fn close_periphery_gap(
    graph: &mut PlanarGraph,
    ring: &[u64],
    prev: u64,
    next: u64,
    eps: f64,
) -> Result<Retriangulation, GraphError> {
    // Ring gegen den Uhrzeigersinn, beginnend bei `next`, endet bei `prev`
    let start = ring
        .iter()
        .position(|&n| n == next)
        .ok_or(GraphError::vertex_not_found(next))?;
    let link: Vec<u64> = ring[start..].iter().chain(&ring[..start]).copied().collect();
    if link.last() != Some(&prev) {
        return Err(hole_violation(&link));
    }

    // Neuer Randpfad von prev nach next in Peripherie-Richtung
    let path: Vec<u64> = link.iter().rev().copied().collect();
    let points = positions(graph, &path)?;

    let mut chain: Vec<usize> = Vec::with_capacity(path.len());
    for index in 0..path.len() {
        while chain.len() >= 2 {
            let (a, b) = (chain[chain.len() - 2], chain[chain.len() - 1]);
            let (sine, _) = turn(points[a], points[b], points[index]);
            if sine < -eps {
                chain.pop();
            } else {
                break;
            }
        }
        chain.push(index);
    }

    let mut added_edges = Vec::new();
    for pair in chain.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !graph.has_edge(path[a], path[b]) {
            graph.add_edge(path[a], path[b])?;
            added_edges.push((path[a], path[b]));
        }
        if b > a + 1 {
            // Tasche: Sehne a → b, zurück über den alten Pfad
            let mut pocket = vec![path[a], path[b]];
            pocket.extend(path[a + 1..b].iter().rev());
            ear_clip(graph, pocket, &mut added_edges)?;
        }
    }

    let chain_interior: Vec<u64> = chain[1..chain.len() - 1].iter().map(|&i| path[i]).collect();
    let periphery = graph.periphery_order();
    let Some(next_index) = periphery.iter().position(|&p| p == next) else {
        return Err(GraphError::NotOnPeriphery { id: next });
    };
    let mut new_periphery: Vec<u64> = periphery[next_index..]
        .iter()
        .chain(&periphery[..next_index])
        .copied()
        .collect();
    new_periphery.extend(&chain_interior);
    graph.set_periphery(new_periphery);

    Ok(Retriangulation {
        added_edges,
        new_periphery_vertices: chain_interior,
    })
}

fn positions(graph: &PlanarGraph, ids: &[u64]) -> Result<Vec<DVec2>, GraphError> {
    ids.iter()
        .map(|&id| graph.position(id).ok_or(GraphError::vertex_not_found(id)))
        .collect()
}

fn hole_violation(ids: &[u64]) -> GraphError {
    GraphError::GeometryViolation(GeometryViolation::new(
        GeometryViolationKind::EdgesCross,
        ids.to_vec(),
        0.0,
        0.0,
    ))
}

/// Trianguliert ein einfaches Polygon gegen den Uhrzeigersinn.
///
/// Gewählt wird jeweils das Ohr mit dem größten kleinsten Winkel; die
/// Diagonale darf noch nicht als Kante existieren.
fn ear_clip(
    graph: &mut PlanarGraph,
    mut polygon: Vec<u64>,
    added_edges: &mut Vec<(u64, u64)>,
) -> Result<(), GraphError> {
    while polygon.len() > 3 {
        let points = positions(graph, &polygon)?;
        let len = polygon.len();
        let mut best: Option<(usize, f64)> = None;

        for i in 0..len {
            let (ip, inext) = ((i + len - 1) % len, (i + 1) % len);
            let (prev, cur, next) = (points[ip], points[i], points[inext]);
            let (sine, _) = turn(prev, cur, next);
            if sine <= super::predicates::EPS_REL {
                continue;
            }
            if graph.has_edge(polygon[ip], polygon[inext]) {
                continue;
            }
            let blocked = (0..len)
                .filter(|&j| j != ip && j != i && j != inext)
                .any(|j| point_in_triangle(points[j], prev, cur, next));
            if blocked {
                continue;
            }

            let quality = triangle_angles(prev, cur, next)
                .into_iter()
                .fold(f64::INFINITY, f64::min);
            if best.is_none_or(|(_, q)| quality > q) {
                best = Some((i, quality));
            }
        }

        let Some((i, _)) = best else {
            return Err(hole_violation(&polygon));
        };
        let (ip, inext) = ((i + len - 1) % len, (i + 1) % len);
        graph.add_edge(polygon[ip], polygon[inext])?;
        added_edges.push((polygon[ip], polygon[inext]));
        polygon.remove(i);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{check_global_invariants, GeometryConstraints};

    /// Sechseck um einen Mittelpunkt (Vertex 1), Peripherie 2..=7.
    fn hexagon_fan() -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let center = graph.add_vertex(DVec2::ZERO, "#FF6B6B", 30.0);
        let ring: Vec<u64> = (0..6)
            .map(|k| {
                let angle = (k as f64 * 60.0).to_radians();
                graph.add_vertex(DVec2::from_angle(angle) * 100.0, "#4ECDC4", 30.0)
            })
            .collect();
        for i in 0..6 {
            graph.add_edge(center, ring[i]).unwrap();
            graph.add_edge(ring[i], ring[(i + 1) % 6]).unwrap();
        }
        graph.set_periphery(ring);
        graph
    }

    #[test]
    fn interior_removal_fills_hexagon_with_three_diagonals() {
        let mut graph = hexagon_fan();
        let (hole, result) = remove_and_retriangulate(&mut graph, 1, 1e-9).unwrap();

        assert_eq!(hole.ring.len(), 6);
        assert_eq!(result.added_edges.len(), 3);
        assert!(result.new_periphery_vertices.is_empty());
        assert_eq!(graph.edge_count(), 9);
        assert_eq!(check_global_invariants(&graph, &GeometryConstraints::default()), Ok(()));
    }

    #[test]
    fn periphery_removal_keeps_hull_convex() {
        let mut graph = hexagon_fan();
        let (_, result) = remove_and_retriangulate(&mut graph, 2, 1e-9).unwrap();

        // Das Zentrum rückt nicht auf die Peripherie (Kette 7 → 3 über 1 ist konkav)
        assert_eq!(graph.periphery_order().len(), 5);
        assert!(result.new_periphery_vertices.is_empty());
        assert!(graph.has_edge(3, 7));
        assert_eq!(check_global_invariants(&graph, &GeometryConstraints::default()), Ok(()));
    }

    #[test]
    fn removal_from_triangle_is_degenerate() {
        let mut graph = PlanarGraph::new();
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(1.0, 0.0), "#FF6B6B", 30.0);
        let c = graph.add_vertex(DVec2::new(0.0, 1.0), "#FF6B6B", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);

        assert_eq!(
            remove_and_retriangulate(&mut graph, a, 1e-9),
            Err(GraphError::Degenerate { vertex_count: 3 })
        );
        assert_eq!(graph.vertex_count(), 3);
    }
}
