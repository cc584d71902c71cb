//! Globaler Invarianten-Check und Constraint-Residuum.
//!
//! `check_global_invariants` prüft die Struktur (konvexe, einfache
//! Peripherie, keine Kreuzungen, nur Dreiecksflächen, konsistente
//! Adjazenz). `check_constraints` misst die weichen Constraints
//! (Mindestwinkel, Längenband, Konvexitäts-Überschuss), die Relaxation
//! und Tests auswerten.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use crate::core::{direction_angle, InvariantViolation, PlanarGraph};

use super::faces::{bounded_triangles, walk_faces};
use super::predicates::{segments_intersect, shared_endpoint_overlap, triangle_angles, turn, turn_angle};
use super::GeometryConstraints;

/// Toleranz auf die Gesamtdrehung der Peripherie.
const WINDING_EPSILON: f64 = 1e-6;
/// Toleranz auf gecachte Adjazenz-Winkel.
const ANGLE_CACHE_EPSILON: f64 = 1e-9;

/// Vollständiger Invarianten-Check. Liefert alle gefundenen Verletzungen.
pub fn check_global_invariants(
    graph: &PlanarGraph,
    constraints: &GeometryConstraints,
) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();
    let n = graph.vertex_count();

    if n == 0 {
        if graph.edge_count() > 0 || !graph.periphery_order().is_empty() {
            violations.push(InvariantViolation::EmptyGraphNotClean);
        }
        return finish(violations);
    }
    if n < 3 {
        violations.push(InvariantViolation::TooFewVertices { count: n });
        return finish(violations);
    }

    check_edges_and_adjacency(graph, &mut violations);
    let periphery_ok = check_periphery(graph, constraints, &mut violations);
    check_crossings(graph, &mut violations);

    // Flächen nur auf strukturell sauberer Basis auswerten
    if violations.is_empty() && periphery_ok {
        check_faces(graph, &mut violations);
    }

    finish(violations)
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_edges_and_adjacency(graph: &PlanarGraph, violations: &mut Vec<InvariantViolation>) {
    for edge in graph.edges() {
        if !graph.contains_vertex(edge.u) || !graph.contains_vertex(edge.v) {
            violations.push(InvariantViolation::UnknownEdgeEndpoint {
                u: edge.u,
                v: edge.v,
            });
        }
    }

    for vertex in graph.vertices() {
        let entries = graph.adjacency(vertex.id);
        let listed: BTreeSet<u64> = entries.iter().map(|e| e.neighbor).collect();
        let expected: BTreeSet<u64> = graph
            .edges()
            .filter_map(|e| e.other(vertex.id))
            .collect();
        if listed != expected || listed.len() != entries.len() {
            violations.push(InvariantViolation::AdjacencyMismatch { id: vertex.id });
            continue;
        }

        let sorted = entries.windows(2).all(|w| w[0].angle <= w[1].angle);
        let fresh = entries.iter().all(|e| {
            graph.position(e.neighbor).is_some_and(|target| {
                (direction_angle(vertex.position, target) - e.angle).abs() <= ANGLE_CACHE_EPSILON
            })
        });
        if !sorted || !fresh {
            violations.push(InvariantViolation::AdjacencyUnsorted { id: vertex.id });
        }
    }
}

/// Prüft die Peripherie. Gibt `true` zurück, wenn sie als Zyklus auswertbar war.
fn check_periphery(
    graph: &PlanarGraph,
    constraints: &GeometryConstraints,
    violations: &mut Vec<InvariantViolation>,
) -> bool {
    let cycle = graph.periphery_order();
    let before = violations.len();

    if cycle.len() < 3 {
        violations.push(InvariantViolation::PeripheryTooShort { len: cycle.len() });
    }
    let mut seen = BTreeSet::new();
    for &id in cycle {
        if !graph.contains_vertex(id) {
            violations.push(InvariantViolation::PeripheryUnknownVertex { id });
        } else if !seen.insert(id) {
            violations.push(InvariantViolation::PeripheryDuplicate { id });
        }
    }
    for vertex in graph.vertices() {
        if vertex.on_periphery != seen.contains(&vertex.id) {
            violations.push(InvariantViolation::PeripheryFlagMismatch { id: vertex.id });
        }
    }
    if violations.len() > before {
        return false;
    }

    let len = cycle.len();
    let points: Vec<_> = cycle.iter().filter_map(|&id| graph.position(id)).collect();
    let mut total_turn = 0.0;
    for i in 0..len {
        let (prev, cur, next) = (points[(i + len - 1) % len], points[i], points[(i + 1) % len]);
        let (u, v) = (cycle[i], cycle[(i + 1) % len]);
        if !graph.has_edge(u, v) {
            violations.push(InvariantViolation::PeripheryMissingEdge { u, v });
        }

        let (sine, cosine) = turn(prev, cur, next);
        let eps = constraints.convexity_epsilon;
        if sine < -eps || (sine <= eps && cosine <= 0.0) {
            violations.push(InvariantViolation::PeripheryNotConvex {
                id: cycle[i],
                sine,
            });
        }
        total_turn += turn_angle(prev, cur, next);
    }

    if (total_turn - TAU).abs() > WINDING_EPSILON {
        violations.push(InvariantViolation::PeripheryWinding { total_turn });
    }

    true
}

/// Paarweiser Kreuzungstest mit Sweep über die x-Ausdehnung.
fn check_crossings(graph: &PlanarGraph, violations: &mut Vec<InvariantViolation>) {
    let mut segments: Vec<_> = graph
        .edges()
        .filter_map(|e| {
            let a = graph.position(e.u)?;
            let b = graph.position(e.v)?;
            Some((e.u, e.v, a, b, a.x.min(b.x), a.x.max(b.x)))
        })
        .collect();
    segments.sort_by(|s, t| s.4.total_cmp(&t.4));

    for i in 0..segments.len() {
        let (u1, v1, a, b, _, max_x) = segments[i];
        let slack = 1e-9 * (b - a).length();
        for &(u2, v2, c, d, min_x, _) in &segments[i + 1..] {
            if min_x > max_x + slack {
                break;
            }
            let crosses = match shared_endpoint(u1, v1, u2, v2) {
                Some(shared) => {
                    let (s, p) = if shared == u1 { (a, b) } else { (b, a) };
                    let q = if shared == u2 { d } else { c };
                    shared_endpoint_overlap(s, p, q)
                }
                None => segments_intersect(a, b, c, d),
            };
            if crosses {
                violations.push(InvariantViolation::EdgesCross {
                    a: (u1, v1),
                    b: (u2, v2),
                });
            }
        }
    }
}

fn shared_endpoint(u1: u64, v1: u64, u2: u64, v2: u64) -> Option<u64> {
    if u1 == u2 || u1 == v2 {
        Some(u1)
    } else if v1 == u2 || v1 == v2 {
        Some(v1)
    } else {
        None
    }
}

fn check_faces(graph: &PlanarGraph, violations: &mut Vec<InvariantViolation>) {
    let Some(faces) = walk_faces(graph) else {
        violations.push(InvariantViolation::OuterFaceMismatch { outer_faces: 0 });
        return;
    };

    let mut triangles = 0;
    let mut outer = Vec::new();
    for face in &faces {
        if face.is_bounded() {
            if face.vertices.len() == 3 {
                triangles += 1;
            } else {
                violations.push(InvariantViolation::NonTriangularFace {
                    vertices: face.vertices.clone(),
                });
            }
        } else {
            outer.push(face);
        }
    }

    let outer_matches = outer.len() == 1 && is_reversed_cycle(&outer[0].vertices, graph.periphery_order());
    if !outer_matches {
        violations.push(InvariantViolation::OuterFaceMismatch {
            outer_faces: outer.len(),
        });
    }

    let n = graph.vertex_count();
    let h = graph.periphery_order().len();
    let expected = (2 * n).saturating_sub(h + 2);
    if triangles != expected {
        violations.push(InvariantViolation::EulerMismatch {
            expected,
            actual: triangles,
        });
    }
}

/// Ist `face` die Umkehrung des Zyklus `cycle` (bis auf Rotation)?
fn is_reversed_cycle(face: &[u64], cycle: &[u64]) -> bool {
    if face.len() != cycle.len() || cycle.is_empty() {
        return false;
    }
    let reversed: Vec<u64> = cycle.iter().rev().copied().collect();
    let Some(offset) = reversed.iter().position(|&id| id == face[0]) else {
        return false;
    };
    (0..face.len()).all(|i| face[i] == reversed[(offset + i) % reversed.len()])
}

/// Messung der weichen Constraints eines Graphen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintResidual {
    /// Kleinster Innenwinkel aller Dreiecke (Grad)
    pub min_angle_deg: Option<f64>,
    /// Größtes Winkel-Defizit unter θ_min − ε (Radiant, ≥ 0)
    pub angle_deficit: f64,
    /// Vertices des schlechtesten Dreiecks
    pub worst_angle_vertices: Vec<u64>,
    /// Größte Überschreitung des Längenbands (relativ zum Mittelwert, ≥ 0)
    pub length_excess: f64,
    /// Endpunkte der schlechtesten Kante
    pub worst_edge: Option<(u64, u64)>,
    /// Größte Konvexitäts-Verletzung (negativer Sinus jenseits ε, ≥ 0)
    pub convexity_excess: f64,
    /// Vertex mit der schlechtesten Drehung
    pub worst_turn_vertex: Option<u64>,
}

impl ConstraintResidual {
    /// Alle weichen Constraints erfüllt?
    pub fn is_satisfied(&self) -> bool {
        self.angle_deficit <= 0.0 && self.length_excess <= 0.0 && self.convexity_excess <= 0.0
    }

    /// Größter Einzelbeitrag, für Logging und Fehlermeldungen.
    pub fn max_residual(&self) -> f64 {
        self.angle_deficit
            .max(self.length_excess)
            .max(self.convexity_excess)
    }
}

/// Misst Mindestwinkel, Längenband und Konvexität.
pub fn check_constraints(graph: &PlanarGraph, constraints: &GeometryConstraints) -> ConstraintResidual {
    let mut residual = ConstraintResidual::default();
    let floor = constraints.angle_floor_rad();

    let mut min_angle = f64::INFINITY;
    for [a, b, c] in bounded_triangles(graph) {
        let (Some(pa), Some(pb), Some(pc)) = (graph.position(a), graph.position(b), graph.position(c)) else {
            continue;
        };
        let smallest = triangle_angles(pa, pb, pc)
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        if smallest < min_angle {
            min_angle = smallest;
            if floor - smallest > 0.0 {
                residual.angle_deficit = floor - smallest;
                residual.worst_angle_vertices = vec![a, b, c];
            }
        }
    }
    if min_angle.is_finite() {
        residual.min_angle_deg = Some(min_angle.to_degrees());
    }

    if let Some(mean) = graph.mean_edge_length() {
        let (lo, hi) = constraints.length_band(mean);
        for edge in graph.edges() {
            let Some(length) = graph.distance(edge.u, edge.v) else {
                continue;
            };
            let excess = ((lo - length).max(length - hi)) / mean;
            if excess > residual.length_excess {
                residual.length_excess = excess;
                residual.worst_edge = Some(edge.key());
            }
        }
    }

    let cycle = graph.periphery_order();
    let len = cycle.len();
    if len >= 3 {
        for i in 0..len {
            let ids = [cycle[(i + len - 1) % len], cycle[i], cycle[(i + 1) % len]];
            let (Some(prev), Some(cur), Some(next)) = (
                graph.position(ids[0]),
                graph.position(ids[1]),
                graph.position(ids[2]),
            ) else {
                continue;
            };
            let (sine, cosine) = turn(prev, cur, next);
            let eps = constraints.convexity_epsilon;
            // Umkehr ohne Seitenanteil zählt als maximale Verletzung
            let excess = if sine.abs() <= eps && cosine <= 0.0 {
                1.0
            } else {
                -sine - eps
            };
            if excess > residual.convexity_excess {
                residual.convexity_excess = excess;
                residual.worst_turn_vertex = Some(ids[1]);
            }
        }
    }

    residual
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn equilateral(side: f64) -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let h = side * 3.0_f64.sqrt() / 2.0;
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(side, 0.0), "#4ECDC4", 30.0);
        let c = graph.add_vertex(DVec2::new(side / 2.0, h), "#45B7D1", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);
        graph
    }

    #[test]
    fn valid_triangle_passes() {
        let graph = equilateral(80.0);
        let constraints = GeometryConstraints::default();

        assert_eq!(check_global_invariants(&graph, &constraints), Ok(()));
        let residual = check_constraints(&graph, &constraints);
        assert!(residual.is_satisfied());
        assert!((residual.min_angle_deg.unwrap() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = PlanarGraph::new();
        assert!(check_global_invariants(&graph, &GeometryConstraints::default()).is_ok());
    }

    #[test]
    fn clockwise_periphery_is_rejected() {
        let mut graph = equilateral(80.0);
        graph.set_periphery(vec![3, 2, 1]);

        let violations = check_global_invariants(&graph, &GeometryConstraints::default())
            .expect_err("Verletzung erwartet");
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::PeripheryNotConvex { .. })));
    }

    #[test]
    fn missing_periphery_edge_is_reported() {
        let mut graph = equilateral(80.0);
        graph.remove_edge(1, 3).unwrap();

        let violations = check_global_invariants(&graph, &GeometryConstraints::default())
            .expect_err("Verletzung erwartet");
        assert!(violations.contains(&InvariantViolation::PeripheryMissingEdge { u: 3, v: 1 }));
    }

    #[test]
    fn crossing_edges_are_reported() {
        // Quadrat mit beiden Diagonalen
        let mut graph = PlanarGraph::new();
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(1.0, 0.0), "#FF6B6B", 30.0);
        let c = graph.add_vertex(DVec2::new(1.0, 1.0), "#FF6B6B", 30.0);
        let d = graph.add_vertex(DVec2::new(0.0, 1.0), "#FF6B6B", 30.0);
        for (u, v) in [(a, b), (b, c), (c, d), (d, a), (a, c), (b, d)] {
            graph.add_edge(u, v).unwrap();
        }
        graph.set_periphery(vec![a, b, c, d]);

        let violations = check_global_invariants(&graph, &GeometryConstraints::default())
            .expect_err("Verletzung erwartet");
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::EdgesCross { .. })));
    }

    #[test]
    fn quad_without_diagonal_is_not_triangulated() {
        let mut graph = PlanarGraph::new();
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(1.0, 0.0), "#FF6B6B", 30.0);
        let c = graph.add_vertex(DVec2::new(1.0, 1.0), "#FF6B6B", 30.0);
        let d = graph.add_vertex(DVec2::new(0.0, 1.0), "#FF6B6B", 30.0);
        for (u, v) in [(a, b), (b, c), (c, d), (d, a)] {
            graph.add_edge(u, v).unwrap();
        }
        graph.set_periphery(vec![a, b, c, d]);

        let violations = check_global_invariants(&graph, &GeometryConstraints::default())
            .expect_err("Verletzung erwartet");
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::NonTriangularFace { .. })));
    }

    #[test]
    fn short_edge_shows_up_as_length_excess() {
        let mut graph = equilateral(80.0);
        graph.set_vertex_position(3, DVec2::new(40.0, 20.0)).unwrap();

        let residual = check_constraints(&graph, &GeometryConstraints::default());
        assert!(residual.length_excess > 0.0);
        assert!(residual.angle_deficit > 0.0);
        assert!(!residual.is_satisfied());
    }
}
