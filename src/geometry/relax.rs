//! Relaxation ("Redraw"): iterative Korrektur der Vertex-Positionen.
//!
//! Jeder Schritt ist ein Jacobi-Schritt: alle Verschiebungen werden aus
//! den Positionen vor dem Schritt berechnet und danach gemeinsam
//! angewendet. Die Zielkantenlänge ist der Mittelwert beim Start.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use glam::DVec2;

use crate::core::{GeometryViolation, GeometryViolationKind, GraphError, PlanarGraph};

use super::faces::bounded_triangles;
use super::invariants::{check_constraints, check_global_invariants, ConstraintResidual};
use super::predicates::{orient, triangle_angles};
use super::GeometryConstraints;

/// Anteil der Peripherie-Umverteilung pro Schritt.
const PERIPHERY_BLEND: f64 = 0.5;
/// Anteil der Winkelkorrektur pro Schritt.
const ANGLE_PUSH: f64 = 0.5;

/// Ergebnis einer erfolgreichen Relaxation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelaxReport {
    /// Durchgeführte Schritte
    pub iterations: usize,
    /// Vertices, deren Position sich geändert hat
    pub moved_vertices: Vec<u64>,
    /// Residuum nach dem letzten Schritt
    pub residual: ConstraintResidual,
}

/// Relaxiert den Graphen, bis alle Constraints und Invarianten erfüllt sind.
///
/// Scheitert mit `NonConvergent` nach `max_relax_iterations` Schritten.
/// Der Graph ist dann verändert; Aufrufer arbeiten auf einer Kopie.
pub fn relax(
    graph: &mut PlanarGraph,
    constraints: &GeometryConstraints,
) -> Result<RelaxReport, GraphError> {
    if graph.vertex_count() < 3 {
        return Ok(RelaxReport::default());
    }
    let Some(target) = graph.mean_edge_length() else {
        return Ok(RelaxReport::default());
    };

    let start: BTreeMap<u64, DVec2> = graph.vertices().map(|v| (v.id, v.position)).collect();
    let limit = constraints.max_relax_iterations;
    let mut residual = check_constraints(graph, constraints);

    for iteration in 0..=limit {
        if residual.is_satisfied() && check_global_invariants(graph, constraints).is_ok() {
            log::debug!("Relaxation nach {} Schritten konvergiert", iteration);
            return Ok(RelaxReport {
                iterations: iteration,
                moved_vertices: moved_since(graph, &start),
                residual,
            });
        }
        if iteration == limit {
            break;
        }

        let displacement = relaxation_step(graph, constraints, target, &residual);
        for (id, delta) in displacement {
            let position = graph.position(id).ok_or(GraphError::vertex_not_found(id))?;
            graph.set_vertex_position(id, position + delta)?;
        }
        residual = check_constraints(graph, constraints);
    }

    log::debug!(
        "Relaxation nicht konvergiert (Residuum {:.4})",
        residual.max_residual()
    );
    let mut ids = residual.worst_angle_vertices.clone();
    if let Some((u, v)) = residual.worst_edge {
        ids.extend([u, v]);
    }
    ids.extend(residual.worst_turn_vertex);
    ids.sort_unstable();
    ids.dedup();

    Err(GeometryViolation::new(
        GeometryViolationKind::NonConvergent,
        ids,
        residual.max_residual(),
        limit as f64,
    )
    .into())
}

fn moved_since(graph: &PlanarGraph, start: &BTreeMap<u64, DVec2>) -> Vec<u64> {
    graph
        .vertices()
        .filter(|v| start.get(&v.id).is_some_and(|p| *p != v.position))
        .map(|v| v.id)
        .collect()
}

/// Berechnet die Verschiebung aller Vertices für einen Schritt.
fn relaxation_step(
    graph: &PlanarGraph,
    constraints: &GeometryConstraints,
    target: f64,
    residual: &ConstraintResidual,
) -> BTreeMap<u64, DVec2> {
    let step = constraints.relax_step;
    let mut displacement: BTreeMap<u64, DVec2> =
        graph.vertices().map(|v| (v.id, DVec2::ZERO)).collect();

    // Federn zur Zielkantenlänge, normiert auf den Grad
    let mut springs: BTreeMap<u64, DVec2> = BTreeMap::new();
    for edge in graph.edges() {
        let (Some(pu), Some(pv)) = (graph.position(edge.u), graph.position(edge.v)) else {
            continue;
        };
        let d = pv - pu;
        let length = d.length();
        if length <= f64::MIN_POSITIVE {
            continue;
        }
        let force = d * (0.5 * (length - target) / length);
        *springs.entry(edge.u).or_default() += force;
        *springs.entry(edge.v).or_default() -= force;
    }
    for (id, force) in springs {
        let degree = graph.adjacency(id).len().max(1) as f64;
        if let Some(delta) = displacement.get_mut(&id) {
            *delta += force / degree * step;
        }
    }

    // Spitze Winkel aufweiten: Nachbarn um den Scheitel auseinanderdrehen
    let floor = constraints.min_angle_deg.to_radians();
    for [a, b, c] in bounded_triangles(graph) {
        let ids = [a, b, c];
        let (Some(pa), Some(pb), Some(pc)) = (graph.position(a), graph.position(b), graph.position(c)) else {
            continue;
        };
        let points = [pa, pb, pc];
        let angles = triangle_angles(pa, pb, pc);
        for corner in 0..3 {
            let deficit = floor - angles[corner];
            if deficit <= 0.0 {
                continue;
            }
            let apex = points[corner];
            let (i, j) = ((corner + 1) % 3, (corner + 2) % 3);
            // Dreieck gegen den Uhrzeigersinn: j liegt links von i
            let sign = if orient(apex, points[i], points[j]) >= 0.0 { 1.0 } else { -1.0 };
            let delta = deficit / 2.0 * step * ANGLE_PUSH;

            let rotated_i = apex + DVec2::from_angle(-sign * delta).rotate(points[i] - apex);
            let rotated_j = apex + DVec2::from_angle(sign * delta).rotate(points[j] - apex);
            if let Some(d) = displacement.get_mut(&ids[i]) {
                *d += rotated_i - points[i];
            }
            if let Some(d) = displacement.get_mut(&ids[j]) {
                *d += rotated_j - points[j];
            }
        }
    }

    if residual.convexity_excess > 0.0 {
        for (id, target_position) in uniform_periphery_targets(graph) {
            if let (Some(d), Some(p)) = (displacement.get_mut(&id), graph.position(id)) {
                *d += (target_position - p) * step * PERIPHERY_BLEND;
            }
        }
    }

    displacement.retain(|_, d| *d != DVec2::ZERO && d.is_finite());
    displacement
}

/// Zielpositionen der Peripherie: gleichmäßige Winkelabstände und
/// mittlerer Radius um den Peripherie-Schwerpunkt.
fn uniform_periphery_targets(graph: &PlanarGraph) -> Vec<(u64, DVec2)> {
    let cycle = graph.periphery_order();
    let points: Vec<DVec2> = cycle.iter().filter_map(|&id| graph.position(id)).collect();
    if points.len() != cycle.len() || points.len() < 3 {
        return Vec::new();
    }

    let center = points.iter().copied().sum::<DVec2>() / points.len() as f64;
    let radius = points.iter().map(|p| p.distance(center)).sum::<f64>() / points.len() as f64;
    let offset = points[0] - center;
    let start_angle = offset.y.atan2(offset.x);
    let step = TAU / points.len() as f64;

    cycle
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, center + DVec2::from_angle(start_angle + step * i as f64) * radius))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::min_face_angle;

    fn flat_triangle() -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(100.0, 0.0), "#4ECDC4", 30.0);
        let c = graph.add_vertex(DVec2::new(50.0, 60.0), "#45B7D1", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);
        graph
    }

    #[test]
    fn flat_triangle_relaxes_to_near_equilateral() {
        let mut graph = flat_triangle();
        let c = GeometryConstraints::default();

        let report = relax(&mut graph, &c).expect("Relaxation sollte konvergieren");

        assert!(report.iterations > 0);
        assert!(report.residual.is_satisfied());
        assert!(min_face_angle(&graph).unwrap().to_degrees() >= c.min_angle_deg - c.angle_tolerance_deg);
        assert_eq!(check_global_invariants(&graph, &c), Ok(()));
    }

    #[test]
    fn single_iteration_budget_is_non_convergent() {
        let mut graph = flat_triangle();
        let c = GeometryConstraints {
            max_relax_iterations: 1,
            ..GeometryConstraints::default()
        };

        let Err(GraphError::GeometryViolation(violation)) = relax(&mut graph, &c) else {
            panic!("NonConvergent erwartet");
        };
        assert_eq!(violation.kind, GeometryViolationKind::NonConvergent);
        assert!(violation.measured > 0.0);
        assert_eq!(violation.vertex_ids, vec![1, 2, 3]);
    }

    #[test]
    fn satisfied_graph_is_left_untouched() {
        let mut graph = PlanarGraph::new();
        let h = 3.0_f64.sqrt() / 2.0 * 80.0;
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(80.0, 0.0), "#FF6B6B", 30.0);
        let c = graph.add_vertex(DVec2::new(40.0, h), "#FF6B6B", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);
        let before = graph.clone();

        let report = relax(&mut graph, &GeometryConstraints::default()).unwrap();
        assert_eq!(report.iterations, 0);
        assert!(report.moved_vertices.is_empty());
        assert_eq!(graph, before);
    }
}
