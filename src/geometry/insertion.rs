//! Einfügen neuer Vertices an der Peripherie.
//!
//! Ablauf: Anker auflösen → Kandidatenposition berechnen → validieren →
//! anwenden. Nur `apply_insertion` mutiert den Graphen.

use glam::DVec2;

use crate::core::{GeometryViolation, GeometryViolationKind, GraphError, PlanarGraph};

use super::predicates::{
    is_convex_turn, segments_intersect, shared_endpoint_overlap, triangle_angles, turn,
};
use super::GeometryConstraints;

/// Anker einer Einfügung an der Peripherie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionAnchor {
    /// Peripherie-Kante (Reihenfolge egal)
    Edge { u: u64, v: u64 },
    /// Peripherie-Vertex; der neue Vertex überdeckt ihn samt beider Nachbarn
    Vertex { id: u64 },
    /// Zusammenhängender Peripherie-Abschnitt (mindestens 2 Vertices)
    Segment { ids: Vec<u64> },
}

/// Aufgelöster Anker: aufeinanderfolgende Peripherie-Vertices gegen den Uhrzeigersinn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeripherySpan {
    ids: Vec<u64>,
}

impl PeripherySpan {
    /// Vertices des Abschnitts in Peripherie-Reihenfolge.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Vertices, die nach der Einfügung innen liegen.
    pub fn interior(&self) -> &[u64] {
        &self.ids[1..self.ids.len() - 1]
    }

    fn first(&self) -> u64 {
        self.ids[0]
    }
}

/// Löst einen Anker in einen Peripherie-Abschnitt auf.
pub fn resolve_anchor(graph: &PlanarGraph, anchor: &InsertionAnchor) -> Result<PeripherySpan, GraphError> {
    if graph.vertex_count() < 3 {
        return Err(GraphError::Degenerate {
            vertex_count: graph.vertex_count(),
        });
    }

    let ids = match anchor {
        InsertionAnchor::Edge { u, v } => {
            ensure_on_periphery(graph, *u)?;
            ensure_on_periphery(graph, *v)?;
            if graph.periphery_next(*u) == Some(*v) {
                vec![*u, *v]
            } else if graph.periphery_next(*v) == Some(*u) {
                vec![*v, *u]
            } else {
                return Err(GraphError::NotAdjacentOnPeriphery { u: *u, v: *v });
            }
        }
        InsertionAnchor::Vertex { id } => {
            ensure_on_periphery(graph, *id)?;
            let prev = graph.periphery_prev(*id).ok_or(GraphError::NotOnPeriphery { id: *id })?;
            let next = graph.periphery_next(*id).ok_or(GraphError::NotOnPeriphery { id: *id })?;
            vec![prev, *id, next]
        }
        InsertionAnchor::Segment { ids } => resolve_segment(graph, ids)?,
    };

    Ok(PeripherySpan { ids })
}

fn ensure_on_periphery(graph: &PlanarGraph, id: u64) -> Result<(), GraphError> {
    if !graph.contains_vertex(id) {
        return Err(GraphError::vertex_not_found(id));
    }
    if !graph.is_on_periphery(id) {
        return Err(GraphError::NotOnPeriphery { id });
    }
    Ok(())
}

fn resolve_segment(graph: &PlanarGraph, ids: &[u64]) -> Result<Vec<u64>, GraphError> {
    if ids.len() < 2 || ids.len() > graph.periphery_order().len() {
        return Err(GraphError::InvalidParameter {
            name: "segment",
            value: format!("{ids:?}"),
        });
    }
    for &id in ids {
        ensure_on_periphery(graph, id)?;
    }

    let forward = ids
        .windows(2)
        .all(|w| graph.periphery_next(w[0]) == Some(w[1]));
    if forward {
        return Ok(ids.to_vec());
    }
    let backward = ids
        .windows(2)
        .all(|w| graph.periphery_prev(w[0]) == Some(w[1]));
    if backward {
        return Ok(ids.iter().rev().copied().collect());
    }

    Err(GraphError::NotAdjacentOnPeriphery {
        u: ids[0],
        v: ids[ids.len() - 1],
    })
}

/// Nach außen zeigende Normale der Sehne `a → b` einer Peripherie gegen den Uhrzeigersinn.
fn outward_normal(a: DVec2, b: DVec2) -> DVec2 {
    let d = b - a;
    DVec2::new(d.y, -d.x).normalize_or_zero()
}

/// Kantenlänge, auf die neue Kanten zielen.
pub fn target_edge_length(graph: &PlanarGraph, constraints: &GeometryConstraints) -> f64 {
    graph
        .mean_edge_length()
        .unwrap_or(constraints.default_edge_length)
}

/// Schlägt eine Position für einen neuen Vertex am Anker vor. Mutiert nicht.
pub fn compute_insertion_position(
    graph: &PlanarGraph,
    anchor: &InsertionAnchor,
    constraints: &GeometryConstraints,
) -> Result<DVec2, GraphError> {
    let span = resolve_anchor(graph, anchor)?;
    candidate_for_span(graph, &span, constraints)
}

/// Kandidat für einen bereits aufgelösten Abschnitt.
///
/// Kante `a → b`: Spitze auf der äußeren Mittelsenkrechten im Abstand L
/// (mittlere Kantenlänge) zu beiden Endpunkten, gleichseitig bei |ab| = L.
/// Längere Abschnitte: Schwerpunkt plus L entlang der Sehnen-Normalen.
pub fn candidate_for_span(
    graph: &PlanarGraph,
    span: &PeripherySpan,
    constraints: &GeometryConstraints,
) -> Result<DVec2, GraphError> {
    let points = span_positions(graph, span)?;
    let length = target_edge_length(graph, constraints);
    let (first, last) = (points[0], points[points.len() - 1]);
    let normal = outward_normal(first, last);

    if points.len() == 2 {
        let half = first.distance(last) / 2.0;
        let height = if length > half * (1.0 + 1e-9) {
            (length * length - half * half).sqrt()
        } else {
            length * 3.0_f64.sqrt() / 2.0
        };
        return Ok((first + last) / 2.0 + normal * height);
    }

    let centroid = points.iter().copied().sum::<DVec2>() / points.len() as f64;
    Ok(centroid + normal * length)
}

fn span_positions(graph: &PlanarGraph, span: &PeripherySpan) -> Result<Vec<DVec2>, GraphError> {
    span.ids
        .iter()
        .map(|&id| graph.position(id).ok_or(GraphError::vertex_not_found(id)))
        .collect()
}

/// Prüft eine Einfügung, ohne zu mutieren.
///
/// Reihenfolge: (a) Winkel der neuen Dreiecke, (b) Längen der neuen
/// Kanten gegen den Mittelwert nach der Einfügung, (c) Konvexität der
/// neuen Peripherie, (d) Kreuzungen mit bestehenden Kanten. Die erste
/// Verletzung wird zurückgegeben.
pub fn validate_insertion(
    graph: &PlanarGraph,
    span: &PeripherySpan,
    candidate: DVec2,
    constraints: &GeometryConstraints,
) -> Result<(), GraphError> {
    let points = span_positions(graph, span)?;
    let new_id = graph.peek_next_vertex_id();

    if !candidate.is_finite() {
        return Err(GraphError::InvalidParameter {
            name: "position",
            value: format!("{candidate:?}"),
        });
    }

    check_new_triangle_angles(span, &points, candidate, new_id, constraints)?;
    check_new_edge_lengths(graph, span, &points, candidate, new_id, constraints)?;
    check_new_periphery_convexity(graph, span, candidate, new_id, constraints)?;
    check_new_edge_crossings(graph, span, &points, candidate, new_id)?;
    Ok(())
}

fn check_new_triangle_angles(
    span: &PeripherySpan,
    points: &[DVec2],
    candidate: DVec2,
    new_id: u64,
    constraints: &GeometryConstraints,
) -> Result<(), GeometryViolation> {
    let floor = constraints.angle_floor_rad();
    for i in 0..points.len() - 1 {
        let (a, b) = (points[i], points[i + 1]);
        let ids = vec![span.ids[i], new_id, span.ids[i + 1]];
        // Dreieck (a, w, b) muss gegen den Uhrzeigersinn liegen, sonst ist es umgeklappt
        let folded = super::predicates::orient(a, candidate, b) <= 0.0;
        let smallest = if folded {
            0.0
        } else {
            triangle_angles(a, candidate, b)
                .into_iter()
                .fold(f64::INFINITY, f64::min)
        };
        if smallest < floor {
            return Err(GeometryViolation::new(
                GeometryViolationKind::AngleTooSmall,
                ids,
                smallest.to_degrees(),
                constraints.min_angle_deg,
            ));
        }
    }
    Ok(())
}

fn check_new_edge_lengths(
    graph: &PlanarGraph,
    span: &PeripherySpan,
    points: &[DVec2],
    candidate: DVec2,
    new_id: u64,
    constraints: &GeometryConstraints,
) -> Result<(), GeometryViolation> {
    let new_lengths: Vec<f64> = points.iter().map(|p| p.distance(candidate)).collect();
    let existing_total: f64 = graph
        .edges()
        .filter_map(|e| graph.distance(e.u, e.v))
        .sum();
    let count = graph.edge_count() + new_lengths.len();
    let mean = (existing_total + new_lengths.iter().sum::<f64>()) / count as f64;
    let (lo, hi) = constraints.length_band(mean);

    for (i, &length) in new_lengths.iter().enumerate() {
        if length < lo || length > hi {
            return Err(GeometryViolation::new(
                GeometryViolationKind::LengthOutOfTolerance,
                vec![span.ids[i], new_id],
                length / mean,
                if length < lo {
                    1.0 - constraints.length_tolerance
                } else {
                    1.0 + constraints.length_tolerance
                },
            ));
        }
    }
    Ok(())
}

/// Peripherie nach der Einfügung: das Innere des Abschnitts wird durch `new_id` ersetzt.
pub fn periphery_after_insertion(graph: &PlanarGraph, span: &PeripherySpan, new_id: u64) -> Vec<u64> {
    let cycle = graph.periphery_order();
    let len = cycle.len();
    let Some(start) = graph.periphery_index(span.first()) else {
        return cycle.to_vec();
    };

    let mut result = Vec::with_capacity(len + 1);
    result.push(span.first());
    result.push(new_id);
    let mut index = (start + span.ids.len() - 1) % len;
    while cycle[index] != span.first() {
        result.push(cycle[index]);
        index = (index + 1) % len;
    }
    result
}

fn check_new_periphery_convexity(
    graph: &PlanarGraph,
    span: &PeripherySpan,
    candidate: DVec2,
    new_id: u64,
    constraints: &GeometryConstraints,
) -> Result<(), GeometryViolation> {
    let cycle = periphery_after_insertion(graph, span, new_id);
    let position = |id: u64| {
        if id == new_id {
            Some(candidate)
        } else {
            graph.position(id)
        }
    };

    let len = cycle.len();
    for i in 0..len {
        let ids = [cycle[(i + len - 1) % len], cycle[i], cycle[(i + 1) % len]];
        let (Some(prev), Some(cur), Some(next)) = (position(ids[0]), position(ids[1]), position(ids[2])) else {
            continue;
        };
        if !is_convex_turn(prev, cur, next, constraints.convexity_epsilon) {
            let (sine, _) = turn(prev, cur, next);
            return Err(GeometryViolation::new(
                GeometryViolationKind::NonConvex,
                ids.to_vec(),
                sine,
                -constraints.convexity_epsilon,
            ));
        }
    }
    Ok(())
}

fn check_new_edge_crossings(
    graph: &PlanarGraph,
    span: &PeripherySpan,
    points: &[DVec2],
    candidate: DVec2,
    new_id: u64,
) -> Result<(), GeometryViolation> {
    for (i, &anchor) in span.ids.iter().enumerate() {
        let a = points[i];
        for edge in graph.edges() {
            let (Some(c), Some(d)) = (graph.position(edge.u), graph.position(edge.v)) else {
                continue;
            };
            let crosses = if edge.contains(anchor) {
                let other = if edge.u == anchor { d } else { c };
                shared_endpoint_overlap(a, candidate, other)
            } else {
                segments_intersect(a, candidate, c, d)
            };
            if crosses {
                return Err(GeometryViolation::new(
                    GeometryViolationKind::EdgesCross,
                    vec![anchor, new_id, edge.u, edge.v],
                    0.0,
                    0.0,
                ));
            }
        }
    }
    Ok(())
}

/// Ergebnis einer angewendeten Einfügung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionOutcome {
    /// Neuer Vertex
    pub vertex_id: u64,
    /// Neue Kanten
    pub edge_ids: Vec<u64>,
}

/// Fügt den Vertex ein, verbindet ihn mit dem Abschnitt und passt die Peripherie an.
pub fn apply_insertion(
    graph: &mut PlanarGraph,
    span: &PeripherySpan,
    position: DVec2,
    color: impl Into<String>,
    diameter: f64,
) -> Result<InsertionOutcome, GraphError> {
    let new_periphery = periphery_after_insertion(graph, span, graph.peek_next_vertex_id());
    let vertex_id = graph.add_vertex(position, color, diameter);
    let mut edge_ids = Vec::with_capacity(span.ids.len());
    for &anchor in &span.ids {
        edge_ids.push(graph.add_edge(anchor, vertex_id)?);
    }
    graph.set_periphery(new_periphery);
    Ok(InsertionOutcome {
        vertex_id,
        edge_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::check_global_invariants;
    use approx::assert_relative_eq;

    fn triangle() -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        let h = 100.0 * 3.0_f64.sqrt() / 2.0;
        let a = graph.add_vertex(DVec2::new(0.0, 0.0), "#FF6B6B", 30.0);
        let b = graph.add_vertex(DVec2::new(100.0, 0.0), "#4ECDC4", 30.0);
        let c = graph.add_vertex(DVec2::new(50.0, h), "#45B7D1", 30.0);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_edge(c, a).unwrap();
        graph.set_periphery(vec![a, b, c]);
        graph
    }

    #[test]
    fn edge_anchor_is_normalized_to_periphery_order() {
        let graph = triangle();
        let span = resolve_anchor(&graph, &InsertionAnchor::Edge { u: 2, v: 1 }).unwrap();
        assert_eq!(span.ids(), &[1, 2]);
        assert!(span.interior().is_empty());
    }

    #[test]
    fn edge_candidate_is_equilateral_apex_outside() {
        let graph = triangle();
        let c = GeometryConstraints::default();
        let candidate =
            compute_insertion_position(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }, &c).unwrap();

        assert_relative_eq!(candidate.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(candidate.y, -100.0 * 3.0_f64.sqrt() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn covered_edge_no_longer_anchors() {
        let mut graph = triangle();
        let span = resolve_anchor(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }).unwrap();
        let c = GeometryConstraints::default();
        let candidate = candidate_for_span(&graph, &span, &c).unwrap();
        apply_insertion(&mut graph, &span, candidate, "#FFA07A", 30.0).unwrap();

        assert_eq!(
            resolve_anchor(&graph, &InsertionAnchor::Vertex { id: 99 }),
            Err(GraphError::vertex_not_found(99))
        );
        assert_eq!(
            resolve_anchor(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }),
            Err(GraphError::NotAdjacentOnPeriphery { u: 1, v: 2 })
        );
    }

    #[test]
    fn apply_insertion_keeps_invariants() {
        let mut graph = triangle();
        let c = GeometryConstraints::default();
        let span = resolve_anchor(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }).unwrap();
        let candidate = candidate_for_span(&graph, &span, &c).unwrap();

        validate_insertion(&graph, &span, candidate, &c).expect("Kandidat gültig");
        let outcome = apply_insertion(&mut graph, &span, candidate, "#FFA07A", 30.0).unwrap();

        assert_eq!(outcome.vertex_id, 4);
        assert_eq!(outcome.edge_ids.len(), 2);
        assert_eq!(graph.periphery_order(), &[1, 4, 2, 3]);
        assert_eq!(check_global_invariants(&graph, &c), Ok(()));
    }

    #[test]
    fn candidate_inside_hull_is_rejected() {
        let graph = triangle();
        let c = GeometryConstraints::default();
        let span = resolve_anchor(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }).unwrap();

        let err = validate_insertion(&graph, &span, DVec2::new(50.0, 20.0), &c).unwrap_err();
        let violation = err.geometry_violation().expect("Geometrie-Verletzung");
        assert_eq!(violation.kind, GeometryViolationKind::AngleTooSmall);
    }

    #[test]
    fn far_candidate_violates_length_band() {
        let graph = triangle();
        // Lockerer Winkel, damit die Längenprüfung greift
        let c = GeometryConstraints {
            min_angle_deg: 30.0,
            ..GeometryConstraints::default()
        };
        let span = resolve_anchor(&graph, &InsertionAnchor::Edge { u: 1, v: 2 }).unwrap();

        let err = validate_insertion(&graph, &span, DVec2::new(50.0, -150.0), &c).unwrap_err();
        assert_eq!(
            err.geometry_violation().map(|v| v.kind),
            Some(GeometryViolationKind::LengthOutOfTolerance)
        );
    }

    #[test]
    fn vertex_anchor_replaces_vertex_on_periphery() {
        let graph = triangle();
        let span = resolve_anchor(&graph, &InsertionAnchor::Vertex { id: 2 }).unwrap();

        assert_eq!(span.ids(), &[1, 2, 3]);
        assert_eq!(span.interior(), &[2]);
        assert_eq!(periphery_after_insertion(&graph, &span, 9), vec![1, 9, 3]);
    }
}
