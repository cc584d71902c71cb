use glam::DVec2;

use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::{GeometryViolation, GeometryViolationKind, GraphError, PlanarGraph};
use crate::geometry::{self, check_global_invariants, min_face_angle, relax, GeometryConstraints};

/// Dreht und skaliert den gesamten Graphen um `center` (Standard: Schwerpunkt).
///
/// Danach müssen Invarianten halten und der kleinste Flächenwinkel darf
/// nicht unter `min(vorher, θ_min) − Toleranz` fallen. Sonst wird eine
/// Relaxation versucht; scheitert auch diese, wird abgelehnt.
pub fn transform(
    state: &mut AppState,
    rotation_deg: f64,
    scale: f64,
    center: Option<DVec2>,
) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "Transform", |graph, ctx| {
        let Some(centroid) = graph.centroid() else {
            return Err(GraphError::Degenerate { vertex_count: 0 });
        };
        let constraints = &ctx.options.geometry;
        let floor_before = min_face_angle(graph);

        geometry::rotate_and_scale(graph, rotation_deg, scale, center.unwrap_or(centroid))?;
        let relaxed = settle(graph, constraints, floor_before)?;

        let moved: Vec<u64> = graph.vertices().map(|v| v.id).collect();
        let mut summary = format!("Transformiert: {:.1}°, Faktor {}", rotation_deg, scale);
        if relaxed {
            summary.push_str(" (nachrelaxiert)");
        }
        Ok(CommandReport::new(summary).with_vertices(moved))
    })
}

/// Skaliert und verschiebt den Graphen in das Rechteck `min..max`.
pub fn fit_to_bounds(state: &mut AppState, min: DVec2, max: DVec2) -> Result<CommandReport, GraphError> {
    transaction::execute(state, "FitToBounds", |graph, ctx| {
        let constraints = &ctx.options.geometry;
        let floor_before = min_face_angle(graph);

        geometry::fit_to_bounds(graph, min, max, ctx.options.fit_padding)?;
        settle(graph, constraints, floor_before)?;

        let moved: Vec<u64> = graph.vertices().map(|v| v.id).collect();
        Ok(CommandReport::new("Graph eingepasst").with_vertices(moved))
    })
}

/// Nachprüfung einer globalen Transformation. Liefert `true`, wenn relaxiert wurde.
fn settle(
    graph: &mut PlanarGraph,
    constraints: &GeometryConstraints,
    floor_before: Option<f64>,
) -> Result<bool, GraphError> {
    let Some(violation) = post_transform_violation(graph, constraints, floor_before) else {
        return Ok(false);
    };
    log::debug!("Transformation verletzt Bedingungen, versuche Relaxation: {}", violation);
    match relax(graph, constraints) {
        Ok(_) => Ok(true),
        Err(nc) => {
            log::debug!("Relaxation gescheitert: {}", nc);
            Err(violation.into())
        }
    }
}

fn post_transform_violation(
    graph: &PlanarGraph,
    constraints: &GeometryConstraints,
    floor_before: Option<f64>,
) -> Option<GeometryViolation> {
    if check_global_invariants(graph, constraints).is_err() {
        return Some(GeometryViolation::new(
            GeometryViolationKind::NonConvex,
            graph.periphery_order().to_vec(),
            0.0,
            0.0,
        ));
    }

    let (Some(before), Some(after)) = (floor_before, min_face_angle(graph)) else {
        return None;
    };
    let floor = before.min(constraints.min_angle_deg.to_radians())
        - constraints.angle_tolerance_deg.to_radians();
    (after < floor).then(|| {
        GeometryViolation::new(
            GeometryViolationKind::AngleTooSmall,
            Vec::new(),
            after.to_degrees(),
            floor.to_degrees(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::{grow, start_triangle};
    use approx::assert_relative_eq;

    #[test]
    fn scale_by_thousand_rescales_lengths() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        grow(&mut state, 2, Some(3)).expect("Grow erwartet");
        let before = state.graph.mean_edge_length().expect("Kanten erwartet");

        transform(&mut state, 0.0, 1000.0, None).expect("Transform erwartet");
        let after = state.graph.mean_edge_length().expect("Kanten erwartet");
        assert_relative_eq!(after / before, 1000.0, max_relative = 1e-9);
    }

    #[test]
    fn invalid_scale_leaves_graph_unchanged() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        let before = state.graph.clone();

        assert!(transform(&mut state, 10.0, -2.0, None).is_err());
        assert!(std::sync::Arc::ptr_eq(&before, &state.graph));
    }

    #[test]
    fn transform_on_empty_graph_is_degenerate() {
        let mut state = AppState::new();
        assert_eq!(
            transform(&mut state, 15.0, 1.0, None),
            Err(GraphError::Degenerate { vertex_count: 0 })
        );
    }
}
