//! Gemeinsame Hilfen für die Integrationstests.

#![allow(dead_code)]

use glam::DVec2;
use planar_triangulation_editor::{AppCommand, AppController, AppState, EditorOptions};

/// Zustand mit festem Seed und Start-Dreieck.
pub fn started_state() -> (AppController, AppState) {
    let mut controller = AppController::new();
    let mut state = AppState::with_options(EditorOptions {
        rng_seed: Some(2024),
        ..EditorOptions::default()
    });
    controller
        .handle_command(&mut state, AppCommand::StartTriangle)
        .expect("Start-Dreieck sollte angelegt werden");
    (controller, state)
}

/// Sechseck mit Radius 80 um den Ursprung, Zentrum Vertex 1, Ring 2..=7.
pub fn hexagon_fan_json() -> String {
    let mut vertices = vec![r##"{"id": 1, "x": 0.0, "y": 0.0, "color": "#FF6B6B", "diameter": 30.0}"##.to_string()];
    for k in 0..6 {
        let p = DVec2::from_angle((k as f64 * 60.0).to_radians()) * 80.0;
        vertices.push(format!(
            r##"{{"id": {}, "x": {}, "y": {}, "color": "#4ECDC4", "diameter": 30.0}}"##,
            k + 2,
            p.x,
            p.y
        ));
    }

    let mut edges = Vec::new();
    let mut edge_id = 1;
    for k in 0..6_u64 {
        let ring = k + 2;
        let next = (k + 1) % 6 + 2;
        edges.push(format!(r#"{{"id": {}, "u": 1, "v": {}}}"#, edge_id, ring));
        edges.push(format!(r#"{{"id": {}, "u": {}, "v": {}}}"#, edge_id + 1, ring, next));
        edge_id += 2;
    }

    format!(
        r#"{{"vertices": [{}], "edges": [{}], "periphery": [2, 3, 4, 5, 6, 7]}}"#,
        vertices.join(", "),
        edges.join(", ")
    )
}
