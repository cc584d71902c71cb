use std::path::PathBuf;

use glam::DVec2;

use crate::app::{AppCommand, AppIntent, AppState};
use crate::geometry::InsertionAnchor;

use super::map_intent_to_commands;

#[test]
fn pointer_pick_uses_pick_radius_from_options() {
    let mut state = AppState::new();
    state.options.pick_radius = 7.5;

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerPicked {
            point: DVec2::new(1.0, 2.0),
            additive: true,
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::Select {
            point: DVec2::new(1.0, 2.0),
            max_distance: 7.5,
            additive: true,
        }]
    );
}

#[test]
fn save_without_path_uses_current_file() {
    let mut state = AppState::new();
    assert!(map_intent_to_commands(&state, AppIntent::SaveRequested { path: None }).is_empty());

    state.current_file_path = Some(PathBuf::from("graph.json"));
    let commands = map_intent_to_commands(&state, AppIntent::SaveRequested { path: None });
    assert_eq!(
        commands,
        vec![AppCommand::SaveFile {
            path: PathBuf::from("graph.json")
        }]
    );
}

#[test]
fn add_at_selection_prefers_selected_edge() {
    let mut state = AppState::new();
    state.selection.ids_mut().insert(4);
    state.selection.selected_edge = Some((1, 2));

    let commands = map_intent_to_commands(&state, AppIntent::AddAtSelectionRequested);
    assert!(matches!(
        commands.as_slice(),
        [AppCommand::Add {
            anchor: InsertionAnchor::Edge { u: 1, v: 2 },
            position: None,
            color: None,
        }]
    ));
}

#[test]
fn add_at_selection_maps_vertex_and_segment() {
    let mut state = AppState::new();
    state.selection.ids_mut().insert(3);
    let commands = map_intent_to_commands(&state, AppIntent::AddAtSelectionRequested);
    assert!(matches!(
        commands.as_slice(),
        [AppCommand::Add {
            anchor: InsertionAnchor::Vertex { id: 3 },
            ..
        }]
    ));

    state.selection.ids_mut().insert(1);
    state.selection.ids_mut().insert(2);
    let commands = map_intent_to_commands(&state, AppIntent::AddAtSelectionRequested);
    match commands.as_slice() {
        [AppCommand::Add {
            anchor: InsertionAnchor::Segment { ids },
            ..
        }] => assert_eq!(ids, &vec![3, 1, 2]),
        other => panic!("Segment-Anker erwartet, erhalten: {other:?}"),
    }
}

#[test]
fn remove_selected_maps_to_one_command_per_vertex_in_click_order() {
    let mut state = AppState::new();
    state.selection.ids_mut().insert(5);
    state.selection.ids_mut().insert(2);

    let commands = map_intent_to_commands(&state, AppIntent::RemoveSelectedRequested);
    assert_eq!(
        commands,
        vec![
            AppCommand::Remove { vertex_id: 5 },
            AppCommand::Remove { vertex_id: 2 },
        ]
    );
}

#[test]
fn rotate_and_scale_map_to_transform_about_centroid() {
    let state = AppState::new();

    let rotate = map_intent_to_commands(&state, AppIntent::RotateRequested { degrees: 30.0 });
    assert_eq!(
        rotate,
        vec![AppCommand::Transform {
            rotation_deg: 30.0,
            scale: 1.0,
            center: None,
        }]
    );

    let scale = map_intent_to_commands(&state, AppIntent::ScaleRequested { factor: 2.0 });
    assert_eq!(
        scale,
        vec![AppCommand::Transform {
            rotation_deg: 0.0,
            scale: 2.0,
            center: None,
        }]
    );
}
