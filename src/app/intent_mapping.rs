//! Mapping von UI-Intents auf App-Commands.

use super::{AppCommand, AppIntent, AppState};
use crate::geometry::InsertionAnchor;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::PointerPicked { point, additive } => vec![AppCommand::Select {
            point,
            max_distance: state.options.pick_radius,
            additive,
        }],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],

        AppIntent::AddAtEdgeRequested { u, v } => vec![AppCommand::Add {
            anchor: InsertionAnchor::Edge { u, v },
            position: None,
            color: None,
        }],
        AppIntent::AddAtPositionRequested { u, v, position } => vec![AppCommand::Add {
            anchor: InsertionAnchor::Edge { u, v },
            position: Some(position),
            color: None,
        }],
        AppIntent::AddAtSelectionRequested => match anchor_from_selection(state) {
            Some(anchor) => vec![AppCommand::Add {
                anchor,
                position: None,
                color: None,
            }],
            None => {
                log::debug!("Einfügen ohne Selektion ignoriert");
                vec![]
            }
        },
        AppIntent::RemoveSelectedRequested => state
            .selection
            .selected_vertex_ids
            .iter()
            .map(|&vertex_id| AppCommand::Remove { vertex_id })
            .collect(),
        AppIntent::GrowRequested { count } => vec![AppCommand::Grow { count, seed: None }],
        AppIntent::StartTriangleRequested => vec![AppCommand::StartTriangle],

        AppIntent::RedrawRequested => vec![AppCommand::Redraw],
        AppIntent::RotateRequested { degrees } => vec![AppCommand::Transform {
            rotation_deg: degrees,
            scale: 1.0,
            center: None,
        }],
        AppIntent::ScaleRequested { factor } => vec![AppCommand::Transform {
            rotation_deg: 0.0,
            scale: factor,
            center: None,
        }],
        AppIntent::FitToViewRequested { min, max } => vec![AppCommand::FitToBounds { min, max }],

        AppIntent::RecolorSelectedRequested { color } => state
            .selection
            .selected_vertex_ids
            .iter()
            .map(|&vertex_id| AppCommand::Color {
                vertex_id,
                color: color.clone(),
            })
            .collect(),

        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],

        AppIntent::OpenFileRequested { path } => vec![AppCommand::LoadFile { path }],
        AppIntent::SaveRequested { path } => match path.or_else(|| state.current_file_path.clone()) {
            Some(path) => vec![AppCommand::SaveFile { path }],
            None => {
                log::warn!("Speichern ohne Pfad: keine Datei geöffnet");
                vec![]
            }
        },
        AppIntent::ImportRequested { json } => vec![AppCommand::Import { json }],
    }
}

/// Anker aus der Selektion: Kante vor Vertex vor Peripherie-Abschnitt.
fn anchor_from_selection(state: &AppState) -> Option<InsertionAnchor> {
    if let Some((u, v)) = state.selection.selected_edge {
        return Some(InsertionAnchor::Edge { u, v });
    }
    let ids = &state.selection.selected_vertex_ids;
    match ids.len() {
        0 => None,
        1 => ids.first().map(|&id| InsertionAnchor::Vertex { id }),
        _ => Some(InsertionAnchor::Segment {
            ids: ids.iter().copied().collect(),
        }),
    }
}

#[cfg(test)]
mod tests;
