//! Use-Case-Funktionen für Import, Laden und Speichern von Graph-Dateien.

use std::path::Path;

use crate::app::transaction;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;
use crate::json::{parse_graph_json_with, write_graph_json};

/// Ersetzt den Graphen durch den Inhalt eines JSON-Dokuments.
///
/// Der Import läuft wie jeder Command über eine Transaktion und ist per
/// Undo rückgängig zu machen. Die Selektion wird verworfen.
pub fn import_json(state: &mut AppState, json: &str) -> Result<CommandReport, GraphError> {
    let report = transaction::execute(state, "Import", |graph, ctx| {
        *graph = parse_graph_json_with(json, &ctx.options.geometry)?;
        let ids: Vec<u64> = graph.vertices().map(|v| v.id).collect();
        Ok(CommandReport::new(format!(
            "{} Vertices, {} Kanten importiert",
            graph.vertex_count(),
            graph.edge_count()
        ))
        .with_vertices(ids))
    })?;
    state.selection.clear();
    Ok(report)
}

/// Lädt eine JSON-Datei und übernimmt sie als neuen Graphen.
pub fn load_file(state: &mut AppState, path: &Path) -> Result<CommandReport, GraphError> {
    log::info!("Lade Graph-Datei: {}", path.display());
    let json = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let report = import_json(state, &json)?;
    state.current_file_path = Some(path.to_path_buf());
    Ok(report)
}

/// Speichert den zuletzt committeten Graphen als JSON-Datei.
pub fn save_file(state: &mut AppState, path: &Path) -> Result<CommandReport, GraphError> {
    let json = write_graph_json(&state.graph)?;
    std::fs::write(path, json).map_err(|e| GraphError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    log::info!("Graph gespeichert nach: {}", path.display());
    state.current_file_path = Some(path.to_path_buf());
    Ok(CommandReport::new(format!("Gespeichert: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::editing::{grow, start_triangle};

    #[test]
    fn save_and_load_restore_identical_graph() {
        let dir = tempfile::tempdir().expect("Temp-Verzeichnis erwartet");
        let path = dir.path().join("graph.json");

        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");
        grow(&mut state, 2, Some(5)).expect("Grow erwartet");
        save_file(&mut state, &path).expect("Speichern erwartet");

        let mut loaded = AppState::new();
        load_file(&mut loaded, &path).expect("Laden erwartet");
        assert_eq!(*loaded.graph, *state.graph);
        assert_eq!(loaded.current_file_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("Temp-Verzeichnis erwartet");
        let mut state = AppState::new();

        let result = load_file(&mut state, &dir.path().join("fehlt.json"));
        assert!(matches!(result, Err(GraphError::Io { .. })));
        assert!(state.current_file_path.is_none());
    }

    #[test]
    fn broken_json_keeps_current_graph() {
        let mut state = AppState::new();
        start_triangle(&mut state).expect("Start-Dreieck erwartet");

        let result = import_json(&mut state, "{ \"vertices\": [");
        assert!(matches!(result, Err(GraphError::Parse { .. })));
        assert_eq!(state.graph.vertex_count(), 3);
    }
}
