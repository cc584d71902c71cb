//! Handler für Datei-Operationen (Laden, Speichern, Import).

use std::path::PathBuf;

use crate::app::use_cases;
use crate::app::{AppState, CommandReport};
use crate::core::GraphError;

/// Importiert einen Graphen aus JSON-Text.
pub fn import(state: &mut AppState, json: &str) -> Result<CommandReport, GraphError> {
    use_cases::file_io::import_json(state, json)
}

/// Lädt eine Datei vom angegebenen Pfad.
pub fn load(state: &mut AppState, path: PathBuf) -> Result<CommandReport, GraphError> {
    use_cases::file_io::load_file(state, &path)
}

/// Speichert den Graphen unter dem angegebenen Pfad.
pub fn save(state: &mut AppState, path: PathBuf) -> Result<CommandReport, GraphError> {
    use_cases::file_io::save_file(state, &path)
}
