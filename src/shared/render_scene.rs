//! Render-Szene als expliziter Übergabevertrag zwischen App und Darstellung.
//!
//! Lebt im shared-Modul, da `app` sie baut und externe Renderer sie konsumieren.

use std::sync::Arc;

use indexmap::IndexSet;

use super::options::EditorOptions;
use crate::core::PlanarGraph;

/// Ausgang des letzten Commands für die Statusanzeige.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFeedback {
    /// Wurde der Command übernommen?
    pub accepted: bool,
    /// Zusammenfassung bzw. Fehlermeldung
    pub message: String,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Clone)]
pub struct RenderScene {
    /// Zuletzt committeter Graph
    pub graph: Arc<PlanarGraph>,
    /// IDs der aktuell selektierten Vertices (Arc für O(1)-Clone pro Frame)
    pub selected_vertex_ids: Arc<IndexSet<u64>>,
    /// Selektierte Kante
    pub selected_edge: Option<(u64, u64)>,
    /// Ausgang des letzten Commands
    pub last_feedback: Option<CommandFeedback>,
    /// Laufzeit-Optionen für Farben und Größen
    pub options: EditorOptions,
}

impl RenderScene {
    /// Gibt zurück, ob etwas zu zeichnen ist.
    pub fn has_graph(&self) -> bool {
        !self.graph.is_empty()
    }

    /// Ist der Vertex selektiert?
    pub fn is_selected(&self, vertex_id: u64) -> bool {
        self.selected_vertex_ids.contains(&vertex_id)
    }
}
