use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::command_log::CommandLog;
use crate::app::history::{EditHistory, Snapshot};
use crate::app::CommandReport;
use crate::core::{GraphError, PlanarGraph};
use crate::shared::EditorOptions;

use super::{CommandPhase, SelectionState};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Zuletzt committeter Graph; Leser klonen nur den Arc
    pub graph: Arc<PlanarGraph>,
    /// Selection-State
    pub selection: SelectionState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Zufallsquelle für Grow und Farbwahl
    pub rng: StdRng,
    /// Phase des laufenden Commands
    pub phase: CommandPhase,
    /// Ergebnis des letzten Commands (für Status-Anzeige)
    pub last_result: Option<Result<CommandReport, GraphError>>,
    /// Pfad der zuletzt geladenen oder gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
    /// Nächste freie Vertex- und Kanten-ID der Sitzung; sinkt auch bei Undo nicht
    pub next_ids: (u64, u64),
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            graph: Arc::new(PlanarGraph::new()),
            selection: SelectionState::new(),
            command_log: CommandLog::new(options.command_log_limit),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            rng,
            phase: CommandPhase::Idle,
            last_result: None,
            current_file_path: None,
            next_ids: (1, 1),
        }
    }

    /// Gibt die Anzahl der Vertices zurück (für UI-Anzeige)
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Gibt die Anzahl der Kanten zurück (für UI-Anzeige)
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
