use std::path::PathBuf;

use glam::DVec2;

use crate::geometry::InsertionAnchor;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Geschlossene Menge: `AppController::handle_command` matcht exhaustiv.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // ── Selektion (read-only auf dem Graphen) ───────────────────
    /// Nächsten Vertex (oder sonst die nächste Kante) zum Punkt selektieren
    Select {
        point: DVec2,
        max_distance: f64,
        additive: bool,
    },
    /// Selektion aufheben
    ClearSelection,

    // ── Struktur ────────────────────────────────────────────────
    /// Vertex entfernen und Loch neu triangulieren
    Remove { vertex_id: u64 },
    /// Neuen Vertex an einem Peripherie-Anker einfügen
    Add {
        anchor: InsertionAnchor,
        /// Erzwungene Position statt des berechneten Kandidaten
        position: Option<DVec2>,
        /// Farbe; `None` wählt zufällig aus der Palette
        color: Option<String>,
    },
    /// Wiederholtes zufälliges Einfügen an der Peripherie
    Grow { count: usize, seed: Option<u64> },
    /// Graph durch das gleichseitige Start-Dreieck ersetzen
    StartTriangle,

    // ── Geometrie ───────────────────────────────────────────────
    /// Relaxation auf dem ganzen Graphen
    Redraw,
    /// Drehen und gleichmäßig skalieren
    Transform {
        rotation_deg: f64,
        scale: f64,
        /// Drehzentrum; `None` = Schwerpunkt der Vertices
        center: Option<DVec2>,
    },
    /// Graph in ein Rechteck einpassen
    FitToBounds { min: DVec2, max: DVec2 },

    // ── Attribute ───────────────────────────────────────────────
    /// Farbe eines Vertex setzen
    Color { vertex_id: u64, color: String },

    // ── History ─────────────────────────────────────────────────
    /// Letzten Commit rückgängig machen
    Undo,
    /// Rückgängig gemachten Commit wiederherstellen
    Redo,

    // ── Datei-I/O ───────────────────────────────────────────────
    /// Graph aus JSON-Text importieren
    Import { json: String },
    /// Graph aus einer JSON-Datei laden
    LoadFile { path: PathBuf },
    /// Graph als JSON-Datei speichern
    SaveFile { path: PathBuf },
}

impl AppCommand {
    /// Kurzname für Log und Command-Log.
    pub fn label(&self) -> &'static str {
        match self {
            AppCommand::Select { .. } => "Select",
            AppCommand::ClearSelection => "ClearSelection",
            AppCommand::Remove { .. } => "Remove",
            AppCommand::Add { .. } => "Add",
            AppCommand::Grow { .. } => "Grow",
            AppCommand::StartTriangle => "StartTriangle",
            AppCommand::Redraw => "Redraw",
            AppCommand::Transform { .. } => "Transform",
            AppCommand::FitToBounds { .. } => "FitToBounds",
            AppCommand::Color { .. } => "Color",
            AppCommand::Undo => "Undo",
            AppCommand::Redo => "Redo",
            AppCommand::Import { .. } => "Import",
            AppCommand::LoadFile { .. } => "LoadFile",
            AppCommand::SaveFile { .. } => "SaveFile",
        }
    }

    /// Verändert der Command potenziell den Graphen?
    pub fn mutates_graph(&self) -> bool {
        !matches!(
            self,
            AppCommand::Select { .. } | AppCommand::ClearSelection | AppCommand::SaveFile { .. }
        )
    }
}
