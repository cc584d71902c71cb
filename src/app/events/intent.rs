use std::path::PathBuf;

use glam::DVec2;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Klick in die Zeichenfläche (Vertex- oder Kanten-Pick)
    PointerPicked { point: DVec2, additive: bool },
    /// Selektion aufheben
    ClearSelectionRequested,
    /// Vertex an einer Peripherie-Kante anfügen
    AddAtEdgeRequested { u: u64, v: u64 },
    /// Vertex an der aktuellen Selektion anfügen (Kante, Vertex oder Abschnitt)
    AddAtSelectionRequested,
    /// Vertex an einer Peripherie-Kante mit vorgegebener Position anfügen
    AddAtPositionRequested { u: u64, v: u64, position: DVec2 },
    /// Selektierte Vertices entfernen
    RemoveSelectedRequested,
    /// Graph um `count` Vertices wachsen lassen
    GrowRequested { count: usize },
    /// Relaxation anstoßen
    RedrawRequested,
    /// Selektierte Vertices umfärben
    RecolorSelectedRequested { color: String },
    /// Um den Schwerpunkt drehen
    RotateRequested { degrees: f64 },
    /// Um den Schwerpunkt skalieren
    ScaleRequested { factor: f64 },
    /// Graph in die Zeichenfläche einpassen
    FitToViewRequested { min: DVec2, max: DVec2 },
    /// Neu beginnen mit dem Start-Dreieck
    StartTriangleRequested,
    /// Undo
    UndoRequested,
    /// Redo
    RedoRequested,
    /// Datei öffnen
    OpenFileRequested { path: PathBuf },
    /// Speichern; `None` = unter dem zuletzt verwendeten Pfad
    SaveRequested { path: Option<PathBuf> },
    /// JSON aus der Zwischenablage o.ä. importieren
    ImportRequested { json: String },
}
