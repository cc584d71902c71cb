//! Fehler-Taxonomie des Graph-Kerns.
//!
//! Alle Fehler sind lokal zu genau einem Command und lassen den
//! committed Zustand unverändert.

use std::fmt;

/// Art des referenzierten Elements bei `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Vertex
    Vertex,
    /// Kante
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => write!(f, "Vertex"),
            ElementKind::Edge => write!(f, "Kante"),
        }
    }
}

/// Welche geometrische Bedingung verletzt wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryViolationKind {
    /// Innenwinkel unter θ_min
    AngleTooSmall,
    /// Kantenlänge außerhalb des Toleranzbands um den Mittelwert
    LengthOutOfTolerance,
    /// Peripherie wäre nicht mehr konvex
    NonConvex,
    /// Neue Kante schneidet oder berührt eine bestehende Kante
    EdgesCross,
    /// Relaxation nach K Iterationen nicht konvergiert
    NonConvergent,
}

impl fmt::Display for GeometryViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryViolationKind::AngleTooSmall => "AngleTooSmall",
            GeometryViolationKind::LengthOutOfTolerance => "LengthOutOfTolerance",
            GeometryViolationKind::NonConvex => "NonConvex",
            GeometryViolationKind::EdgesCross => "EdgesCross",
            GeometryViolationKind::NonConvergent => "NonConvergent",
        };
        f.write_str(name)
    }
}

/// Verletzte Bedingung inklusive betroffener Vertices und Messwert.
///
/// `measured`/`limit` hängen von der Art ab: Grad bei Winkeln, Verhältnis
/// Länge/Mittelwert bei Längen, Sinus der Drehung bei Konvexität,
/// Restfehler bei Nicht-Konvergenz. Kandidaten-Vertices, die noch nicht
/// existieren, tragen die ID, die sie beim Commit bekommen würden.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} an Vertices {vertex_ids:?} (gemessen {measured:.4}, Grenze {limit:.4})")]
pub struct GeometryViolation {
    /// Art der Verletzung
    pub kind: GeometryViolationKind,
    /// Betroffene Vertex-IDs
    pub vertex_ids: Vec<u64>,
    /// Gemessener Wert
    pub measured: f64,
    /// Verletzte Grenze
    pub limit: f64,
}

impl GeometryViolation {
    /// Erstellt eine Verletzung.
    pub fn new(kind: GeometryViolationKind, vertex_ids: Vec<u64>, measured: f64, limit: f64) -> Self {
        Self {
            kind,
            vertex_ids,
            measured,
            limit,
        }
    }
}

/// Einzelner Befund des globalen Invarianten-Checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// Nicht-leerer Graph mit weniger als 3 Vertices
    #[error("Graph hat nur {count} Vertices (mindestens 3 oder leer)")]
    TooFewVertices { count: usize },
    /// Leerer Graph mit Kanten oder Peripherie
    #[error("Leerer Graph mit Kanten oder Peripherie")]
    EmptyGraphNotClean,
    /// Peripherie mit weniger als 3 Einträgen
    #[error("Peripherie hat nur {len} Vertices")]
    PeripheryTooShort { len: usize },
    /// Peripherie referenziert unbekannten Vertex
    #[error("Peripherie referenziert unbekannten Vertex {id}")]
    PeripheryUnknownVertex { id: u64 },
    /// Vertex kommt mehrfach in der Peripherie vor
    #[error("Vertex {id} kommt mehrfach in der Peripherie vor")]
    PeripheryDuplicate { id: u64 },
    /// Aufeinanderfolgende Peripherie-Vertices ohne Kante
    #[error("Peripherie-Nachbarn {u} und {v} sind nicht durch eine Kante verbunden")]
    PeripheryMissingEdge { u: u64, v: u64 },
    /// Peripherie dreht an einem Vertex in die falsche Richtung
    #[error("Peripherie ist bei Vertex {id} nicht konvex (Sinus {sine:.3e})")]
    PeripheryNotConvex { id: u64, sine: f64 },
    /// Gesamtdrehung der Peripherie ist nicht +2π
    #[error("Peripherie ist nicht einfach/gegen den Uhrzeigersinn (Gesamtdrehung {total_turn:.4})")]
    PeripheryWinding { total_turn: f64 },
    /// Peripherie-Flag passt nicht zur Peripherie-Folge
    #[error("Peripherie-Flag von Vertex {id} ist inkonsistent")]
    PeripheryFlagMismatch { id: u64 },
    /// Kante referenziert unbekannten Vertex
    #[error("Kante {u}-{v} referenziert einen unbekannten Vertex")]
    UnknownEdgeEndpoint { u: u64, v: u64 },
    /// Adjazenzliste stimmt nicht mit den Kanten überein
    #[error("Adjazenz von Vertex {id} stimmt nicht mit den Kanten überein")]
    AdjacencyMismatch { id: u64 },
    /// Adjazenzliste nicht nach Winkel sortiert oder Winkel veraltet
    #[error("Adjazenz von Vertex {id} ist nicht winkelsortiert")]
    AdjacencyUnsorted { id: u64 },
    /// Zwei Kanten schneiden sich
    #[error("Kanten {a:?} und {b:?} schneiden sich")]
    EdgesCross { a: (u64, u64), b: (u64, u64) },
    /// Beschränkte Fläche ist kein Dreieck
    #[error("Beschränkte Fläche {vertices:?} ist kein Dreieck")]
    NonTriangularFace { vertices: Vec<u64> },
    /// Äußere Fläche fehlt, ist mehrfach vorhanden oder passt nicht zur Peripherie
    #[error("Äußere Fläche stimmt nicht mit der Peripherie überein ({outer_faces} Kandidaten)")]
    OuterFaceMismatch { outer_faces: usize },
    /// Euler-Relation verletzt
    #[error("Euler-Relation verletzt: {actual} Dreiecke statt {expected}")]
    EulerMismatch { expected: usize, actual: usize },
    /// Import: doppelte Vertex-ID
    #[error("Vertex-ID {id} ist doppelt vergeben")]
    DuplicateVertexId { id: u64 },
    /// Import: doppelte Kanten-ID
    #[error("Kanten-ID {id} ist doppelt vergeben")]
    DuplicateEdgeId { id: u64 },
    /// Import: doppelte Kante zwischen demselben Paar
    #[error("Kante {u}-{v} ist doppelt vorhanden")]
    DuplicateEdge { u: u64, v: u64 },
    /// Import: Schleife
    #[error("Kante {id} verbindet Vertex {vertex} mit sich selbst")]
    SelfLoop { id: u64, vertex: u64 },
    /// Import: ungültige Koordinate
    #[error("Vertex {id} hat keine endliche Position")]
    NonFinitePosition { id: u64 },
}

/// Fehler eines Graph-Commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Referenzierte ID existiert nicht
    #[error("{kind} {id} nicht gefunden")]
    NotFound { kind: ElementKind, id: u64 },
    /// Kante existiert bereits (oder Schleife)
    #[error("Kante {u}-{v} existiert bereits oder ist ungültig")]
    DuplicateEdge { u: u64, v: u64 },
    /// Edit würde eine geometrische Invariante brechen
    #[error("Geometrie-Verletzung: {0}")]
    GeometryViolation(#[from] GeometryViolation),
    /// Importierter oder simulierter Graph verletzt globale Invarianten
    #[error("Validierung fehlgeschlagen: {} Verletzung(en), erste: {}", .violations.len(), first_violation(.violations))]
    Validation { violations: Vec<InvariantViolation> },
    /// Anker-Vertex liegt nicht auf der Peripherie
    #[error("Vertex {id} liegt nicht auf der Peripherie")]
    NotOnPeriphery { id: u64 },
    /// Anker-Vertices sind auf der Peripherie nicht benachbart
    #[error("Vertices {u} und {v} sind auf der Peripherie nicht benachbart")]
    NotAdjacentOnPeriphery { u: u64, v: u64 },
    /// Operation braucht mehr Vertices
    #[error("Graph mit {vertex_count} Vertices ist zu klein für diese Operation")]
    Degenerate { vertex_count: usize },
    /// Ungültiger Command-Parameter
    #[error("Ungültiger Parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    /// Vertex-Limit erreicht
    #[error("Vertex-Limit von {limit} erreicht")]
    CapacityExceeded { limit: usize },
    /// Undo/Redo ohne Eintrag
    #[error("{action}: nichts zu tun")]
    NothingTo { action: &'static str },
    /// Dateisystemfehler
    #[error("Datei {path}: {message}")]
    Io { path: String, message: String },
    /// JSON-Inhalt nicht lesbar oder nicht schreibbar
    #[error("JSON fehlerhaft: {message}")]
    Parse { message: String },
}

fn first_violation(violations: &[InvariantViolation]) -> String {
    violations
        .first()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

impl GraphError {
    /// Kurzform für fehlende Vertices.
    pub fn vertex_not_found(id: u64) -> Self {
        GraphError::NotFound {
            kind: ElementKind::Vertex,
            id,
        }
    }

    /// Liefert die Geometrie-Verletzung, falls es eine ist.
    pub fn geometry_violation(&self) -> Option<&GeometryViolation> {
        match self {
            GraphError::GeometryViolation(v) => Some(v),
            _ => None,
        }
    }
}
