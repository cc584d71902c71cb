//! Ergebnis eines erfolgreich ausgeführten Commands.

/// Beschreibt, was ein Command verändert hat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    /// Menschenlesbare Zusammenfassung
    pub summary: String,
    /// Neue oder veränderte Vertices
    pub affected_vertex_ids: Vec<u64>,
    /// Neue oder veränderte Kanten
    pub affected_edge_ids: Vec<u64>,
    /// Entfernte Vertices
    pub removed_vertex_ids: Vec<u64>,
    /// Entfernte Kanten
    pub removed_edge_ids: Vec<u64>,
}

impl CommandReport {
    /// Report nur mit Zusammenfassung.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Setzt die betroffenen Vertices.
    pub fn with_vertices(mut self, ids: Vec<u64>) -> Self {
        self.affected_vertex_ids = ids;
        self
    }

    /// Setzt die betroffenen Kanten.
    pub fn with_edges(mut self, ids: Vec<u64>) -> Self {
        self.affected_edge_ids = ids;
        self
    }

    /// Setzt die entfernten Elemente.
    pub fn with_removed(mut self, vertex_ids: Vec<u64>, edge_ids: Vec<u64>) -> Self {
        self.removed_vertex_ids = vertex_ids;
        self.removed_edge_ids = edge_ids;
        self
    }
}
