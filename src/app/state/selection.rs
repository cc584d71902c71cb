use indexmap::IndexSet;
use std::sync::Arc;

use crate::core::PlanarGraph;

/// Auswahlbezogener Anwendungszustand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selektierte Vertex-IDs in Klick-Reihenfolge (Arc für O(1)-Clone in RenderScene)
    pub selected_vertex_ids: Arc<IndexSet<u64>>,
    /// Selektierte Kante (normalisiertes Endpunkt-Paar)
    pub selected_edge: Option<(u64, u64)>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gibt eine mutable Referenz auf das IndexSet zurück (CoW: klont nur wenn nötig).
    #[inline]
    pub fn ids_mut(&mut self) -> &mut IndexSet<u64> {
        Arc::make_mut(&mut self.selected_vertex_ids)
    }

    /// Ist nichts selektiert?
    pub fn is_empty(&self) -> bool {
        self.selected_vertex_ids.is_empty() && self.selected_edge.is_none()
    }

    /// Hebt Vertex- und Kanten-Selektion auf.
    pub fn clear(&mut self) {
        if !self.selected_vertex_ids.is_empty() {
            self.ids_mut().clear();
        }
        self.selected_edge = None;
    }

    /// Entfernt IDs, die im Graphen nicht mehr existieren.
    pub fn retain_existing(&mut self, graph: &PlanarGraph) {
        if self
            .selected_vertex_ids
            .iter()
            .any(|id| !graph.contains_vertex(*id))
        {
            self.ids_mut().retain(|id| graph.contains_vertex(*id));
        }
        if let Some((u, v)) = self.selected_edge {
            if !graph.has_edge(u, v) {
                self.selected_edge = None;
            }
        }
    }
}
