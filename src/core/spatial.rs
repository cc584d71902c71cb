//! Spatial-Index (KD-Tree) für schnelle Vertex-Abfragen.

use std::collections::BTreeMap;

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::Vertex;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Vertex
    pub vertex_id: u64,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über allen Vertices eines Graphen.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    vertex_ids: Vec<u64>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            vertex_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Vertices.
    pub fn from_vertices(vertices: &BTreeMap<u64, Vertex>) -> Self {
        let vertex_ids: Vec<u64> = vertices.keys().copied().collect();
        let entries: Vec<[f64; 2]> = vertices
            .values()
            .map(|v| [v.position.x, v.position.y])
            .collect();

        let tree: KdTree<f64, 2> = (&entries).into();

        Self { tree, vertex_ids }
    }

    /// Gibt die Anzahl indexierter Vertices zurück.
    pub fn len(&self) -> usize {
        self.vertex_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Vertices im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.vertex_ids.is_empty()
    }

    /// Findet den nächsten Vertex zur gegebenen Weltposition.
    pub fn nearest(&self, query: DVec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let vertex_id = *self.vertex_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            vertex_id,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Vertices innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: DVec2, radius: f64) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .filter_map(|entry| {
                let vertex_id = *self.vertex_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    vertex_id,
                    distance: entry.distance.sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}
