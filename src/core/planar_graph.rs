//! Die zentrale PlanarGraph-Datenstruktur mit Vertices, Kanten, Adjazenz und Peripherie.
//!
//! Reines Datenmodell mit strukturellen Abfragen. Geometrische Prüfungen
//! liegen in `crate::geometry`; dieses Modul hält nur die winkelsortierte
//! Adjazenz aktuell.

use super::{edge_key, Edge, ElementKind, GraphError, SpatialIndex, SpatialMatch, Vertex};
use glam::DVec2;
use std::collections::BTreeMap;

/// Eintrag einer winkelsortierten Adjazenzliste.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacencyEntry {
    /// Nachbar-Vertex
    pub neighbor: u64,
    /// Richtungswinkel der Kante vom Besitzer zum Nachbarn (atan2, Radiant)
    pub angle: f64,
}

/// Vom Entfernen eines Vertex freigelegter Rand, Eingabe der Re-Triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct HoleBoundary {
    /// Der entfernte Vertex
    pub removed: Vertex,
    /// Ehemalige Nachbarn in Winkelreihenfolge (gegen den Uhrzeigersinn)
    pub ring: Vec<u64>,
    /// Entfernte Kanten
    pub removed_edges: Vec<Edge>,
    /// Peripherie-Vorgänger und -Nachfolger, falls der Vertex auf der Peripherie lag
    pub periphery_neighbors: Option<(u64, u64)>,
}

/// Planarer, triangulierter Graph mit konvexer Peripherie
#[derive(Debug, Clone)]
pub struct PlanarGraph {
    vertices: BTreeMap<u64, Vertex>,
    /// Kanten, indexiert nach normalisiertem Endpunkt-Paar
    edges: BTreeMap<(u64, u64), Edge>,
    /// Nachbarn je Vertex, aufsteigend nach Winkel
    adjacency: BTreeMap<u64, Vec<AdjacencyEntry>>,
    /// Peripherie-Zyklus gegen den Uhrzeigersinn
    periphery: Vec<u64>,
    next_vertex_id: u64,
    next_edge_id: u64,
    spatial_index: SpatialIndex,
    spatial_dirty: bool,
}

impl Default for PlanarGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PlanarGraph {
    /// Vergleicht den serialisierten Inhalt; Caches und ID-Zähler zählen nicht.
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.edges == other.edges
            && self.periphery == other.periphery
    }
}

impl PlanarGraph {
    /// Erstellt einen leeren Graphen
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            periphery: Vec::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
            spatial_index: SpatialIndex::empty(),
            spatial_dirty: false,
        }
    }

    // ── Mutationen ──────────────────────────────────────────────────

    /// Fügt einen Vertex mit frischer ID hinzu. Strukturell immer erfolgreich.
    pub fn add_vertex(&mut self, position: DVec2, color: impl Into<String>, diameter: f64) -> u64 {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        self.vertices
            .insert(id, Vertex::new(id, position, color, diameter));
        self.adjacency.insert(id, Vec::new());
        self.spatial_dirty = true;
        id
    }

    /// Übernimmt einen Vertex mit vorgegebener ID (Import).
    ///
    /// Der ID-Zähler wird hinter die größte bekannte ID gesetzt.
    pub fn restore_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError> {
        if self.vertices.contains_key(&vertex.id) {
            return Err(GraphError::InvalidParameter {
                name: "vertex.id",
                value: vertex.id.to_string(),
            });
        }
        self.next_vertex_id = self.next_vertex_id.max(vertex.id.saturating_add(1));
        self.adjacency.insert(vertex.id, Vec::new());
        self.vertices.insert(
            vertex.id,
            Vertex {
                on_periphery: false,
                ..vertex
            },
        );
        self.spatial_dirty = true;
        Ok(())
    }

    /// Fügt eine Kante hinzu. Prüft nur Struktur, keine Kreuzungen.
    pub fn add_edge(&mut self, u: u64, v: u64) -> Result<u64, GraphError> {
        let id = self.next_edge_id;
        self.insert_edge(Edge::new(id, u, v))?;
        self.next_edge_id += 1;
        Ok(id)
    }

    /// Übernimmt eine Kante mit vorgegebener ID (Import).
    pub fn restore_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.insert_edge(edge)?;
        self.next_edge_id = self.next_edge_id.max(edge.id.saturating_add(1));
        Ok(())
    }

    fn insert_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (u, v) = edge.key();
        let pu = self.position(u).ok_or(GraphError::vertex_not_found(u))?;
        let pv = self.position(v).ok_or(GraphError::vertex_not_found(v))?;
        if u == v || self.edges.contains_key(&(u, v)) {
            return Err(GraphError::DuplicateEdge { u, v });
        }

        self.edges.insert((u, v), edge);
        insert_sorted(self.adjacency.entry(u).or_default(), v, direction_angle(pu, pv));
        insert_sorted(self.adjacency.entry(v).or_default(), u, direction_angle(pv, pu));
        Ok(())
    }

    /// Entfernt die Kante zwischen `u` und `v`.
    pub fn remove_edge(&mut self, u: u64, v: u64) -> Result<Edge, GraphError> {
        let key = edge_key(u, v);
        let edge = self.edges.remove(&key).ok_or(GraphError::NotFound {
            kind: ElementKind::Edge,
            id: key.0,
        })?;
        if let Some(list) = self.adjacency.get_mut(&u) {
            list.retain(|e| e.neighbor != v);
        }
        if let Some(list) = self.adjacency.get_mut(&v) {
            list.retain(|e| e.neighbor != u);
        }
        Ok(edge)
    }

    /// Entfernt einen Vertex inklusive aller inzidenten Kanten.
    ///
    /// Die Peripherie verliert nur den Eintrag; das Schließen des Lochs
    /// (und damit der Peripherie) ist Aufgabe der Re-Triangulation.
    pub fn remove_vertex(&mut self, id: u64) -> Result<HoleBoundary, GraphError> {
        if !self.vertices.contains_key(&id) {
            return Err(GraphError::vertex_not_found(id));
        }

        let ring = self.neighbors(id);
        let periphery_neighbors = match (self.periphery_prev(id), self.periphery_next(id)) {
            (Some(prev), Some(next)) => Some((prev, next)),
            _ => None,
        };

        let mut removed_edges = Vec::with_capacity(ring.len());
        for &neighbor in &ring {
            removed_edges.push(self.remove_edge(id, neighbor)?);
        }

        self.periphery.retain(|&p| p != id);
        self.adjacency.remove(&id);
        let removed = self
            .vertices
            .remove(&id)
            .ok_or(GraphError::vertex_not_found(id))?;
        self.spatial_dirty = true;

        Ok(HoleBoundary {
            removed,
            ring,
            removed_edges,
            periphery_neighbors,
        })
    }

    /// Setzt die Position eines Vertex und sortiert die betroffene Adjazenz neu.
    pub fn set_vertex_position(&mut self, id: u64, position: DVec2) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or(GraphError::vertex_not_found(id))?;
        if vertex.position == position {
            return Ok(());
        }
        vertex.position = position;
        self.spatial_dirty = true;
        self.rebuild_adjacency_order(id);
        Ok(())
    }

    /// Setzt die Anzeigefarbe eines Vertex.
    pub fn set_vertex_color(&mut self, id: u64, color: impl Into<String>) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or(GraphError::vertex_not_found(id))?;
        vertex.color = color.into();
        Ok(())
    }

    /// Ersetzt die Peripherie und aktualisiert die Peripherie-Flags.
    pub fn set_periphery(&mut self, cycle: Vec<u64>) {
        for id in &self.periphery {
            if let Some(vertex) = self.vertices.get_mut(id) {
                vertex.on_periphery = false;
            }
        }
        for id in &cycle {
            if let Some(vertex) = self.vertices.get_mut(id) {
                vertex.on_periphery = true;
            }
        }
        self.periphery = cycle;
    }

    /// Berechnet die winkelsortierte Nachbarliste eines Vertex neu.
    ///
    /// Aktualisiert außerdem den Eintrag dieses Vertex in den Listen seiner
    /// Nachbarn, da sich deren Richtungswinkel ebenfalls geändert haben.
    pub fn rebuild_adjacency_order(&mut self, id: u64) {
        let Some(origin) = self.position(id) else {
            return;
        };
        let neighbor_ids: Vec<u64> = self
            .adjacency
            .get(&id)
            .map(|list| list.iter().map(|e| e.neighbor).collect())
            .unwrap_or_default();

        let mut entries = Vec::with_capacity(neighbor_ids.len());
        for &neighbor in &neighbor_ids {
            let Some(target) = self.position(neighbor) else {
                continue;
            };
            entries.push(AdjacencyEntry {
                neighbor,
                angle: direction_angle(origin, target),
            });

            if let Some(list) = self.adjacency.get_mut(&neighbor) {
                list.retain(|e| e.neighbor != id);
                insert_sorted(list, id, direction_angle(target, origin));
            }
        }
        entries.sort_by(compare_entries);
        self.adjacency.insert(id, entries);
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Liefert einen Vertex.
    pub fn vertex(&self, id: u64) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Position eines Vertex.
    pub fn position(&self, id: u64) -> Option<DVec2> {
        self.vertices.get(&id).map(|v| v.position)
    }

    /// Iterator über alle Vertices in ID-Reihenfolge.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Iterator über alle Kanten (nach Endpunkt-Paar sortiert).
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Prüft ob ein Vertex existiert.
    pub fn contains_vertex(&self, id: u64) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Prüft ob eine Kante zwischen `u` und `v` existiert.
    pub fn has_edge(&self, u: u64, v: u64) -> bool {
        self.edges.contains_key(&edge_key(u, v))
    }

    /// Liefert die Kante zwischen `u` und `v`.
    pub fn edge_between(&self, u: u64, v: u64) -> Option<&Edge> {
        self.edges.get(&edge_key(u, v))
    }

    /// Sucht eine Kante über ihre ID (linear).
    pub fn edge_by_id(&self, id: u64) -> Option<&Edge> {
        self.edges.values().find(|e| e.id == id)
    }

    /// Anzahl Vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Anzahl Kanten.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Gibt `true` zurück, wenn der Graph keine Vertices hat.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Nachbarn eines Vertex, aufsteigend nach Winkel.
    pub fn neighbors(&self, id: u64) -> Vec<u64> {
        self.adjacency
            .get(&id)
            .map(|list| list.iter().map(|e| e.neighbor).collect())
            .unwrap_or_default()
    }

    /// Winkelsortierte Adjazenzliste mit gecachten Winkeln.
    pub fn adjacency(&self, id: u64) -> &[AdjacencyEntry] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Liegt der Vertex auf der Peripherie?
    pub fn is_on_periphery(&self, id: u64) -> bool {
        self.vertices.get(&id).is_some_and(|v| v.on_periphery)
    }

    /// Peripherie-Zyklus gegen den Uhrzeigersinn.
    pub fn periphery_order(&self) -> &[u64] {
        &self.periphery
    }

    /// Index eines Vertex in der Peripherie.
    pub fn periphery_index(&self, id: u64) -> Option<usize> {
        self.periphery.iter().position(|&p| p == id)
    }

    /// Nachfolger auf der Peripherie (gegen den Uhrzeigersinn).
    pub fn periphery_next(&self, id: u64) -> Option<u64> {
        let index = self.periphery_index(id)?;
        self.periphery
            .get((index + 1) % self.periphery.len())
            .copied()
    }

    /// Vorgänger auf der Peripherie.
    pub fn periphery_prev(&self, id: u64) -> Option<u64> {
        let index = self.periphery_index(id)?;
        let len = self.periphery.len();
        self.periphery.get((index + len - 1) % len).copied()
    }

    /// Peripherie-Kanten als gerichtete Paare `(a, b)` gegen den Uhrzeigersinn.
    pub fn periphery_edges(&self) -> Vec<(u64, u64)> {
        let len = self.periphery.len();
        (0..len)
            .map(|i| (self.periphery[i], self.periphery[(i + 1) % len]))
            .collect()
    }

    /// Länge der Kante zwischen zwei Vertices.
    pub fn distance(&self, u: u64, v: u64) -> Option<f64> {
        Some(self.position(u)?.distance(self.position(v)?))
    }

    /// Mittlere Kantenlänge; `None` ohne Kanten.
    pub fn mean_edge_length(&self) -> Option<f64> {
        if self.edges.is_empty() {
            return None;
        }
        let total: f64 = self
            .edges
            .keys()
            .filter_map(|&(u, v)| self.distance(u, v))
            .sum();
        Some(total / self.edges.len() as f64)
    }

    /// Schwerpunkt aller Vertex-Positionen.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec2 = self.vertices.values().map(|v| v.position).sum();
        Some(sum / self.vertices.len() as f64)
    }

    /// Achsenparallele Bounding-Box `(min, max)`.
    pub fn bounding_box(&self) -> Option<(DVec2, DVec2)> {
        let mut iter = self.vertices.values().map(|v| v.position);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// ID, die der nächste neue Vertex bekommt.
    pub fn peek_next_vertex_id(&self) -> u64 {
        self.next_vertex_id
    }

    /// ID, die die nächste neue Kante bekommt.
    pub fn peek_next_edge_id(&self) -> u64 {
        self.next_edge_id
    }

    /// Hebt die ID-Zähler mindestens auf die übergebenen Werte an.
    ///
    /// Die Zähler sinken nie; bereits vergebene IDs bleiben gesperrt.
    pub fn reserve_ids(&mut self, next_vertex_id: u64, next_edge_id: u64) {
        self.next_vertex_id = self.next_vertex_id.max(next_vertex_id);
        self.next_edge_id = self.next_edge_id.max(next_edge_id);
    }

    // ── Spatial-Index ───────────────────────────────────────────────

    /// Baut den Spatial-Index neu auf, falls Positionen sich geändert haben.
    pub fn ensure_spatial_index(&mut self) {
        if self.spatial_dirty {
            self.rebuild_spatial_index();
        }
    }

    /// Baut den persistenten Spatial-Index aus den aktuellen Vertices neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial_index = SpatialIndex::from_vertices(&self.vertices);
        self.spatial_dirty = false;
    }

    /// Findet den nächstgelegenen Vertex zur Weltposition.
    ///
    /// Bei veraltetem Index wird linear gesucht, damit Abfragen auf einer
    /// Scratch-Kopie nie falsche Treffer liefern.
    pub fn nearest_vertex(&self, query: DVec2) -> Option<SpatialMatch> {
        if !self.spatial_dirty {
            return self.spatial_index.nearest(query);
        }
        self.vertices
            .values()
            .map(|v| SpatialMatch {
                vertex_id: v.id,
                distance: v.position.distance(query),
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Findet alle Vertices innerhalb eines Radius, nach Distanz sortiert.
    pub fn vertices_within_radius(&self, query: DVec2, radius: f64) -> Vec<SpatialMatch> {
        if !self.spatial_dirty {
            return self.spatial_index.within_radius(query, radius);
        }
        let mut matches: Vec<SpatialMatch> = self
            .vertices
            .values()
            .map(|v| SpatialMatch {
                vertex_id: v.id,
                distance: v.position.distance(query),
            })
            .filter(|m| m.distance <= radius)
            .collect();
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches
    }
}

/// Richtungswinkel von `from` nach `to` in (-π, π].
#[inline]
pub fn direction_angle(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

fn compare_entries(a: &AdjacencyEntry, b: &AdjacencyEntry) -> std::cmp::Ordering {
    a.angle
        .total_cmp(&b.angle)
        .then_with(|| a.neighbor.cmp(&b.neighbor))
}

fn insert_sorted(list: &mut Vec<AdjacencyEntry>, neighbor: u64, angle: f64) {
    let entry = AdjacencyEntry { neighbor, angle };
    let index = list.partition_point(|e| compare_entries(e, &entry).is_lt());
    list.insert(index, entry);
}
