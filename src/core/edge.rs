//! Repräsentiert eine ungerichtete Kante zwischen zwei Vertices.

/// Normalisierter Schlüssel `(min, max)` eines Endpunkt-Paars.
#[inline]
pub fn edge_key(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Eine ungerichtete Kante, intern immer mit `u < v` gespeichert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Eindeutige, nie wiederverwendete ID
    pub id: u64,
    /// Kleinere Endpunkt-ID
    pub u: u64,
    /// Größere Endpunkt-ID
    pub v: u64,
}

impl Edge {
    /// Erstellt eine Kante; die Endpunkte werden normalisiert.
    pub fn new(id: u64, a: u64, b: u64) -> Self {
        let (u, v) = edge_key(a, b);
        Self { id, u, v }
    }

    /// Schlüssel der Kante in der Kanten-Map.
    pub fn key(&self) -> (u64, u64) {
        (self.u, self.v)
    }

    /// Prüft ob die Kante den Vertex enthält.
    pub fn contains(&self, vertex_id: u64) -> bool {
        self.u == vertex_id || self.v == vertex_id
    }

    /// Liefert den gegenüberliegenden Endpunkt.
    pub fn other(&self, vertex_id: u64) -> Option<u64> {
        if vertex_id == self.u {
            Some(self.v)
        } else if vertex_id == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_normalized() {
        let e = Edge::new(9, 5, 2);
        assert_eq!(e.key(), (2, 5));
        assert_eq!(e, Edge::new(9, 2, 5));
    }

    #[test]
    fn other_endpoint() {
        let e = Edge::new(1, 3, 4);
        assert_eq!(e.other(3), Some(4));
        assert_eq!(e.other(4), Some(3));
        assert_eq!(e.other(7), None);
        assert!(e.contains(4));
    }
}
