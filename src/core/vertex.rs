//! Repräsentiert einen Vertex des planaren Graphen.

use glam::DVec2;

/// Basis-Durchmesser eines Vertex mit einstelliger ID.
pub const VERTEX_DIAMETER_BASE: f64 = 30.0;
/// Zusätzlicher Durchmesser pro weiterer Ziffer der ID.
pub const VERTEX_DIAMETER_STEP: f64 = 5.0;

/// Ein Vertex mit Position und Darstellungsattributen
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Eindeutige, nie wiederverwendete ID
    pub id: u64,
    /// Position in Weltkoordinaten
    pub position: DVec2,
    /// Anzeigefarbe (z.B. `#FF6B6B`)
    pub color: String,
    /// Anzeigedurchmesser
    pub diameter: f64,
    /// Liegt der Vertex auf der Peripherie?
    pub on_periphery: bool,
}

impl Vertex {
    /// Erstellt einen neuen Vertex (zunächst nicht auf der Peripherie).
    pub fn new(id: u64, position: DVec2, color: impl Into<String>, diameter: f64) -> Self {
        Self {
            id,
            position,
            color: color.into(),
            diameter,
            on_periphery: false,
        }
    }
}

/// Durchmesser passend zur Label-Breite: je Ziffer über der ersten kommt `step` dazu.
pub fn diameter_for_id(id: u64, base: f64, step: f64) -> f64 {
    let digits = id.checked_ilog10().map_or(1, |d| d + 1);
    base + f64::from(digits - 1) * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_grows_with_digit_count() {
        assert_eq!(diameter_for_id(7, 30.0, 5.0), 30.0);
        assert_eq!(diameter_for_id(42, 30.0, 5.0), 35.0);
        assert_eq!(diameter_for_id(100, 30.0, 5.0), 40.0);
        assert_eq!(diameter_for_id(0, 30.0, 5.0), 30.0);
    }

    #[test]
    fn new_vertex_is_not_on_periphery() {
        let v = Vertex::new(1, DVec2::new(1.0, 2.0), "#FF6B6B", 30.0);
        assert!(!v.on_periphery);
        assert_eq!(v.color, "#FF6B6B");
    }
}
