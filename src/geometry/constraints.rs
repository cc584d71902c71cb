//! Konfigurierbare Constraint-Parameter der Geometrie-Engine.

use serde::{Deserialize, Serialize};

/// Mindest-Innenwinkel in Grad.
pub const MIN_ANGLE_DEG: f64 = 60.0;
/// Toleranz auf den Mindestwinkel in Grad.
pub const ANGLE_TOLERANCE_DEG: f64 = 0.5;
/// Relatives Toleranzband der Kantenlängen um den Mittelwert (±20 %).
pub const LENGTH_TOLERANCE: f64 = 0.2;
/// Toleranz für den Konvexitäts-Test (Sinus der Drehung, skalenfrei).
pub const CONVEXITY_EPSILON: f64 = 1e-9;
/// Maximale Relaxations-Iterationen.
pub const MAX_RELAX_ITERATIONS: usize = 200;
/// Schrittweite eines Relaxations-Schritts (0..1].
pub const RELAX_STEP: f64 = 0.5;
/// Standard-Kantenlänge für Graphen ohne Kanten.
pub const DEFAULT_EDGE_LENGTH: f64 = 80.0;

/// Relative Toleranz auf Längen-Vergleiche (Gleitkomma-Rauschen).
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Parameter aller geometrischen Constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryConstraints {
    /// Mindest-Innenwinkel θ_min in Grad
    pub min_angle_deg: f64,
    /// Toleranz ε auf θ_min in Grad
    pub angle_tolerance_deg: f64,
    /// Relatives Längen-Toleranzband (0.2 = ±20 %)
    pub length_tolerance: f64,
    /// Konvexitäts-Toleranz auf den Sinus der Drehung
    pub convexity_epsilon: f64,
    /// Maximale Relaxations-Iterationen K
    pub max_relax_iterations: usize,
    /// Schrittweite der Relaxation
    pub relax_step: f64,
    /// Kantenlänge für Graphen ohne Kanten
    pub default_edge_length: f64,
}

impl Default for GeometryConstraints {
    fn default() -> Self {
        Self {
            min_angle_deg: MIN_ANGLE_DEG,
            angle_tolerance_deg: ANGLE_TOLERANCE_DEG,
            length_tolerance: LENGTH_TOLERANCE,
            convexity_epsilon: CONVEXITY_EPSILON,
            max_relax_iterations: MAX_RELAX_ITERATIONS,
            relax_step: RELAX_STEP,
            default_edge_length: DEFAULT_EDGE_LENGTH,
        }
    }
}

impl GeometryConstraints {
    /// Kleinster noch akzeptierter Winkel (θ_min − ε) in Radiant.
    pub fn angle_floor_rad(&self) -> f64 {
        (self.min_angle_deg - self.angle_tolerance_deg).to_radians()
    }

    /// Akzeptiertes Längenintervall um `mean`, inklusive Gleitkomma-Toleranz.
    pub fn length_band(&self, mean: f64) -> (f64, f64) {
        let slack = mean * LENGTH_EPSILON;
        (
            mean * (1.0 - self.length_tolerance) - slack,
            mean * (1.0 + self.length_tolerance) + slack,
        )
    }

    /// Prüft die Parameter auf sinnvolle Werte.
    pub fn is_valid(&self) -> bool {
        self.min_angle_deg.is_finite()
            && (0.0..60.0 + f64::EPSILON).contains(&self.min_angle_deg)
            && self.angle_tolerance_deg >= 0.0
            && (0.0..1.0).contains(&self.length_tolerance)
            && self.convexity_epsilon >= 0.0
            && self.relax_step > 0.0
            && self.relax_step <= 1.0
            && self.default_edge_length > 0.0
    }
}
