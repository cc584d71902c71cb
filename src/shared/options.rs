//! Zentrale Konfiguration des Editors.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{diameter_for_id, VERTEX_DIAMETER_BASE, VERTEX_DIAMETER_STEP};
use crate::geometry::GeometryConstraints;

// ── Start ───────────────────────────────────────────────────────────

/// Mittelpunkt des Start-Dreiecks.
pub const START_CENTER: [f64; 2] = [400.0, 300.0];

// ── Vertices ────────────────────────────────────────────────────────

/// Standard-Farbpalette für neue Vertices.
pub const VERTEX_PALETTE: [&str; 4] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A"];

// ── Selektion ───────────────────────────────────────────────────────

/// Pick-Radius in Welteinheiten.
pub const PICK_RADIUS: f64 = 20.0;

// ── Verlauf ─────────────────────────────────────────────────────────

/// Maximale Undo-Tiefe.
pub const HISTORY_DEPTH: usize = 200;
/// Maximale Einträge im Command-Log.
pub const COMMAND_LOG_LIMIT: usize = 50;

// ── Wachstum ────────────────────────────────────────────────────────

/// Obergrenze der Vertex-Anzahl.
pub const MAX_VERTICES: usize = 10_000;
/// Anteil des Zielrechtecks beim Einpassen.
pub const FIT_PADDING: f64 = 0.8;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `planar_triangulation_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    // ── Start ───────────────────────────────────────────────────
    /// Mittelpunkt des Start-Dreiecks
    pub start_center: [f64; 2],

    // ── Vertices ────────────────────────────────────────────────
    /// Farbpalette für neue Vertices (zufällige Auswahl)
    pub vertex_palette: Vec<String>,
    /// Basis-Durchmesser eines Vertex
    pub vertex_diameter_base: f64,
    /// Zusätzlicher Durchmesser je weiterer Ziffer der Vertex-ID
    pub vertex_diameter_step: f64,

    // ── Selektion ───────────────────────────────────────────────
    /// Pick-Radius für Klick-Selektion in Welteinheiten
    pub pick_radius: f64,

    // ── Verlauf ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    pub history_depth: usize,
    /// Maximale Länge des Command-Logs
    pub command_log_limit: usize,

    // ── Commands ────────────────────────────────────────────────
    /// Relaxation nach fehlgeschlagener Einfügung versuchen statt sofort abzulehnen
    pub relax_on_add: bool,
    /// Fester Seed für Grow und Farbwahl (reproduzierbare Sitzungen)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Obergrenze der Vertex-Anzahl
    pub max_vertices: usize,
    /// Anteil des Zielrechtecks, den FitToBounds nutzt
    pub fit_padding: f64,

    // ── Geometrie ───────────────────────────────────────────────
    /// Constraint-Parameter der Geometrie-Engine
    pub geometry: GeometryConstraints,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            start_center: START_CENTER,

            vertex_palette: VERTEX_PALETTE.iter().map(|c| c.to_string()).collect(),
            vertex_diameter_base: VERTEX_DIAMETER_BASE,
            vertex_diameter_step: VERTEX_DIAMETER_STEP,

            pick_radius: PICK_RADIUS,

            history_depth: HISTORY_DEPTH,
            command_log_limit: COMMAND_LOG_LIMIT,

            relax_on_add: false,
            rng_seed: None,
            max_vertices: MAX_VERTICES,
            fit_padding: FIT_PADDING,

            geometry: GeometryConstraints::default(),
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) if opts.geometry.is_valid() => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Ok(_) => {
                    log::warn!("Geometrie-Parameter ungültig, verwende Standardwerte");
                    Self::default()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("planar_triangulation_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("planar_triangulation_editor.toml")
    }

    /// Mittelpunkt des Start-Dreiecks als Vektor.
    pub fn start_center(&self) -> glam::DVec2 {
        glam::DVec2::from_array(self.start_center)
    }

    /// Palettenfarbe zu einem Index (zyklisch); Fallback bei leerer Palette.
    pub fn palette_color(&self, index: usize) -> String {
        if self.vertex_palette.is_empty() {
            return VERTEX_PALETTE[index % VERTEX_PALETTE.len()].to_string();
        }
        self.vertex_palette[index % self.vertex_palette.len()].clone()
    }

    /// Durchmesser für einen Vertex mit dieser ID.
    ///
    /// `base + step × (Ziffern − 1)`
    pub fn diameter_for_vertex(&self, id: u64) -> f64 {
        diameter_for_id(id, self.vertex_diameter_base, self.vertex_diameter_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_roundtrip_keeps_all_values() {
        let options = EditorOptions {
            relax_on_add: true,
            rng_seed: Some(7),
            pick_radius: 12.5,
            ..EditorOptions::default()
        };
        let text = toml::to_string_pretty(&options).unwrap();
        let parsed: EditorOptions = toml::from_str(&text).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed: EditorOptions = toml::from_str(
            r#"
            relax_on_add = true

            [geometry]
            length_tolerance = 0.25
            "#,
        )
        .unwrap();

        assert!(parsed.relax_on_add);
        assert_eq!(parsed.geometry.length_tolerance, 0.25);
        assert_eq!(parsed.geometry.min_angle_deg, 60.0);
        assert_eq!(parsed.history_depth, HISTORY_DEPTH);
        assert!(parsed.rng_seed.is_none());
    }

    #[test]
    fn palette_cycles_and_diameter_grows_with_digits() {
        let options = EditorOptions::default();
        assert_eq!(options.palette_color(0), "#FF6B6B");
        assert_eq!(options.palette_color(5), "#4ECDC4");
        assert_eq!(options.diameter_for_vertex(7), 30.0);
        assert_eq!(options.diameter_for_vertex(123), 40.0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = EditorOptions::load_from_file(&dir.path().join("fehlt.toml"));
        assert_eq!(options, EditorOptions::default());
    }
}
