//! JSON Import/Export des Graphen.
//!
//! Format: `{ "vertices": [...], "edges": [...], "periphery": [...] }`.
//! Export sortiert Vertices und Kanten nach ID, damit gleiche Graphen
//! byte-gleich serialisiert werden.

use serde::{Deserialize, Serialize};

pub mod parser;
pub mod writer;

pub use parser::{parse_graph_json, parse_graph_json_with};
pub use writer::write_graph_json;

/// Serialisierter Graph (exakter Feldsatz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    /// Vertices, aufsteigend nach ID
    pub vertices: Vec<VertexRecord>,
    /// Kanten, aufsteigend nach ID
    pub edges: Vec<EdgeRecord>,
    /// Peripherie-Zyklus gegen den Uhrzeigersinn
    pub periphery: Vec<u64>,
}

/// Ein Vertex im JSON-Format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexRecord {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub diameter: f64,
}

/// Eine Kante im JSON-Format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeRecord {
    pub id: u64,
    pub u: u64,
    pub v: u64,
}
