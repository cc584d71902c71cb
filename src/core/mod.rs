//! Core-Domänentypen: Vertices, Kanten, PlanarGraph, Fehler, Spatial-Index.

pub mod edge;
pub mod error;
/// Core-Datenmodell des Editors
///
/// - PlanarGraph: Container für Vertices, Kanten, Adjazenz und Peripherie
/// - Vertex: Punkt mit Position und Darstellungsattributen
/// - Edge: ungerichtete Kante zwischen zwei Vertices
pub mod planar_graph;
pub mod spatial;
pub mod vertex;

pub use edge::{edge_key, Edge};
pub use error::{
    ElementKind, GeometryViolation, GeometryViolationKind, GraphError, InvariantViolation,
};
pub use planar_graph::{direction_angle, AdjacencyEntry, HoleBoundary, PlanarGraph};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use vertex::{diameter_for_id, Vertex, VERTEX_DIAMETER_BASE, VERTEX_DIAMETER_STEP};
