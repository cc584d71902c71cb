//! Planar Triangulation Editor Library.
//! Graph-Kern, Geometrie-Engine und Command-Verarbeitung als Library
//! exportiert für Tests, Benchmarks und externe Oberflächen.

pub mod app;
pub mod core;
pub mod geometry;
pub mod json;
pub mod shared;

pub use app::{
    parse_script, AppCommand, AppController, AppIntent, AppState, CommandPhase, CommandReport,
};
pub use core::{
    Edge, GeometryViolation, GeometryViolationKind, GraphError, InvariantViolation, PlanarGraph,
    SpatialIndex, SpatialMatch, Vertex,
};
pub use geometry::{GeometryConstraints, InsertionAnchor};
pub use json::{parse_graph_json, write_graph_json};
pub use shared::{EditorOptions, RenderScene};
