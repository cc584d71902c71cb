//! Geometrie-Engine: Constraints, Prädikate, Flächen, Einfügen,
//! Re-Triangulation, Relaxation und globale Transformationen.
//!
//! Alle Funktionen arbeiten auf `&PlanarGraph` bzw. auf einer privaten
//! `&mut PlanarGraph`-Kopie des Aufrufers; Commit und Rollback liegen im
//! App-Layer.

pub mod constraints;
pub mod faces;
pub mod insertion;
pub mod invariants;
pub mod predicates;
pub mod relax;
pub mod retriangulate;
pub mod transform;

pub use constraints::GeometryConstraints;
pub use faces::{bounded_triangles, min_face_angle, walk_faces, Face};
pub use insertion::{
    apply_insertion, candidate_for_span, compute_insertion_position, periphery_after_insertion,
    resolve_anchor, target_edge_length, validate_insertion, InsertionAnchor, InsertionOutcome,
    PeripherySpan,
};
pub use invariants::{check_constraints, check_global_invariants, ConstraintResidual};
pub use relax::{relax, RelaxReport};
pub use retriangulate::{remove_and_retriangulate, retriangulate_hole, Retriangulation};
pub use transform::{fit_to_bounds, initial_triangle, rotate_and_scale, StartVertexStyle};
