//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration und die Render-Szene, die `app` baut und
//! externe Darstellungen lesen.

pub mod options;
mod render_scene;

pub use options::EditorOptions;
pub use options::{MAX_VERTICES, PICK_RADIUS};
pub use render_scene::{CommandFeedback, RenderScene};
