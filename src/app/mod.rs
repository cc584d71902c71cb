//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod render_scene;
pub mod report;
pub mod script;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Graph, Selektion, Verlauf).
pub mod state;
pub mod transaction;
pub mod use_cases;

pub use command_log::{CommandLog, CommandLogEntry};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use render_scene::build as build_render_scene;
pub use report::CommandReport;
pub use script::parse_script;
pub use state::{AppState, CommandPhase, SelectionState};
