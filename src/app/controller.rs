//! Application Controller für zentrale Event-Verarbeitung.

use super::command_log::CommandLogEntry;
use super::render_scene;
use super::state::CommandPhase;
use super::{AppCommand, AppIntent, AppState, CommandReport};
use crate::core::GraphError;
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Bricht beim ersten abgelehnten Command ab; bereits übernommene
    /// Commands derselben Sequenz bleiben bestehen.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        intent: AppIntent,
    ) -> Result<Vec<CommandReport>, GraphError> {
        let commands = self.map_intent_to_commands(state, intent);
        let mut reports = Vec::with_capacity(commands.len());
        for command in commands {
            reports.push(self.handle_command(state, command)?);
        }
        Ok(reports)
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt einen Command auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> Result<CommandReport, GraphError> {
        use super::handlers;

        let logged = command.clone();
        log::debug!("Command: {}", logged.label());

        let result = match command {
            // === Selektion ===
            AppCommand::Select {
                point,
                max_distance,
                additive,
            } => handlers::selection::select(state, point, max_distance, additive),
            AppCommand::ClearSelection => handlers::selection::clear(state),

            // === Struktur ===
            AppCommand::Remove { vertex_id } => handlers::editing::remove(state, vertex_id),
            AppCommand::Add {
                anchor,
                position,
                color,
            } => handlers::editing::add(state, anchor, position, color),
            AppCommand::Grow { count, seed } => handlers::editing::grow(state, count, seed),
            AppCommand::StartTriangle => handlers::editing::start_triangle(state),

            // === Geometrie ===
            AppCommand::Redraw => handlers::editing::redraw(state),
            AppCommand::Transform {
                rotation_deg,
                scale,
                center,
            } => handlers::editing::transform(state, rotation_deg, scale, center),
            AppCommand::FitToBounds { min, max } => handlers::editing::fit_to_bounds(state, min, max),

            // === Attribute ===
            AppCommand::Color { vertex_id, color } => handlers::editing::color(state, vertex_id, color),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Datei-I/O ===
            AppCommand::Import { json } => handlers::file_io::import(state, &json),
            AppCommand::LoadFile { path } => handlers::file_io::load(state, path),
            AppCommand::SaveFile { path } => handlers::file_io::save(state, path),
        };

        state
            .command_log
            .record(CommandLogEntry::new(logged, &result));
        state.last_result = Some(result.clone());
        state.phase = CommandPhase::Idle;
        result
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
