//! Builder für Render-Szenen aus dem AppState.

use std::sync::Arc;

use crate::app::AppState;
use crate::shared::{CommandFeedback, RenderScene};

/// Baut eine RenderScene aus dem aktuellen AppState.
///
/// Graph und Selektion werden per Arc geteilt; die Szene zeigt immer den
/// zuletzt committeten Stand.
pub fn build(state: &AppState) -> RenderScene {
    let last_feedback = state.last_result.as_ref().map(|result| match result {
        Ok(report) => CommandFeedback {
            accepted: true,
            message: report.summary.clone(),
        },
        Err(e) => CommandFeedback {
            accepted: false,
            message: e.to_string(),
        },
    });

    RenderScene {
        graph: Arc::clone(&state.graph),
        selected_vertex_ids: Arc::clone(&state.selection.selected_vertex_ids),
        selected_edge: state.selection.selected_edge,
        last_feedback,
        options: state.options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::{AppCommand, AppController, AppState};
    use std::sync::Arc;

    #[test]
    fn scene_shares_committed_graph_and_reports_rejection() {
        let mut controller = AppController::new();
        let mut state = AppState::new();
        controller
            .handle_command(&mut state, AppCommand::StartTriangle)
            .expect("Start-Dreieck erwartet");

        let scene = build(&state);
        assert!(Arc::ptr_eq(&scene.graph, &state.graph));
        assert!(scene.last_feedback.as_ref().is_some_and(|f| f.accepted));

        let _ = controller.handle_command(&mut state, AppCommand::Remove { vertex_id: 99 });
        let scene = build(&state);
        assert!(scene.last_feedback.as_ref().is_some_and(|f| !f.accepted));
        assert_eq!(scene.graph.vertex_count(), 3);
    }
}
