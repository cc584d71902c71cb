//! All-or-nothing-Ausführung geometrieverändernder Commands.
//!
//! Der Command mutiert eine private Kopie des Graphen. Nur wenn die
//! Mutation und der anschließende Invarianten-Check gelingen, wird die
//! Kopie als neuer `Arc` übernommen; sonst wird sie verworfen und der
//! Live-Graph bleibt unverändert.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use super::state::CommandPhase;
use super::{AppState, CommandReport};
use crate::core::{GraphError, PlanarGraph};
use crate::geometry::check_global_invariants;
use crate::shared::EditorOptions;

/// Kontext für die Mutation: Optionen und Zufallsquelle.
pub struct CommandContext<'a> {
    /// Laufzeit-Optionen
    pub options: &'a EditorOptions,
    /// Zufallsquelle der Sitzung
    pub rng: &'a mut StdRng,
}

impl CommandContext<'_> {
    /// Zufällige Farbe aus der Palette.
    pub fn random_palette_color(&mut self) -> String {
        let len = self.options.vertex_palette.len().max(1);
        let index = self.rng.gen_range(0..len);
        self.options.palette_color(index)
    }
}

/// Führt `mutate` auf einer Kopie des Live-Graphen aus und übernimmt sie bei Erfolg.
pub fn execute<F>(state: &mut AppState, label: &str, mutate: F) -> Result<CommandReport, GraphError>
where
    F: FnOnce(&mut PlanarGraph, &mut CommandContext<'_>) -> Result<CommandReport, GraphError>,
{
    state.phase = CommandPhase::Simulating;
    log::debug!("{}: simuliere auf Kopie", label);

    let (next_vertex_id, next_edge_id) = state.next_ids;
    let mut scratch = PlanarGraph::clone(&state.graph);
    scratch.reserve_ids(next_vertex_id, next_edge_id);
    let mut ctx = CommandContext {
        options: &state.options,
        rng: &mut state.rng,
    };
    let outcome = mutate(&mut scratch, &mut ctx).and_then(|report| {
        scratch.ensure_spatial_index();
        check_global_invariants(&scratch, &state.options.geometry)
            .map_err(|violations| GraphError::Validation { violations })?;
        Ok(report)
    });

    match outcome {
        Ok(report) => {
            // Ersetzte Graphen (Import) erben die Sitzungszähler
            scratch.reserve_ids(next_vertex_id, next_edge_id);
            state.next_ids = (scratch.peek_next_vertex_id(), scratch.peek_next_edge_id());
            state.record_undo_snapshot();
            state.selection.retain_existing(&scratch);
            state.graph = Arc::new(scratch);
            state.phase = CommandPhase::Committed;
            log::info!("{} übernommen: {}", label, report.summary);
            Ok(report)
        }
        Err(e) => {
            state.phase = CommandPhase::Rejected;
            log::warn!("{} abgelehnt: {}", label, e);
            Err(e)
        }
    }
}
