use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::add_vertex::insert_at_anchor;
use crate::app::transaction::{self, CommandContext};
use crate::app::{AppState, CommandReport};
use crate::core::{GraphError, PlanarGraph};
use crate::geometry::{InsertionAnchor, InsertionOutcome};

/// Fügt bis zu `count` Vertices an zufällig gewählten Peripherie-Kanten ein.
///
/// Pro Schritt wird die Kantenreihenfolge neu gemischt und die erste
/// gültige Einfügung genommen. Kein Schritt erfolgreich: Abbruch. Wurde
/// mindestens ein Vertex eingefügt, wird das Ergebnis übernommen.
pub fn grow(state: &mut AppState, count: usize, seed: Option<u64>) -> Result<CommandReport, GraphError> {
    if count == 0 {
        return Err(GraphError::InvalidParameter {
            name: "count",
            value: count.to_string(),
        });
    }

    transaction::execute(state, "Grow", |graph, ctx| match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seeded = CommandContext {
                options: ctx.options,
                rng: &mut rng,
            };
            grow_on(graph, &mut seeded, count)
        }
        None => grow_on(graph, ctx, count),
    })
}

fn grow_on(
    graph: &mut PlanarGraph,
    ctx: &mut CommandContext<'_>,
    count: usize,
) -> Result<CommandReport, GraphError> {
    if graph.vertex_count() < 3 {
        return Err(GraphError::Degenerate {
            vertex_count: graph.vertex_count(),
        });
    }

    let mut added_vertices = Vec::new();
    let mut added_edges = Vec::new();
    let mut last_error = None;

    for step in 0..count {
        if graph.vertex_count() >= ctx.options.max_vertices {
            last_error = Some(GraphError::CapacityExceeded {
                limit: ctx.options.max_vertices,
            });
            break;
        }

        let mut candidates = graph.periphery_edges();
        candidates.shuffle(&mut *ctx.rng);

        let mut inserted = None;
        for (u, v) in candidates {
            match try_insert(graph, ctx, &InsertionAnchor::Edge { u, v }) {
                Ok(outcome) => {
                    inserted = Some(outcome);
                    break;
                }
                Err(e) => last_error = Some(e),
            }
        }

        let Some(outcome) = inserted else {
            log::debug!("Grow: Schritt {} ohne gültige Kante, Abbruch", step + 1);
            break;
        };
        added_vertices.push(outcome.vertex_id);
        added_edges.extend(outcome.edge_ids);
    }

    if added_vertices.is_empty() {
        return Err(last_error.unwrap_or(GraphError::Degenerate {
            vertex_count: graph.vertex_count(),
        }));
    }
    if added_vertices.len() < count {
        log::info!(
            "Grow: {} von {} Vertices eingefügt",
            added_vertices.len(),
            count
        );
    }

    Ok(CommandReport::new(format!("{} Vertices gewachsen", added_vertices.len()))
        .with_vertices(added_vertices)
        .with_edges(added_edges))
}

/// Einzelversuch; ein gescheiterter Versuch hinterlässt den Graphen unverändert.
fn try_insert(
    graph: &mut PlanarGraph,
    ctx: &mut CommandContext<'_>,
    anchor: &InsertionAnchor,
) -> Result<InsertionOutcome, GraphError> {
    if !ctx.options.relax_on_add {
        return insert_at_anchor(graph, ctx, anchor, None, None);
    }
    // Gescheiterte Relaxation lässt verschobene Positionen zurück
    let mut trial = graph.clone();
    let outcome = insert_at_anchor(&mut trial, ctx, anchor, None, None)?;
    *graph = trial;
    Ok(outcome)
}
