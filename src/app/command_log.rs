//! Begrenztes Command-Log: jeder ausgeführte Command mit Ergebnis.

use super::{AppCommand, CommandReport};
use crate::core::GraphError;

/// Ein ausgeführter Command samt Ausgang.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLogEntry {
    /// Der Command
    pub command: AppCommand,
    /// Wurde er übernommen?
    pub accepted: bool,
    /// Hat er einen neuen Graphen übernommen?
    pub changed_graph: bool,
    /// Zusammenfassung bzw. Fehlermeldung
    pub message: String,
}

impl CommandLogEntry {
    /// Baut einen Eintrag aus Command und Ergebnis.
    pub fn new(command: AppCommand, result: &Result<CommandReport, GraphError>) -> Self {
        let (accepted, message) = match result {
            Ok(report) => (true, report.summary.clone()),
            Err(e) => (false, e.to_string()),
        };
        let changed_graph = accepted && command.mutates_graph();
        Self {
            command,
            accepted,
            changed_graph,
            message,
        }
    }
}

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<CommandLogEntry>,
    max_entries: usize,
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log mit Obergrenze.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Fügt einen Eintrag hinzu; der älteste fällt bei Überlauf heraus.
    pub fn record(&mut self, entry: CommandLogEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[CommandLogEntry] {
        &self.entries
    }

    /// Letzter Eintrag.
    pub fn last(&self) -> Option<&CommandLogEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_dropped_at_limit() {
        let mut log = CommandLog::new(2);
        log.record(CommandLogEntry::new(AppCommand::Redraw, &Ok(CommandReport::new("a"))));
        log.record(CommandLogEntry::new(AppCommand::Undo, &Err(GraphError::NothingTo { action: "Undo" })));
        log.record(CommandLogEntry::new(AppCommand::StartTriangle, &Ok(CommandReport::new("c"))));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].command, AppCommand::Undo);
        assert!(!log.entries()[0].accepted);
        assert_eq!(log.last().map(|e| e.message.as_str()), Some("c"));
    }

    #[test]
    fn only_accepted_mutations_count_as_graph_changes() {
        let ok = Ok(CommandReport::new("ok"));
        let select = AppCommand::Select {
            point: glam::DVec2::ZERO,
            max_distance: 5.0,
            additive: false,
        };

        assert!(CommandLogEntry::new(AppCommand::Redraw, &ok).changed_graph);
        assert!(!CommandLogEntry::new(select, &ok).changed_graph);
        assert!(!CommandLogEntry::new(
            AppCommand::Remove { vertex_id: 1 },
            &Err(GraphError::Degenerate { vertex_count: 3 })
        )
        .changed_graph);
    }
}
