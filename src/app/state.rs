//! Application State — zentrale Datenhaltung.

mod app_state;
mod selection;

pub use app_state::AppState;
pub use selection::SelectionState;

/// Phase der Command-Ausführung.
///
/// `Idle → Simulating → {Committed, Rejected} → Idle`; zwischen zwei
/// Commands steht der Zustand immer auf `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandPhase {
    /// Kein Command aktiv
    #[default]
    Idle,
    /// Command läuft auf einer privaten Kopie des Graphen
    Simulating,
    /// Kopie wurde übernommen
    Committed,
    /// Kopie wurde verworfen
    Rejected,
}
