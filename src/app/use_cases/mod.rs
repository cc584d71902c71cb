//! Use-Cases: die eigentliche Command-Logik auf dem AppState.

pub mod editing;
pub mod file_io;
pub mod selection;
