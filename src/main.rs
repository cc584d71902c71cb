//! Planar Triangulation Editor (Kommandozeile).
//!
//! Lädt oder erzeugt einen Graphen, spielt ein Command-Skript ab und
//! exportiert das Ergebnis als JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use planar_triangulation_editor::{
    parse_script, write_graph_json, AppCommand, AppController, AppState, EditorOptions,
};

#[derive(Parser)]
#[command(name = "planar-triangulation-editor")]
#[command(about = "Editor für planare Triangulierungen mit konvexer Peripherie")]
struct Cli {
    /// Optionen-Datei (TOML); Standard: neben der Binary
    #[arg(long)]
    options: Option<PathBuf>,

    /// Startgraph aus einer JSON-Datei laden
    #[arg(long, conflicts_with = "start")]
    import: Option<PathBuf>,

    /// Mit dem gleichseitigen Start-Dreieck beginnen
    #[arg(long)]
    start: bool,

    /// Command-Skript abspielen (eine Zeile pro Command)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Beim ersten abgelehnten Command abbrechen
    #[arg(long)]
    strict: bool,

    /// Ergebnis als JSON schreiben (`-` = Standardausgabe)
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Planar Triangulation Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let options_path = cli.options.clone().unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&options_path);

    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();

    let mut commands = Vec::new();
    if let Some(path) = cli.import.clone() {
        commands.push(AppCommand::LoadFile { path });
    } else if cli.start {
        commands.push(AppCommand::StartTriangle);
    }
    if let Some(path) = &cli.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Skript {} nicht lesbar", path.display()))?;
        commands.extend(parse_script(&text)?);
    }

    run_commands(&mut controller, &mut state, commands, cli.strict)?;

    if let Some(path) = &cli.export {
        let json = write_graph_json(&state.graph)?;
        if path.as_os_str() == "-" {
            println!("{json}");
        } else {
            std::fs::write(path, json)
                .with_context(|| format!("Export nach {} fehlgeschlagen", path.display()))?;
            log::info!("Graph exportiert nach: {}", path.display());
        }
    }

    log::info!(
        "Fertig: {} Vertices, {} Kanten",
        state.vertex_count(),
        state.edge_count()
    );
    Ok(())
}

fn run_commands(
    controller: &mut AppController,
    state: &mut AppState,
    commands: Vec<AppCommand>,
    strict: bool,
) -> Result<()> {
    for command in commands {
        let label = command.label();
        if let Err(e) = controller.handle_command(state, command) {
            if strict {
                bail!("{} abgelehnt: {}", label, e);
            }
        }
    }
    Ok(())
}
