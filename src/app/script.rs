//! Zeilenbasierte Command-Skripte für die Kommandozeile und Tests.
//!
//! Eine Zeile pro Command, `#` leitet Kommentare ein:
//!
//! ```text
//! start
//! add 1 2            # an Peripherie-Kante 1–2
//! add 1 2 40 -60     # mit erzwungener Position
//! grow 5 42          # 5 Vertices, Seed 42
//! remove 4
//! redraw
//! color 3 #00FF00
//! rotate 15
//! scale 2.5
//! fit 0 0 800 600
//! select 120 80 [radius]
//! undo / redo
//! save graph.json / load graph.json
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use glam::DVec2;

use super::AppCommand;
use crate::core::GraphError;
use crate::geometry::InsertionAnchor;
use crate::shared::PICK_RADIUS;

/// Parst ein komplettes Skript. Der erste Fehler bricht ab.
pub fn parse_script(text: &str) -> Result<Vec<AppCommand>, GraphError> {
    let mut commands = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_line(line).map_err(|message| GraphError::Parse {
            message: format!("Zeile {}: {}", index + 1, message),
        })?;
        commands.push(command);
    }
    Ok(commands)
}

/// `#` beginnt nur am Zeilenanfang oder nach Leerraum einen Kommentar (Farben wie `#FF0000`).
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            let rest = &line[i + 1..];
            // Farbangabe direkt hinter `color <id>` ist kein Kommentar
            if is_color_argument(&line[..i]) && rest.chars().next().is_some_and(|c| c.is_ascii_hexdigit()) {
                continue;
            }
            return &line[..i];
        }
    }
    line
}

fn is_color_argument(prefix: &str) -> bool {
    let mut words = prefix.split_whitespace();
    matches!(
        (words.next(), words.next(), words.next()),
        (Some(keyword), Some(_), None) if keyword.eq_ignore_ascii_case("color")
    )
}

fn parse_line(line: &str) -> Result<AppCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (keyword, args) = match words.split_first() {
        Some((keyword, args)) => (keyword.to_ascii_lowercase(), args),
        None => return Err("leere Zeile".to_string()),
    };

    let command = match (keyword.as_str(), args) {
        ("start", []) => AppCommand::StartTriangle,
        ("add", [u, v]) => AppCommand::Add {
            anchor: InsertionAnchor::Edge {
                u: number(u)?,
                v: number(v)?,
            },
            position: None,
            color: None,
        },
        ("add", [u, v, x, y]) => AppCommand::Add {
            anchor: InsertionAnchor::Edge {
                u: number(u)?,
                v: number(v)?,
            },
            position: Some(DVec2::new(number(x)?, number(y)?)),
            color: None,
        },
        ("grow", [count]) => AppCommand::Grow {
            count: number(count)?,
            seed: None,
        },
        ("grow", [count, seed]) => AppCommand::Grow {
            count: number(count)?,
            seed: Some(number(seed)?),
        },
        ("remove", [id]) => AppCommand::Remove {
            vertex_id: number(id)?,
        },
        ("redraw", []) => AppCommand::Redraw,
        ("color", [id, color]) => AppCommand::Color {
            vertex_id: number(id)?,
            color: color.to_string(),
        },
        ("rotate", [degrees]) => AppCommand::Transform {
            rotation_deg: number(degrees)?,
            scale: 1.0,
            center: None,
        },
        ("scale", [factor]) => AppCommand::Transform {
            rotation_deg: 0.0,
            scale: number(factor)?,
            center: None,
        },
        ("fit", [x0, y0, x1, y1]) => AppCommand::FitToBounds {
            min: DVec2::new(number(x0)?, number(y0)?),
            max: DVec2::new(number(x1)?, number(y1)?),
        },
        ("select", [x, y]) => AppCommand::Select {
            point: DVec2::new(number(x)?, number(y)?),
            max_distance: PICK_RADIUS,
            additive: false,
        },
        ("select", [x, y, radius]) => AppCommand::Select {
            point: DVec2::new(number(x)?, number(y)?),
            max_distance: number(radius)?,
            additive: false,
        },
        ("clear", []) => AppCommand::ClearSelection,
        ("undo", []) => AppCommand::Undo,
        ("redo", []) => AppCommand::Redo,
        ("save", [path]) => AppCommand::SaveFile {
            path: PathBuf::from(path),
        },
        ("load", [path]) => AppCommand::LoadFile {
            path: PathBuf::from(path),
        },
        (other, args) => {
            return Err(format!(
                "unbekannter Befehl '{}' mit {} Argumenten",
                other,
                args.len()
            ))
        }
    };
    Ok(command)
}

fn number<T: FromStr>(word: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("'{}' ist keine gültige Zahl", word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_session() {
        let script = "\
            # Sitzung\n\
            start\n\
            add 1 2\n\
            grow 3 42   # reproduzierbar\n\
            color 4 #00FF00\n\
            rotate 15\n\
            fit 0 0 800 600\n\
            undo\n";

        let commands = parse_script(script).expect("Skript erwartet");
        assert_eq!(commands.len(), 7);
        assert_eq!(commands[0], AppCommand::StartTriangle);
        assert_eq!(
            commands[2],
            AppCommand::Grow {
                count: 3,
                seed: Some(42)
            }
        );
        assert_eq!(
            commands[3],
            AppCommand::Color {
                vertex_id: 4,
                color: "#00FF00".to_string()
            }
        );
        assert_eq!(commands[6], AppCommand::Undo);
    }

    #[test]
    fn forced_position_is_parsed() {
        let commands = parse_script("add 1 3 40.5 -60").expect("Skript erwartet");
        assert_eq!(
            commands,
            vec![AppCommand::Add {
                anchor: InsertionAnchor::Edge { u: 1, v: 3 },
                position: Some(DVec2::new(40.5, -60.0)),
                color: None,
            }]
        );
    }

    #[test]
    fn error_names_the_line() {
        let err = parse_script("start\nremove vier\n").unwrap_err();
        match err {
            GraphError::Parse { message } => assert!(message.starts_with("Zeile 2:")),
            other => panic!("Parse-Fehler erwartet, erhalten: {other:?}"),
        }
        assert!(parse_script("jump 3").is_err());
    }
}
