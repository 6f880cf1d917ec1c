//! Interactive command prompt.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use valet::{ErrorClass, Response, Valet};
use valet_config::{Paths, ValetConfig};

use crate::style::colors::SemanticStyle;
use crate::style::{print_hint, print_status_table};

/// Help text for the REPL.
const HELP_TEXT: &str = r"
Valet REPL

Meta-commands:
  .help          Show this help message
  .status        Show parked cars
  .exit          Exit the REPL
  .quit          Exit the REPL

Commands:
  create_parking_lot <slots>
  park <registration> [driver_age] <age>
  leave <slot>
  slot_numbers_for_driver_of_age <age>
  vehicle_registration_number_for_driver_of_age <age>
  slot_number_for_car_with_number <registration>

Tips:
  - Commands are case-sensitive
  - Press Ctrl+C to clear the line
  - Press Ctrl+D to exit
";

pub fn run(config: &ValetConfig) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to start line editor")?;
    let history = history_file(config);

    if let Some(path) = &history {
        // Missing on first run.
        if let Err(e) = editor.load_history(path) {
            tracing::debug!(error = %e, path = %path.display(), "no REPL history loaded");
        }
    }

    println!("Valet REPL");
    println!();
    println!("Type .help for help, .exit to quit.");
    println!();

    let valet = Valet::new();

    loop {
        let line = match editor.readline(&config.repl.prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(trimmed) {
            tracing::debug!(error = %e, "cannot record history entry");
        }

        if trimmed.starts_with('.') {
            match handle_meta_command(trimmed, &valet) {
                MetaResult::Continue => continue,
                MetaResult::Exit => break,
            }
        }

        print_response(&valet.respond(trimmed));
    }

    if let Some(path) = &history {
        save_history(&mut editor, path);
    }

    Ok(())
}

enum MetaResult {
    Continue,
    Exit,
}

fn handle_meta_command(cmd: &str, valet: &Valet) -> MetaResult {
    let cmd_lower = cmd.to_lowercase();

    match cmd_lower.split_whitespace().next() {
        Some(".help" | ".h") => {
            println!("{HELP_TEXT}");
            MetaResult::Continue
        }
        Some(".exit" | ".quit" | ".q") => {
            println!("Goodbye!");
            MetaResult::Exit
        }
        Some(".status") => {
            show_status(valet);
            MetaResult::Continue
        }
        Some(other) => {
            println!("Unknown command: {other}");
            println!("Type .help for available commands.");
            MetaResult::Continue
        }
        None => MetaResult::Continue,
    }
}

fn show_status(valet: &Valet) {
    match (valet.capacity(), valet.status()) {
        (Ok(None), _) => print_hint("No parking lot yet. Try: create_parking_lot 6"),
        (Ok(Some(capacity)), Ok(tickets)) => print_status_table(capacity, &tickets),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "cannot read lot status");
            print_response(&Response::system_error());
        }
    }
}

fn print_response(response: &Response) {
    match response.error {
        None => println!("{}", response.text),
        Some(ErrorClass::Domain) => println!("{}", response.text.warning()),
        Some(ErrorClass::Rejected | ErrorClass::System) => println!("{}", response.text.error()),
    }
}

fn history_file(config: &ValetConfig) -> Option<PathBuf> {
    if !config.repl.history {
        return None;
    }
    match Paths::new().history_file() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "REPL history disabled");
            None
        }
    }
}

fn save_history(editor: &mut DefaultEditor, path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!(error = %e, path = %parent.display(), "cannot create history directory");
        return;
    }
    if let Err(e) = editor.save_history(path) {
        tracing::warn!(error = %e, path = %path.display(), "cannot save REPL history");
    }
}
