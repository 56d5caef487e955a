#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Questline Editor **
//! Command-driven CRUD over a world's scenes, actions, and items.

mod commands;
mod session;
mod undo;

use commands::parse_editor_command;
use session::{EditorControl, EditorSession};

use anyhow::Result;
use colored::Colorize;
use log::info;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::env;
use std::path::PathBuf;

const DEFAULT_WORLD_PATH: &str = "questline_engine/data/world.ron";

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_WORLD_PATH), PathBuf::from);
    let mut session = EditorSession::open(path)?;

    println!("{}", "QUESTLINE EDITOR".bright_yellow().underline());
    println!(
        "editing {} -- {} scene(s), {} item(s). `help` lists commands.\n",
        session.path.display(),
        session.world.scenes.len(),
        session.world.items.len()
    );

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("edit>> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                line
            },
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => "quit".to_string(),
            Err(err) => return Err(err.into()),
        };

        let command = parse_editor_command(&line);
        if session.dispatch(command) == EditorControl::Quit {
            break;
        }
    }

    info!("editor session ended");
    Ok(())
}
