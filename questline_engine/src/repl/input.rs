//! Terminal input handling for the Questline REPL.
//!
//! Wraps rustyline configuration, history, and completion tailored to the
//! engine's command set and save-file workflow.

use std::path::PathBuf;

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::save_files::{active_save_dir, collect_save_slots};

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

const COMMAND_TERMS: &[&str] = &[
    "begin",
    "character",
    "delete",
    "drop",
    "help",
    "inventory",
    "load",
    "look",
    "name",
    "new",
    "quit",
    "save",
    "saves",
    "stats",
    "train",
    "untrain",
];

/// Commands whose argument completes to a save-slot name.
const SLOT_COMMANDS: &[&str] = &["load", "delete"];

type ReplEditor = rustyline::Editor<QuestlineHelper, DefaultHistory>;

#[derive(Default)]
struct QuestlineHelper;

impl Helper for QuestlineHelper {}

impl Completer for QuestlineHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if let Some((replacement_start, candidates)) = slot_completions(&prefix, start) {
            return Ok((replacement_start, candidates));
        }
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&lower))
            .map(|term| Pair {
                display: (*term).to_string(),
                replacement: (*term).to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for QuestlineHelper {
    type Hint = String;
}

impl Highlighter for QuestlineHelper {}

impl Validator for QuestlineHelper {}

/// Reads player input with history and completion support.
pub struct InputManager {
    editor: Option<ReplEditor>,
    history_path: Option<PathBuf>,
}

impl InputManager {
    pub fn new() -> Self {
        let history_path = history_file();
        let editor = match rustyline::Editor::new() {
            Ok(mut editor) => {
                editor.set_helper(Some(QuestlineHelper));
                if let Some(path) = &history_path
                    && editor.load_history(path).is_ok()
                {
                    info!("command history loaded from {}", path.display());
                }
                Some(editor)
            },
            Err(err) => {
                warn!("line editor unavailable ({err}); falling back to plain stdin");
                None
            },
        };
        Self { editor, history_path }
    }

    /// Read one line, translating terminal signals into [`InputEvent`]s.
    ///
    /// # Errors
    /// Returns an error only for unexpected terminal failures.
    pub fn read_line(&mut self, prompt: &str) -> rustyline::Result<InputEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return read_plain(prompt);
        };
        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                Ok(InputEvent::Line(line))
            },
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(err) => Err(err),
        }
    }

    /// Persist command history for the next session.
    pub fn save_history(&mut self) {
        if let (Some(editor), Some(path)) = (self.editor.as_mut(), self.history_path.as_ref())
            && let Err(err) = editor.save_history(path)
        {
            warn!("failed to save command history to {}: {err}", path.display());
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

fn read_plain(prompt: &str) -> rustyline::Result<InputEvent> {
    use std::io::Write;
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    Ok(InputEvent::Line(line))
}

/// Where command history lives, under the user's data directory.
fn history_file() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("questline");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history.txt"))
}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

/// Complete `load`/`delete` arguments with discovered save slot names.
fn slot_completions(prefix: &str, start: usize) -> Option<(usize, Vec<Pair>)> {
    let command = prefix.split_whitespace().next()?;
    if !SLOT_COMMANDS.contains(&command) {
        return None;
    }
    let after_command = prefix.strip_prefix(command)?.trim_start();
    let arg_start = start + prefix.len() - after_command.len();
    let slots = collect_save_slots(&active_save_dir()).ok()?;
    let candidates = slots
        .into_iter()
        .filter(|slot| slot.slot.starts_with(after_command))
        .map(|slot| Pair {
            display: slot.slot.clone(),
            replacement: slot.slot,
        })
        .collect();
    Some((arg_start, candidates))
}
