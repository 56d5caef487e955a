//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that drive a [`Game`] session.

mod input;
pub mod inventory;
pub mod player;
pub mod scene;
pub mod system;

pub use inventory::*;
pub use player::*;
pub use scene::*;
pub use system::*;

use crate::command::{Command, parse_command};
use crate::game::Game;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};

use anyhow::Result;
use log::info;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read-eval-print loop until the player quits.
///
/// Handles prompting, command parsing, and dispatching to the handler
/// modules. Returns when a handler signals `Quit`.
///
/// # Errors
/// - Propagates unexpected terminal failures from the input layer.
pub fn run_repl(game: &mut Game) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new();
    let mut turn = 0usize;

    view.push(ViewItem::EngineMessage(
        "Shape your character with `train`, `untrain`, and `name`, then `begin`. (`help` lists commands.)".into(),
    ));
    describe_scene(game, &mut view);
    view.flush();

    loop {
        turn += 1;
        info!("================> BEGIN TURN {turn} <================");

        let prompt = format!(
            "\n[{} | Lv {} | XP {}/{} | pts {}]>> ",
            game.player.name(),
            game.player.level,
            game.player.experience,
            game.player.required_experience(),
            game.player.ability_points
        )
        .prompt_style()
        .to_string();

        let Ok(input_event) = input_manager.read_line(&prompt) else {
            view.push(ViewItem::Error("Failed to read input. Try again.".into()));
            view.flush();
            continue;
        };

        let input = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".into()));
                view.flush();
                continue;
            },
        };

        match parse_command(&input) {
            Command::Choose(index) => choose_handler(game, &mut view, index),
            Command::Look => look_handler(game, &mut view),
            Command::Inventory => inv_handler(game, &mut view),
            Command::Character => sheet_handler(game, &mut view),
            Command::Train(ability) => train_handler(game, &mut view, &ability),
            Command::Untrain(ability) => untrain_handler(game, &mut view, &ability),
            Command::Drop { item, quantity } => drop_handler(game, &mut view, &item, quantity),
            Command::Name(name) => name_handler(game, &mut view, &name),
            Command::Begin => begin_handler(game, &mut view),
            Command::Save(slot) => save_handler(game, &mut view, &slot),
            Command::Load(slot) => load_handler(game, &mut view, &slot),
            Command::ListSaves => list_saves_handler(&mut view),
            Command::DeleteSave(slot) => delete_save_handler(&mut view, &slot),
            Command::NewGame => new_game_handler(game, &mut view),
            Command::Help => help_handler(game, &mut view),
            Command::Quit => {
                if let ReplControl::Quit = quit_handler(game, &mut view) {
                    view.flush();
                    break;
                }
            },
            Command::Unknown => {
                view.push(ViewItem::Error("Didn't quite catch that. Try `help`.".into()));
            },
        }

        view.flush();
    }

    input_manager.save_history();
    Ok(())
}
