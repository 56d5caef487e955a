//! `repl::system` module
//!
//! Handlers for save/load, the save list, new game, help, and quit.

use crate::game::Game;
use crate::repl::ReplControl;
use crate::repl::scene::describe_scene;
use crate::save_files::{active_save_dir, build_save_entries, delete_save};
use crate::view::{View, ViewItem};

use log::{info, warn};

/// Quit the game.
pub fn quit_handler(game: &Game, view: &mut View) -> ReplControl {
    info!(
        "{} quit at level {} on scene {}",
        game.player.name(),
        game.player.level,
        game.manager.current_index()
    );
    view.push(ViewItem::EngineMessage(format!(
        "Farewell, {}. The road will keep.",
        game.player.name()
    )));
    ReplControl::Quit
}

/// Show available commands.
pub fn help_handler(game: &Game, view: &mut View) {
    view.push(ViewItem::Help { creating: game.creating });
}

/// Save the current session under a slot name.
pub fn save_handler(game: &Game, view: &mut View, slot: &str) {
    match game.save(slot) {
        Ok(()) => view.push(ViewItem::EngineMessage(format!("Game saved as '{slot}'."))),
        Err(err) => {
            warn!("save '{slot}' failed: {err:#}");
            view.push(ViewItem::Error(format!("Couldn't save '{slot}': {err}")));
        },
    }
}

/// Restore a saved session and re-describe where the player ended up.
pub fn load_handler(game: &mut Game, view: &mut View, slot: &str) {
    match game.load_save(slot) {
        Ok(()) => {
            view.push(ViewItem::EngineMessage(format!("Save '{slot}' loaded. Sally forth.")));
            describe_scene(game, view);
        },
        Err(err) => {
            warn!("load '{slot}' failed: {err:#}");
            view.push(ViewItem::Error(format!("Couldn't load '{slot}': {err}")));
        },
    }
}

/// List discovered save files with status and summaries.
pub fn list_saves_handler(view: &mut View) {
    match build_save_entries(&active_save_dir()) {
        Ok(entries) => view.push(ViewItem::SaveList(entries)),
        Err(err) => {
            warn!("listing saves failed: {err:#}");
            view.push(ViewItem::Error(format!("Couldn't list saved games: {err}")));
        },
    }
}

/// Delete a save slot.
pub fn delete_save_handler(view: &mut View, slot: &str) {
    match delete_save(&active_save_dir(), slot) {
        Ok(()) => view.push(ViewItem::EngineMessage(format!("Deleted save '{slot}'."))),
        Err(err) => view.push(ViewItem::Error(format!("Couldn't delete '{slot}': {err}"))),
    }
}

/// Start over from scene zero with a fresh character.
pub fn new_game_handler(game: &mut Game, view: &mut View) {
    game.new_game();
    view.push(ViewItem::EngineMessage(
        "A new journey. Shape your character with `train`, `untrain`, and `name`, then `begin`.".into(),
    ));
    describe_scene(game, view);
}
