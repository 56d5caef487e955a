//! `repl::player` module
//!
//! Handlers for the character sheet, ability training, and creation-phase
//! commands.

use crate::game::Game;
use crate::view::{SheetData, View, ViewItem};

use log::info;
use questline_data::AbilityKind;

/// Show the character sheet with derived bonuses.
pub fn sheet_handler(game: &Game, view: &mut View) {
    let player = &game.player;
    let character = &player.character;
    view.push(ViewItem::CharacterSheet(Box::new(SheetData {
        name: character.name.clone(),
        level: player.level,
        experience: player.experience,
        required_experience: player.required_experience(),
        ability_points: player.ability_points,
        abilities: character.abilities.iter().collect(),
        crafting_bonus: character.crafting_bonus(),
        enchanting_bonus: character.enchanting_bonus(),
        dodge_bonus: character.dodge_bonus(),
        run_bonus: character.run_bonus(),
        power_level: character.power_level(),
    })));
}

/// Spend one ability point raising an ability.
pub fn train_handler(game: &mut Game, view: &mut View, ability: &str) {
    let Some(kind) = AbilityKind::from_name(ability) else {
        unknown_ability(view, ability);
        return;
    };
    if game.player.modify_ability_score(kind, 1, false) {
        info!("player trained {kind} to {}", game.player.ability_score(kind));
        view.push(ViewItem::ActionSuccess(format!(
            "{kind} is now {} ({} point(s) left).",
            game.player.ability_score(kind),
            game.player.ability_points
        )));
    } else if game.player.ability_points == 0 {
        view.push(ViewItem::ActionFailure("You have no ability points to spend.".into()));
    } else {
        view.push(ViewItem::ActionFailure(format!("{kind} can't go any higher.")));
    }
}

/// Take a point back out of an ability. Only legal while the character is
/// still being created.
pub fn untrain_handler(game: &mut Game, view: &mut View, ability: &str) {
    if !game.creating {
        view.push(ViewItem::ActionFailure(
            "Your build is locked in. Training only goes forward now.".into(),
        ));
        return;
    }
    let Some(kind) = AbilityKind::from_name(ability) else {
        unknown_ability(view, ability);
        return;
    };
    if game.player.modify_ability_score(kind, -1, true) {
        view.push(ViewItem::ActionSuccess(format!(
            "{kind} is now {} ({} point(s) to spend).",
            game.player.ability_score(kind),
            game.player.ability_points
        )));
    } else {
        view.push(ViewItem::ActionFailure(format!("{kind} can't go any lower.")));
    }
}

/// Rename the character during creation.
pub fn name_handler(game: &mut Game, view: &mut View, name: &str) {
    if !game.creating {
        view.push(ViewItem::ActionFailure("It's a bit late to change who you are.".into()));
        return;
    }
    game.player.character.name = name.to_string();
    view.push(ViewItem::ActionSuccess(format!("Very well, {name}.")));
}

/// Lock in the build and start playing.
pub fn begin_handler(game: &mut Game, view: &mut View) {
    if !game.creating {
        view.push(ViewItem::EngineMessage("You are already underway.".into()));
        return;
    }
    game.begin();
    view.push(ViewItem::EngineMessage(format!(
        "{} sets out with {} unspent point(s).",
        game.player.name(),
        game.player.ability_points
    )));
}

fn unknown_ability(view: &mut View, ability: &str) {
    view.push(ViewItem::Error(format!(
        "\"{ability}\"? Abilities are dexterity, intelligence, strength, will, and wisdom."
    )));
}
