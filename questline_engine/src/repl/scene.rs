//! `repl::scene` module
//!
//! Handlers for describing the current scene and selecting actions.

use crate::game::Game;
use crate::scene_manager::{SceneManager, SelectionResult};
use crate::view::{ActionLine, View, ViewItem};

use log::info;

/// Push the current scene's heading, description, and choice list.
pub fn describe_scene(game: &Game, view: &mut View) {
    let Some(scene) = game.manager.current() else {
        view.push(ViewItem::Error("There is nowhere to be. The world failed to load.".into()));
        return;
    };
    view.push(ViewItem::SceneHeading(scene.name.clone()));
    view.push(ViewItem::SceneDescription(game.manager.scene_description()));

    let lines = scene
        .listed_actions(&game.player)
        .into_iter()
        .enumerate()
        .map(|(number, (_, action))| ActionLine {
            number: number + 1,
            description: action.display_description(&game.catalog),
            available: action.requirement_met(&game.player),
            taken: action.selected,
        })
        .collect();
    view.push(ViewItem::ActionList(lines));
}

/// Handle a numeric menu choice, mapping it back to the real action index.
pub fn choose_handler(game: &mut Game, view: &mut View, choice: usize) {
    if game.creating {
        view.push(ViewItem::ActionFailure(
            "Finish your character first -- `begin` when you're ready.".into(),
        ));
        return;
    }
    let Some(scene) = game.manager.current() else {
        view.push(ViewItem::Error("No scene is loaded.".into()));
        return;
    };
    let listed = scene.listed_actions(&game.player);
    let Some((index, _)) = listed.get(choice) else {
        view.push(ViewItem::ActionFailure("That isn't one of your options.".into()));
        return;
    };
    let index = *index;

    match game.select_action(index) {
        SelectionResult::NoAction => {
            view.push(ViewItem::ActionFailure("That isn't one of your options.".into()));
        },
        SelectionResult::RequirementNotMet => {
            view.push(ViewItem::ActionFailure("You can't do that yet.".into()));
        },
        SelectionResult::Performed { selection, navigated } => {
            info!("action {index} performed (navigated: {navigated})");
            if selection.experience > 0 || selection.levels_gained > 0 {
                view.push(ViewItem::ExperienceGain {
                    experience: selection.experience,
                    levels_gained: selection.levels_gained,
                });
            }
            if !selection.rejected.is_empty() {
                view.push(ViewItem::ActionFailure(format!(
                    "Your pack is full. Left behind: {}.",
                    SceneManager::describe_rejected(&selection.rejected, &game.catalog)
                )));
            }
            if navigated {
                describe_scene(game, view);
            } else if let Some(action) = game.manager.current().and_then(|scene| scene.action(index))
                && !action.consequence.is_empty()
            {
                view.push(ViewItem::Consequence(action.consequence.clone()));
            }
        },
    }
}

/// Re-describe the current scene on demand.
pub fn look_handler(game: &Game, view: &mut View) {
    describe_scene(game, view);
}
