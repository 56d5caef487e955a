//! Scenes: the nodes of the content graph.
//!
//! A scene is identified by its position in the owning manager's scene
//! list. It carries descriptive text and an ordered list of [`Action`]s.

use crate::action::{Action, ActionFlags};
use crate::player::Player;

use questline_data::{SceneDef, SceneTarget};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub name: String,
    pub enter_description: String,
    pub exit_description: String,
    pub image_path: String,
    pub actions: Vec<Action>,
}

impl Scene {
    pub fn from_def(def: &SceneDef) -> Self {
        Self {
            name: def.name.clone(),
            enter_description: def.enter_description.clone(),
            exit_description: def.exit_description.clone(),
            image_path: def.image_path.clone(),
            actions: def.actions.iter().map(Action::from_def).collect(),
        }
    }

    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut Action> {
        self.actions.get_mut(index)
    }

    /// Actions currently shown to the player, paired with their real index
    /// so a menu choice can be mapped back for selection.
    pub fn listed_actions<'a>(&'a self, player: &Player) -> Vec<(usize, &'a Action)> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.listed(player))
            .collect()
    }

    /// Rewrite the trailing return action's description, if this scene has
    /// one. Used to keep "go back" choices naming the actual previous scene.
    pub fn set_return_action(&mut self, description: impl Into<String>) {
        if let Some(last) = self.actions.last_mut()
            && last.target == SceneTarget::Previous
        {
            last.description = description.into();
        }
    }

    /// Merge saved runtime flags back onto this scene's actions by
    /// position. Counts that no longer line up are ignored so edits to
    /// authored content degrade gracefully.
    pub fn copy_action_flags(&mut self, flags: &[ActionFlags]) {
        for (action, saved) in self.actions.iter_mut().zip(flags) {
            action.apply_flags(*saved);
        }
    }

    pub fn action_flags(&self) -> Vec<ActionFlags> {
        self.actions.iter().map(Action::flags).collect()
    }
}
