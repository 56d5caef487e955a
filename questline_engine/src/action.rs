//! Actions: the selectable edges of the scene graph.
//!
//! Authored fields come from the world definition; `enabled`, `removed`,
//! and `selected` are runtime progress state and are the only parts of an
//! action that save files persist.

use crate::item::{ItemCatalog, ItemRef};
use crate::player::Player;
use crate::requirement::Requirement;
use crate::reward::Reward;

use questline_data::{ActionDef, SceneTarget};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Action {
    pub description: String,
    pub consequence: String,
    pub target: SceneTarget,
    pub disable_on_select: bool,
    pub remove_on_select: bool,
    pub secret: bool,
    pub requirement: Requirement,
    pub reward: Reward,
    // runtime progress state
    pub enabled: bool,
    pub removed: bool,
    pub selected: bool,
}

/// Runtime flags persisted into save files, matched back by position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionFlags {
    pub enabled: bool,
    pub removed: bool,
    pub selected: bool,
}

/// What happened when an action fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Whether the action's target asks for a scene change.
    pub navigate: bool,
    pub experience: u64,
    pub levels_gained: u32,
    /// Reward items that didn't fit in the inventory.
    pub rejected: Vec<ItemRef>,
}

impl Action {
    pub fn from_def(def: &ActionDef) -> Self {
        Self {
            description: def.description.clone(),
            consequence: def.consequence.clone(),
            target: def.target,
            disable_on_select: def.disable_on_select,
            remove_on_select: def.remove_on_select,
            secret: def.secret,
            requirement: Requirement::from_def(&def.requirement),
            reward: Reward::from_def(&def.reward),
            enabled: true,
            removed: false,
            selected: false,
        }
    }

    /// True when the action is enabled and the player meets its requirement.
    pub fn requirement_met(&self, player: &Player) -> bool {
        self.enabled && self.requirement.met(&player.character)
    }

    /// Whether the action appears in the player's choice list.
    ///
    /// Secret actions stay hidden until the player could actually take them
    /// (or already has).
    pub fn listed(&self, player: &Player) -> bool {
        !self.removed && (!self.secret || self.selected || self.requirement_met(player))
    }

    /// Select this action: consume the requirement, distribute the reward,
    /// and update the runtime flags.
    ///
    /// Consumption and payout happen only on the first selection; re-taking
    /// a still-enabled action re-navigates without paying or rewarding
    /// again. Returns `None` when the action is disabled.
    pub fn select(&mut self, player: &mut Player, catalog: &ItemCatalog) -> Option<Selection> {
        if !self.enabled {
            return None;
        }
        let mut selection = Selection {
            navigate: self.target.navigates(),
            ..Selection::default()
        };
        if !self.selected {
            self.requirement.consume(&mut player.character);
            let payout = self.reward.distribute(player, catalog);
            selection.experience = payout.experience;
            selection.levels_gained = payout.levels_gained;
            selection.rejected = payout.rejected;
        }
        self.enabled = !self.disable_on_select;
        self.removed = self.remove_on_select;
        self.selected = true;
        Some(selection)
    }

    /// The description shown to the player, with requirement text appended.
    /// Return actions (target `Previous`) show their description alone.
    pub fn display_description(&self, catalog: &ItemCatalog) -> String {
        if matches!(self.target, SceneTarget::Previous) {
            return self.description.clone();
        }
        match self.requirement.describe(catalog) {
            Some(needs) => format!("{} {}", self.description, needs),
            None => self.description.clone(),
        }
    }

    pub fn flags(&self) -> ActionFlags {
        ActionFlags {
            enabled: self.enabled,
            removed: self.removed,
            selected: self.selected,
        }
    }

    pub fn apply_flags(&mut self, flags: ActionFlags) {
        self.enabled = flags.enabled;
        self.removed = flags.removed;
        self.selected = flags.selected;
    }
}
